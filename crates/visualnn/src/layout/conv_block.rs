//! LeNet-style geometry for a convolutional layer.
//!
//! A convolutional layer is drawn as a stack of nested rectangles, one per
//! channel, each shifted right and down from the previous one so the stack
//! recedes like a 3D box. A small highlighted rectangle inset into the front
//! rectangle stands for the receptive field and anchors the connectors to the
//! next block.

use log::debug;

use visualnn_core::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point},
    scene::{Shape, Trace},
};

use crate::VisualNnError;

/// Outline width of channel and highlight rectangles.
const OUTLINE_WIDTH: f32 = 2.0;
/// Fill opacity of the receptive-field highlight.
const HIGHLIGHT_ALPHA: f32 = 0.9;

/// Visual parameters shared by all conv blocks of a network.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvBlockParams {
    /// The two alternating channel colors.
    pub channel_colors: [Color; 2],
    /// Color of the receptive-field highlight.
    pub highlight_color: Color,
    /// Fill opacity of the channel rectangles.
    pub transparency: f32,
    /// Horizontal shift between two consecutive channels.
    pub x_shift: f32,
    /// Vertical shift between two consecutive channels.
    pub y_shift: f32,
}

impl Default for ConvBlockParams {
    fn default() -> Self {
        Self {
            channel_colors: [Color::from_rgb(128, 0, 128), Color::from_rgb(45, 0, 65)],
            highlight_color: Color::from_rgb(230, 0, 230),
            transparency: 0.9,
            x_shift: 2.0,
            y_shift: 5.0,
        }
    }
}

/// Geometry of one convolutional layer.
///
/// All rectangles are computed at construction. Channel `i` is the initial
/// rectangle shifted by `(i * x_shift, -i * y_shift)`, so the last channel is
/// the front of the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvBlock {
    channels: usize,
    colors: [Color; 2],
    highlight_color: Color,
    transparency: f32,
    rectangles: Vec<Bounds>,
    inset: Bounds,
    label: String,
    label_position: Point,
}

impl ConvBlock {
    /// Lays out a block of `channels` rectangles around `(x_init, y_mid)`.
    ///
    /// `layer_shape` is `(width, height)`; rectangles are `max(width, height)`
    /// tall and half as wide.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Layout`] if `channels` is zero.
    pub fn new(
        x_init: f32,
        y_mid: f32,
        layer_shape: (usize, usize),
        channels: usize,
        params: &ConvBlockParams,
    ) -> Result<Self, VisualNnError> {
        if channels == 0 {
            return Err(VisualNnError::Layout(
                "a convolutional block needs at least one channel".to_string(),
            ));
        }

        let (width, height) = layer_shape;
        let n_h = width.max(height) as f32;
        let n_w = (n_h / 2.0).floor();

        // Even stacks start with the first color so the front channel always
        // ends up in the second one.
        let [first, second] = params.channel_colors;
        let colors = if channels % 2 == 0 {
            [first, second]
        } else {
            [second, first]
        };

        let half_stack = channels as f32 / 2.0;
        let initial_centre = Point::new(
            x_init - params.x_shift * half_stack,
            y_mid + params.y_shift * half_stack,
        );
        let initial = Bounds::new_from_center(initial_centre, n_w, n_h);

        let rectangles: Vec<Bounds> = (0..channels)
            .map(|i| {
                let i = i as f32;
                initial.translate(Point::new(i * params.x_shift, -i * params.y_shift))
            })
            .collect();

        let front = *rectangles.last().unwrap_or(&initial);
        let inset = Bounds::from_corners(
            Point::new(front.min_x() + n_w / 2.0, front.min_y() + n_h / 2.0),
            Point::new(front.max_x() - n_w / 4.0, front.max_y() - n_h / 4.0),
        );

        let label = format!("{channels}@{height}x{}", 2 * width);
        let label_position = Point::new(initial.min_x(), (15.0 * initial.max_y() / 14.0).trunc());

        debug!(channels, width, height, front:?, inset:?; "Conv block laid out");

        Ok(Self {
            channels,
            colors,
            highlight_color: params.highlight_color,
            transparency: params.transparency,
            rectangles,
            inset,
            label,
            label_position,
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Channel rectangles, back to front.
    pub fn rectangles(&self) -> &[Bounds] {
        &self.rectangles
    }

    /// The receptive-field highlight rectangle.
    pub fn inset(&self) -> Bounds {
        self.inset
    }

    /// Color of channel `index`, alternating by parity.
    pub fn channel_color(&self, index: usize) -> Color {
        self.colors[index % 2]
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn label_position(&self) -> Point {
        self.label_position
    }

    fn initial(&self) -> Bounds {
        self.rectangles[0]
    }

    fn front(&self) -> Bounds {
        self.rectangles[self.rectangles.len() - 1]
    }

    /// Top-right corner of the back (first) rectangle.
    pub fn upper_right_corner(&self) -> Point {
        self.initial().upper_right()
    }

    /// Bottom-right corner of the front (last) rectangle.
    pub fn lower_right_corner(&self) -> Point {
        self.front().lower_right()
    }

    /// Center of the front rectangle; incoming connectors end here.
    pub fn final_centre(&self) -> Point {
        self.front().center()
    }

    /// Anchors used to connect this block to the next one: the front centre
    /// and the inset's bottom-right and top-right corners.
    pub fn corner_points(&self) -> (Point, Point, Point) {
        (
            self.final_centre(),
            self.inset.lower_right(),
            self.inset.upper_right(),
        )
    }

    /// The label trace placed above the block.
    pub fn label_trace(&self) -> Trace {
        Trace::text(self.label_position, self.label.clone())
    }

    /// Channel rectangles followed by the highlight, `channels + 1` shapes in all.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = self
            .rectangles
            .iter()
            .enumerate()
            .map(|(i, bounds)| {
                let color = self.channel_color(i);
                Shape::rect(
                    *bounds,
                    StrokeDefinition::new(color.with_alpha(1.0), OUTLINE_WIDTH),
                    color.with_alpha(self.transparency),
                )
            })
            .collect();

        shapes.push(Shape::rect(
            self.inset,
            StrokeDefinition::new(self.highlight_color.with_alpha(1.0), OUTLINE_WIDTH),
            self.highlight_color.with_alpha(HIGHLIGHT_ALPHA),
        ));

        shapes
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn params() -> ConvBlockParams {
        ConvBlockParams::default()
    }

    #[test]
    fn test_zero_channels_is_rejected() {
        let result = ConvBlock::new(150.0, 100.0, (10, 20), 0, &params());
        assert!(matches!(result, Err(VisualNnError::Layout(_))));
    }

    #[test]
    fn test_rectangle_count_includes_highlight() {
        for channels in 1..6 {
            let block = ConvBlock::new(150.0, 100.0, (10, 20), channels, &params()).unwrap();
            assert_eq!(block.rectangles().len(), channels);
            assert_eq!(block.shapes().len(), channels + 1);
        }
    }

    #[test]
    fn test_initial_rectangle_geometry() {
        // n_h = 20, n_w = 10, centre = (150 - 2 * 2, 100 + 5 * 2)
        let block = ConvBlock::new(150.0, 100.0, (10, 20), 4, &params()).unwrap();
        let initial = block.rectangles()[0];

        assert_approx_eq!(f32, initial.min_x(), 141.0);
        assert_approx_eq!(f32, initial.max_x(), 151.0);
        assert_approx_eq!(f32, initial.min_y(), 100.0);
        assert_approx_eq!(f32, initial.max_y(), 120.0);
        assert_eq!(block.upper_right_corner(), Point::new(151.0, 120.0));
    }

    #[test]
    fn test_channels_recede_monotonically() {
        let block = ConvBlock::new(150.0, 100.0, (10, 20), 5, &params()).unwrap();
        for pair in block.rectangles().windows(2) {
            assert_approx_eq!(f32, pair[1].min_x() - pair[0].min_x(), 2.0);
            assert_approx_eq!(f32, pair[0].min_y() - pair[1].min_y(), 5.0);
        }
    }

    #[test]
    fn test_front_corners_and_inset() {
        let block = ConvBlock::new(150.0, 100.0, (10, 20), 4, &params()).unwrap();
        // front = initial shifted by (6, -15): x [147, 157], y [85, 105]
        assert_eq!(block.lower_right_corner(), Point::new(157.0, 85.0));
        assert_eq!(block.final_centre(), Point::new(152.0, 95.0));

        let inset = block.inset();
        assert_approx_eq!(f32, inset.min_x(), 152.0);
        assert_approx_eq!(f32, inset.min_y(), 95.0);
        assert_approx_eq!(f32, inset.max_x(), 154.5);
        assert_approx_eq!(f32, inset.max_y(), 100.0);

        let (centre, lower, upper) = block.corner_points();
        assert_eq!(centre, block.final_centre());
        assert_eq!(lower, inset.lower_right());
        assert_eq!(upper, inset.upper_right());
    }

    #[test]
    fn test_colors_alternate_and_flip_with_parity() {
        let [first, second] = params().channel_colors;

        let even = ConvBlock::new(150.0, 100.0, (10, 20), 4, &params()).unwrap();
        assert_eq!(even.channel_color(0), first);
        assert_eq!(even.channel_color(1), second);
        assert_eq!(even.channel_color(2), first);

        let odd = ConvBlock::new(150.0, 100.0, (10, 20), 3, &params()).unwrap();
        assert_eq!(odd.channel_color(0), second);
        assert_eq!(odd.channel_color(1), first);
        assert_eq!(odd.channel_color(2), second);

        // Front channel color is the same regardless of parity
        assert_eq!(even.channel_color(3), odd.channel_color(2));
    }

    #[test]
    fn test_shape_fills_use_transparency() {
        let block = ConvBlock::new(150.0, 100.0, (10, 20), 2, &params()).unwrap();
        let shapes = block.shapes();

        let fill = shapes[0].fill().unwrap();
        assert_eq!(fill, block.channel_color(0).with_alpha(0.9));

        let highlight = shapes[2].fill().unwrap();
        assert_eq!(highlight, params().highlight_color.with_alpha(0.9));
        assert_eq!(shapes[2].bounds(), block.inset());
    }

    #[test]
    fn test_label() {
        let block = ConvBlock::new(150.0, 100.0, (50, 200), 12, &params()).unwrap();
        assert_eq!(block.label(), "12@200x100");

        let trace = block.label_trace();
        assert_eq!(trace.text_labels().to_vec(), vec!["12@200x100".to_string()]);
        assert_eq!(trace.points()[0], block.label_position());
    }

    #[test]
    fn test_single_channel_degenerates_to_one_rectangle() {
        let block = ConvBlock::new(150.0, 100.0, (10, 20), 1, &params()).unwrap();
        assert_eq!(block.rectangles().len(), 1);
        assert_eq!(block.upper_right_corner(), block.rectangles()[0].upper_right());
        assert_eq!(block.lower_right_corner(), block.rectangles()[0].lower_right());
        assert_eq!(block.shapes().len(), 2);
    }
}
