//! Convolutional network composer.
//!
//! Conv blocks are laid out left to right starting at `x = 150`, dense blocks
//! continue from the right edge of the last conv block. Adjacent blocks are
//! joined by exactly two connector lines.

use log::{debug, info};

use visualnn_core::{
    color::Color,
    draw::StrokeDefinition,
    scene::{AxisRange, SceneGraph, SceneLayout},
};

use super::{ConnectorSet, ConvBlock, ConvBlockParams, DenseBlock};
use crate::VisualNnError;

/// Horizontal centre of the first conv block.
const FIRST_BLOCK_X: f32 = 150.0;
const CONNECTOR_WIDTH: f32 = 1.0;

/// Shape of a convolutional layer's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvShape {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl ConvShape {
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }
}

/// Visual options of a convolutional network diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvNetStyle {
    pub channel_colors: [Color; 2],
    pub dense_color: Color,
    pub highlight_color: Color,
    pub connector_color: Color,
    pub transparency: f32,
    /// Channel shift along x, in percent of the network's mid height.
    pub x_shift: f32,
    /// Channel shift along y, in percent of the network's mid height.
    pub y_shift: f32,
    /// Multiplier turning the largest dense layer size into the dense block scale.
    pub scaling_factor: f32,
    pub title: Option<String>,
}

impl Default for ConvNetStyle {
    fn default() -> Self {
        let block = ConvBlockParams::default();
        Self {
            channel_colors: block.channel_colors,
            dense_color: Color::from_rgb(128, 0, 128),
            highlight_color: block.highlight_color,
            connector_color: Color::default(),
            transparency: block.transparency,
            x_shift: 2.0,
            y_shift: 5.0,
            scaling_factor: 2.0,
            title: None,
        }
    }
}

/// A conv-then-dense network laid out as LeNet-style blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvNet {
    conv_blocks: Vec<ConvBlock>,
    dense_blocks: Vec<DenseBlock>,
    y_mid: f32,
    style: ConvNetStyle,
}

impl ConvNet {
    /// Lays out the conv layers followed by the dense layers.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Layout`] if `conv` is empty or any layer has a
    /// zero dimension, channel count or neuron count.
    pub fn new(conv: &[ConvShape], dense: &[usize], style: ConvNetStyle) -> Result<Self, VisualNnError> {
        if conv.is_empty() {
            return Err(VisualNnError::Layout(
                "a convolutional network needs at least one convolutional layer".to_string(),
            ));
        }
        if let Some(index) = conv
            .iter()
            .position(|s| s.width == 0 || s.height == 0 || s.channels == 0)
        {
            return Err(VisualNnError::Layout(format!(
                "convolutional layer {index} has a zero dimension"
            )));
        }

        let y_mid = conv
            .iter()
            .map(|s| (s.width * s.channels) as f32 / 3.0)
            .fold(0.0_f32, f32::max);

        let params = ConvBlockParams {
            channel_colors: style.channel_colors,
            highlight_color: style.highlight_color,
            transparency: style.transparency,
            x_shift: style.x_shift * y_mid / 100.0,
            y_shift: style.y_shift * y_mid / 100.0,
        };

        let mut conv_blocks = Vec::with_capacity(conv.len());
        let mut x_curr = FIRST_BLOCK_X;
        for (i, shape) in conv.iter().enumerate() {
            if i != 0 {
                x_curr += 1.1 * shape.width as f32 + params.x_shift * shape.channels as f32 / 2.0;
            }
            conv_blocks.push(ConvBlock::new(
                x_curr,
                y_mid,
                (shape.width / 2, shape.height),
                shape.channels,
                &params,
            )?);
        }

        let dense_blocks = Self::layout_dense(&conv_blocks, dense, y_mid, &style)?;

        debug!(
            y_mid,
            x_shift = params.x_shift,
            y_shift = params.y_shift;
            "Convolutional network laid out"
        );

        Ok(Self {
            conv_blocks,
            dense_blocks,
            y_mid,
            style,
        })
    }

    fn layout_dense(
        conv_blocks: &[ConvBlock],
        dense: &[usize],
        y_mid: f32,
        style: &ConvNetStyle,
    ) -> Result<Vec<DenseBlock>, VisualNnError> {
        let Some(&largest) = dense.iter().max() else {
            return Ok(Vec::new());
        };

        let max_height = largest as f32 * style.scaling_factor;
        let width = max_height / 100.0 * 5.0;

        let mut x_init = conv_blocks
            .last()
            .map_or(FIRST_BLOCK_X, |block| block.lower_right_corner().x());

        dense
            .iter()
            .map(|&neurons| {
                x_init += 3.0 * width;
                DenseBlock::new(
                    x_init,
                    y_mid,
                    width,
                    neurons as f32,
                    neurons,
                    style.dense_color,
                    style.transparency,
                )
            })
            .collect()
    }

    pub fn conv_blocks(&self) -> &[ConvBlock] {
        &self.conv_blocks
    }

    pub fn dense_blocks(&self) -> &[DenseBlock] {
        &self.dense_blocks
    }

    /// Vertical centre line shared by every block.
    pub fn y_mid(&self) -> f32 {
        self.y_mid
    }

    /// Connector segments between adjacent blocks, two per boundary.
    ///
    /// Conv-to-conv segments come first, then dense-to-dense, then the
    /// transition from the last conv block to the first dense block.
    pub fn connectors(&self) -> ConnectorSet {
        let mut connectors = ConnectorSet::default();

        for pair in self.conv_blocks.windows(2) {
            let (_, lower, upper) = pair[0].corner_points();
            let (centre, _, _) = pair[1].corner_points();
            connectors.extend(ConnectorSet::between_corners([(lower, centre), (upper, centre)]));
        }

        for pair in self.dense_blocks.windows(2) {
            let (_, lower_right, _, upper_right) = pair[0].corner_points();
            let (lower_left, _, upper_left, _) = pair[1].corner_points();
            connectors.extend(ConnectorSet::between_corners([
                (lower_right, lower_left),
                (upper_right, upper_left),
            ]));
        }

        if let (Some(last_conv), Some(first_dense)) =
            (self.conv_blocks.last(), self.dense_blocks.first())
        {
            let (lower_left, _, upper_left, _) = first_dense.corner_points();
            connectors.extend(ConnectorSet::between_corners([
                (last_conv.lower_right_corner(), lower_left),
                (last_conv.upper_right_corner(), upper_left),
            ]));
        }

        connectors
    }

    fn layout(&self) -> SceneLayout {
        let extent = (2.0 * self.y_mid).trunc();
        let layout = SceneLayout::new(AxisRange::new(0.0, extent), AxisRange::new(0.0, extent))
            .with_grid(false);
        match &self.style.title {
            Some(title) => layout.with_title(title.clone()),
            None => layout,
        }
    }

    /// Composes all blocks, labels and connectors into one scene.
    pub fn to_scene(&self) -> SceneGraph {
        let mut scene = SceneGraph::new(self.layout());

        for block in &self.conv_blocks {
            scene.extend_shapes(block.shapes());
            scene.push_trace(block.label_trace());
        }
        for block in &self.dense_blocks {
            scene.push_shape(block.shape());
            scene.push_trace(block.label_trace());
        }

        let stroke = StrokeDefinition::new(self.style.connector_color, CONNECTOR_WIDTH);
        let connectors = self.connectors();
        scene.extend_shapes(connectors.to_shapes(&stroke));

        info!(
            conv_layers = self.conv_blocks.len(),
            dense_layers = self.dense_blocks.len(),
            connectors = connectors.len();
            "Convolutional network scene composed"
        );

        scene
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use visualnn_core::scene::{Shape, TraceMode};

    fn lenet() -> ConvNet {
        let conv = [
            ConvShape::new(28, 28, 6),
            ConvShape::new(14, 14, 6),
            ConvShape::new(10, 10, 16),
        ];
        ConvNet::new(&conv, &[120, 84, 10], ConvNetStyle::default()).unwrap()
    }

    #[test]
    fn test_rejects_malformed_networks() {
        let style = ConvNetStyle::default();
        assert!(matches!(
            ConvNet::new(&[], &[10], style.clone()),
            Err(VisualNnError::Layout(_))
        ));
        assert!(matches!(
            ConvNet::new(&[ConvShape::new(28, 28, 0)], &[10], style.clone()),
            Err(VisualNnError::Layout(_))
        ));
        assert!(matches!(
            ConvNet::new(&[ConvShape::new(28, 28, 3)], &[10, 0], style),
            Err(VisualNnError::Layout(_))
        ));
    }

    #[test]
    fn test_y_mid_is_largest_width_channel_product() {
        // 28 * 6 / 3 = 56, 14 * 6 / 3 = 28, 10 * 16 / 3 = 53.3
        assert_approx_eq!(f32, lenet().y_mid(), 56.0);
    }

    #[test]
    fn test_blocks_advance_left_to_right() {
        let net = lenet();
        let centres: Vec<f32> = net
            .conv_blocks()
            .iter()
            .map(|block| block.final_centre().x())
            .collect();
        assert!(centres.windows(2).all(|w| w[0] < w[1]));

        let last_conv_edge = net.conv_blocks()[2].lower_right_corner().x();
        let dense_x: Vec<f32> = net
            .dense_blocks()
            .iter()
            .map(|block| block.bounds().min_x())
            .collect();
        assert!(dense_x[0] > last_conv_edge);
        assert!(dense_x.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_conv_block_shape_uses_half_width() {
        let net = ConvNet::new(&[ConvShape::new(28, 20, 4)], &[], ConvNetStyle::default()).unwrap();
        assert_eq!(net.conv_blocks()[0].label(), "4@20x28");
    }

    #[test]
    fn test_two_connectors_per_boundary() {
        let net = lenet();
        // 2 conv boundaries + 2 dense boundaries + 1 transition
        assert_eq!(net.connectors().len(), 2 * 5);

        let segments = net.connectors();
        let (centre, _, _) = net.conv_blocks()[1].corner_points();
        assert_eq!(segments.segments()[0].end(), centre);
        assert_eq!(segments.segments()[1].end(), centre);

        let transition = &segments.segments()[8..];
        assert_eq!(transition[0].start(), net.conv_blocks()[2].lower_right_corner());
        assert_eq!(transition[1].start(), net.conv_blocks()[2].upper_right_corner());
        assert_eq!(transition[0].end(), net.dense_blocks()[0].bounds().lower_left());
    }

    #[test]
    fn test_conv_only_network() {
        let net = ConvNet::new(
            &[ConvShape::new(28, 28, 6), ConvShape::new(14, 14, 6)],
            &[],
            ConvNetStyle::default(),
        )
        .unwrap();
        assert!(net.dense_blocks().is_empty());
        assert_eq!(net.connectors().len(), 2);
    }

    #[test]
    fn test_scene_contents() {
        let net = lenet();
        let scene = net.to_scene();

        // (6 + 1) + (6 + 1) + (16 + 1) block rectangles, 3 dense rectangles, 10 lines
        let rects = scene
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Rect { .. }))
            .count();
        let lines = scene
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Line { .. }))
            .count();
        assert_eq!(rects, 31 + 3);
        assert_eq!(lines, 10);

        assert_eq!(scene.traces().len(), 6);
        assert!(scene.traces().iter().all(|t| t.mode() == TraceMode::Text));
        assert_eq!(scene.traces()[3].text_labels()[0], "Dense (120)");
    }

    #[test]
    fn test_scene_layout_spans_twice_mid_height() {
        let scene = lenet().to_scene();
        let layout = scene.layout();
        assert_eq!(layout.x_range(), AxisRange::new(0.0, 112.0));
        assert_eq!(layout.y_range(), AxisRange::new(0.0, 112.0));
        assert!(!layout.show_grid());
        assert_eq!(layout.title(), None);
    }
}
