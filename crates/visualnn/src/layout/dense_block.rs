//! Box geometry for a dense layer inside a convolutional network diagram.

use log::debug;

use visualnn_core::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point},
    scene::{Shape, Trace},
};

use crate::VisualNnError;

const OUTLINE_WIDTH: f32 = 2.0;

/// A dense layer drawn as a single rectangle.
///
/// Corners are truncated toward zero so dense blocks line up on whole data
/// units regardless of the fractional width computed by the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseBlock {
    num_neurons: usize,
    bounds: Bounds,
    color: Color,
    transparency: f32,
    label_position: Point,
}

impl DenseBlock {
    /// Lays out a block of the given size centered on `(x_init, y_mid)`.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Layout`] if `num_neurons` is zero.
    pub fn new(
        x_init: f32,
        y_mid: f32,
        width: f32,
        height: f32,
        num_neurons: usize,
        color: Color,
        transparency: f32,
    ) -> Result<Self, VisualNnError> {
        if num_neurons == 0 {
            return Err(VisualNnError::Layout(
                "a dense block needs at least one neuron".to_string(),
            ));
        }

        let bounds = Bounds::from_corners(
            Point::new(
                (x_init - width / 2.0).trunc(),
                (y_mid - height / 2.0).trunc(),
            ),
            Point::new(
                (x_init + width / 2.0).trunc(),
                (y_mid + height / 2.0).trunc(),
            ),
        );
        let label_position = Point::new(x_init, y_mid + height * 17.0 / 28.0);

        debug!(num_neurons, bounds:?; "Dense block laid out");

        Ok(Self {
            num_neurons,
            bounds,
            color,
            transparency,
            label_position,
        })
    }

    pub fn num_neurons(&self) -> usize {
        self.num_neurons
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Lower-left, lower-right, upper-left and upper-right corners.
    pub fn corner_points(&self) -> (Point, Point, Point, Point) {
        (
            self.bounds.lower_left(),
            self.bounds.lower_right(),
            self.bounds.upper_left(),
            self.bounds.upper_right(),
        )
    }

    pub fn label(&self) -> String {
        format!("Dense ({})", self.num_neurons)
    }

    pub fn label_trace(&self) -> Trace {
        Trace::text(self.label_position, self.label())
    }

    pub fn shape(&self) -> Shape {
        Shape::rect(
            self.bounds,
            StrokeDefinition::new(self.color.with_alpha(1.0), OUTLINE_WIDTH),
            self.color.with_alpha(self.transparency),
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn purple() -> Color {
        Color::from_rgb(128, 0, 128)
    }

    #[test]
    fn test_zero_neurons_is_rejected() {
        let result = DenseBlock::new(10.0, 10.0, 2.0, 0.0, 0, purple(), 0.9);
        assert!(matches!(result, Err(VisualNnError::Layout(_))));
    }

    #[test]
    fn test_corners_are_truncated() {
        let block = DenseBlock::new(300.5, 100.0, 12.8, 64.0, 64, purple(), 0.9).unwrap();
        let (ll, lr, ul, ur) = block.corner_points();

        // 300.5 - 6.4 = 294.1, 300.5 + 6.4 = 306.9
        assert_eq!(ll, Point::new(294.0, 68.0));
        assert_eq!(lr, Point::new(306.0, 68.0));
        assert_eq!(ul, Point::new(294.0, 132.0));
        assert_eq!(ur, Point::new(306.0, 132.0));
    }

    #[test]
    fn test_label_sits_above_center() {
        let block = DenseBlock::new(300.0, 100.0, 10.0, 28.0, 28, purple(), 0.9).unwrap();
        assert_eq!(block.label(), "Dense (28)");

        let trace = block.label_trace();
        assert_approx_eq!(f32, trace.points()[0].x(), 300.0);
        assert_approx_eq!(f32, trace.points()[0].y(), 117.0);
    }

    #[test]
    fn test_shape_is_single_rectangle() {
        let block = DenseBlock::new(300.0, 100.0, 10.0, 20.0, 20, purple(), 0.5).unwrap();
        let shape = block.shape();

        assert_eq!(shape.bounds(), block.bounds());
        assert_eq!(shape.fill(), Some(purple().with_alpha(0.5)));
    }
}
