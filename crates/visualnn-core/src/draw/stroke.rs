//! Stroke definitions for connector lines and shape borders.
//!
//! Exported types:
//! - [`StrokeDefinition`]: color and width of a stroke
//! - [`apply_stroke!`](crate::apply_stroke!): macro applying a stroke to an SVG element
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"black"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |

use crate::color::Color;

/// A solid stroke for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use visualnn_core::draw::StrokeDefinition;
/// use visualnn_core::color::Color;
///
/// // Default stroke (black, 1px)
/// let stroke = StrokeDefinition::default();
/// assert_eq!(stroke.width(), 1.0);
///
/// let stroke = StrokeDefinition::new(Color::new("blue").unwrap(), 2.0);
/// assert_eq!(stroke.color().to_string(), "blue");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use visualnn_core::draw::StrokeDefinition;
/// use visualnn_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 0);
///
/// let line = visualnn_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
    };
}

#[cfg(test)]
mod tests {
    use svg::node::element::Line;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let stroke = StrokeDefinition::new(Color::new("blue").unwrap().with_alpha(0.5), 3.0);
        let line = crate::apply_stroke!(Line::new(), &stroke).to_string();

        assert!(line.contains("stroke-width=\"3\""));
        assert!(line.contains("stroke-opacity=\"0.5\""));
        assert!(!line.contains("stroke-dasharray"));
    }
}
