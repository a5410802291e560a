//! Conversion of shapes and traces into SVG elements.

use svg::node::element as svg_element;

use visualnn_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer},
    geometry::Point,
    scene::{Marker, Shape, TextPosition, Trace, TraceMode},
};

use super::{SvgRenderer, Viewport};

const LABEL_FONT_SIZE: f32 = 12.0;
/// Distance in pixels between a label and its anchor point.
const LABEL_OFFSET: f32 = 8.0;

/// Pixel offset and SVG alignment attributes for a label position.
fn text_placement(position: TextPosition, marker_size: f32) -> (Point, &'static str, &'static str) {
    let gap = marker_size / 2.0 + LABEL_OFFSET;
    match position {
        TextPosition::MiddleCenter => (Point::new(0.0, 0.0), "middle", "middle"),
        TextPosition::TopCenter => (Point::new(0.0, -gap), "middle", "auto"),
        TextPosition::BottomCenter => (Point::new(0.0, gap), "middle", "hanging"),
        TextPosition::TopRight => (Point::new(LABEL_OFFSET, -gap), "start", "auto"),
        TextPosition::BottomRight => (Point::new(LABEL_OFFSET, gap), "start", "hanging"),
    }
}

impl SvgRenderer {
    pub(super) fn render_shape(&self, shape: &Shape, viewport: &Viewport) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        match shape {
            Shape::Rect {
                bounds,
                stroke,
                fill,
            } => {
                // Y flips, so the upper-left corner in data space is the SVG origin.
                let origin = viewport.to_canvas(bounds.upper_left());
                let rect = svg_element::Rectangle::new()
                    .set("x", origin.x())
                    .set("y", origin.y())
                    .set("width", viewport.scale_x(bounds.width()))
                    .set("height", viewport.scale_y(bounds.height()))
                    .set("fill", fill)
                    .set("fill-opacity", fill.alpha());
                let rect = apply_stroke!(rect, stroke);
                output.add_to_layer(RenderLayer::Shape, Box::new(rect));
            }
            Shape::Line { start, end, stroke } => {
                let start = viewport.to_canvas(*start);
                let end = viewport.to_canvas(*end);
                let line = svg_element::Line::new()
                    .set("x1", start.x())
                    .set("y1", start.y())
                    .set("x2", end.x())
                    .set("y2", end.y());
                let line = apply_stroke!(line, stroke);
                output.add_to_layer(RenderLayer::Shape, Box::new(line));
            }
        }

        output
    }

    pub(super) fn render_trace(&self, trace: &Trace, viewport: &Viewport) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let points: Vec<Point> = trace
            .points()
            .iter()
            .map(|point| viewport.to_canvas(*point))
            .collect();

        if trace.mode() == TraceMode::Lines {
            if let Some(stroke) = trace.line() {
                let coords = points
                    .iter()
                    .map(|point| format!("{},{}", point.x(), point.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let polyline = svg_element::Polyline::new()
                    .set("points", coords)
                    .set("fill", "none");
                let polyline = apply_stroke!(polyline, stroke);
                output.add_to_layer(RenderLayer::Line, Box::new(polyline));
            }
            return output;
        }

        let marker = trace.marker();
        if trace.mode().has_markers() {
            if let Some(marker) = marker {
                for point in &points {
                    output.add_to_layer(RenderLayer::Marker, Box::new(Self::circle(*point, marker)));
                }
            }
        }

        if trace.mode().has_text() {
            let marker_size = marker.map_or(0.0, |marker| marker.size());
            let (offset, anchor, baseline) = text_placement(trace.text_position(), marker_size);
            for (point, label) in points.iter().zip(trace.text_labels()) {
                let anchor_point = point.add_point(offset);
                let text = svg_element::Text::new(label.as_str())
                    .set("x", anchor_point.x())
                    .set("y", anchor_point.y())
                    .set("text-anchor", anchor)
                    .set("dominant-baseline", baseline)
                    .set("font-size", LABEL_FONT_SIZE);
                output.add_to_layer(RenderLayer::Text, Box::new(text));
            }
        }

        output
    }

    fn circle(center: Point, marker: Marker) -> svg_element::Circle {
        let color = marker.color();
        svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", marker.size() / 2.0)
            .set("fill", &color)
            .set("fill-opacity", color.alpha())
    }
}
