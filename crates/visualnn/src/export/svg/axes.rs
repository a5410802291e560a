//! Grid lines, tick labels and the plot title.

use svg::node::element as svg_element;

use visualnn_core::{
    draw::{LayeredOutput, RenderLayer, SvgNode},
    geometry::linspace,
};

use super::{SvgRenderer, Viewport};

/// Number of ticks per axis, including both ends.
const TICK_COUNT: usize = 6;
const GRID_COLOR: &str = "#e5e5e5";
const TICK_FONT_SIZE: f32 = 11.0;
const TITLE_FONT_SIZE: f32 = 18.0;

/// Formats a tick value with at most two decimals and no trailing zeros.
fn format_tick(value: f32) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        _ => trimmed.to_string(),
    }
}

impl SvgRenderer {
    pub(super) fn render_grid(&self, viewport: &Viewport) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let x_range = viewport.x_range;
        for value in linspace(x_range.min(), x_range.max(), TICK_COUNT) {
            let x = viewport.left + Viewport::fraction(value, x_range) * viewport.plot_width;
            let line = svg_element::Line::new()
                .set("x1", x)
                .set("y1", viewport.top)
                .set("x2", x)
                .set("y2", viewport.bottom())
                .set("stroke", GRID_COLOR)
                .set("stroke-width", 1);
            let label = svg_element::Text::new(format_tick(value))
                .set("x", x)
                .set("y", viewport.bottom() + TICK_FONT_SIZE + 4.0)
                .set("text-anchor", "middle")
                .set("font-size", TICK_FONT_SIZE);
            output.add_to_layer(RenderLayer::Grid, Box::new(line));
            output.add_to_layer(RenderLayer::Grid, Box::new(label));
        }

        let y_range = viewport.y_range;
        for value in linspace(y_range.min(), y_range.max(), TICK_COUNT) {
            let y =
                viewport.top + (1.0 - Viewport::fraction(value, y_range)) * viewport.plot_height;
            let line = svg_element::Line::new()
                .set("x1", viewport.left)
                .set("y1", y)
                .set("x2", viewport.right())
                .set("y2", y)
                .set("stroke", GRID_COLOR)
                .set("stroke-width", 1);
            let label = svg_element::Text::new(format_tick(value))
                .set("x", viewport.left - 6.0)
                .set("y", y)
                .set("text-anchor", "end")
                .set("dominant-baseline", "middle")
                .set("font-size", TICK_FONT_SIZE);
            output.add_to_layer(RenderLayer::Grid, Box::new(line));
            output.add_to_layer(RenderLayer::Grid, Box::new(label));
        }

        output
    }

    pub(super) fn render_title(&self, title: &str) -> SvgNode {
        let text = svg_element::Text::new(title)
            .set("x", self.width / 2.0)
            .set("y", self.margin / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-size", TITLE_FONT_SIZE)
            .set("font-weight", "bold");
        Box::new(text)
    }
}
