//! Frame playback using SMIL animation.
//!
//! Every frame becomes a hidden group that is made visible for one frame
//! duration, starting when the "Play" control is clicked. The last frame
//! stays visible once playback ends.

use svg::node::element as svg_element;

use visualnn_core::{
    draw::{LayeredOutput, RenderLayer, SvgNode},
    scene::Frame,
};

use super::{SvgRenderer, Viewport};

const PLAY_ID: &str = "play";
const PLAY_WIDTH: f32 = 60.0;
const PLAY_HEIGHT: f32 = 24.0;

impl SvgRenderer {
    pub(super) fn render_frames(&self, frames: &[Frame], viewport: &Viewport) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let last = frames.len().saturating_sub(1);

        for (index, frame) in frames.iter().enumerate() {
            let begin = index as u64 * self.frame_duration_ms;
            let fill = if index == last { "freeze" } else { "remove" };
            let animate = svg_element::Animate::new()
                .set("attributeName", "visibility")
                .set("calcMode", "discrete")
                .set("values", "visible")
                .set("begin", format!("{PLAY_ID}.click + {begin}ms"))
                .set("dur", format!("{}ms", self.frame_duration_ms))
                .set("fill", fill);

            // Frame traces render into their own layered output so the
            // markers stay above the lines inside the group.
            let group = frame
                .traces()
                .iter()
                .map(|trace| self.render_trace(trace, viewport))
                .fold(LayeredOutput::new(), |mut acc, traces| {
                    acc.merge(traces);
                    acc
                })
                .render()
                .into_iter()
                .fold(
                    svg_element::Group::new()
                        .set("id", format!("frame-{index}"))
                        .set("data-frame", frame.name())
                        .set("visibility", "hidden")
                        .add(animate),
                    |group, node| group.add(node),
                );

            output.add_to_layer(RenderLayer::Frame, Box::new(group));
        }

        output
    }

    /// Clickable button that starts playback.
    pub(super) fn render_play_control(&self) -> SvgNode {
        let x = self.width - self.margin - PLAY_WIDTH;
        let y = (self.margin - PLAY_HEIGHT) / 2.0;

        let button = svg_element::Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", PLAY_WIDTH)
            .set("height", PLAY_HEIGHT)
            .set("rx", 4)
            .set("fill", "#f0f0f0")
            .set("stroke", "#888888");
        let label = svg_element::Text::new("Play")
            .set("x", x + PLAY_WIDTH / 2.0)
            .set("y", y + PLAY_HEIGHT / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-size", 12);

        Box::new(
            svg_element::Group::new()
                .set("id", PLAY_ID)
                .set("cursor", "pointer")
                .add(button)
                .add(label),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::svg::SvgBuilder;
    use visualnn_core::{
        color::Color,
        geometry::Point,
        scene::{AxisRange, Marker, SceneLayout, Trace},
    };

    fn frames() -> Vec<Frame> {
        (0..3)
            .map(|index| {
                let marker = Marker::new(Color::new("blue").unwrap(), 10.0);
                let trace = Trace::markers_with_text(
                    vec![Point::new(index as f32, 1.0)],
                    marker,
                    vec![format!("step {index}")],
                );
                Frame::new(format!("edge1-{index}"), vec![trace])
            })
            .collect()
    }

    #[test]
    fn test_frames_are_scheduled_in_order() {
        let renderer = SvgBuilder::new()
            .with_frame_duration_ms(100)
            .build()
            .unwrap();
        let layout = SceneLayout::new(AxisRange::new(0.0, 4.0), AxisRange::new(0.0, 6.0));
        let viewport = Viewport::new(&layout, 800.0, 600.0, 50.0);

        let svg: String = renderer
            .render_frames(&frames(), &viewport)
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect();

        assert!(svg.contains("id=\"frame-0\""));
        assert!(svg.contains("id=\"frame-2\""));
        assert!(svg.contains("data-frame=\"edge1-1\""));
        assert!(svg.contains("play.click + 0ms"));
        assert!(svg.contains("play.click + 100ms"));
        assert!(svg.contains("play.click + 200ms"));
        assert_eq!(svg.matches("fill=\"remove\"").count(), 2);
        assert_eq!(svg.matches("fill=\"freeze\"").count(), 1);
        assert!(svg.contains("step 2"));
    }

    #[test]
    fn test_no_frames_renders_nothing() {
        let renderer = SvgBuilder::new().build().unwrap();
        let layout = SceneLayout::new(AxisRange::new(0.0, 1.0), AxisRange::new(0.0, 1.0));
        let viewport = Viewport::new(&layout, 800.0, 600.0, 50.0);
        assert!(renderer.render_frames(&[], &viewport).is_empty());
    }

    #[test]
    fn test_play_control() {
        let renderer = SvgBuilder::new().build().unwrap();
        let control = renderer.render_play_control().to_string();
        assert!(control.contains("id=\"play\""));
        assert!(control.contains(">\nPlay\n<"));
    }
}
