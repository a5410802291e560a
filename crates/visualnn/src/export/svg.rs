//! SVG rendering of scene graphs.
//!
//! The scene is laid out in data space (Y up). [`SvgRenderer`] maps the
//! layout's axis ranges onto a plot area inside the canvas margins and flips
//! the Y axis on the way. Ranges are widened to cover every shape and trace,
//! so nothing the layout produced ends up off the canvas.

mod animation;
mod axes;
mod primitives;

use log::{debug, info};
use svg::node::element as svg_element;

use visualnn_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Point},
    scene::{AxisRange, SceneGraph, SceneLayout},
};

use super::{Error, Renderer};
use crate::config::{AnimationConfig, CanvasConfig};

/// Builder for [`SvgRenderer`].
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    width: f32,
    height: f32,
    margin: f32,
    background_color: Option<Color>,
    frame_duration_ms: u64,
}

impl Default for SvgBuilder {
    fn default() -> Self {
        let canvas = CanvasConfig::default();
        Self {
            width: canvas.width(),
            height: canvas.height(),
            margin: canvas.margin(),
            background_color: None,
            frame_duration_ms: AnimationConfig::default().frame_duration_ms(),
        }
    }
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes size and margin from the canvas section.
    pub fn with_canvas(mut self, canvas: &CanvasConfig) -> Self {
        self.width = canvas.width();
        self.height = canvas.height();
        self.margin = canvas.margin();
        self
    }

    pub fn with_background_color(mut self, color: Option<Color>) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_frame_duration_ms(mut self, frame_duration_ms: u64) -> Self {
        self.frame_duration_ms = frame_duration_ms;
        self
    }

    /// Validates the canvas geometry and builds the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the margins leave no room for the plot
    /// or the frame duration is zero.
    pub fn build(self) -> Result<SvgRenderer, Error> {
        if !(self.width > 2.0 * self.margin && self.height > 2.0 * self.margin) {
            return Err(Error::Render(format!(
                "canvas {}x{} is too small for a margin of {}",
                self.width, self.height, self.margin
            )));
        }
        if self.frame_duration_ms == 0 {
            return Err(Error::Render(
                "frame duration must be at least 1 ms".to_string(),
            ));
        }

        Ok(SvgRenderer {
            width: self.width,
            height: self.height,
            margin: self.margin,
            background_color: self.background_color,
            frame_duration_ms: self.frame_duration_ms,
            output: None,
        })
    }
}

/// Renders scenes into SVG documents held in memory.
#[derive(Debug)]
pub struct SvgRenderer {
    width: f32,
    height: f32,
    margin: f32,
    background_color: Option<Color>,
    frame_duration_ms: u64,
    output: Option<String>,
}

/// Maps data coordinates of one scene into canvas pixels.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    x_range: AxisRange,
    y_range: AxisRange,
    left: f32,
    top: f32,
    plot_width: f32,
    plot_height: f32,
}

impl Viewport {
    fn new(layout: &SceneLayout, width: f32, height: f32, margin: f32) -> Self {
        Self {
            x_range: layout.x_range(),
            y_range: layout.y_range(),
            left: margin,
            top: margin,
            plot_width: width - 2.0 * margin,
            plot_height: height - 2.0 * margin,
        }
    }

    /// Widens both axis ranges so that `bounds` is inside the plot area.
    fn covering(mut self, bounds: Bounds) -> Self {
        self.x_range = AxisRange::new(
            self.x_range.min().min(bounds.min_x()),
            self.x_range.max().max(bounds.max_x()),
        );
        self.y_range = AxisRange::new(
            self.y_range.min().min(bounds.min_y()),
            self.y_range.max().max(bounds.max_y()),
        );
        self
    }

    /// Position along `range` as a fraction, 0 at `min` and 1 at `max`.
    fn fraction(value: f32, range: AxisRange) -> f32 {
        let span = range.span();
        if span == 0.0 {
            return 0.5;
        }
        (value - range.min()) / span
    }

    fn to_canvas(&self, point: Point) -> Point {
        Point::new(
            self.left + Self::fraction(point.x(), self.x_range) * self.plot_width,
            self.top + (1.0 - Self::fraction(point.y(), self.y_range)) * self.plot_height,
        )
    }

    /// Converts a horizontal data length to pixels.
    fn scale_x(&self, length: f32) -> f32 {
        Self::fraction(self.x_range.min() + length, self.x_range) * self.plot_width
    }

    /// Converts a vertical data length to pixels.
    fn scale_y(&self, length: f32) -> f32 {
        Self::fraction(self.y_range.min() + length, self.y_range) * self.plot_height
    }

    fn bottom(&self) -> f32 {
        self.top + self.plot_height
    }

    fn right(&self) -> f32 {
        self.left + self.plot_width
    }
}

/// Smallest bounds containing every shape and trace point of the scene,
/// animation frames included.
fn content_bounds(scene: &SceneGraph) -> Option<Bounds> {
    let shapes = scene.shapes().iter().map(|shape| shape.bounds());
    let points = scene
        .traces()
        .iter()
        .chain(scene.frames().iter().flat_map(|frame| frame.traces()))
        .flat_map(|trace| trace.points())
        .map(|point| Bounds::from_corners(*point, *point));

    shapes.chain(points).reduce(|acc, bounds| acc.merge(&bounds))
}

impl SvgRenderer {
    /// Builds the SVG document for a scene.
    pub fn document(&self, scene: &SceneGraph) -> svg::Document {
        let layout = scene.layout();
        let viewport = Viewport::new(layout, self.width, self.height, self.margin);
        let viewport = match content_bounds(scene) {
            Some(bounds) => viewport.covering(bounds),
            None => viewport,
        };

        let mut output = LayeredOutput::new();

        if let Some(background) = self.render_background() {
            output.add_to_layer(RenderLayer::Background, background);
        }
        if layout.show_grid() {
            output.merge(self.render_grid(&viewport));
        }
        if let Some(title) = layout.title() {
            output.add_to_layer(RenderLayer::Text, self.render_title(title));
        }

        for shape in scene.shapes() {
            output.merge(self.render_shape(shape, &viewport));
        }
        for trace in scene.traces() {
            output.merge(self.render_trace(trace, &viewport));
        }

        if scene.is_animated() {
            output.merge(self.render_frames(scene.frames(), &viewport));
            if layout.animated() {
                output.add_to_layer(RenderLayer::Frame, self.render_play_control());
            }
        }

        debug!(
            shapes = scene.shapes().len(),
            traces = scene.traces().len(),
            frames = scene.frames().len();
            "Scene converted to SVG nodes"
        );

        let doc = svg::Document::new()
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .set("font-family", "sans-serif");

        output
            .render()
            .into_iter()
            .fold(doc, |doc, group| doc.add(group))
    }

    /// Returns the last rendered document, leaving the renderer empty.
    pub fn take_output(&mut self) -> Option<String> {
        self.output.take()
    }

    fn render_background(&self) -> Option<Box<dyn svg::Node>> {
        let color = self.background_color?;
        let rect = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", self.width)
            .set("height", self.height)
            .set("fill", &color)
            .set("fill-opacity", color.alpha());
        Some(Box::new(rect))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, scene: &SceneGraph) -> Result<(), Error> {
        let document = self.document(scene);
        let rendered = document.to_string();
        info!(bytes = rendered.len(); "SVG document rendered");
        self.output = Some(rendered);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use visualnn_core::{
        draw::StrokeDefinition,
        scene::{Frame, Marker, Shape, Trace},
    };

    pub(super) fn canvas(width: f32, height: f32) -> CanvasConfig {
        toml::from_str(&format!("width = {width}.0\nheight = {height}.0")).unwrap()
    }

    fn renderer() -> SvgRenderer {
        SvgBuilder::new().with_canvas(&canvas(400.0, 300.0)).build().unwrap()
    }

    fn scene() -> SceneGraph {
        let layout = SceneLayout::new(AxisRange::new(0.0, 4.0), AxisRange::new(0.0, 6.0))
            .with_title("Test Scene");
        let mut scene = SceneGraph::new(layout);
        scene.push_shape(Shape::rect(
            Bounds::from_corners(Point::new(1.0, 1.0), Point::new(2.0, 3.0)),
            StrokeDefinition::default(),
            Color::new("purple").unwrap(),
        ));
        scene.push_trace(Trace::markers(
            vec![Point::new(1.0, 1.0)],
            Marker::new(Color::new("blue").unwrap(), 30.0),
        ));
        scene
    }

    #[test]
    fn test_viewport_flips_y() {
        let layout = SceneLayout::new(AxisRange::new(0.0, 4.0), AxisRange::new(0.0, 6.0));
        let viewport = Viewport::new(&layout, 500.0, 700.0, 50.0);

        let origin = viewport.to_canvas(Point::new(0.0, 0.0));
        assert_approx_eq!(f32, origin.x(), 50.0);
        assert_approx_eq!(f32, origin.y(), 650.0);

        let corner = viewport.to_canvas(Point::new(4.0, 6.0));
        assert_approx_eq!(f32, corner.x(), 450.0);
        assert_approx_eq!(f32, corner.y(), 50.0);

        assert_approx_eq!(f32, viewport.scale_x(1.0), 100.0);
        assert_approx_eq!(f32, viewport.scale_y(3.0), 300.0);
    }

    #[test]
    fn test_viewport_degenerate_range_centers() {
        let layout = SceneLayout::new(AxisRange::new(2.0, 2.0), AxisRange::new(0.0, 1.0));
        let viewport = Viewport::new(&layout, 200.0, 200.0, 0.0);
        assert_approx_eq!(f32, viewport.to_canvas(Point::new(2.0, 0.0)).x(), 100.0);
    }

    #[test]
    fn test_viewport_covers_content_outside_layout() {
        let layout = SceneLayout::new(AxisRange::new(0.0, 112.0), AxisRange::new(0.0, 112.0));
        let mut scene = SceneGraph::new(layout);
        scene.push_shape(Shape::rect(
            Bounds::from_corners(Point::new(140.0, 40.0), Point::new(200.0, 120.0)),
            StrokeDefinition::default(),
            Color::default(),
        ));

        let bounds = content_bounds(&scene).unwrap();
        let viewport = Viewport::new(scene.layout(), 800.0, 600.0, 50.0).covering(bounds);
        assert_eq!(viewport.x_range, AxisRange::new(0.0, 200.0));
        assert_eq!(viewport.y_range, AxisRange::new(0.0, 120.0));

        let empty = SceneGraph::new(SceneLayout::new(
            AxisRange::new(0.0, 1.0),
            AxisRange::new(0.0, 1.0),
        ));
        assert!(content_bounds(&empty).is_none());
    }

    #[test]
    fn test_builder_rejects_tiny_canvas() {
        let result = SvgBuilder::new().with_canvas(&canvas(80.0, 80.0)).build();
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_render_static_scene() {
        let mut renderer = renderer();
        renderer.render(&scene()).unwrap();
        let svg = renderer.take_output().unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 400 300\""));
        assert!(svg.contains("data-layer=\"shape\""));
        assert!(svg.contains("data-layer=\"marker\""));
        assert!(svg.contains("Test Scene"));
        assert!(!svg.contains("data-layer=\"frame\""));
        assert!(renderer.take_output().is_none());
    }

    #[test]
    fn test_render_background() {
        let renderer = SvgBuilder::new()
            .with_background_color(Some(Color::new("white").unwrap()))
            .build()
            .unwrap();
        let svg = renderer.document(&scene()).to_string();
        assert!(svg.contains("data-layer=\"background\""));
    }

    #[test]
    fn test_render_animated_scene() {
        let mut scene = scene();
        scene.set_frames(vec![
            Frame::new("a", vec![Trace::text(Point::new(1.0, 1.0), "first")]),
            Frame::new("b", vec![Trace::text(Point::new(2.0, 1.0), "second")]),
        ]);
        let layout = scene.layout().clone().with_animation(true);
        let mut animated = SceneGraph::new(layout);
        animated.set_frames(scene.frames().to_vec());

        let svg = renderer().document(&animated).to_string();
        assert!(svg.contains("data-layer=\"frame\""));
        assert!(svg.contains("id=\"play\""));
        assert!(svg.contains("first"));
        assert!(svg.contains("second"));
        assert_eq!(svg.matches("<animate").count(), 2);
    }
}
