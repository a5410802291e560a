//! Renderer-agnostic scene graph.
//!
//! Layout components describe what to draw as a [`SceneGraph`]: a flat list of
//! [`Shape`]s (rectangles and lines in data space), a list of [`Trace`]s
//! (polylines, markers and text anchored on data points), a [`SceneLayout`]
//! with the axis ranges and title, and an optional ordered list of animation
//! [`Frame`]s.
//!
//! A scene is built once per diagram and handed to a renderer; nothing in it
//! is shared or mutated afterwards.
//!
//! # Example
//!
//! ```
//! # use visualnn_core::{
//! #     color::Color,
//! #     draw::StrokeDefinition,
//! #     geometry::Point,
//! #     scene::{AxisRange, SceneGraph, SceneLayout, Shape, Trace},
//! # };
//! let layout = SceneLayout::new(AxisRange::new(0.0, 4.0), AxisRange::new(0.0, 6.0));
//! let mut scene = SceneGraph::new(layout);
//!
//! scene.push_shape(Shape::line(
//!     Point::new(1.0, 1.0),
//!     Point::new(2.0, 3.0),
//!     StrokeDefinition::default(),
//! ));
//! scene.push_trace(Trace::text(Point::new(1.0, 1.0), "x1 = 1"));
//!
//! assert_eq!(scene.shapes().len(), 1);
//! assert_eq!(scene.traces().len(), 1);
//! assert!(!scene.is_animated());
//! ```

use crate::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point},
};

/// A closed drawable shape positioned in data space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A filled rectangle with an outline.
    Rect {
        bounds: Bounds,
        stroke: StrokeDefinition,
        fill: Color,
    },
    /// A straight line segment.
    Line {
        start: Point,
        end: Point,
        stroke: StrokeDefinition,
    },
}

impl Shape {
    pub fn rect(bounds: Bounds, stroke: StrokeDefinition, fill: Color) -> Self {
        Self::Rect {
            bounds,
            stroke,
            fill,
        }
    }

    pub fn line(start: Point, end: Point, stroke: StrokeDefinition) -> Self {
        Self::Line { start, end, stroke }
    }

    /// Returns the smallest bounds containing the shape.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Rect { bounds, .. } => *bounds,
            Self::Line { start, end, .. } => Bounds::from_corners(*start, *end),
        }
    }

    /// Returns the fill color of a rectangle, `None` for lines.
    pub fn fill(&self) -> Option<Color> {
        match self {
            Self::Rect { fill, .. } => Some(*fill),
            Self::Line { .. } => None,
        }
    }
}

/// How a [`Trace`] draws its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// A polyline through the points.
    Lines,
    /// One marker per point.
    Markers,
    /// One text label per point.
    Text,
    /// One marker and one label per point.
    MarkersText,
}

impl TraceMode {
    pub fn has_markers(self) -> bool {
        matches!(self, Self::Markers | Self::MarkersText)
    }

    pub fn has_text(self) -> bool {
        matches!(self, Self::Text | Self::MarkersText)
    }
}

/// Where a label sits relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextPosition {
    #[default]
    MiddleCenter,
    TopCenter,
    BottomCenter,
    TopRight,
    BottomRight,
}

/// A filled circular marker. `size` is the diameter in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    color: Color,
    size: f32,
}

impl Marker {
    pub fn new(color: Color, size: f32) -> Self {
        Self { color, size }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

/// A sequence of data points drawn as lines, markers and/or text.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    points: Vec<Point>,
    mode: TraceMode,
    line: Option<StrokeDefinition>,
    marker: Option<Marker>,
    text: Vec<String>,
    text_position: TextPosition,
}

impl Trace {
    /// Creates a polyline trace.
    pub fn lines(points: Vec<Point>, stroke: StrokeDefinition) -> Self {
        Self {
            points,
            mode: TraceMode::Lines,
            line: Some(stroke),
            marker: None,
            text: Vec::new(),
            text_position: TextPosition::default(),
        }
    }

    /// Creates a trace drawing one marker per point.
    pub fn markers(points: Vec<Point>, marker: Marker) -> Self {
        Self {
            points,
            mode: TraceMode::Markers,
            line: None,
            marker: Some(marker),
            text: Vec::new(),
            text_position: TextPosition::default(),
        }
    }

    /// Creates a single text label anchored at `position`.
    pub fn text(position: Point, label: impl Into<String>) -> Self {
        Self {
            points: vec![position],
            mode: TraceMode::Text,
            line: None,
            marker: None,
            text: vec![label.into()],
            text_position: TextPosition::default(),
        }
    }

    /// Creates a trace drawing a marker and a label at each point.
    ///
    /// Labels are matched to points by index; missing labels render nothing.
    pub fn markers_with_text(points: Vec<Point>, marker: Marker, text: Vec<String>) -> Self {
        Self {
            points,
            mode: TraceMode::MarkersText,
            line: None,
            marker: Some(marker),
            text,
            text_position: TextPosition::default(),
        }
    }

    /// Sets the label position (builder style).
    pub fn with_text_position(mut self, text_position: TextPosition) -> Self {
        self.text_position = text_position;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn mode(&self) -> TraceMode {
        self.mode
    }

    pub fn line(&self) -> Option<&StrokeDefinition> {
        self.line.as_ref()
    }

    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    pub fn text_labels(&self) -> &[String] {
        &self.text
    }

    pub fn text_position(&self) -> TextPosition {
        self.text_position
    }

    /// Returns the first and last points of the trace, if any.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((*self.points.first()?, *self.points.last()?))
    }
}

/// An inclusive numeric range on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    min: f32,
    max: f32,
}

impl AxisRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn min(self) -> f32 {
        self.min
    }

    pub fn max(self) -> f32 {
        self.max
    }

    /// Returns the length of the range.
    pub fn span(self) -> f32 {
        self.max - self.min
    }
}

/// Axis ranges and decorations of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    x_range: AxisRange,
    y_range: AxisRange,
    show_grid: bool,
    title: Option<String>,
    animated: bool,
}

impl SceneLayout {
    /// Creates a layout with the given axis ranges, no grid, no title.
    pub fn new(x_range: AxisRange, y_range: AxisRange) -> Self {
        Self {
            x_range,
            y_range,
            show_grid: false,
            title: None,
            animated: false,
        }
    }

    /// Shows or hides the grid and tick labels (builder style).
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    /// Sets the plot title (builder style).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Requests a playback control for the scene's frames (builder style).
    pub fn with_animation(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn x_range(&self) -> AxisRange {
        self.x_range
    }

    pub fn y_range(&self) -> AxisRange {
        self.y_range
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn animated(&self) -> bool {
        self.animated
    }
}

/// One step of a precomputed animation.
///
/// A frame only carries the traces that change at that step; the static part
/// of the scene stays in [`SceneGraph::traces`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    traces: Vec<Trace>,
}

impl Frame {
    pub fn new(name: impl Into<String>, traces: Vec<Trace>) -> Self {
        Self {
            name: name.into(),
            traces,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }
}

/// The complete description of one diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    shapes: Vec<Shape>,
    traces: Vec<Trace>,
    layout: SceneLayout,
    frames: Vec<Frame>,
}

impl SceneGraph {
    /// Creates an empty scene with the given layout.
    pub fn new(layout: SceneLayout) -> Self {
        Self {
            shapes: Vec::new(),
            traces: Vec::new(),
            layout,
            frames: Vec::new(),
        }
    }

    pub fn push_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn push_trace(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn extend_shapes(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.shapes.extend(shapes);
    }

    pub fn extend_traces(&mut self, traces: impl IntoIterator<Item = Trace>) {
        self.traces.extend(traces);
    }

    /// Replaces the animation frames of the scene.
    pub fn set_frames(&mut self, frames: Vec<Frame>) {
        self.frames = frames;
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns `true` if the scene carries animation frames.
    pub fn is_animated(&self) -> bool {
        !self.frames.is_empty()
    }
}
