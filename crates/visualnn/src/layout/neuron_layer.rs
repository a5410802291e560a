//! Vertical column of neurons for one fully-connected layer.

use visualnn_core::{
    color::Color,
    geometry::Point,
    scene::{AxisRange, Marker, SceneGraph, SceneLayout, Trace},
};

/// Vertical distance between two neurons of the same layer.
///
/// The baseline policy of [`MultiLayerPerceptron`](super::MultiLayerPerceptron)
/// (`max_size - size + 1`) centers layers against each other only for this
/// spacing, so it is not configurable.
pub const NEURON_SPACING: f32 = 2.0;

/// Diameter of the colored outer disk of a neuron marker.
const OUTER_MARKER_SIZE: f32 = 30.0;
/// Diameter of the white inner disk giving neurons their hollow look.
const INNER_MARKER_SIZE: f32 = 20.0;

/// A single fully-connected layer laid out as a vertical column of neurons.
///
/// Neuron `i` sits at `(x_coord, x_offset + i * offset)`. Positions are
/// computed once by [`NeuronLayer::new`] and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronLayer {
    x_coord: f32,
    offset: f32,
    x_offset: f32,
    color: Color,
    positions: Vec<Point>,
}

impl NeuronLayer {
    /// Lays out `num_neurons` neurons in the column at `x_coord`.
    ///
    /// # Arguments
    ///
    /// * `num_neurons` - Number of neurons in the layer.
    /// * `x_coord` - Horizontal position of the column.
    /// * `offset` - Vertical distance between two neurons.
    /// * `x_offset` - Height of the lowest neuron above the x-axis.
    /// * `color` - Color of the neuron markers.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visualnn::layout::NeuronLayer;
    /// # use visualnn::color::Color;
    /// let layer = NeuronLayer::new(3, 1.0, 2.0, 2.0, Color::new("blue").unwrap());
    /// let ys: Vec<f32> = layer.positions().iter().map(|p| p.y()).collect();
    /// assert_eq!(ys, vec![2.0, 4.0, 6.0]);
    /// ```
    pub fn new(num_neurons: usize, x_coord: f32, offset: f32, x_offset: f32, color: Color) -> Self {
        let positions = (0..num_neurons)
            .map(|i| Point::new(x_coord, x_offset + i as f32 * offset))
            .collect();

        Self {
            x_coord,
            offset,
            x_offset,
            color,
            positions,
        }
    }

    pub fn num_neurons(&self) -> usize {
        self.positions.len()
    }

    pub fn x_coord(&self) -> f32 {
        self.x_coord
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Neuron positions, bottom to top.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Height of the topmost neuron plus one spacing.
    pub fn max_y(&self) -> f32 {
        self.x_offset + self.num_neurons() as f32 * self.offset
    }

    /// Marker traces drawing the neurons as hollow disks.
    ///
    /// The colored disk comes first so the white inner disk is drawn on top.
    pub fn traces(&self) -> Vec<Trace> {
        vec![
            Trace::markers(
                self.positions.clone(),
                Marker::new(self.color, OUTER_MARKER_SIZE),
            ),
            Trace::markers(
                self.positions.clone(),
                Marker::new(Color::white(), INNER_MARKER_SIZE),
            ),
        ]
    }

    /// Builds a scene previewing this layer on its own.
    pub fn to_scene(&self, title: &str, show_grid: bool) -> SceneGraph {
        let layout = SceneLayout::new(
            AxisRange::new(self.x_coord - 1.0, self.x_coord + 1.0),
            AxisRange::new(0.0, self.max_y()),
        )
        .with_grid(show_grid)
        .with_title(title);

        let mut scene = SceneGraph::new(layout);
        scene.extend_traces(self.traces());
        scene
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use visualnn_core::scene::TraceMode;

    fn blue() -> Color {
        Color::new("blue").unwrap()
    }

    #[test]
    fn test_positions_follow_baseline_and_spacing() {
        let layer = NeuronLayer::new(4, 3.0, 2.0, 1.0, blue());

        assert_eq!(layer.num_neurons(), 4);
        for (i, point) in layer.positions().iter().enumerate() {
            assert_approx_eq!(f32, point.x(), 3.0);
            assert_approx_eq!(f32, point.y(), 1.0 + i as f32 * 2.0);
        }
    }

    #[test]
    fn test_max_y() {
        let layer = NeuronLayer::new(3, 1.0, NEURON_SPACING, 2.0, blue());
        assert_approx_eq!(f32, layer.max_y(), 8.0);
    }

    #[test]
    fn test_traces_draw_hollow_markers() {
        let layer = NeuronLayer::new(2, 1.0, NEURON_SPACING, 1.0, blue());
        let traces = layer.traces();

        assert_eq!(traces.len(), 2);
        assert!(traces.iter().all(|t| t.mode() == TraceMode::Markers));
        assert!(traces.iter().all(|t| t.points() == layer.positions()));

        let outer = traces[0].marker().unwrap();
        let inner = traces[1].marker().unwrap();
        assert_eq!(outer.color(), blue());
        assert_eq!(inner.color(), Color::white());
        assert!(outer.size() > inner.size());
    }

    #[test]
    fn test_to_scene_layout() {
        let layer = NeuronLayer::new(5, 2.0, NEURON_SPACING, 1.0, blue());
        let scene = layer.to_scene("MLP Layer", true);
        let layout = scene.layout();

        assert_eq!(layout.x_range(), AxisRange::new(1.0, 3.0));
        assert_eq!(layout.y_range(), AxisRange::new(0.0, 11.0));
        assert_eq!(layout.title(), Some("MLP Layer"));
        assert!(layout.show_grid());
        assert_eq!(scene.traces().len(), 2);
        assert!(scene.shapes().is_empty());
    }

    #[test]
    fn test_empty_layer_has_no_positions() {
        let layer = NeuronLayer::new(0, 1.0, NEURON_SPACING, 1.0, blue());
        assert_eq!(layer.num_neurons(), 0);
        assert!(layer.positions().is_empty());
    }
}
