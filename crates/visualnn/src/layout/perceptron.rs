//! Multilayer perceptron composer.
//!
//! Layers are placed in columns `x = 1, 2, 3, ...` and vertically centered
//! against the tallest layer, then every adjacent pair is fully connected.

use log::{debug, info};

use visualnn_core::{
    color::Color,
    draw::StrokeDefinition,
    geometry::Point,
    scene::{AxisRange, SceneGraph, SceneLayout},
};

use super::{ConnectorSet, NEURON_SPACING, NeuronLayer, connect};
use crate::VisualNnError;

/// Title used when none is configured.
pub const DEFAULT_PERCEPTRON_TITLE: &str = "Multi-Layer Perceptron";

const CONNECTOR_WIDTH: f32 = 2.0;

/// Visual options of a perceptron diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptronStyle {
    pub neuron_color: Color,
    pub bias_color: Color,
    pub connector_color: Color,
    pub show_grid: bool,
    pub show_bias: bool,
    pub title: String,
}

impl Default for PerceptronStyle {
    fn default() -> Self {
        Self {
            neuron_color: Color::from_rgb(0, 0, 255),
            bias_color: Color::from_rgb(255, 0, 0),
            connector_color: Color::from_rgb(0, 0, 255),
            show_grid: false,
            show_bias: false,
            title: DEFAULT_PERCEPTRON_TITLE.to_string(),
        }
    }
}

/// A fully-connected network laid out column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLayerPerceptron {
    layers: Vec<NeuronLayer>,
    style: PerceptronStyle,
}

impl MultiLayerPerceptron {
    /// Builds the layer columns for `layer_sizes`, first to last.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Layout`] if there are no layers or a layer
    /// has no neurons.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visualnn::layout::{MultiLayerPerceptron, PerceptronStyle};
    /// let mlp = MultiLayerPerceptron::new(&[3, 4, 2], PerceptronStyle::default()).unwrap();
    /// assert_eq!(mlp.x_coords(), vec![1.0, 2.0, 3.0]);
    /// assert_eq!(mlp.x_offsets(), vec![2.0, 1.0, 3.0]);
    /// ```
    pub fn new(layer_sizes: &[usize], style: PerceptronStyle) -> Result<Self, VisualNnError> {
        let Some(&max_size) = layer_sizes.iter().max() else {
            return Err(VisualNnError::Layout(
                "a perceptron needs at least one layer".to_string(),
            ));
        };
        if let Some(index) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(VisualNnError::Layout(format!(
                "layer {index} of the perceptron has no neurons"
            )));
        }

        let layers: Vec<NeuronLayer> = layer_sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                let x_coord = (i + 1) as f32;
                let x_offset = (max_size - size + 1) as f32;
                NeuronLayer::new(size, x_coord, NEURON_SPACING, x_offset, style.neuron_color)
            })
            .collect();

        debug!(layers = layers.len(), max_size; "Perceptron layers laid out");

        Ok(Self { layers, style })
    }

    pub fn layers(&self) -> &[NeuronLayer] {
        &self.layers
    }

    pub fn style(&self) -> &PerceptronStyle {
        &self.style
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(NeuronLayer::num_neurons).collect()
    }

    pub fn x_coords(&self) -> Vec<f32> {
        self.layers.iter().map(NeuronLayer::x_coord).collect()
    }

    pub fn x_offsets(&self) -> Vec<f32> {
        self.layers.iter().map(NeuronLayer::x_offset).collect()
    }

    /// Position of the bias neuron feeding the layer after `index`, one
    /// spacing above the top neuron of layer `index`.
    ///
    /// The output layer has no bias neuron.
    pub fn bias_position(&self, index: usize) -> Option<Point> {
        if index + 1 >= self.layers.len() {
            return None;
        }
        let layer = &self.layers[index];
        Some(Point::new(layer.x_coord(), layer.max_y()))
    }

    fn connector_stroke(&self) -> StrokeDefinition {
        StrokeDefinition::new(self.style.connector_color, CONNECTOR_WIDTH)
    }

    fn layout(&self) -> SceneLayout {
        let first = &self.layers[0];
        let last = &self.layers[self.layers.len() - 1];

        let mut y_max = self
            .layers
            .iter()
            .map(NeuronLayer::max_y)
            .fold(0.0_f32, f32::max);
        if self.style.show_bias {
            y_max += NEURON_SPACING;
        }

        SceneLayout::new(
            AxisRange::new(first.x_coord() - 1.0, last.x_coord() + 1.0),
            AxisRange::new(0.0, y_max),
        )
        .with_grid(self.style.show_grid)
        .with_title(self.style.title.clone())
    }

    /// Composes the whole network into one scene.
    ///
    /// Each adjacent pair contributes its connectors, then its bias
    /// connectors when enabled, then the markers of both layers, so pair
    /// `(i, i + 1)` is always emitted before pair `(i + 1, i + 2)`.
    pub fn to_scene(&self) -> SceneGraph {
        let stroke = self.connector_stroke();
        let mut scene = SceneGraph::new(self.layout());

        if let [only] = self.layers.as_slice() {
            scene.extend_traces(only.traces());
        }

        for (index, pair) in self.layers.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            let mut traces = connect(current, next, &stroke);

            let bias = self.bias_position(index).filter(|_| self.style.show_bias);
            if let Some(bias) = bias {
                let regular = current.num_neurons() * next.num_neurons();
                let bias_traces =
                    ConnectorSet::bipartite(&[bias], next.positions()).to_traces(&stroke);
                traces.splice(regular..regular, bias_traces);

                let bias_neuron = NeuronLayer::new(
                    1,
                    bias.x(),
                    NEURON_SPACING,
                    bias.y(),
                    self.style.bias_color,
                );
                traces.extend(bias_neuron.traces());
            }

            scene.extend_traces(traces);
        }

        info!(
            layers = self.layers.len(),
            traces = scene.traces().len(),
            show_bias = self.style.show_bias;
            "Perceptron scene composed"
        );

        scene
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    /// Every layer's column is vertically centered on the tallest one.
    fn check_layers_centered(sizes: Vec<usize>) -> Result<(), TestCaseError> {
        let mlp = MultiLayerPerceptron::new(&sizes, PerceptronStyle::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let centre = |layer: &NeuronLayer| {
            let positions = layer.positions();
            (positions[0].y() + positions[positions.len() - 1].y()) / 2.0
        };
        let reference = centre(&mlp.layers()[0]);
        for layer in mlp.layers() {
            prop_assert!(approx_eq!(f32, centre(layer), reference, epsilon = 1e-3));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn layers_centered(sizes in prop::collection::vec(1usize..32, 1..8)) {
            check_layers_centered(sizes)?;
        }
    }
}
