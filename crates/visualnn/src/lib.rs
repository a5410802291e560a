//! VisualNN - geometric layout of neural network diagrams.
//!
//! Layout and rendering of three diagram families: multilayer perceptrons,
//! LeNet-style convolutional networks and an animated McCulloch-Pitts neuron.
//! Layout produces a renderer-agnostic [`scene::SceneGraph`]; the SVG backend
//! turns it into a document.

pub mod animate;
pub mod config;
pub mod export;
pub mod layout;
pub mod model;

mod error;

pub use visualnn_core::{color, draw, geometry, scene};

pub use error::VisualNnError;

use log::{debug, info, trace};

use animate::McCullochPitts;
use config::AppConfig;
use export::{Renderer, svg::SvgBuilder};
use layout::{ConvNet, ConvShape, MultiLayerPerceptron};
use model::{ModelSpec, NetworkShape};
use scene::SceneGraph;

/// Builder for laying out and rendering network diagrams.
///
/// # Examples
///
/// ```rust
/// use visualnn::{Visualizer, config::AppConfig};
///
/// let visualizer = Visualizer::new(AppConfig::default());
///
/// // Lay out a 3-4-2 perceptron
/// let scene = visualizer.perceptron(&[3, 4, 2])
///     .expect("Failed to lay out");
///
/// // Render the scene to SVG
/// let svg = visualizer.render_svg(&scene)
///     .expect("Failed to render");
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct Visualizer {
    config: AppConfig,
}

impl Visualizer {
    /// Create a new visualizer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out a fully-connected network from its layer sizes.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Config`] for invalid style colors and
    /// [`VisualNnError::Layout`] for an empty network or an empty layer.
    pub fn perceptron(&self, layer_sizes: &[usize]) -> Result<SceneGraph, VisualNnError> {
        self.perceptron_titled(layer_sizes, None, false)
    }

    fn perceptron_titled(
        &self,
        layer_sizes: &[usize],
        fallback_title: Option<&str>,
        force_grid: bool,
    ) -> Result<SceneGraph, VisualNnError> {
        info!(layers:? = layer_sizes, force_grid; "Laying out perceptron");

        let mut style = self
            .config
            .style()
            .perceptron_style()
            .map_err(VisualNnError::Config)?;
        // A configured title wins over the model name.
        if let (None, Some(title)) = (self.config.style().title(), fallback_title) {
            style.title = title.to_string();
        }
        style.show_grid |= force_grid;

        let mlp = MultiLayerPerceptron::new(layer_sizes, style)?;
        let scene = mlp.to_scene();

        debug!(traces = scene.traces().len(); "Perceptron laid out");
        trace!(scene:?; "Perceptron scene");
        Ok(scene)
    }

    /// Lay out a convolutional network followed by dense layers.
    ///
    /// `title` falls back to the configured style title.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Config`] for invalid convnet settings and
    /// [`VisualNnError::Layout`] when there are no conv layers or a layer is
    /// empty.
    pub fn convnet(
        &self,
        conv: &[ConvShape],
        dense: &[usize],
        title: Option<&str>,
    ) -> Result<SceneGraph, VisualNnError> {
        info!(conv_layers = conv.len(), dense_layers = dense.len(); "Laying out convnet");

        let title = title
            .or(self.config.style().title())
            .map(str::to_string);
        let style = self
            .config
            .convnet()
            .convnet_style(title)
            .map_err(VisualNnError::Config)?;

        let net = ConvNet::new(conv, dense, style)?;
        let scene = net.to_scene();

        debug!(shapes = scene.shapes().len(), y_mid = net.y_mid(); "Convnet laid out");
        trace!(scene:?; "Convnet scene");
        Ok(scene)
    }

    /// Lay out an already classified network.
    ///
    /// # Errors
    ///
    /// See [`Visualizer::perceptron`] and [`Visualizer::convnet`].
    pub fn network(
        &self,
        shape: &NetworkShape,
        title: Option<&str>,
    ) -> Result<SceneGraph, VisualNnError> {
        match shape {
            NetworkShape::Perceptron(sizes) => self.perceptron_titled(sizes, title, false),
            NetworkShape::ConvNet { conv, dense } => self.convnet(conv, dense, title),
        }
    }

    /// Classify a model description and lay it out.
    ///
    /// The model name, if any, is used as the title unless the
    /// configuration sets one. Perceptrons loaded from a model always show
    /// the grid.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Model`] for malformed layer shapes and the
    /// errors of [`Visualizer::network`].
    pub fn from_model(&self, model: &ModelSpec) -> Result<SceneGraph, VisualNnError> {
        info!(name:? = model.name, layers = model.layers.len(); "Visualising model");

        let shape = model.network_shape()?;
        debug!(shape:?; "Model classified");

        match &shape {
            NetworkShape::Perceptron(sizes) => {
                self.perceptron_titled(sizes, model.name.as_deref(), true)
            }
            NetworkShape::ConvNet { conv, dense } => {
                let title = self
                    .config
                    .style()
                    .title()
                    .or(model.name.as_deref());
                self.convnet(conv, dense, title)
            }
        }
    }

    /// Build the animated McCulloch-Pitts neuron.
    ///
    /// `frames_per_edge` overrides the configured animation speed.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Config`] for an invalid animation color and
    /// [`VisualNnError::InvalidParameter`] for zero frames per edge.
    pub fn neuron(
        &self,
        inputs: [f64; 3],
        weights: [f64; 3],
        threshold: f64,
        frames_per_edge: Option<usize>,
    ) -> Result<SceneGraph, VisualNnError> {
        let animation = self.config.animation();
        let fps = frames_per_edge.unwrap_or(animation.frames_per_edge());
        let color = animation.color().map_err(VisualNnError::Config)?;

        info!(inputs:?, weights:?, threshold, fps; "Building McCulloch-Pitts animation");

        McCullochPitts::new(inputs, weights, threshold).visualise(fps, color)
    }

    /// Render a scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Config`] for an invalid background color and
    /// [`VisualNnError::Export`] if rendering fails.
    pub fn render_svg(&self, scene: &SceneGraph) -> Result<String, VisualNnError> {
        let canvas = self.config.canvas();
        let background = canvas.background_color().map_err(VisualNnError::Config)?;

        let mut renderer = SvgBuilder::new()
            .with_canvas(canvas)
            .with_background_color(background)
            .with_frame_duration_ms(self.config.animation().frame_duration_ms())
            .build()?;

        renderer.render(scene)?;
        let svg = renderer
            .take_output()
            .ok_or_else(|| export::Error::Render("renderer produced no output".to_string()))?;

        info!("SVG rendered successfully");
        Ok(svg)
    }
}
