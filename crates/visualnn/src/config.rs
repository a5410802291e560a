//! Configuration types for VisualNN diagrams.
//!
//! This module provides configuration structures that control how diagrams
//! are styled, laid out and rendered. All types implement
//! [`serde::Deserialize`] for loading from TOML files, and every field falls
//! back to a default when missing.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`StyleConfig`] - Perceptron colors, grid, bias neurons and title.
//! - [`ConvNetConfig`] - Block colors, shifts and dense block scaling.
//! - [`AnimationConfig`] - Speed and color of the neuron animation.
//! - [`CanvasConfig`] - Output size and background of the SVG.
//!
//! # Example
//!
//! ```
//! # use visualnn::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [style]
//!     neuron_color = "green"
//!     show_bias = true
//!     "#,
//! ).unwrap();
//!
//! assert!(config.style().show_bias());
//! assert_eq!(config.animation().frames_per_edge(), 2);
//! ```

use serde::Deserialize;

use visualnn_core::color::Color;

use crate::layout::{ConvNetStyle, DEFAULT_PERCEPTRON_TITLE, PerceptronStyle};

fn parse_color(value: &str, field: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Perceptron style section.
    #[serde(default)]
    style: StyleConfig,

    /// Convolutional network section.
    #[serde(default)]
    convnet: ConvNetConfig,

    /// Neuron animation section.
    #[serde(default)]
    animation: AnimationConfig,

    /// Output canvas section.
    #[serde(default)]
    canvas: CanvasConfig,
}

impl AppConfig {
    pub fn new(
        style: StyleConfig,
        convnet: ConvNetConfig,
        animation: AnimationConfig,
        canvas: CanvasConfig,
    ) -> Self {
        Self {
            style,
            convnet,
            animation,
            canvas,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn convnet(&self) -> &ConvNetConfig {
        &self.convnet
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }
}

/// Style of perceptron diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    neuron_color: String,
    bias_color: String,
    connector_color: String,
    show_grid: bool,
    show_bias: bool,
    title: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            neuron_color: "blue".to_string(),
            bias_color: "red".to_string(),
            connector_color: "blue".to_string(),
            show_grid: false,
            show_bias: false,
            title: None,
        }
    }
}

impl StyleConfig {
    pub fn neuron_color(&self) -> Result<Color, String> {
        parse_color(&self.neuron_color, "neuron color")
    }

    pub fn bias_color(&self) -> Result<Color, String> {
        parse_color(&self.bias_color, "bias color")
    }

    pub fn connector_color(&self) -> Result<Color, String> {
        parse_color(&self.connector_color, "connector color")
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn show_bias(&self) -> bool {
        self.show_bias
    }

    /// Configured title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Resolves the section into a perceptron style.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the colors cannot be parsed.
    pub fn perceptron_style(&self) -> Result<PerceptronStyle, String> {
        Ok(PerceptronStyle {
            neuron_color: self.neuron_color()?,
            bias_color: self.bias_color()?,
            connector_color: self.connector_color()?,
            show_grid: self.show_grid,
            show_bias: self.show_bias,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_PERCEPTRON_TITLE.to_string()),
        })
    }
}

/// Style and spacing of convolutional network diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConvNetConfig {
    channel_colors: [String; 2],
    dense_color: String,
    highlight_color: String,
    connector_color: String,
    transparency: f32,
    x_shift: f32,
    y_shift: f32,
    scaling_factor: f32,
}

impl Default for ConvNetConfig {
    fn default() -> Self {
        Self {
            channel_colors: ["rgb(128, 0, 128)".to_string(), "rgb(45, 0, 65)".to_string()],
            dense_color: "rgb(128, 0, 128)".to_string(),
            highlight_color: "rgb(230, 0, 230)".to_string(),
            connector_color: "black".to_string(),
            transparency: 0.9,
            x_shift: 2.0,
            y_shift: 5.0,
            scaling_factor: 2.0,
        }
    }
}

impl ConvNetConfig {
    pub fn transparency(&self) -> f32 {
        self.transparency
    }

    pub fn scaling_factor(&self) -> f32 {
        self.scaling_factor
    }

    /// Resolves the section into a convnet style with the given title.
    ///
    /// # Errors
    ///
    /// Returns an error if a color cannot be parsed or the transparency is
    /// outside `[0, 1]`.
    pub fn convnet_style(&self, title: Option<String>) -> Result<ConvNetStyle, String> {
        if !(0.0..=1.0).contains(&self.transparency) {
            return Err(format!(
                "Invalid transparency in config: {} is not between 0 and 1",
                self.transparency
            ));
        }

        let [first, second] = &self.channel_colors;
        Ok(ConvNetStyle {
            channel_colors: [
                parse_color(first, "channel color")?,
                parse_color(second, "channel color")?,
            ],
            dense_color: parse_color(&self.dense_color, "dense color")?,
            highlight_color: parse_color(&self.highlight_color, "highlight color")?,
            connector_color: parse_color(&self.connector_color, "connector color")?,
            transparency: self.transparency,
            x_shift: self.x_shift,
            y_shift: self.y_shift,
            scaling_factor: self.scaling_factor,
            title,
        })
    }
}

/// Speed and color of the McCulloch-Pitts animation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    frames_per_edge: usize,
    color: String,
    frame_duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames_per_edge: 2,
            color: "blue".to_string(),
            frame_duration_ms: 250,
        }
    }
}

impl AnimationConfig {
    /// Frames generated for each edge of the neuron.
    pub fn frames_per_edge(&self) -> usize {
        self.frames_per_edge
    }

    pub fn color(&self) -> Result<Color, String> {
        parse_color(&self.color, "animation color")
    }

    /// How long each frame stays on screen during playback.
    pub fn frame_duration_ms(&self) -> u64 {
        self.frame_duration_ms
    }
}

/// Size and background of the rendered SVG.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    width: f32,
    height: f32,
    margin: f32,
    background_color: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
            background_color: None,
        }
    }
}

impl CanvasConfig {
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Space around the plot area, holding the title and tick labels.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Returns the parsed background color, or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
