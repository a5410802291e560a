//! Model descriptions and their classification into diagram shapes.
//!
//! A model is described by its input shape and an ordered list of layers,
//! each with a kind name and an output shape (batch dimension excluded).
//! Descriptions are read from TOML or JSON:
//!
//! ```toml
//! input_shape = [28, 28, 1]
//!
//! [[layers]]
//! kind = "Conv2D"
//! output_shape = [26, 26, 32]
//!
//! [[layers]]
//! kind = "Flatten"
//! output_shape = [21632]
//!
//! [[layers]]
//! kind = "Dense"
//! output_shape = [10]
//! ```
//!
//! Layers are first reduced to [`LayerDescriptor`]s, then the whole network
//! is classified by [`classify`] as either a perceptron or a convolutional
//! network.

use std::{fs, path::Path};

use log::{debug, info, warn};
use serde::Deserialize;

use crate::{VisualNnError, layout::ConvShape};

/// The layer kinds understood by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerKind {
    Dense,
    Conv2D,
    MaxPooling2D,
    Flatten,
    /// Any other layer; dropped from the diagram.
    Unsupported(String),
}

impl From<&str> for LayerKind {
    fn from(name: &str) -> Self {
        match name {
            "Dense" => Self::Dense,
            "Conv2D" => Self::Conv2D,
            "MaxPooling2D" => Self::MaxPooling2D,
            "Flatten" => Self::Flatten,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

/// One layer of a model description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelLayer {
    /// Layer class name, e.g. "Dense" or "Conv2D".
    #[serde(alias = "class_name")]
    pub kind: String,
    /// Output shape without the batch dimension.
    pub output_shape: Vec<usize>,
}

impl ModelLayer {
    pub fn layer_kind(&self) -> LayerKind {
        LayerKind::from(self.kind.as_str())
    }
}

/// A model description: input shape plus ordered layers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelSpec {
    /// Optional model name, used as the diagram title.
    #[serde(default)]
    pub name: Option<String>,
    /// Input shape without the batch dimension.
    pub input_shape: Vec<usize>,
    #[serde(default)]
    pub layers: Vec<ModelLayer>,
}

/// Diagram-level description of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerDescriptor {
    Dense {
        count: usize,
    },
    Conv2D {
        width: usize,
        height: usize,
        channels: usize,
    },
}

impl LayerDescriptor {
    fn dense(shape: &[usize], context: &str) -> Result<Self, VisualNnError> {
        match shape {
            [count, ..] => Ok(Self::Dense { count: *count }),
            [] => Err(VisualNnError::Model(format!(
                "{context}: a dense layer needs a non-empty output shape"
            ))),
        }
    }

    fn conv(shape: &[usize], context: &str) -> Result<Self, VisualNnError> {
        match shape {
            [width, height, channels, ..] => Ok(Self::Conv2D {
                width: *width,
                height: *height,
                channels: *channels,
            }),
            _ => Err(VisualNnError::Model(format!(
                "{context}: a convolutional layer needs a (width, height, channels) shape, got {shape:?}"
            ))),
        }
    }

    pub fn is_dense(&self) -> bool {
        matches!(self, Self::Dense { .. })
    }
}

/// The two diagram families a network can be drawn as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkShape {
    /// Every layer is dense: drawn as a multilayer perceptron.
    Perceptron(Vec<usize>),
    /// Convolutional layers followed by dense layers.
    ConvNet {
        conv: Vec<ConvShape>,
        dense: Vec<usize>,
    },
}

impl ModelSpec {
    /// Parses a TOML model description.
    pub fn from_toml_str(source: &str) -> Result<Self, VisualNnError> {
        toml::from_str(source)
            .map_err(|err| VisualNnError::Model(format!("invalid TOML model description: {err}")))
    }

    /// Parses a JSON model description.
    pub fn from_json_str(source: &str) -> Result<Self, VisualNnError> {
        serde_json::from_str(source)
            .map_err(|err| VisualNnError::Model(format!("invalid JSON model description: {err}")))
    }

    /// Reads a model description, picking the format from the file extension.
    ///
    /// Files ending in `.json` are read as JSON, everything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VisualNnError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        info!(path = path.display().to_string(), is_json; "Loading model description");

        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        }
    }

    /// Reduces the model to diagram layer descriptors, input layer first.
    ///
    /// Pooling layers are drawn as convolutional layers and flatten layers as
    /// dense layers. Unsupported layers are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::Model`] if a shape does not fit its layer kind.
    pub fn descriptors(&self) -> Result<Vec<LayerDescriptor>, VisualNnError> {
        let mut descriptors = Vec::with_capacity(self.layers.len() + 1);

        let input = if self.input_shape.len() == 1 {
            LayerDescriptor::dense(&self.input_shape, "input")?
        } else {
            LayerDescriptor::conv(&self.input_shape, "input")?
        };
        descriptors.push(input);

        for (index, layer) in self.layers.iter().enumerate() {
            let context = format!("layer {index} ({})", layer.kind);
            let descriptor = match layer.layer_kind() {
                LayerKind::Dense | LayerKind::Flatten => {
                    LayerDescriptor::dense(&layer.output_shape, &context)?
                }
                LayerKind::Conv2D | LayerKind::MaxPooling2D => {
                    LayerDescriptor::conv(&layer.output_shape, &context)?
                }
                LayerKind::Unsupported(kind) => {
                    warn!(index, kind; "Skipping unsupported layer");
                    continue;
                }
            };
            descriptors.push(descriptor);
        }

        debug!(descriptors = descriptors.len(); "Model reduced to layer descriptors");
        Ok(descriptors)
    }

    /// Shorthand for [`classify`] applied to [`ModelSpec::descriptors`].
    pub fn network_shape(&self) -> Result<NetworkShape, VisualNnError> {
        classify(&self.descriptors()?)
    }
}

/// Decides how a sequence of layers is drawn.
///
/// A network made only of dense layers is a perceptron. Anything else is a
/// convolutional network whose conv and dense layers are partitioned in
/// order.
///
/// # Errors
///
/// Returns [`VisualNnError::Model`] if `descriptors` is empty.
///
/// # Examples
///
/// ```
/// # use visualnn::model::{LayerDescriptor, NetworkShape, classify};
/// let layers = [
///     LayerDescriptor::Dense { count: 4 },
///     LayerDescriptor::Dense { count: 2 },
/// ];
/// assert_eq!(classify(&layers).unwrap(), NetworkShape::Perceptron(vec![4, 2]));
/// ```
pub fn classify(descriptors: &[LayerDescriptor]) -> Result<NetworkShape, VisualNnError> {
    if descriptors.is_empty() {
        return Err(VisualNnError::Model("the model has no layers".to_string()));
    }

    if descriptors.iter().all(LayerDescriptor::is_dense) {
        let sizes = descriptors
            .iter()
            .filter_map(|descriptor| match descriptor {
                LayerDescriptor::Dense { count } => Some(*count),
                LayerDescriptor::Conv2D { .. } => None,
            })
            .collect();
        return Ok(NetworkShape::Perceptron(sizes));
    }

    let mut conv = Vec::new();
    let mut dense = Vec::new();
    for descriptor in descriptors {
        match *descriptor {
            LayerDescriptor::Conv2D {
                width,
                height,
                channels,
            } => {
                if !dense.is_empty() {
                    warn!(
                        after_dense = dense.len();
                        "Convolutional layer follows a dense layer, drawing it with the other convolutional layers"
                    );
                }
                conv.push(ConvShape::new(width, height, channels));
            }
            LayerDescriptor::Dense { count } => dense.push(count),
        }
    }

    Ok(NetworkShape::ConvNet { conv, dense })
}
