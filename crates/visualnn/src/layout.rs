//! Geometric layout of network diagrams.
//!
//! Fully-connected networks are drawn as columns of neurons
//! ([`NeuronLayer`], [`MultiLayerPerceptron`]); convolutional networks as
//! LeNet-style blocks ([`ConvBlock`], [`DenseBlock`], [`ConvNet`]). Every
//! composer produces a [`SceneGraph`](visualnn_core::scene::SceneGraph) in
//! data space.

mod connector;
mod conv_block;
mod convnet;
mod dense_block;
mod neuron_layer;
mod perceptron;

pub use connector::{ConnectorSet, Segment, connect};
pub use conv_block::{ConvBlock, ConvBlockParams};
pub use convnet::{ConvNet, ConvNetStyle, ConvShape};
pub use dense_block::DenseBlock;
pub use neuron_layer::{NEURON_SPACING, NeuronLayer};
pub use perceptron::{DEFAULT_PERCEPTRON_TITLE, MultiLayerPerceptron, PerceptronStyle};
