//! Error types for VisualNN operations.
//!
//! This module provides the main error type [`VisualNnError`] which wraps the
//! error conditions that can occur while loading a model description,
//! composing a diagram and rendering it.

use std::io;

use thiserror::Error;

/// The main error type for VisualNN operations.
#[derive(Debug, Error)]
pub enum VisualNnError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for VisualNnError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl VisualNnError {
    /// Returns a stable, machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "visualnn::io",
            Self::Config(_) => "visualnn::config",
            Self::Model(_) => "visualnn::model",
            Self::Layout(_) => "visualnn::layout",
            Self::InvalidParameter(_) => "visualnn::parameter",
            Self::Export(_) => "visualnn::export",
        }
    }
}
