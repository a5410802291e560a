//! Rendering of scene graphs into output formats.
//!
//! This module provides the [`Renderer`] trait, the boundary between the
//! layout engine and a display backend. It is the final stage of the
//! VisualNN pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Model description / layer sizes / neuron parameters
//!     ↓ classify
//! Layer descriptors
//!     ↓ layout
//! SceneGraph (data space)
//!     ↓ render (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::SvgRenderer`]
//!
//! # Error Handling
//!
//! Render operations return [`Error`]. [`Error`] converts into
//! [`VisualNnError::Export`] at the crate boundary.
//!
//! [`VisualNnError::Export`]: crate::VisualNnError::Export

/// SVG export backend.
pub mod svg;

use visualnn_core::scene::SceneGraph;

/// Abstraction for scene rendering backends.
///
/// A renderer is a write-only sink: it consumes a [`SceneGraph`] and keeps
/// or writes the result; nothing flows back into the layout engine.
pub trait Renderer {
    /// Renders one scene.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted to the
    /// target format.
    fn render(&mut self, scene: &SceneGraph) -> Result<(), Error>;
}

/// Errors that can occur while rendering a scene.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
