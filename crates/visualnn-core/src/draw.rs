//! Drawing primitives shared by renderers.
//!
//! - [`StrokeDefinition`]: how lines and borders are stroked
//! - [`LayeredOutput`] / [`RenderLayer`]: z-ordered collection of SVG nodes

mod layer;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::StrokeDefinition;
