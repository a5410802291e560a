//! VisualNN Core Types and Definitions
//!
//! This crate provides the foundational types shared by the VisualNN layout
//! engine and its renderers:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, bounds and line helpers ([`geometry`] module)
//! - **Draw**: Strokes and z-ordered SVG output ([`draw`] module)
//! - **Scene**: The renderer-agnostic scene graph ([`scene`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod scene;
