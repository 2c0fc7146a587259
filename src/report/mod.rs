//! Report building and rendering.

pub mod builder;
pub mod render;

pub use builder::*;
pub use render::*;
