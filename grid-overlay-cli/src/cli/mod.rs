//! CLI command implementations.
//!
//! - `lines` - Compute grid lines and print them as JSON or SVG
//! - `render` - Draw grid lines over an image

pub mod common;
pub mod config;
pub mod lines;
pub mod render;

pub use lines::cmd_lines;
pub use render::cmd_render;
