//! Cedar Viewer - terminal front end for Cedar schemas and entity sets.
//!
//! The parsing and hierarchy logic lives in `cedar-core`, the view models in
//! `viewer-projection`. This crate adds what a terminal session needs:
//!
//! - `config` - YAML configuration with environment overrides
//! - `loader` - file reading, schema format sniffing, bundled sample data
//! - `render` - text and JSON renderers implementing `Renderer`
//! - `repl` - interactive command loop (feature `cli`)

pub mod config;
pub mod loader;
pub mod render;
#[cfg(feature = "cli")]
pub mod repl;

pub use config::ViewerConfig;
pub use render::{OutputFormat, TerminalRenderer};

pub use cedar_core;
pub use viewer_projection;
