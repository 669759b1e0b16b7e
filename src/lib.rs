//! # Video Resolution Selector
//!
//! A node for node-graph video generation pipelines that picks a preset
//! `(width, height)` from a generation mode, an aspect ratio category and a
//! quality tier. The node registers itself with the host and can also be
//! served as an MCP tool over stdio.

pub mod config;
pub mod errors;
pub mod node;
pub mod registry;
pub mod server;
pub mod table;
pub mod types;

pub use errors::{Result, SelectorError};
pub use table::{lookup, resolve, DEFAULT_RESOLUTION};
pub use types::{AspectRatio, Mode, Quality, Resolution, ResolutionRequest};
