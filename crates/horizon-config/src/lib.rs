//! Configuration for the horizon viewer.
//!
//! Settings persist to disk as RON files with forward/backward compatible
//! serialization: unknown fields are ignored and missing fields fall back to
//! defaults.

mod config;
mod error;

pub use config::{Config, DebugConfig, RenderConfig, SkyboxConfig};
pub use error::ConfigError;
