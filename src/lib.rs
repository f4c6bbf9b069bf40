//! A rich single/multi-line text editing widget for terminal UI toolkits.
//!
//! The widget model lives in `richedit_core` and is re-exported here. This
//! crate adds TOML configuration that builds a ready-to-use widget.

pub mod config;

pub use config::{Config, ConfigError};
pub use richedit_core::*;
