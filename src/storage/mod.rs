//! Storage layer: TOML configuration files under the user config directory.

pub mod config;

pub use config::{Config, Profile};
