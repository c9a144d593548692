//! Shared settings for the libris workspace.

pub mod settings;

pub use settings::{Environment, LogFormat, Settings};
