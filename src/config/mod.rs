//! Configuration management for udo.
//!
//! This module handles loading and saving configuration from `~/.udo/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig};
