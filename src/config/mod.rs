//! Configuration module for adhesion-cli
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AdhesionPaths;
pub use settings::Settings;
