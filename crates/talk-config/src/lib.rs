//! Configuration and file management for talk-topic
//!
//! This crate provides:
//! - File path utilities for cache files
//! - Application configuration (AppConfig) loaded from `.talk-topic.toml`

pub mod app_config;
pub mod paths;

pub use app_config::AppConfig;
pub use paths::cache_dir;
