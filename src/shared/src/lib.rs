//! Shared types and utilities for the Text Insight services

pub mod config;
pub mod types;

pub use config::ServerConfig;

// Export all types from types module
pub use types::*;
