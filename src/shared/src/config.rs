//! Shared configuration types for the Text Insight services
//!
//! Only the pieces every HTTP-facing service needs live here; service-specific
//! settings stay with the service that owns them.

use serde::{Deserialize, Serialize};

/// Server configuration for HTTP services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Get the full server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
