//! Router configuration
//!
//! Built once before requests are accepted, then shared behind an [`Arc`].
//! Nothing can flip a setting afterwards without building a new config.

use crate::parser::Method;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Settings consulted by a routing engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Route TRACE requests to handlers. Off by default; handy in tests,
    /// rarely wanted in production.
    pub allow_trace: bool,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_trace(mut self, allow: bool) -> Self {
        self.allow_trace = allow;
        self
    }

    /// Whether a request with this method token may be routed at all
    ///
    /// Unrecognized tokens never are; TRACE only with `allow_trace`.
    pub fn permits(&self, method: &str) -> bool {
        match Method::parse(method.as_bytes()) {
            Some(Method::Trace) => self.allow_trace,
            Some(_) => true,
            None => false,
        }
    }

    /// Parse a config from TOML
    ///
    /// ```
    /// use tramline_core::RouterConfig;
    ///
    /// let config = RouterConfig::from_toml_str("allow_trace = true").unwrap();
    /// assert!(config.permits("TRACE"));
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        tracing::debug!(allow_trace = config.allow_trace, "router config loaded");
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Freeze the config for sharing with collaborators
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
