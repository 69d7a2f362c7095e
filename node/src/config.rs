// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ledger_kernel::config::ProtocolParameters;

use crate::errors::NodeError;

pub const DEFAULT_LOG_FILTER: &str = "ledger_node=debug,ledger_kernel=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub protocol: ProtocolParameters,
    /// Milliseconds every component gets to report ready.
    pub startup_timeout_ms: u64,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// JSON snapshot fixture the chain starts from.
    pub genesis_path: Option<PathBuf>,
    /// Capacity of the engine's inbound queue.
    pub inbox_capacity: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolParameters::default(),
            startup_timeout_ms: 5_000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            genesis_path: None,
            inbox_capacity: 1024,
        }
    }
}

impl NodeConfig {
    /// Reads a JSON config; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, NodeError> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: NodeConfig = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), NodeError> {
        self.protocol.validate()?;
        if self.startup_timeout_ms == 0 {
            return Err(NodeError::Config("startup_timeout_ms must be positive".into()));
        }
        if self.inbox_capacity == 0 {
            return Err(NodeError::Config("inbox_capacity must be positive".into()));
        }
        Ok(())
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }
}
