// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use thiserror::Error;
use ledger_kernel::error::KernelError;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unsupported entity type {0:?}")]
    UnsupportedEntity(String),
    #[error("Startup timed out: {ready} of {expected} components ready")]
    StartupTimeout { ready: usize, expected: usize },
    #[error("Component {name} failed: {reason}")]
    Component { name: String, reason: String },
    #[error("Engine channel closed")]
    ChannelClosed,
}

impl From<serde_json::Error> for NodeError {
    fn from(e: serde_json::Error) -> Self {
        NodeError::Config(e.to_string())
    }
}
