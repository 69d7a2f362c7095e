// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use ledger_kernel::hash::default_hasher;
use ledger_kernel::state::ChainState;
use ledger_node::config::NodeConfig;
use ledger_node::engine::ValidatorEngine;
use ledger_node::errors::NodeError;
use ledger_node::service::EngineService;
use ledger_node::supervisor::Supervisor;
use ledger_node::{load_genesis, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "node stopped with error");
            eprintln!("ledger-node: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), NodeError> {
    let cfg = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => NodeConfig::from_json_file(&path)?,
        None => NodeConfig::default(),
    };
    telemetry::init_tracing(&cfg.log_filter);
    tracing::info!(?cfg, "starting ledger node");

    let hasher = default_hasher();
    let state = match &cfg.genesis_path {
        Some(path) => load_genesis(path, hasher.clone())?,
        None => {
            tracing::warn!("no genesis configured; every entity will be rejected until a snapshot is added");
            ChainState::new()
        }
    };

    let engine = ValidatorEngine::new(Arc::new(state), hasher, cfg.protocol.clone());
    let service = EngineService::new(Arc::new(engine), cfg.inbox_capacity);

    let mut supervisor = Supervisor::new();
    supervisor.register(service);
    supervisor.start_all(cfg.startup_timeout()).await?;
    tracing::info!("node ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    supervisor.shutdown_all().await
}
