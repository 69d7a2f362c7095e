// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Component lifecycle.
//!
//! Every component runs as its own tokio task and reports readiness on a
//! shared channel. Startup succeeds once every component has reported, and
//! fails on the first component error or when the deadline passes.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::errors::NodeError;

pub trait Component: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Runs until shut down. Must call [`Readiness::ready`] once serving.
    fn start(self: Arc<Self>, readiness: Readiness) -> BoxFuture<'static, Result<(), NodeError>>;

    fn shutdown(&self) -> BoxFuture<'_, Result<(), NodeError>>;
}

enum Signal {
    Ready(String),
    Failed(String, NodeError),
}

/// Handed to a starting component.
pub struct Readiness {
    name: String,
    tx: mpsc::Sender<Signal>,
}

impl Readiness {
    pub async fn ready(&self) {
        let _ = self.tx.send(Signal::Ready(self.name.clone())).await;
    }
}

pub struct Supervisor {
    components: Vec<Arc<dyn Component>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn register(&mut self, component: Arc<dyn Component>) {
        self.components.push(component);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Spawns every component and waits until all are ready.
    pub async fn start_all(&mut self, timeout: Duration) -> Result<(), NodeError> {
        let expected = self.components.len();
        let (tx, mut rx) = mpsc::channel(expected.max(1));
        let deadline = Instant::now() + timeout;

        for component in &self.components {
            let name = component.name().to_string();
            let readiness = Readiness {
                name: name.clone(),
                tx: tx.clone(),
            };
            let failures = tx.clone();
            let component = Arc::clone(component);
            tracing::info!(component = %name, "starting");
            self.tasks.push(tokio::spawn(async move {
                if let Err(e) = component.start(readiness).await {
                    tracing::error!(component = %name, error = %e, "component failed");
                    let _ = failures.send(Signal::Failed(name, e)).await;
                }
            }));
        }
        drop(tx);

        let mut ready = 0;
        while ready < expected {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(Signal::Ready(name))) => {
                    ready += 1;
                    tracing::info!(component = %name, ready, expected, "component ready");
                }
                Ok(Some(Signal::Failed(name, e))) => {
                    self.abort_all();
                    return Err(NodeError::Component {
                        name,
                        reason: e.to_string(),
                    });
                }
                Ok(None) | Err(_) => {
                    tracing::error!(ready, expected, "startup deadline missed");
                    self.abort_all();
                    return Err(NodeError::StartupTimeout { ready, expected });
                }
            }
        }
        Ok(())
    }

    fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Stops components in reverse start order, then reaps their tasks.
    pub async fn shutdown_all(&mut self) -> Result<(), NodeError> {
        let mut first_error = None;
        for component in self.components.iter().rev() {
            tracing::info!(component = component.name(), "stopping");
            if let Err(e) = component.shutdown().await {
                tracing::warn!(component = component.name(), error = %e, "shutdown failed");
                first_error.get_or_insert(e);
            }
        }
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
