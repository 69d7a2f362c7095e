// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Engine run as a supervised component with a bounded inbox.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use ledger_kernel::codec::EncodedEntity;
use tokio::sync::{mpsc, oneshot, Mutex, Notify};

use crate::engine::{Engine, Verdict};
use crate::errors::NodeError;
use crate::supervisor::{Component, Readiness};

struct Request {
    entity: EncodedEntity,
    reply: oneshot::Sender<Result<Verdict, NodeError>>,
}

/// Cloneable sender side of an [`EngineService`].
#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<Request>,
}

impl EngineHandle {
    pub async fn submit(&self, entity: EncodedEntity) -> Result<Verdict, NodeError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Request { entity, reply })
            .await
            .map_err(|_| NodeError::ChannelClosed)?;
        response.await.map_err(|_| NodeError::ChannelClosed)?
    }
}

pub struct EngineService {
    engine: Arc<dyn Engine>,
    sender: mpsc::Sender<Request>,
    inbox: Mutex<Option<mpsc::Receiver<Request>>>,
    stop: Notify,
}

impl EngineService {
    pub fn new(engine: Arc<dyn Engine>, capacity: usize) -> Arc<Self> {
        let (sender, inbox) = mpsc::channel(capacity.max(1));
        Arc::new(Self {
            engine,
            sender,
            inbox: Mutex::new(Some(inbox)),
            stop: Notify::new(),
        })
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            sender: self.sender.clone(),
        }
    }

    async fn run(self: Arc<Self>, readiness: Readiness) -> Result<(), NodeError> {
        let mut inbox = self.inbox.lock().await.take().ok_or_else(|| NodeError::Component {
            name: self.name().to_string(),
            reason: "already started".into(),
        })?;
        readiness.ready().await;

        let mut processed: u64 = 0;
        loop {
            tokio::select! {
                _ = self.stop.notified() => break,
                request = inbox.recv() => match request {
                    Some(Request { entity, reply }) => {
                        processed += 1;
                        let _ = reply.send(self.engine.process(&entity));
                    }
                    None => break,
                },
            }
        }
        tracing::info!(processed, "engine stopped");
        Ok(())
    }
}

impl Component for EngineService {
    fn name(&self) -> &str {
        "engine"
    }

    fn start(self: Arc<Self>, readiness: Readiness) -> BoxFuture<'static, Result<(), NodeError>> {
        self.run(readiness).boxed()
    }

    fn shutdown(&self) -> BoxFuture<'_, Result<(), NodeError>> {
        async move {
            self.stop.notify_one();
            Ok(())
        }
        .boxed()
    }
}
