use super::messages::{CreateOrder, Double, OrderId, OrderPlaced};
use anyhow::anyhow;
use async_trait::async_trait;
use aurora_mediator::{
    BusEnvelope, EventBus, MediatorError, MediatorResult, Next, NotificationHandler,
    PipelineBehavior, RequestHandler,
};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Ordered record of everything the participants did during a test.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

/// Handler answering every `CreateOrder` with a fixed id.
pub struct CreateOrderHandler {
    pub id: u64,
    pub log: CallLog,
}

#[async_trait]
impl RequestHandler<CreateOrder> for CreateOrderHandler {
    async fn handle(
        &self,
        _request: &CreateOrder,
        _cancel: &CancellationToken,
    ) -> MediatorResult<OrderId> {
        self.log.push("handler");
        Ok(OrderId(self.id))
    }
}

/// Handler failing every `CreateOrder`.
pub struct OfflineOrderHandler {
    pub log: CallLog,
}

#[async_trait]
impl RequestHandler<CreateOrder> for OfflineOrderHandler {
    async fn handle(
        &self,
        _request: &CreateOrder,
        _cancel: &CancellationToken,
    ) -> MediatorResult<OrderId> {
        self.log.push("handler");
        Err(anyhow!("inventory offline").into())
    }
}

/// Handler honouring the cancel signal.
pub struct CancellableOrderHandler;

#[async_trait]
impl RequestHandler<CreateOrder> for CancellableOrderHandler {
    async fn handle(
        &self,
        _request: &CreateOrder,
        cancel: &CancellationToken,
    ) -> MediatorResult<OrderId> {
        if cancel.is_cancelled() {
            return Err(MediatorError::Cancelled);
        }
        Ok(OrderId(1))
    }
}

pub struct DoubleHandler;

#[async_trait]
impl RequestHandler<Double> for DoubleHandler {
    async fn handle(&self, request: &Double, _cancel: &CancellationToken) -> MediatorResult<u64> {
        tokio::task::yield_now().await;
        Ok(request.0 * 2)
    }
}

/// Behavior recording a label before and after `next`.
pub struct RecordingBehavior {
    pre: String,
    post: String,
    log: CallLog,
}

impl RecordingBehavior {
    /// Records `<name>-pre` and `<name>-post`.
    pub fn named(name: &str, log: &CallLog) -> Self {
        Self::labels(&format!("{name}-pre"), &format!("{name}-post"), log)
    }

    pub fn labels(pre: &str, post: &str, log: &CallLog) -> Self {
        Self {
            pre: pre.to_string(),
            post: post.to_string(),
            log: log.clone(),
        }
    }
}

#[async_trait]
impl PipelineBehavior<CreateOrder> for RecordingBehavior {
    async fn handle(
        &self,
        _request: &CreateOrder,
        _cancel: &CancellationToken,
        next: Next<'_, OrderId>,
    ) -> MediatorResult<OrderId> {
        self.log.push(self.pre.clone());
        let response = next.run().await;
        self.log.push(self.post.clone());
        response
    }
}

/// Behavior answering on its own without running `next`.
pub struct ShortCircuitBehavior {
    pub id: u64,
    pub log: CallLog,
}

#[async_trait]
impl PipelineBehavior<CreateOrder> for ShortCircuitBehavior {
    async fn handle(
        &self,
        _request: &CreateOrder,
        _cancel: &CancellationToken,
        _next: Next<'_, OrderId>,
    ) -> MediatorResult<OrderId> {
        self.log.push("short-circuit");
        Ok(OrderId(self.id))
    }
}

/// Behavior replacing any downstream failure with a fallback response.
pub struct FallbackBehavior {
    pub fallback: u64,
}

#[async_trait]
impl PipelineBehavior<CreateOrder> for FallbackBehavior {
    async fn handle(
        &self,
        _request: &CreateOrder,
        _cancel: &CancellationToken,
        next: Next<'_, OrderId>,
    ) -> MediatorResult<OrderId> {
        match next.run().await {
            Ok(id) => Ok(id),
            Err(_) => Ok(OrderId(self.fallback)),
        }
    }
}

/// Behavior recording whether it saw a cancelled signal.
pub struct CancelAwareBehavior {
    pub log: CallLog,
}

#[async_trait]
impl PipelineBehavior<CreateOrder> for CancelAwareBehavior {
    async fn handle(
        &self,
        _request: &CreateOrder,
        cancel: &CancellationToken,
        next: Next<'_, OrderId>,
    ) -> MediatorResult<OrderId> {
        self.log.push(format!("cancelled={}", cancel.is_cancelled()));
        next.run().await
    }
}

/// Notification handler recording its name.
pub struct RecordingNotificationHandler {
    name: String,
    log: CallLog,
}

impl RecordingNotificationHandler {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
        }
    }
}

#[async_trait]
impl NotificationHandler<OrderPlaced> for RecordingNotificationHandler {
    async fn handle(
        &self,
        _notification: &OrderPlaced,
        _cancel: &CancellationToken,
    ) -> MediatorResult<()> {
        self.log.push(self.name.clone());
        Ok(())
    }
}

/// Notification handler that records its name and then fails.
pub struct FailingNotificationHandler {
    name: String,
    log: CallLog,
}

impl FailingNotificationHandler {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
        }
    }
}

#[async_trait]
impl NotificationHandler<OrderPlaced> for FailingNotificationHandler {
    async fn handle(
        &self,
        _notification: &OrderPlaced,
        _cancel: &CancellationToken,
    ) -> MediatorResult<()> {
        self.log.push(self.name.clone());
        Err(anyhow!("{} failed", self.name).into())
    }
}

/// Notification handler recording whether it saw a cancelled signal.
pub struct CancelAwareNotificationHandler {
    pub log: CallLog,
}

#[async_trait]
impl NotificationHandler<OrderPlaced> for CancelAwareNotificationHandler {
    async fn handle(
        &self,
        _notification: &OrderPlaced,
        cancel: &CancellationToken,
    ) -> MediatorResult<()> {
        self.log.push(format!("cancelled={}", cancel.is_cancelled()));
        Ok(())
    }
}

/// What a [`RecordingBus`] received.
#[derive(Debug, Clone, PartialEq)]
pub struct BusRecord {
    pub notification_type: &'static str,
    /// Address of the forwarded `OrderPlaced`, if it was one.
    pub address: Option<usize>,
    pub order: Option<u64>,
    pub cancelled: bool,
}

/// Event bus double keeping every envelope it was given.
#[derive(Clone, Default)]
pub struct RecordingBus {
    records: Arc<Mutex<Vec<BusRecord>>>,
    log: CallLog,
    fail: bool,
}

impl RecordingBus {
    pub fn new(log: &CallLog) -> Self {
        Self {
            records: Arc::default(),
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(log: &CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(log)
        }
    }

    pub fn records(&self) -> Vec<BusRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventBus for RecordingBus {
    async fn publish(
        &self,
        envelope: &BusEnvelope<'_>,
        cancel: &CancellationToken,
    ) -> MediatorResult<()> {
        self.log.push("bus");
        let placed = envelope.downcast_ref::<OrderPlaced>();
        self.records.lock().unwrap().push(BusRecord {
            notification_type: envelope.notification_type,
            address: placed.map(|n| n as *const OrderPlaced as usize),
            order: placed.map(|n| n.order),
            cancelled: cancel.is_cancelled(),
        });

        if self.fail {
            return Err(anyhow!("broker unreachable").into());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Message of an application failure carried by [`MediatorError::Handler`].
pub fn handler_message(error: &MediatorError) -> Option<String> {
    match error {
        MediatorError::Handler(inner) => Some(inner.to_string()),
        _ => None,
    }
}
