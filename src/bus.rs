//! # External Event Bus
//!
//! Seam for forwarding notifications out of process (message brokers, streams,
//! webhooks). The mediator owns no bus implementation; it hands the adapter a
//! [`BusEnvelope`] borrowing the very notification the local handlers saw.

use crate::error::MediatorResult;
use crate::messages::Notification;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::any::{type_name, Any};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Envelope handed to [`EventBus::publish`].
pub struct BusEnvelope<'a> {
    pub id: Uuid,
    pub notification_type: &'static str,
    pub published_at: DateTime<Utc>,
    notification: &'a (dyn Any + Send + Sync),
}

impl<'a> BusEnvelope<'a> {
    pub fn new<N: Notification>(notification: &'a N) -> Self {
        Self {
            id: Uuid::new_v4(),
            notification_type: type_name::<N>(),
            published_at: Utc::now(),
            notification,
        }
    }

    /// The wrapped notification, if it is an `N`.
    pub fn downcast_ref<N: Notification>(&self) -> Option<&'a N> {
        self.notification.downcast_ref::<N>()
    }

    pub fn is<N: Notification>(&self) -> bool {
        self.notification.is::<N>()
    }
}

impl std::fmt::Debug for BusEnvelope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusEnvelope")
            .field("id", &self.id)
            .field("notification_type", &self.notification_type)
            .field("published_at", &self.published_at)
            .finish_non_exhaustive()
    }
}

/// Out-of-process delivery sink. At most one is configured per mediator.
///
/// Failures are returned to the `publish` caller unchanged; the mediator never
/// retries a forward.
#[async_trait]
pub trait EventBus: Send + Sync + 'static {
    async fn publish(
        &self,
        envelope: &BusEnvelope<'_>,
        cancel: &CancellationToken,
    ) -> MediatorResult<()>;

    /// Name used in logs. Override with something short ("kafka", "sns").
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// What happened to the bus leg of a `publish` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusDelivery {
    /// `send_to_bus` was false.
    NotRequested,
    /// Handed to the configured bus, which accepted it.
    Forwarded { envelope_id: Uuid },
    /// `send_to_bus` was true but no bus is configured.
    NoBusConfigured,
}

/// Successful result of a `publish` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Local notification handlers that ran, all successfully.
    pub handlers_invoked: usize,
    pub bus: BusDelivery,
}

impl PublishOutcome {
    pub fn forwarded(&self) -> bool {
        matches!(self.bus, BusDelivery::Forwarded { .. })
    }
}
