//! Notification fan-out and bus forwarding.

use super::Mediator;
use crate::bus::{BusDelivery, BusEnvelope, PublishOutcome};
use crate::config::MissingBusPolicy;
use crate::error::{MediatorError, MediatorResult};
use crate::messages::Notification;
use std::any::type_name;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

impl Mediator {
    /// Publish `notification` to every handler registered for its type, one at a
    /// time in registration order, then forward it to the event bus if
    /// `send_to_bus` is set.
    ///
    /// The first handler failure stops the fan-out and is returned unchanged;
    /// the bus is only reached once every local handler has succeeded. With
    /// `send_to_bus` set and no bus configured, the outcome reports
    /// [`BusDelivery::NoBusConfigured`], or the call fails with
    /// [`MediatorError::BusNotConfigured`] under [`MissingBusPolicy::Reject`].
    #[instrument(
        level = "debug",
        skip_all,
        fields(notification_type = type_name::<N>(), send_to_bus = send_to_bus)
    )]
    pub async fn publish<N: Notification>(
        &self,
        notification: &N,
        send_to_bus: bool,
        cancel: &CancellationToken,
    ) -> MediatorResult<PublishOutcome> {
        let handlers = self.inner.registry.resolve_notification_handlers::<N>();
        debug!(handler_count = handlers.len(), "Publishing notification");

        for (index, handler) in handlers.iter().enumerate() {
            if let Err(error) = handler.handle(notification, cancel).await {
                debug!(
                    handler_index = index,
                    skipped = handlers.len() - index - 1,
                    error_label = error.as_label(),
                    "Notification handler failed"
                );
                return Err(error);
            }
        }

        let bus = if !send_to_bus {
            BusDelivery::NotRequested
        } else {
            match &self.inner.event_bus {
                Some(event_bus) => {
                    let envelope = BusEnvelope::new(notification);
                    event_bus.publish(&envelope, cancel).await?;
                    debug!(
                        bus = event_bus.name(),
                        envelope_id = %envelope.id,
                        "Notification forwarded to event bus"
                    );
                    BusDelivery::Forwarded {
                        envelope_id: envelope.id,
                    }
                }
                None => match self.inner.config.missing_bus {
                    MissingBusPolicy::Ignore => {
                        debug!("Bus forwarding requested but no event bus is configured");
                        BusDelivery::NoBusConfigured
                    }
                    MissingBusPolicy::Reject => {
                        return Err(MediatorError::BusNotConfigured {
                            notification_type: type_name::<N>(),
                        });
                    }
                },
            }
        };

        Ok(PublishOutcome {
            handlers_invoked: handlers.len(),
            bus,
        })
    }
}
