//! Request dispatch.

use super::Mediator;
use crate::error::{MediatorError, MediatorResult};
use crate::messages::Request;
use crate::pipeline::build_chain;
use std::any::type_name;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

impl Mediator {
    /// Send `request` to its handler through the registered behaviors.
    ///
    /// Fails with [`MediatorError::HandlerNotFound`] before any behavior runs if
    /// no handler is registered. Otherwise returns exactly what the outermost
    /// behavior (or the handler, when there are none) returned. `cancel` is
    /// handed to every participant; the mediator never cancels on its own.
    #[instrument(level = "debug", skip_all, fields(request_type = type_name::<R>()))]
    pub async fn send<R: Request>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> MediatorResult<R::Response> {
        let registry = &self.inner.registry;

        let handler = registry.resolve_handler::<R>().ok_or_else(|| {
            debug!("No handler registered");
            MediatorError::HandlerNotFound {
                request_type: type_name::<R>(),
            }
        })?;
        let behaviors = registry.resolve_behaviors::<R>();

        debug!(behavior_count = behaviors.len(), "Dispatching request");
        build_chain(handler.as_ref(), behaviors, request, cancel)
            .run()
            .await
    }
}
