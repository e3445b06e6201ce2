//! Handler capabilities invoked at the end of a send chain and during
//! notification fan-out.

use crate::error::MediatorResult;
use crate::messages::{Notification, Request};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// The single handler bound to a request type.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    /// Handle the request. Cancellation is cooperative: return
    /// [`MediatorError::Cancelled`](crate::MediatorError::Cancelled) if `cancel`
    /// fires and the work should stop.
    async fn handle(&self, request: &R, cancel: &CancellationToken) -> MediatorResult<R::Response>;
}

/// One of the (zero or more) handlers bound to a notification type.
#[async_trait]
pub trait NotificationHandler<N: Notification>: Send + Sync + 'static {
    async fn handle(&self, notification: &N, cancel: &CancellationToken) -> MediatorResult<()>;
}
