//! # Pipeline Behaviors
//!
//! Middleware wrapping a request handler. A behavior receives the request, the
//! cancel signal and [`Next`], the continuation running everything inside it.
//!
//! ```text
//! B1 pre ──► B2 pre ──► ... ──► Handler ──► ... ──► B2 post ──► B1 post
//! ```
//!
//! A behavior may:
//! - run `next` once, doing work before and/or after it;
//! - never run `next`, short-circuiting the handler and every inner behavior;
//! - run `next` and replace its error or its response;
//! - return the error from `next` unchanged.
//!
//! [`Next::run`] consumes the continuation, so it can run at most once.

use crate::error::{MediatorResult, ValidationFailure};
use crate::messages::Request;
use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

/// Continuation producing the response of everything further down the chain.
pub struct Next<'a, T> {
    continuation: Box<dyn FnOnce() -> BoxFuture<'a, MediatorResult<T>> + Send + 'a>,
}

impl<'a, T: 'a> Next<'a, T> {
    /// Wrap a continuation. Mostly useful for exercising a behavior in isolation.
    pub fn new<F>(continuation: F) -> Self
    where
        F: FnOnce() -> BoxFuture<'a, MediatorResult<T>> + Send + 'a,
    {
        Self {
            continuation: Box::new(continuation),
        }
    }

    /// Run the rest of the chain.
    pub async fn run(self) -> MediatorResult<T> {
        (self.continuation)().await
    }
}

impl<T> std::fmt::Debug for Next<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// Cross-cutting step wrapped around the handler for request type `R`.
#[async_trait]
pub trait PipelineBehavior<R: Request>: Send + Sync + 'static {
    async fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R::Response>,
    ) -> MediatorResult<R::Response>;
}

/// Rule set checked by [`ValidationBehavior`](crate::ValidationBehavior) before
/// the handler runs. An empty result means the request is valid.
#[async_trait]
pub trait Validator<R: Request>: Send + Sync + 'static {
    async fn validate(&self, request: &R, cancel: &CancellationToken) -> Vec<ValidationFailure>;
}
