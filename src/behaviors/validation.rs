//! Request validation ahead of the handler.

use crate::error::{MediatorError, MediatorResult};
use crate::messages::Request;
use crate::pipeline::{Next, PipelineBehavior, Validator};
use async_trait::async_trait;
use futures::future::join_all;
use std::any::type_name;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs every registered [`Validator`] for `R` and short-circuits with
/// [`MediatorError::Validation`] when any of them reports a failure.
///
/// Validators run concurrently; their failures are reported in validator order.
pub struct ValidationBehavior<R: Request> {
    validators: Vec<Arc<dyn Validator<R>>>,
}

impl<R: Request> ValidationBehavior<R> {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn with_validator<V: Validator<R>>(mut self, validator: V) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn with_validators(mut self, validators: Vec<Arc<dyn Validator<R>>>) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }
}

impl<R: Request> Default for ValidationBehavior<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Request> PipelineBehavior<R> for ValidationBehavior<R> {
    async fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R::Response>,
    ) -> MediatorResult<R::Response> {
        if self.validators.is_empty() {
            return next.run().await;
        }

        let failures: Vec<_> = join_all(
            self.validators
                .iter()
                .map(|validator| validator.validate(request, cancel)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        if !failures.is_empty() {
            let request_type = type_name::<R>();
            debug!(request_type, failure_count = failures.len(), "Request rejected by validators");
            return Err(MediatorError::Validation {
                request_type,
                failures,
            });
        }

        next.run().await
    }
}
