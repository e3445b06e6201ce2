//! Behavior chain builder.

use super::behavior::{Next, PipelineBehavior};
use super::handler::RequestHandler;
use crate::messages::Request;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Compose `behaviors` around `handler` into a single continuation.
///
/// Folds from the last-registered behavior to the first, so `behaviors[0]`
/// ends up outermost:
///
/// ```text
/// d0 = || handler.handle(request, cancel)
/// di = || behaviors[n - i].handle(request, cancel, d(i-1))
/// ```
pub fn build_chain<'a, R: Request>(
    handler: &'a dyn RequestHandler<R>,
    behaviors: &'a [Arc<dyn PipelineBehavior<R>>],
    request: &'a R,
    cancel: &'a CancellationToken,
) -> Next<'a, R::Response> {
    let terminal = Next::new(move || handler.handle(request, cancel));

    behaviors.iter().rev().fold(terminal, |inner, behavior| {
        Next::new(move || behavior.handle(request, cancel, inner))
    })
}
