//! # Message Types
//!
//! Marker traits for the two kinds of values the mediator routes, and the
//! type-derived key used to look their handlers up.

use std::any::{type_name, TypeId};

/// A value dispatched to exactly one handler, producing [`Request::Response`].
///
/// ```rust
/// use aurora_mediator::Request;
///
/// #[derive(Debug)]
/// struct CreateOrder {
///     item: String,
/// }
///
/// #[derive(Debug, PartialEq)]
/// struct OrderId(u64);
///
/// impl Request for CreateOrder {
///     type Response = OrderId;
/// }
/// ```
pub trait Request: Send + Sync + 'static {
    type Response: Send + 'static;
}

/// A value dispatched to zero or more handlers and optionally forwarded to the
/// external bus.
pub trait Notification: Send + Sync + 'static {}

/// Key for handler lookup in the registry: the concrete (Request, Response)
/// type pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    pub request: TypeId,
    pub response: TypeId,
    pub request_name: &'static str,
    pub response_name: &'static str,
}

impl HandlerKey {
    /// Key for request type `R`.
    pub fn of<R: Request>() -> Self {
        Self {
            request: TypeId::of::<R>(),
            response: TypeId::of::<R::Response>(),
            request_name: type_name::<R>(),
            response_name: type_name::<R::Response>(),
        }
    }
}

impl std::fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.request_name, self.response_name)
    }
}
