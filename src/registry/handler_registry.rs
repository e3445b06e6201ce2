//! # Handler Registry
//!
//! Type-indexed, read-only registry resolving request handlers, pipeline
//! behaviors and notification handlers.
//!
//! ## Architecture
//!
//! Entries are stored type-erased (`Box<dyn Any>`) under the `TypeId` of the
//! message and downcast back to their typed `Arc<dyn ...>` form on lookup:
//!
//! ```text
//! HandlerKey(R, R::Response) ──► Arc<dyn RequestHandler<R>>
//! HandlerKey(R, R::Response) ──► Vec<Arc<dyn PipelineBehavior<R>>>   (registration order)
//! TypeId(N)                  ──► Vec<Arc<dyn NotificationHandler<N>>> (registration order)
//! ```
//!
//! The registry is populated once through [`RegistryBuilder`] and never mutated
//! afterwards, so concurrent dispatches read it without locking.

use crate::error::{MediatorError, MediatorResult};
use crate::messages::{HandlerKey, Notification, Request};
use crate::pipeline::{NotificationHandler, PipelineBehavior, RequestHandler};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

type ErasedEntry = Box<dyn Any + Send + Sync>;

/// Registry statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub request_handlers: usize,
    pub behaviors: usize,
    pub notification_types: usize,
    pub notification_handlers: usize,
}

/// Read-only lookup from message type to its registered participants.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<HandlerKey, ErasedEntry>,
    behaviors: HashMap<HandlerKey, ErasedEntry>,
    notification_handlers: HashMap<TypeId, ErasedEntry>,
    stats: RegistryStats,
}

impl HandlerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The handler registered for `R`, if any.
    pub fn resolve_handler<R: Request>(&self) -> Option<Arc<dyn RequestHandler<R>>> {
        self.handlers
            .get(&HandlerKey::of::<R>())
            .and_then(|entry| entry.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .cloned()
    }

    /// Behaviors registered for `R`, in registration order.
    pub fn resolve_behaviors<R: Request>(&self) -> &[Arc<dyn PipelineBehavior<R>>] {
        self.behaviors
            .get(&HandlerKey::of::<R>())
            .and_then(|entry| entry.downcast_ref::<Vec<Arc<dyn PipelineBehavior<R>>>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Notification handlers registered for `N`, in registration order.
    pub fn resolve_notification_handlers<N: Notification>(
        &self,
    ) -> &[Arc<dyn NotificationHandler<N>>] {
        self.notification_handlers
            .get(&TypeId::of::<N>())
            .and_then(|entry| entry.downcast_ref::<Vec<Arc<dyn NotificationHandler<N>>>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats.clone()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Wiring surface populating a [`HandlerRegistry`].
///
/// Registration order of behaviors and notification handlers is preserved.
/// A second handler for the same request type is reported by [`build`](Self::build).
#[derive(Default)]
pub struct RegistryBuilder {
    registry: HandlerRegistry,
    duplicates: Vec<&'static str>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for request type `R`.
    pub fn handler<R, H>(self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R>,
    {
        self.handler_arc::<R>(Arc::new(handler))
    }

    /// Register an already shared handler for request type `R`.
    pub fn handler_arc<R: Request>(mut self, handler: Arc<dyn RequestHandler<R>>) -> Self {
        let key = HandlerKey::of::<R>();
        debug!(key = %key, "Registering request handler");

        if self.registry.handlers.contains_key(&key) {
            self.duplicates.push(key.request_name);
        } else {
            self.registry.handlers.insert(key, Box::new(handler));
            self.registry.stats.request_handlers += 1;
        }
        self
    }

    /// Append a behavior to the chain of request type `R`.
    pub fn behavior<R, B>(self, behavior: B) -> Self
    where
        R: Request,
        B: PipelineBehavior<R>,
    {
        self.behavior_arc::<R>(Arc::new(behavior))
    }

    /// Append an already shared behavior to the chain of request type `R`.
    pub fn behavior_arc<R: Request>(mut self, behavior: Arc<dyn PipelineBehavior<R>>) -> Self {
        let key = HandlerKey::of::<R>();
        debug!(key = %key, "Registering pipeline behavior");

        let entry = self
            .registry
            .behaviors
            .entry(key)
            .or_insert_with(|| Box::new(Vec::<Arc<dyn PipelineBehavior<R>>>::new()));
        if let Some(chain) = entry.downcast_mut::<Vec<Arc<dyn PipelineBehavior<R>>>>() {
            chain.push(behavior);
            self.registry.stats.behaviors += 1;
        }
        self
    }

    /// Append a handler to the fan-out of notification type `N`.
    pub fn notification_handler<N, H>(self, handler: H) -> Self
    where
        N: Notification,
        H: NotificationHandler<N>,
    {
        self.notification_handler_arc::<N>(Arc::new(handler))
    }

    /// Append an already shared handler to the fan-out of notification type `N`.
    pub fn notification_handler_arc<N: Notification>(
        mut self,
        handler: Arc<dyn NotificationHandler<N>>,
    ) -> Self {
        debug!(
            notification_type = type_name::<N>(),
            "Registering notification handler"
        );

        let type_id = TypeId::of::<N>();
        if !self.registry.notification_handlers.contains_key(&type_id) {
            self.registry.stats.notification_types += 1;
        }

        let entry = self
            .registry
            .notification_handlers
            .entry(type_id)
            .or_insert_with(|| Box::new(Vec::<Arc<dyn NotificationHandler<N>>>::new()));
        if let Some(handlers) = entry.downcast_mut::<Vec<Arc<dyn NotificationHandler<N>>>>() {
            handlers.push(handler);
            self.registry.stats.notification_handlers += 1;
        }
        self
    }

    /// Finish wiring. Fails if any request type received more than one handler.
    pub fn build(self) -> MediatorResult<HandlerRegistry> {
        if let Some(&request_type) = self.duplicates.first() {
            return Err(MediatorError::DuplicateHandler { request_type });
        }

        let stats = self.registry.stats();
        info!(
            request_handlers = stats.request_handlers,
            behaviors = stats.behaviors,
            notification_types = stats.notification_types,
            notification_handlers = stats.notification_handlers,
            "HandlerRegistry built"
        );
        Ok(self.registry)
    }
}
