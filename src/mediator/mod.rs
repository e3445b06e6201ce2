//! # Mediator
//!
//! The dispatch entry point: [`Mediator::send`] routes a request through its
//! behavior chain to its single handler, [`Mediator::publish`] fans a
//! notification out to its handlers and optionally forwards it to the bus.
//!
//! ## Architecture
//!
//! ```text
//! send(request) ──► HandlerRegistry ──► build_chain ──► B1 ─► B2 ─► ... ─► Handler
//!                                                       ◄──────────────────────┘
//! publish(notification) ──► HandlerRegistry ──► H1 ─► H2 ─► ... ─► Hn ──► EventBus (optional)
//! ```
//!
//! The mediator keeps no mutable state. Clones share one registry, so any
//! number of concurrent `send`/`publish` calls run independently.
//!
//! ## Usage
//!
//! ```rust
//! use aurora_mediator::{LoggingBehavior, Mediator, MediatorResult, Request, RequestHandler};
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug)]
//! struct CreateOrder {
//!     item: String,
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct OrderId(u64);
//!
//! impl Request for CreateOrder {
//!     type Response = OrderId;
//! }
//!
//! struct CreateOrderHandler;
//!
//! #[async_trait]
//! impl RequestHandler<CreateOrder> for CreateOrderHandler {
//!     async fn handle(
//!         &self,
//!         request: &CreateOrder,
//!         _cancel: &CancellationToken,
//!     ) -> MediatorResult<OrderId> {
//!         assert_eq!(request.item, "X");
//!         Ok(OrderId(42))
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let mediator = Mediator::builder()
//!     .handler::<CreateOrder, _>(CreateOrderHandler)
//!     .behavior::<CreateOrder, _>(LoggingBehavior::new())
//!     .build()
//!     .unwrap();
//!
//! let cancel = CancellationToken::new();
//! let order = mediator.send(&CreateOrder { item: "X".to_string() }, &cancel).await.unwrap();
//! assert_eq!(order, OrderId(42));
//! # });
//! ```

mod publish;
mod send;

use crate::bus::EventBus;
use crate::config::MediatorConfig;
use crate::error::MediatorResult;
use crate::messages::{Notification, Request};
use crate::pipeline::{NotificationHandler, PipelineBehavior, RequestHandler};
use crate::registry::{HandlerRegistry, RegistryBuilder, RegistryStats};
use std::sync::Arc;
use tracing::info;

struct MediatorInner {
    registry: HandlerRegistry,
    event_bus: Option<Arc<dyn EventBus>>,
    config: MediatorConfig,
}

/// In-process dispatcher for requests and notifications.
#[derive(Clone)]
pub struct Mediator {
    inner: Arc<MediatorInner>,
}

impl Mediator {
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Assemble a mediator from an already built registry.
    pub fn new(
        registry: HandlerRegistry,
        event_bus: Option<Arc<dyn EventBus>>,
        config: MediatorConfig,
    ) -> Self {
        info!(
            event_bus = event_bus.as_ref().map(|bus| bus.name()),
            missing_bus = ?config.missing_bus,
            "Mediator initialized"
        );

        Self {
            inner: Arc::new(MediatorInner {
                registry,
                event_bus,
                config,
            }),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.inner.registry
    }

    pub fn config(&self) -> &MediatorConfig {
        &self.inner.config
    }

    pub fn has_event_bus(&self) -> bool {
        self.inner.event_bus.is_some()
    }

    pub fn stats(&self) -> RegistryStats {
        self.inner.registry.stats()
    }
}

impl std::fmt::Debug for Mediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mediator")
            .field("registry", &self.inner.registry)
            .field(
                "event_bus",
                &self.inner.event_bus.as_ref().map(|bus| bus.name()),
            )
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Wiring for a [`Mediator`]: participants, optional bus and configuration.
#[derive(Default)]
pub struct MediatorBuilder {
    registry: RegistryBuilder,
    event_bus: Option<Arc<dyn EventBus>>,
    config: MediatorConfig,
}

impl MediatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R>,
    {
        self.registry = self.registry.handler::<R, H>(handler);
        self
    }

    pub fn handler_arc<R: Request>(mut self, handler: Arc<dyn RequestHandler<R>>) -> Self {
        self.registry = self.registry.handler_arc::<R>(handler);
        self
    }

    pub fn behavior<R, B>(mut self, behavior: B) -> Self
    where
        R: Request,
        B: PipelineBehavior<R>,
    {
        self.registry = self.registry.behavior::<R, B>(behavior);
        self
    }

    pub fn behavior_arc<R: Request>(mut self, behavior: Arc<dyn PipelineBehavior<R>>) -> Self {
        self.registry = self.registry.behavior_arc::<R>(behavior);
        self
    }

    pub fn notification_handler<N, H>(mut self, handler: H) -> Self
    where
        N: Notification,
        H: NotificationHandler<N>,
    {
        self.registry = self.registry.notification_handler::<N, H>(handler);
        self
    }

    pub fn notification_handler_arc<N: Notification>(
        mut self,
        handler: Arc<dyn NotificationHandler<N>>,
    ) -> Self {
        self.registry = self.registry.notification_handler_arc::<N>(handler);
        self
    }

    pub fn event_bus<B: EventBus>(mut self, bus: B) -> Self {
        self.event_bus = Some(Arc::new(bus));
        self
    }

    pub fn event_bus_arc(mut self, bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn config(mut self, config: MediatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate configuration and registrations, then build.
    pub fn build(self) -> MediatorResult<Mediator> {
        self.config.validate()?;
        let registry = self.registry.build()?;
        Ok(Mediator::new(registry, self.event_bus, self.config))
    }
}
