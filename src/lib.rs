#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Aurora Mediator
//!
//! In-process message dispatcher for typed requests and notifications.
//!
//! ## Overview
//!
//! A **request** goes to exactly one handler through a composable chain of
//! **pipeline behaviors**; a **notification** goes to zero or more handlers, one
//! after another, and may then be forwarded to an external **event bus**.
//!
//! ## Architecture
//!
//! ```text
//! caller ──► Mediator::send(request)
//!              ├─► HandlerRegistry::resolve_handler / resolve_behaviors
//!              ├─► build_chain (first-registered behavior outermost)
//!              └─► B1 pre ─► B2 pre ─► Handler ─► B2 post ─► B1 post ──► response
//!
//! caller ──► Mediator::publish(notification, send_to_bus)
//!              ├─► HandlerRegistry::resolve_notification_handlers
//!              ├─► H1 ─► H2 ─► ... ─► Hn   (sequential, stops at first failure)
//!              └─► EventBus::publish        (only after all handlers succeeded)
//! ```
//!
//! The dispatcher does no retries, timeouts or error translation. Whatever a
//! participant returns is what the caller sees; resilience belongs in behaviors.
//!
//! ## Module Organization
//!
//! - [`messages`] - `Request` / `Notification` marker traits and the handler key
//! - [`pipeline`] - handler and behavior capabilities, chain builder
//! - [`registry`] - type-indexed, read-only handler registry
//! - [`mediator`] - `send` and `publish`
//! - [`bus`] - external event bus seam
//! - [`behaviors`] - logging and validation behaviors
//! - [`config`] - configuration loading
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - error types
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod behaviors;
pub mod bus;
pub mod config;
pub mod error;
pub mod logging;
pub mod mediator;
pub mod messages;
pub mod pipeline;
pub mod registry;

pub use behaviors::{LoggingBehavior, ValidationBehavior};
pub use bus::{BusDelivery, BusEnvelope, EventBus, PublishOutcome};
pub use config::{ConfigurationError, LoggingConfig, MediatorConfig, MissingBusPolicy};
pub use error::{MediatorError, MediatorResult, ValidationFailure};
pub use mediator::{Mediator, MediatorBuilder};
pub use messages::{HandlerKey, Notification, Request};
pub use pipeline::{Next, NotificationHandler, PipelineBehavior, RequestHandler, Validator};
pub use registry::{HandlerRegistry, RegistryBuilder, RegistryStats};

// Re-exported so implementors need not depend on tokio-util directly.
pub use tokio_util::sync::CancellationToken;
