//! # Registry Infrastructure
//!
//! Resolution of the participants a dispatch needs, keyed by message type.
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── RegistryBuilder   (wiring-time registration, duplicate detection)
//! └── HandlerRegistry   (read-only, type-indexed lookup)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use aurora_mediator::registry::HandlerRegistry;
//! use aurora_mediator::{MediatorResult, Request, RequestHandler};
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//!
//! struct Ping;
//! impl Request for Ping {
//!     type Response = &'static str;
//! }
//!
//! struct PingHandler;
//!
//! #[async_trait]
//! impl RequestHandler<Ping> for PingHandler {
//!     async fn handle(
//!         &self,
//!         _request: &Ping,
//!         _cancel: &CancellationToken,
//!     ) -> MediatorResult<&'static str> {
//!         Ok("pong")
//!     }
//! }
//!
//! let registry = HandlerRegistry::builder()
//!     .handler::<Ping, _>(PingHandler)
//!     .build()
//!     .unwrap();
//!
//! assert!(registry.resolve_handler::<Ping>().is_some());
//! assert!(registry.resolve_behaviors::<Ping>().is_empty());
//! ```

pub mod handler_registry;

pub use handler_registry::{HandlerRegistry, RegistryBuilder, RegistryStats};
