//! # Request Pipeline
//!
//! Handler and behavior capabilities plus the builder composing them into the
//! onion-ordered continuation that `send` invokes.

pub mod behavior;
pub mod chain;
pub mod handler;

pub use behavior::{Next, PipelineBehavior, Validator};
pub use chain::build_chain;
pub use handler::{NotificationHandler, RequestHandler};
