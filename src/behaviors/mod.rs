//! # Pipeline Behaviors
//!
//! Ready-made [`PipelineBehavior`](crate::PipelineBehavior) implementations.
//!
//! - [`LoggingBehavior`] - structured start/finish/failure events per request
//! - [`ValidationBehavior`] - runs [`Validator`](crate::Validator)s before the handler
//!
//! Register them like any other behavior; registration order decides nesting,
//! so a logging behavior registered first also observes validation failures.

mod logging;
mod validation;

pub use logging::LoggingBehavior;
pub use validation::ValidationBehavior;
