//! Shared fixtures for the integration suites.

#![allow(dead_code)]

pub mod messages;
pub mod recorders;

pub use messages::*;
pub use recorders::*;
