use aurora_mediator::{Notification, Request};

/// Order placement request used across the send suites.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrder {
    pub item: String,
}

impl CreateOrder {
    pub fn new(item: &str) -> Self {
        Self {
            item: item.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderId(pub u64);

impl Request for CreateOrder {
    type Response = OrderId;
}

/// Pure request for concurrency checks.
#[derive(Debug, Clone, Copy)]
pub struct Double(pub u64);

impl Request for Double {
    type Response = u64;
}

/// Notification published after an order is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlaced {
    pub order: u64,
}

impl Notification for OrderPlaced {}

/// Notification nobody subscribes to.
#[derive(Debug)]
pub struct Heartbeat;

impl Notification for Heartbeat {}
