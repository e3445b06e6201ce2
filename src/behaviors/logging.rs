//! Structured request logging.

use crate::config::LoggingConfig;
use crate::error::MediatorResult;
use crate::messages::Request;
use crate::pipeline::{Next, PipelineBehavior};
use async_trait::async_trait;
use std::any::type_name;
use std::fmt::Debug;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Logs the start, end and failure of every request passing through it.
///
/// Output goes through `tracing`, so format and destination belong to whatever
/// subscriber the process installed. The response or error is returned as is.
#[derive(Debug, Clone, Default)]
pub struct LoggingBehavior {
    include_payloads: bool,
}

impl LoggingBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            include_payloads: config.include_payloads,
        }
    }

    /// Also record the Debug rendering of requests and responses.
    pub fn with_payloads(mut self, include_payloads: bool) -> Self {
        self.include_payloads = include_payloads;
        self
    }
}

#[async_trait]
impl<R> PipelineBehavior<R> for LoggingBehavior
where
    R: Request + Debug,
    R::Response: Debug,
{
    async fn handle(
        &self,
        request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R::Response>,
    ) -> MediatorResult<R::Response> {
        let request_type = type_name::<R>();
        if self.include_payloads {
            info!(request_type, request = ?request, "Handling request");
        } else {
            info!(request_type, "Handling request");
        }

        let started = Instant::now();
        let result = next.run().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) if self.include_payloads => {
                info!(request_type, elapsed_ms, response = ?response, "Handled request");
            }
            Ok(_) => info!(request_type, elapsed_ms, "Handled request"),
            Err(error) => warn!(
                request_type,
                elapsed_ms,
                error_label = error.as_label(),
                error = %error,
                "Request failed"
            ),
        }

        result
    }
}
