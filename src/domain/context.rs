//! Operation Context
//!
//! Metadata about the current request, carried into handlers for tracing.

use serde::Serialize;
use std::net::IpAddr;
use uuid::Uuid;

/// Context for an operation, used to tie log lines of one request together.
#[derive(Debug, Clone, Serialize)]
pub struct OperationContext {
    /// Correlation ID for request tracing
    pub correlation_id: Uuid,

    /// Client IP address, when the server knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<IpAddr>,
}

impl OperationContext {
    /// Create a context with a fresh correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            client_ip: None,
        }
    }

    /// Reuse a correlation ID supplied by the caller
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
