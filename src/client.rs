//! The client handle every operation hangs off.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::gateway::{Gateway, HttpGateway};

/// Entry point for searching and resolving entities.
///
/// Cheap to clone; clones share the same gateway.
#[derive(Debug, Clone)]
pub struct ModrinthClient {
    pub(crate) gateway: Arc<dyn Gateway>,
    pub(crate) max_concurrent: usize,
}

impl ModrinthClient {
    /// Create a client talking HTTP to the configured endpoint
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let gateway = HttpGateway::new(&config.api)?;
        Ok(Self::with_gateway(Arc::new(gateway))
            .max_concurrent_requests(config.search.max_concurrent_requests))
    }

    /// Create a client over any gateway (e.g. a [`crate::gateway::MockGateway`])
    pub fn with_gateway(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            max_concurrent: crate::config::SearchConfig::default().max_concurrent_requests,
        }
    }

    /// Bound how many search hits are resolved at once (minimum 1)
    pub fn max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    /// Get the underlying gateway
    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockGateway;

    #[test]
    fn test_concurrency_floor() {
        let client =
            ModrinthClient::with_gateway(Arc::new(MockGateway::new())).max_concurrent_requests(0);
        assert_eq!(client.max_concurrent, 1);
    }

    #[test]
    fn test_new_from_default_config() {
        let client = ModrinthClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(client.max_concurrent, 8);
    }
}
