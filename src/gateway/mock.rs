//! Mock gateway for testing purposes.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{status_error, AuthToken, Gateway};
use crate::error::{ModrinthError, Result};

/// A request observed by [`MockGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub method: ::http::Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Whether an `Authorization` token was attached
    pub authorized: bool,
}

#[derive(Debug, Clone)]
enum Canned {
    Json(Value),
    Status(u16),
    Transport(String),
}

/// A mock gateway that returns predefined responses keyed by path.
///
/// Unknown paths answer 404, so a missing fixture surfaces as `NotFound`.
#[derive(Debug, Default)]
pub struct MockGateway {
    responses: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl MockGateway {
    /// Create a new mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GETs of `path` with `body`.
    pub fn set_json(&self, path: impl Into<String>, body: Value) {
        self.insert(path.into(), Canned::Json(body));
    }

    /// Answer requests to `path` with a bare status code.
    pub fn set_status(&self, path: impl Into<String>, status: u16) {
        self.insert(path.into(), Canned::Status(status));
    }

    /// Fail requests to `path` before any response is obtained.
    pub fn set_transport_error(&self, path: impl Into<String>, message: impl Into<String>) {
        self.insert(path.into(), Canned::Transport(message.into()));
    }

    /// All requests observed so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear configured responses and the call log.
    pub fn reset(&self) {
        self.responses.lock().unwrap().clear();
        self.calls.lock().unwrap().clear();
    }

    fn insert(&self, path: String, canned: Canned) {
        let mut guard = self.responses.lock().unwrap();
        guard.insert(path, canned);
    }

    fn record(&self, call: GatewayCall) -> Option<Canned> {
        let path = call.path.clone();
        self.calls.lock().unwrap().push(call);
        self.responses.lock().unwrap().get(&path).cloned()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let canned = self.record(GatewayCall {
            method: ::http::Method::GET,
            path: path.to_string(),
            query: query.to_vec(),
            authorized: false,
        });

        match canned {
            Some(Canned::Json(body)) => Ok(body),
            Some(Canned::Status(status)) => Err(status_error(status, path)),
            Some(Canned::Transport(message)) => Err(ModrinthError::Transport(message)),
            None => Err(status_error(404, path)),
        }
    }

    async fn send(&self, method: ::http::Method, path: &str, _token: &AuthToken) -> Result<()> {
        let canned = self.record(GatewayCall {
            method,
            path: path.to_string(),
            query: Vec::new(),
            authorized: true,
        });

        match canned {
            Some(Canned::Status(status)) if !(200..300).contains(&status) => {
                Err(status_error(status, path))
            }
            Some(Canned::Transport(message)) => Err(ModrinthError::Transport(message)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_canned_json_and_call_log() {
        let gateway = MockGateway::new();
        gateway.set_json("/v2/user/alice", json!({"id": "A1"}));

        let body = gateway
            .get_json("/v2/user/alice", &[("k".to_string(), "v".to_string())])
            .await
            .unwrap();
        assert_eq!(body["id"], "A1");

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, ::http::Method::GET);
        assert_eq!(calls[0].query, vec![("k".to_string(), "v".to_string())]);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let gateway = MockGateway::new();
        let err = gateway.get_json("/v2/project/nope", &[]).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_send_defaults_to_success() {
        let gateway = MockGateway::new();
        let token = AuthToken::new("t").unwrap();
        gateway
            .send(::http::Method::POST, "/v2/project/x/follow", &token)
            .await
            .unwrap();
        assert!(gateway.calls()[0].authorized);

        gateway.set_status("/v2/project/x/follow", 401);
        let err = gateway
            .send(::http::Method::DELETE, "/v2/project/x/follow", &token)
            .await
            .unwrap_err();
        assert!(matches!(err, ModrinthError::Upstream { status: Some(401), .. }));
    }

    #[test]
    fn test_reset_clears_responses_and_log() {
        let gateway = MockGateway::new();
        gateway.set_json("/v2/user/alice", json!({"id": "A1"}));
        tokio_test::block_on(gateway.get_json("/v2/user/alice", &[])).unwrap();
        assert_eq!(gateway.call_count(), 1);

        gateway.reset();
        assert_eq!(gateway.call_count(), 0);
        let err = tokio_test::block_on(gateway.get_json("/v2/user/alice", &[])).unwrap_err();
        assert!(err.is_not_found());
    }
}
