//! Transport boundary between the client and the remote API.
//!
//! Everything above this module talks to the API through the [`Gateway`]
//! trait. Two implementations ship with the crate:
//!
//! - [`HttpGateway`]: the real thing, backed by `reqwest`
//! - [`MockGateway`]: canned responses and a call log, for tests
//!
//! # Status mapping
//!
//! | Response                        | Error                                |
//! |---------------------------------|--------------------------------------|
//! | 2xx with a JSON body            | none                                 |
//! | 404                             | [`ModrinthError::NotFound`]          |
//! | any other status                | [`ModrinthError::Upstream`]          |
//! | 2xx with an unparsable body     | [`ModrinthError::Upstream`]          |
//! | no response (DNS, connect, ...) | [`ModrinthError::Transport`]         |

mod http;
pub mod mock;

pub use self::http::HttpGateway;
pub use mock::{GatewayCall, MockGateway};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ModrinthError, Result};

/// Query parameters, in the order they are sent
pub type QueryPairs = Vec<(String, String)>;

/// The Gateway trait defines the only operations the client needs from the API.
///
/// Paths are relative to the API base (e.g. `/v2/project/sodium`). Query
/// values are raw: implementations are responsible for encoding them.
#[async_trait]
pub trait Gateway: Send + Sync + std::fmt::Debug {
    /// GET `path` and return the parsed JSON body
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value>;

    /// Send a body-less authorized request (POST/DELETE) and discard the response
    async fn send(&self, method: ::http::Method, path: &str, token: &AuthToken) -> Result<()>;
}

/// Opaque API token, sent verbatim in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a token string
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ModrinthError::InvalidArgument(
                "token must not be empty".to_string(),
            ));
        }
        Ok(Self(token))
    }

    /// Header value to send
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Map a non-success status to the error taxonomy
pub(crate) fn status_error(status: u16, path: &str) -> ModrinthError {
    if status == 404 {
        ModrinthError::NotFound(path.to_string())
    } else {
        ModrinthError::upstream_status(status, format!("API returned status {} for {}", status, path))
    }
}
