//! Outbound requests to the Slackr backend.
//!
//! Every call completes: a 200 yields the JSON payload, 400/403 yield the
//! backend's error string, and anything else becomes
//! [`ClientError::Transport`].

pub mod http;
pub mod memory;

use std::fmt;
use std::future::Future;

use serde_json::Value;

use slackr_types::api::ErrorBody;

use crate::error::{ClientError, Result};

pub use http::HttpTransport;
pub use memory::{MemoryTransport, RecordedRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Only POST and PUT send a JSON body.
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seam between the controller and the network.
pub trait Transport: Send + Sync + 'static {
    /// `path` is relative to the backend base URL and may carry a query string.
    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// Maps an HTTP status and raw body onto the backend contract.
pub fn classify_response(status: u16, body: &str) -> Result<Value> {
    match status {
        200 => {
            if body.trim().is_empty() {
                Ok(Value::Null)
            } else {
                Ok(serde_json::from_str(body)?)
            }
        }
        400 | 403 => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .map(|b| b.error)
                .map_err(|_| {
                    ClientError::Transport(format!("HTTP {status} without an error message"))
                })?;
            if status == 400 {
                Err(ClientError::Input(message))
            } else {
                Err(ClientError::Access(message))
            }
        }
        other => Err(ClientError::Transport(format!("unexpected HTTP status {other}"))),
    }
}
