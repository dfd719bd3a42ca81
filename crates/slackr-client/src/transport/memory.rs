use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{ClientError, Result};

use super::{Method, Transport};

/// A request as seen by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

/// In-process transport with scripted responses, used for tests and offline runs.
///
/// Responses are queued per `(method, path)`. The last queued response for a
/// route is sticky: it keeps answering until another one is queued behind it.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Result<Value>>>>,
    log: Mutex<Vec<RecordedRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: impl Into<String>, value: Value) -> &Self {
        self.push(method, path.into(), Ok(value))
    }

    pub fn reject(&self, method: Method, path: impl Into<String>, err: ClientError) -> &Self {
        self.push(method, path.into(), Err(err))
    }

    fn push(&self, method: Method, path: String, result: Result<Value>) -> &Self {
        if let Ok(mut routes) = self.routes.lock() {
            routes.entry((method, path)).or_default().push_back(result);
        }
        self
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn answer(&self, method: Method, path: &str) -> Result<Value> {
        let mut routes = self
            .routes
            .lock()
            .map_err(|e| ClientError::Transport(format!("route table poisoned: {e}")))?;
        let queue = routes
            .get_mut(&(method, path.to_string()))
            .ok_or_else(|| ClientError::Transport(format!("no route for {method} {path}")))?;

        if queue.len() > 1 {
            queue
                .pop_front()
                .ok_or_else(|| ClientError::Transport(format!("no route for {method} {path}")))?
        } else {
            queue
                .front()
                .cloned()
                .ok_or_else(|| ClientError::Transport(format!("no route for {method} {path}")))?
        }
    }
}

impl Transport for MemoryTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value> {
        if let Ok(mut log) = self.log.lock() {
            log.push(RecordedRequest {
                method,
                path: path.to_string(),
                token: token.map(str::to_owned),
                body: body.filter(|_| method.carries_body()),
            });
        }
        self.answer(method, path)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn last_response_is_sticky() {
        let transport = MemoryTransport::new();
        transport
            .respond(Method::Get, "channel", json!({ "n": 1 }))
            .respond(Method::Get, "channel", json!({ "n": 2 }));

        let first = transport.request(Method::Get, "channel", None, None).await.unwrap();
        let second = transport.request(Method::Get, "channel", None, None).await.unwrap();
        let third = transport.request(Method::Get, "channel", None, None).await.unwrap();

        assert_eq!(first["n"], 1);
        assert_eq!(second["n"], 2);
        assert_eq!(third["n"], 2);
    }

    #[tokio::test]
    async fn unscripted_route_fails_as_transport_error() {
        let transport = MemoryTransport::new();
        let err = transport
            .request(Method::Delete, "message/1/2", Some("T"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn get_bodies_are_not_recorded() {
        let transport = MemoryTransport::new();
        transport.respond(Method::Get, "user/1", json!({ "name": "a" }));
        transport
            .request(Method::Get, "user/1", Some("T"), Some(json!({ "x": 1 })))
            .await
            .unwrap();
        let req = &transport.requests()[0];
        assert_eq!(req.token.as_deref(), Some("T"));
        assert!(req.body.is_none());
    }
}
