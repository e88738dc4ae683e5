//! In-memory transport for controller tests.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value as JsonValue;
use std::collections::{ HashMap, VecDeque };
use std::sync::{ Arc, Mutex };
use tokio::sync::Notify;

use super::{ ApiError, ApiRequest, ApiTransport };

#[derive(Clone)]
enum Scripted {
    Json(JsonValue),
    Status(u16),
    Gated(Arc<Notify>, JsonValue),
}

/// Answers requests from per-route queues and records everything it sees.
/// The last answer queued for a route is repeated once the queue drains.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
    seen: Notify,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, answer: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(answer);
    }

    pub fn respond(&self, method: Method, path: &str, body: JsonValue) {
        self.push(method, path, Scripted::Json(body));
    }

    pub fn fail(&self, method: Method, path: &str, status: u16) {
        self.push(method, path, Scripted::Status(status));
    }

    /// Queues an answer that is only delivered once the returned handle is notified.
    pub fn respond_gated(&self, method: Method, path: &str, body: JsonValue) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(method, path, Scripted::Gated(gate.clone(), body));
        gate
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }

    /// Resolves once at least `n` requests have been recorded.
    pub async fn wait_for_requests(&self, n: usize) {
        loop {
            let notified = self.seen.notified();
            if self.requests.lock().unwrap().len() >= n {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<JsonValue, ApiError> {
        let key = (request.method.clone(), request.path.clone());
        self.requests.lock().unwrap().push(request.clone());
        self.seen.notify_waiters();

        let answer = {
            let mut routes = self.routes.lock().unwrap();
            let next = match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            };
            next
        };

        match answer {
            Some(Scripted::Json(body)) => Ok(body),
            Some(Scripted::Status(status)) => Err(ApiError::Status { status, path: request.path }),
            Some(Scripted::Gated(gate, body)) => {
                gate.notified().await;
                Ok(body)
            }
            None => Err(ApiError::Status { status: 404, path: request.path }),
        }
    }
}
