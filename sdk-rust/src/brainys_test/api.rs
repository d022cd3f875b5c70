use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::{ApiEnvelope, BrainysApi, ClientError, ClientResult};

/// Result for a mocked request.
/// It can either be a response envelope, an error to return, or a response
/// that is held back until its gate is opened.
pub enum MockResponse {
    Envelope(ApiEnvelope),
    Error(ClientError),
    Gated(oneshot::Receiver<()>, Box<MockResponse>),
}

impl MockResponse {
    /// Construct a `{status: "success", data}` response.
    pub fn success(data: Value) -> Self {
        Self::Envelope(ApiEnvelope {
            status: Some("success".to_string()),
            data,
            ..ApiEnvelope::default()
        })
    }

    /// Construct a response from a raw JSON body.
    pub fn body(body: Value) -> Self {
        match serde_json::from_value::<ApiEnvelope>(body) {
            Ok(envelope) => Self::Envelope(envelope),
            Err(error) => Self::Error(error.into()),
        }
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: ClientError) -> Self {
        Self::Error(error)
    }

    /// Construct a non-success status response carrying `message`.
    pub fn status(status: u16, message: Option<&str>) -> Self {
        let status =
            reqwest::StatusCode::from_u16(status).unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        Self::Error(ClientError::StatusCode(status, message.map(ToString::to_string)))
    }
}

impl From<ApiEnvelope> for MockResponse {
    fn from(envelope: ApiEnvelope) -> Self {
        Self::Envelope(envelope)
    }
}

impl From<ClientError> for MockResponse {
    fn from(error: ClientError) -> Self {
        Self::Error(error)
    }
}

impl From<Value> for MockResponse {
    fn from(body: Value) -> Self {
        Self::body(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMethod {
    Get,
    Post,
}

/// A request the mock has received.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedRequest {
    pub method: MockMethod,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockApiState {
    mocked_responses: HashMap<String, VecDeque<MockResponse>>,
    tracked_requests: Vec<TrackedRequest>,
}

impl MockApiState {
    fn reset(&mut self) {
        self.tracked_requests.clear();
    }

    fn restore(&mut self) {
        self.mocked_responses.clear();
        self.reset();
    }
}

/// A mock service for testing that tracks requests and yields predefined
/// responses, queued per path.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockApiState>,
}

impl MockApi {
    /// Construct a new mock service instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a mocked response for `path`.
    pub fn enqueue<R>(&self, path: &str, response: R) -> &Self
    where
        R: Into<MockResponse>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .mocked_responses
            .entry(path.to_string())
            .or_default()
            .push_back(response.into());
        drop(state);
        self
    }

    /// Convenience to enqueue a `{status: "success", data}` response.
    pub fn enqueue_success(&self, path: &str, data: Value) -> &Self {
        self.enqueue(path, MockResponse::success(data))
    }

    /// Enqueue a response that is only delivered once the returned sender
    /// is used (or dropped).
    pub fn enqueue_gated<R>(&self, path: &str, response: R) -> oneshot::Sender<()>
    where
        R: Into<MockResponse>,
    {
        let (sender, receiver) = oneshot::channel();
        self.enqueue(path, MockResponse::Gated(receiver, Box::new(response.into())));
        sender
    }

    /// Retrieve the tracked requests accumulated so far.
    pub fn tracked_requests(&self) -> Vec<TrackedRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.clone()
    }

    /// Tracked requests sent to `path`.
    pub fn requests_to(&self, path: &str) -> Vec<TrackedRequest> {
        self.tracked_requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    /// Reset tracked requests without touching enqueued responses.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.reset();
    }

    /// Clear both tracked requests and enqueued responses.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.restore();
    }

    async fn respond(&self, request: TrackedRequest) -> ClientResult<ApiEnvelope> {
        let path = request.path.clone();
        let response = {
            let mut state = self.state.lock().expect("mock state poisoned");
            state.tracked_requests.push(request);
            state
                .mocked_responses
                .get_mut(&path)
                .and_then(VecDeque::pop_front)
        };

        let mut response = response.ok_or_else(|| {
            ClientError::Invariant(format!("no mocked response available for {path}"))
        })?;

        loop {
            match response {
                MockResponse::Envelope(envelope) => return Ok(envelope),
                MockResponse::Error(error) => return Err(error),
                MockResponse::Gated(gate, inner) => {
                    let _ = gate.await;
                    response = *inner;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl BrainysApi for MockApi {
    async fn get(&self, path: &str) -> ClientResult<ApiEnvelope> {
        self.respond(TrackedRequest {
            method: MockMethod::Get,
            path: path.to_string(),
            body: None,
        })
        .await
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<ApiEnvelope> {
        self.respond(TrackedRequest {
            method: MockMethod::Post,
            path: path.to_string(),
            body: Some(body),
        })
        .await
    }
}

/// A `/user-profile` payload with the given credit figures.
pub fn profile_data(limit: i64, used: i64, package_name: &str) -> Value {
    json!({
        "credits": { "limit": limit, "used": used, "credit": limit - used },
        "package": [{ "package_name": package_name }]
    })
}
