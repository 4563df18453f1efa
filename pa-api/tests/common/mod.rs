//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use pa_api::{ApiClient, Credentials, HttpRequest, HttpResponse, Transport, TransportError};
use pa_core::ClientConfig;

pub const READ_KEY: &str = "READ-1111-2222-3333";
pub const WRITE_KEY: &str = "WRITE-4444-5555-6666";

/// Transport that records every request and replays scripted responses.
///
/// When the script runs out it answers `200 {}`.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response with a JSON body.
    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.push(Ok(HttpResponse::new(status, body.to_string())));
    }

    /// Queue a response with a raw body.
    pub fn respond_raw(&self, status: u16, body: &str) {
        self.push(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a transport fault.
    pub fn fail(&self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(&self, entry: Result<HttpResponse, TransportError>) {
        self.script.lock().unwrap().push_back(entry);
    }

    /// Number of requests sent so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

/// Client with both keys over the given mock.
pub fn create_test_client(mock: &Arc<MockTransport>) -> ApiClient {
    let credentials = Credentials::read_write(READ_KEY, WRITE_KEY).expect("valid credentials");
    create_client_with(mock, credentials)
}

/// Client with only a read key over the given mock.
pub fn create_read_only_client(mock: &Arc<MockTransport>) -> ApiClient {
    let credentials = Credentials::read_only(READ_KEY).expect("valid credentials");
    create_client_with(mock, credentials)
}

pub fn create_client_with(mock: &Arc<MockTransport>, credentials: Credentials) -> ApiClient {
    ApiClient::with_transport(&ClientConfig::default(), credentials, mock.clone())
}

/// Header name and raw key value of a recorded request.
pub fn credential_of(request: &HttpRequest) -> Option<(String, String)> {
    request
        .credential
        .as_ref()
        .map(|(header, key)| (header.clone(), key.expose().to_string()))
}
