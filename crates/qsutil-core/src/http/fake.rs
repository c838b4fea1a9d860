//! In-memory transport for unit tests: canned responses keyed by URL,
//! every request recorded in order.

use super::{ErrorKind, Response, Transport, TransportError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: HashMap<String, Result<Response, TransportError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ok(mut self, url: &str, body: &[u8]) -> Self {
        self.routes.insert(
            url.to_string(),
            Ok(Response {
                status: 200,
                body: body.to_vec(),
            }),
        );
        self
    }

    pub(crate) fn status(mut self, url: &str, status: u32) -> Self {
        self.routes.insert(
            url.to_string(),
            Ok(Response {
                status,
                body: Vec::new(),
            }),
        );
        self
    }

    pub(crate) fn fail(mut self, url: &str, kind: ErrorKind) -> Self {
        self.routes.insert(
            url.to_string(),
            Err(TransportError {
                kind,
                message: "simulated".to_string(),
            }),
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    /// Unknown URLs answer 404.
    fn get(&self, url: &str, _timeout: Duration) -> Result<Response, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.routes.get(url).cloned().unwrap_or(Ok(Response {
            status: 404,
            body: Vec::new(),
        }))
    }
}
