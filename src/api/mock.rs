// In-memory transport for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ConsoleError, Result};

use super::client::Transport;

/// A recorded request.
#[derive(Debug, Clone)]
pub struct Call {
    pub path: String,
    pub body: Option<Value>,
}

enum Reply {
    Json(Value),
    Bytes(Vec<u8>),
    Fail(String),
}

/// Canned replies keyed by path; unknown paths fail like a refused connection.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, path: &str, value: Value) -> Self {
        self.replies.insert(path.to_string(), Reply::Json(value));
        self
    }

    pub fn bytes(mut self, path: &str, bytes: &[u8]) -> Self {
        self.replies
            .insert(path.to_string(), Reply::Bytes(bytes.to_vec()));
        self
    }

    pub fn fail(mut self, path: &str, message: &str) -> Self {
        self.replies
            .insert(path.to_string(), Reply::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, path: &str, body: Option<Value>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call {
                path: path.to_string(),
                body,
            });
        }
    }

    fn lookup(&self, path: &str) -> Result<&Reply> {
        self.replies
            .get(path)
            .ok_or_else(|| ConsoleError::Other("Failed to fetch".to_string()))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        self.record(path, Some(body));
        match self.lookup(path)? {
            Reply::Json(value) => Ok(value.clone()),
            Reply::Bytes(_) => Err(ConsoleError::Decode("binary body".to_string())),
            Reply::Fail(message) => Err(ConsoleError::Other(message.clone())),
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        self.record(path, None);
        match self.lookup(path)? {
            Reply::Json(value) => Ok(value.clone()),
            Reply::Bytes(_) => Err(ConsoleError::Decode("binary body".to_string())),
            Reply::Fail(message) => Err(ConsoleError::Other(message.clone())),
        }
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        self.record(path, None);
        match self.lookup(path)? {
            Reply::Bytes(bytes) => Ok(bytes.clone()),
            Reply::Json(value) => Ok(value.to_string().into_bytes()),
            Reply::Fail(message) => Err(ConsoleError::Other(message.clone())),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://mock/api/{}", path)
    }
}
