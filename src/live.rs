//! Live invocation of RPC methods against a user supplied endpoint.
//!
//! Each invocation sends exactly one request and records whatever comes back
//! against the method name. Failures to get or parse a response are recorded
//! as a synthetic error envelope with code `-1`, so a recorded result is
//! always displayable JSON.
//!
//! Results are last-write-wins per method: overlapping invocations of the
//! same method are not sequenced, and whichever response settles last is the
//! one that is kept.

use crate::jsonrpc;
use serde::Serialize;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    fmt::Display,
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
};
use thiserror::Error;

/// Error code used for synthetic transport and parse failures.
pub const FAILURE_CODE: i32 = -1;

/// A recorded live result.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiveResult {
    /// The verbatim JSON response body returned by the endpoint.
    Response(Value),
    /// A synthetic error envelope recorded when no JSON response was
    /// received.
    Failure(Value),
}

impl LiveResult {
    /// Creates the synthetic error envelope recorded when a call fails.
    pub fn failure(message: impl Display) -> Self {
        Self::Failure(json!({
            "error": {
                "message": message.to_string(),
                "code": FAILURE_CODE,
            },
        }))
    }

    /// Returns `true` if the recorded result carries an `error` member.
    pub fn is_error(&self) -> bool {
        self.value().get("error").is_some()
    }

    /// Returns `true` if this is a synthetic failure rather than a response
    /// from the endpoint.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the JSON RPC error carried by the result, if any.
    pub fn error(&self) -> Option<jsonrpc::Error> {
        jsonrpc::Error::from_response(self.value())
    }

    /// Returns the raw JSON value.
    pub fn value(&self) -> &Value {
        match self {
            Self::Response(value) | Self::Failure(value) => value,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    result: Option<LiveResult>,
    pending: usize,
}

/// Per-method result and loading state.
#[derive(Debug, Default)]
pub struct ResultStore {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ResultStore {
    /// Returns the most recent result recorded for a method.
    pub fn get(&self, method: &str) -> Option<LiveResult> {
        self.lock().get(method)?.result.clone()
    }

    /// Returns `true` while at least one invocation of the method is
    /// outstanding.
    pub fn is_loading(&self, method: &str) -> bool {
        self.lock()
            .get(method)
            .map(|slot| slot.pending > 0)
            .unwrap_or(false)
    }

    /// Forgets all recorded results. Outstanding invocations still record
    /// their result when they settle.
    pub fn clear(&self) {
        self.lock().retain(|_, slot| {
            slot.result = None;
            slot.pending > 0
        });
    }

    fn begin(&self, method: &str) {
        self.lock().entry(method.to_owned()).or_default().pending += 1;
    }

    fn finish(&self, method: &str, result: LiveResult) {
        let mut slots = self.lock();
        let slot = slots.entry(method.to_owned()).or_default();
        slot.pending = slot.pending.saturating_sub(1);
        slot.result = Some(result);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // Slots are always left consistent, so a poisoned lock is still
        // usable.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Issues live calls and records their results.
#[derive(Debug, Default)]
pub struct Invoker {
    results: ResultStore,
}

impl Invoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded results.
    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    /// Invokes a method with the provided `async` roundtrip implementation,
    /// which receives the serialized request body and returns the response
    /// body.
    ///
    /// An empty endpoint is rejected without calling the roundtrip or
    /// recording anything.
    pub async fn invoke<F, Fut, E>(
        &self,
        endpoint: &str,
        method: &str,
        params: &[Value],
        roundtrip: F,
    ) -> Result<LiveResult, Error>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: Display,
    {
        let request = self.begin(endpoint, method, params)?;
        let response = roundtrip(request).await;
        Ok(self.finish(method, response))
    }

    /// Invokes a method with the provided blocking roundtrip implementation.
    pub fn invoke_blocking<F, E>(
        &self,
        endpoint: &str,
        method: &str,
        params: &[Value],
        roundtrip: F,
    ) -> Result<LiveResult, Error>
    where
        F: FnOnce(String) -> Result<String, E>,
        E: Display,
    {
        let request = self.begin(endpoint, method, params)?;
        let response = roundtrip(request);
        Ok(self.finish(method, response))
    }

    fn begin(&self, endpoint: &str, method: &str, params: &[Value]) -> Result<String, Error> {
        if endpoint.is_empty() {
            return Err(Error::MissingEndpoint);
        }

        let request = jsonrpc::request_body(method, params)?;
        tracing::debug!(%endpoint, %method, "invoking RPC method");
        self.results.begin(method);
        Ok(request)
    }

    fn finish<E>(&self, method: &str, response: Result<String, E>) -> LiveResult
    where
        E: Display,
    {
        let result = match response.map(|body| serde_json::from_str::<Value>(&body)) {
            Ok(Ok(value)) => LiveResult::Response(value),
            Ok(Err(err)) => {
                tracing::warn!(%method, %err, "RPC response is not JSON");
                LiveResult::failure(err)
            }
            Err(err) => {
                tracing::warn!(%method, %err, "RPC request failed");
                LiveResult::failure(err)
            }
        };

        self.results.finish(method, result.clone());
        result
    }
}

/// An error rejecting a live invocation before it is sent.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Please enter an RPC endpoint URL")]
    MissingEndpoint,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
