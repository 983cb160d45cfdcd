//! Blocking live RPC calls implemented with curl.

use crate::live::{self, Invoker, LiveResult};
pub use curl;
use curl::easy::{Easy, List};
use serde_json::Value;
use std::{cell::RefCell, env, io::Read, string::FromUtf8Error};
use thiserror::Error;

/// A blocking HTTP transport bound to a single RPC endpoint.
pub struct Client {
    handle: RefCell<Easy>,
    url: String,
}

impl Client {
    /// Creates a new client for the specified URL with a default curl handle.
    pub fn new(url: impl AsRef<str>) -> Result<Self, Error> {
        let mut handle = Easy::new();
        handle.url(url.as_ref())?;
        handle.post(true)?;
        handle.http_headers({
            let mut list = List::new();
            list.append("Content-Type: application/json")?;
            list
        })?;
        Ok(Self::with_handle(handle, url))
    }

    /// Creates a new client for the specified curl [`curl::easy::Easy`]
    /// handle instance.
    ///
    /// This method assumes that the handle's URL has been set to `url` and
    /// that it is configured to POST.
    pub fn with_handle(handle: Easy, url: impl AsRef<str>) -> Self {
        Self {
            handle: RefCell::new(handle),
            url: url.as_ref().to_owned(),
        }
    }

    /// Creates a new client from the environment. This method uses the
    /// `ETHRPC` environment variable. This is useful for testing.
    ///
    /// # Panics
    ///
    /// This method panics if the environment variable is not pressent, or if
    /// curl rejects it.
    pub fn from_env() -> Self {
        Self::new(env::var("ETHRPC").expect("missing ETHRPC environment variable"))
            .expect("invalid ETHRPC endpoint")
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.url
    }

    /// Posts a serialized request and returns the response body, whatever
    /// the HTTP status.
    pub fn roundtrip(&self, request: String) -> Result<String, Error> {
        let mut handle = self.handle.try_borrow_mut().map_err(|_| Error::Busy)?;
        handle.post_field_size(request.len() as u64)?;

        let mut request = request.as_bytes();
        let mut response = Vec::new();
        {
            let mut transfer = handle.transfer();
            transfer.read_function(|chunk| Ok(request.read(chunk).unwrap_or(0)))?;
            transfer.write_function(|chunk| {
                response.extend_from_slice(chunk);
                Ok(chunk.len())
            })?;
            transfer.perform()?;
        }

        let status = handle.response_code()?;
        tracing::debug!(%status, url = %self.url, "received RPC response");

        Ok(String::from_utf8(response)?)
    }

    /// Invokes a method on this client's endpoint and records the result.
    pub fn invoke(
        &self,
        invoker: &Invoker,
        method: &str,
        params: &[Value],
    ) -> Result<LiveResult, live::Error> {
        invoker.invoke_blocking(&self.url, method, params, |request| {
            self.roundtrip(request)
        })
    }
}

/// A curl transport error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] curl::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("curl handle is already in use")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_connection_failures() {
        let client = Client::new("http://127.0.0.1:1").unwrap();
        let invoker = Invoker::new();
        let result = client.invoke(&invoker, "net_peerCount", &[]).unwrap();

        assert!(result.is_failure());
        assert!(result.value()["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("HTTP error:"));
        assert_eq!(invoker.results().get("net_peerCount"), Some(result));
    }

    #[test]
    #[ignore]
    fn connect_to_node() {
        let client = Client::from_env();
        let invoker = Invoker::new();
        let version = client
            .invoke(&invoker, "web3_clientVersion", &[])
            .unwrap();
        println!("client version: {}", version.value());
    }
}
