//! Live RPC calls over HTTP.

use crate::{
    catalog::Catalog,
    live::{self, Invoker, LiveResult},
    probe::{self, Configuration, Report},
};
use reqwest::{header::CONTENT_TYPE, Url};
use serde_json::Value;
use std::env;
use thiserror::Error;

pub use reqwest;

/// An HTTP transport bound to a single RPC endpoint.
#[derive(Clone, Debug)]
pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    /// Creates a new client for the specified URL with the default HTTP
    /// client.
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a new client for the specified client instance and URL.
    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Creates a new client from the environment. This method uses the
    /// `ETHRPC` environment variable. This is useful for testing.
    ///
    /// # Panics
    ///
    /// This method panics if the environment variable is not pressent, or if
    /// it is not a valid HTTP url.
    pub fn from_env() -> Self {
        Self::new(
            env::var("ETHRPC")
                .expect("missing ETHRPC environment variable")
                .parse()
                .expect("ETHRPC is not a valid URL"),
        )
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.url.as_str()
    }

    /// Posts a serialized request and returns the response body. Responses
    /// with an unsuccessful status are still returned, nodes commonly report
    /// JSON RPC errors that way.
    pub async fn roundtrip(&self, request: String) -> Result<String, Error> {
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, url = %self.url, "received RPC response");

        let body = response.text().await?;
        Ok(body)
    }

    /// Invokes a method on this client's endpoint and records the result.
    pub async fn invoke(
        &self,
        invoker: &Invoker,
        method: &str,
        params: &[Value],
    ) -> Result<LiveResult, live::Error> {
        invoker
            .invoke(self.endpoint(), method, params, |request| {
                self.roundtrip(request)
            })
            .await
    }

    /// Probes this client's endpoint for every method in the catalog.
    pub async fn probe(
        &self,
        catalog: &Catalog,
        invoker: &Invoker,
        config: &Configuration,
    ) -> Result<Report, live::Error> {
        probe::probe(
            catalog,
            invoker,
            self.endpoint(),
            |request| self.roundtrip(request),
            config,
        )
        .await
    }
}

/// An HTTP transport error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
