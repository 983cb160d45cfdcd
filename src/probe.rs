//! Endpoint compatibility probing.
//!
//! A probe runs one example of every catalog method against an endpoint and
//! classifies what came back, producing a report of which methods the node
//! actually serves.

use crate::{
    catalog::{Catalog, Entry},
    jsonrpc::ErrorCode,
    live::{self, Invoker, LiveResult},
};
use futures::stream::{self, StreamExt as _, TryStreamExt as _};
use serde_json::Value;
use std::{
    fmt::{self, Display, Formatter, Write as _},
    future::Future,
    num::NonZeroUsize,
};

/// Probe configuration.
#[derive(Clone, Debug)]
pub struct Configuration {
    /// The maximum amount of concurrent requests to send to the node.
    ///
    /// Specifying `None` means no limit on concurrency.
    pub max_concurrent_requests: Option<NonZeroUsize>,
    /// Index of the example whose parameters are sent for each method. Methods
    /// with fewer examples use their first one.
    pub example: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_concurrent_requests: NonZeroUsize::new(10),
            example: 0,
        }
    }
}

/// How an endpoint responded to a probed method.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// The method returned a result.
    Supported,
    /// The method exists but returned an error, usually because of the
    /// example parameters or the node's state.
    Errored(String),
    /// The node reported that the method does not exist.
    Unsupported(String),
    /// No JSON response was received.
    Unreachable(String),
}

impl Status {
    /// Classifies a recorded live result.
    pub fn classify(result: &LiveResult) -> Self {
        if result.is_failure() {
            return Self::Unreachable(message(result.value()));
        }
        match result.error() {
            Some(error) if error.code == ErrorCode::MethodNotFound => {
                Self::Unsupported(error.message)
            }
            Some(error) => Self::Errored(error.message),
            None if result.is_error() => Self::Errored(result.value()["error"].to_string()),
            None => Self::Supported,
        }
    }

    /// Returns `true` if the endpoint serves the method.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported | Self::Errored(_))
    }

    fn note(&self) -> &str {
        match self {
            Self::Supported => "Success",
            Self::Errored(message) | Self::Unsupported(message) | Self::Unreachable(message) => {
                message
            }
        }
    }
}

fn message(response: &Value) -> String {
    response["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_owned()
}

/// The probe outcome for a single method.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Probe {
    pub namespace: String,
    pub method: String,
    pub description: String,
    pub status: Status,
}

/// Status counts for a report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub supported: usize,
    pub unsupported: usize,
    pub unreachable: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{} supported, {} unsupported, {} unreachable",
            self.supported, self.total, self.unsupported, self.unreachable,
        )
    }
}

/// A compatibility report, in catalog order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    pub endpoint: String,
    pub probes: Vec<Probe>,
}

impl Report {
    /// Counts probes by status.
    pub fn summary(&self) -> Summary {
        self.probes.iter().fold(
            Summary {
                total: self.probes.len(),
                ..Default::default()
            },
            |mut summary, probe| {
                match probe.status {
                    Status::Supported | Status::Errored(_) => summary.supported += 1,
                    Status::Unsupported(_) => summary.unsupported += 1,
                    Status::Unreachable(_) => summary.unreachable += 1,
                }
                summary
            },
        )
    }

    /// Returns the probe for a method.
    pub fn get(&self, method: &str) -> Option<&Probe> {
        self.probes.iter().find(|probe| probe.method == method)
    }

    /// Renders the report as Markdown, with supported methods grouped by
    /// namespace.
    pub fn to_markdown(&self) -> String {
        let summary = self.summary();
        let mut out = String::new();

        // Writing to a `String` cannot fail.
        let _ = writeln!(out, "# JSON-RPC Compatibility Report\n");
        let _ = writeln!(out, "Tested against: {}\n", self.endpoint);
        let _ = writeln!(out, "## Summary\n");
        let _ = writeln!(out, "- Total Methods Tested: {}", summary.total);
        let _ = writeln!(out, "- Supported: {}", summary.supported);
        let _ = writeln!(out, "- Unsupported: {}", summary.unsupported);
        let _ = writeln!(out, "- Unreachable: {}", summary.unreachable);

        let supported = self
            .probes
            .iter()
            .filter(|probe| probe.status.is_supported())
            .collect::<Vec<_>>();
        if !supported.is_empty() {
            let _ = writeln!(out, "\n## Supported Methods");
            let mut namespace = None;
            for probe in supported {
                if namespace != Some(probe.namespace.as_str()) {
                    namespace = Some(probe.namespace.as_str());
                    let _ = writeln!(out, "\n### {}\n", probe.namespace);
                    let _ = writeln!(out, "| Method | Description | Note |");
                    let _ = writeln!(out, "|--------|-------------|------|");
                }
                let _ = writeln!(
                    out,
                    "| `{}` | {} | {} |",
                    probe.method,
                    cell(&truncate(&probe.description, 50)),
                    cell(probe.status.note()),
                );
            }
        }

        let sections: [(&str, fn(&Status) -> bool); 2] = [
            ("Unsupported Methods", |status| {
                matches!(status, Status::Unsupported(_))
            }),
            ("Unreachable Methods", |status| {
                matches!(status, Status::Unreachable(_))
            }),
        ];
        for (title, filter) in sections {
            let probes = self
                .probes
                .iter()
                .filter(|probe| filter(&probe.status))
                .collect::<Vec<_>>();
            if probes.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n## {title}\n");
            let _ = writeln!(out, "| Method | Namespace | Reason |");
            let _ = writeln!(out, "|--------|-----------|--------|");
            for probe in probes {
                let _ = writeln!(
                    out,
                    "| `{}` | {} | {} |",
                    probe.method,
                    probe.namespace,
                    cell(probe.status.note()),
                );
            }
        }

        out
    }
}

fn truncate(text: &str, len: usize) -> String {
    match text.char_indices().nth(len) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Probes an endpoint for every method in the catalog, using the provided
/// `async` roundtrip implementation for each request. Results are also
/// recorded in the invoker.
pub async fn probe<F, Fut, E>(
    catalog: &Catalog,
    invoker: &Invoker,
    endpoint: &str,
    roundtrip: F,
    config: &Configuration,
) -> Result<Report, live::Error>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, E>>,
    E: Display,
{
    if endpoint.is_empty() {
        return Err(live::Error::MissingEndpoint);
    }

    let limit = config
        .max_concurrent_requests
        .map(NonZeroUsize::get)
        .unwrap_or_else(|| catalog.len().max(1));
    let roundtrip = &roundtrip;

    let probes = stream::iter(catalog.entries())
        .map(|entry| async move {
            let result = invoker
                .invoke(
                    endpoint,
                    &entry.method.name,
                    params(entry, config.example),
                    roundtrip,
                )
                .await?;
            let status = Status::classify(&result);
            tracing::debug!(method = %entry.method.name, ?status, "probed method");

            Ok::<_, live::Error>(Probe {
                namespace: entry.namespace.id.clone(),
                method: entry.method.name.clone(),
                description: entry.method.description.clone(),
                status,
            })
        })
        .buffered(limit)
        .try_collect::<Vec<_>>()
        .await?;

    let report = Report {
        endpoint: endpoint.to_owned(),
        probes,
    };
    tracing::info!(%endpoint, summary = %report.summary(), "probe complete");
    Ok(report)
}

fn params(entry: Entry<'_>, example: usize) -> &[Value] {
    let examples = &entry.method.examples;
    examples
        .get(example)
        .or_else(|| examples.first())
        .map(|example| example.params.as_slice())
        .unwrap_or_default()
}
