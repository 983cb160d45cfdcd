//! OpenAPI documents for catalog methods.
//!
//! JSON RPC has a single HTTP endpoint, so every method is described as a
//! `POST` operation on its own fragment path (`/#eth_call`). The fragment is
//! never sent, which keeps the paths unique while pointing tooling at the
//! server root.

use crate::{
    catalog::Entry,
    jsonrpc::{ErrorCode, Request, Response},
    sample::Generator,
};
use serde_json::{json, Map, Value};
use std::fmt::Write as _;

/// The OpenAPI version written to documents.
pub const VERSION: &str = "3.0.3";

/// Document level metadata.
#[derive(Clone, Debug)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "Ethereum JSON-RPC API".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            description: description(),
        }
    }
}

fn description() -> String {
    let mut out = "Ethereum compatible JSON-RPC 2.0 methods. Every request is an HTTP \
                   `POST` with a `Content-Type: application/json` body.\n\n\
                   ## Error Codes\n\n\
                   | Code | Message |\n\
                   |------|---------|\n"
        .to_owned();
    for code in [-32700, -32600, -32601, -32602, -32603] {
        let _ = writeln!(out, "| {code} | {} |", ErrorCode::from(code));
    }
    out
}

/// Returns the path a method is documented under.
pub fn path(method: &str) -> String {
    format!("/#{method}")
}

/// Builds an OpenAPI document for the given methods, in order.
///
/// Namespaces become tags in order of first appearance. The generator's
/// endpoint is used as the server, and its languages provide the code samples
/// for each method's first example.
pub fn document<'a>(
    entries: impl IntoIterator<Item = Entry<'a>>,
    generator: &Generator,
    info: &Info,
) -> Result<Value, serde_json::Error> {
    let mut paths = Map::new();
    let mut tags = Vec::<Value>::new();
    for entry in entries {
        let tag = &entry.namespace.id;
        if !tags.iter().any(|existing| existing["name"] == *tag) {
            tags.push(json!({
                "name": tag,
                "x-displayName": entry.namespace.name,
                "description": format!("{} namespace methods", entry.namespace.name),
            }));
        }
        paths.insert(
            path(&entry.method.name),
            json!({ "post": operation(entry, generator)? }),
        );
    }
    tracing::debug!(paths = paths.len(), "built OpenAPI document");

    Ok(json!({
        "openapi": VERSION,
        "info": {
            "title": info.title,
            "version": info.version,
            "description": info.description,
        },
        "servers": [{ "url": generator.endpoint() }],
        "tags": tags,
        "paths": paths,
        "components": { "schemas": schemas() },
    }))
}

fn operation(entry: Entry<'_>, generator: &Generator) -> Result<Value, serde_json::Error> {
    let method = entry.method;

    let mut description = method.description.clone();
    if let Some(issue) = &method.issue {
        let _ = write!(description, "\n\n**Known issue:** {issue}");
    }
    if method.private {
        description.push_str(
            "\n\n**Private:** only exposed over authenticated or unsafe RPC endpoints.",
        );
    }
    if !method.implemented {
        description.push_str("\n\n**Not implemented.**");
    }

    let mut requests = Map::new();
    let mut responses = Map::new();
    for (i, example) in method.examples.iter().enumerate() {
        let key = format!("example-{}", i + 1);
        requests.insert(
            key.clone(),
            json!({
                "summary": example.name,
                "value": serde_json::to_value(Request::new(&method.name, &example.params))?,
            }),
        );
        responses.insert(
            key,
            json!({
                "summary": example.name,
                "value": serde_json::to_value(Response::new(&example.response))?,
            }),
        );
    }

    let params = method
        .examples
        .first()
        .map(|example| example.params.as_slice())
        .unwrap_or_default();
    let samples = generator
        .languages()
        .iter()
        .filter_map(|language| {
            let source = generator.render(language.id, &method.name, params)?;
            Some(json!({
                "lang": language.id,
                "label": language.name,
                "source": source,
            }))
        })
        .collect::<Vec<_>>();

    Ok(json!({
        "summary": method.name,
        "description": description,
        "operationId": method.name,
        "tags": [entry.namespace.id],
        "x-implemented": method.implemented,
        "x-private": method.private,
        "requestBody": {
            "required": true,
            "content": {
                "application/json": {
                    "schema": {
                        "allOf": [
                            { "$ref": "#/components/schemas/JsonRpcRequest" },
                            {
                                "type": "object",
                                "properties": {
                                    "method": { "type": "string", "enum": [method.name] },
                                    "params": {
                                        "type": "array",
                                        "maxItems": method.params.len(),
                                        "items": {},
                                        "x-parameters": serde_json::to_value(&method.params)?,
                                    },
                                },
                            },
                        ],
                    },
                    "examples": requests,
                },
            },
        },
        "responses": {
            "200": {
                "description": "JSON-RPC response, carrying either a result or an error",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/JsonRpcResponse" },
                        "examples": responses,
                    },
                },
            },
        },
        "x-codeSamples": samples,
    }))
}

fn schemas() -> Value {
    json!({
        "JsonRpcRequest": {
            "type": "object",
            "required": ["jsonrpc", "id", "method", "params"],
            "properties": {
                "jsonrpc": { "type": "string", "enum": ["2.0"] },
                "id": { "type": "integer" },
                "method": { "type": "string" },
                "params": { "type": "array", "items": {} },
            },
        },
        "JsonRpcResponse": {
            "type": "object",
            "required": ["jsonrpc", "id"],
            "properties": {
                "jsonrpc": { "type": "string", "enum": ["2.0"] },
                "id": { "type": "integer" },
                "result": {},
                "error": { "$ref": "#/components/schemas/JsonRpcError" },
            },
        },
        "JsonRpcError": {
            "type": "object",
            "required": ["code", "message"],
            "properties": {
                "code": { "type": "integer" },
                "message": { "type": "string" },
                "data": {},
            },
        },
    })
}
