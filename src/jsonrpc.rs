//! Module containing serializable JSON RPC data types.

use crate::catalog::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// JSON RPC supported version.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Version {
    /// Version 2.0 of the JSON RPC specification.
    #[serde(rename = "2.0")]
    V2,
}

/// Request and response ID.
///
/// Every request built by this crate uses the same ID of `1`. Requests are
/// never batched, so there is nothing to correlate and a fixed ID keeps the
/// generated samples and request bodies reproducible.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, Hash, PartialEq)]
#[serde(transparent)]
pub struct Id(pub u32);

impl Default for Id {
    fn default() -> Self {
        Self(1)
    }
}

/// A request object.
///
/// Method parameters are kept as raw JSON values so that they are sent
/// exactly as they were authored.
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    pub jsonrpc: Version,
    pub id: Id,
    pub method: &'a str,
    pub params: &'a [Value],
}

impl<'a> Request<'a> {
    /// Creates a new request for the specified method and parameters.
    pub fn new(method: &'a str, params: &'a [Value]) -> Self {
        Self {
            jsonrpc: Version::V2,
            id: Id::default(),
            method,
            params,
        }
    }
}

/// Returns the serialized request body for a JSON RPC call.
pub fn request_body(method: &str, params: &[Value]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Request::new(method, params))
}

/// A response object wrapping an expected example outcome, used to display
/// the full JSON RPC response for an example.
#[derive(Debug, Serialize)]
pub struct Response<'a> {
    pub jsonrpc: Version,
    pub id: Id,
    #[serde(flatten)]
    pub outcome: &'a Outcome,
}

impl<'a> Response<'a> {
    pub fn new(outcome: &'a Outcome) -> Self {
        Self {
            jsonrpc: Version::V2,
            id: Id::default(),
            outcome,
        }
    }
}

/// An RPC error that may be produced on a response.
#[derive(Clone, Debug, Deserialize, Error, PartialEq, Serialize)]
#[error("{code}: {message}")]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Error {
    /// Creates a new error with the specified code and message.
    pub fn new(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: Value::Null,
        }
    }

    /// Extracts a JSON RPC error from an arbitrary response value, if it has
    /// a well-formed `error` member.
    pub fn from_response(response: &Value) -> Option<Self> {
        serde_json::from_value(response.get("error")?.clone()).ok()
    }
}

/// An error code.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
#[serde(from = "i32", into = "i32")]
pub enum ErrorCode {
    #[error("parse error")]
    ParseError,
    #[error("invalid request")]
    InvalidRequest,
    #[error("method not found")]
    MethodNotFound,
    #[error("invalid params")]
    InvalidParams,
    #[error("internal error")]
    InternalError,
    #[error("server error ({0})")]
    ServerError(i32),
    #[error("reserved ({0})")]
    Reserved(i32),
    #[error("{0}")]
    Other(i32),
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        #[allow(clippy::match_overlapping_arm)]
        match code {
            -32700 => Self::ParseError,
            -32600 => Self::InvalidRequest,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            -32099..=-32000 => Self::ServerError(code),
            -32768..=-32000 => Self::Reserved(code),
            _ => Self::Other(code),
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::ServerError(code) => code,
            ErrorCode::Reserved(code) => code,
            ErrorCode::Other(code) => code,
        }
    }
}
