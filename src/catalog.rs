//! The static catalog of documented JSON RPC methods.
//!
//! The catalog is plain data: an ordered list of namespaces, each with an
//! ordered list of methods. The built-in table is embedded as JSON and parsed
//! once per process. Alternate catalogs in the same format can be loaded with
//! [`Catalog::from_json`] or [`Catalog::from_path`].

use crate::jsonrpc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::Path,
    sync::OnceLock,
};
use thiserror::Error;

/// The namespace selector value that means "every namespace".
pub const ALL: &str = "all";

/// Symbolic icon names. Rendering them is up to the caller.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Api,
    Network,
    Ethereum,
    SmartContract,
    Curl,
    #[serde(rename = "typescript")]
    TypeScript,
    Go,
    Rust,
    Python,
    #[serde(rename = "csharp")]
    CSharp,
}

/// A group of related RPC methods, such as `eth` or `debug`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Namespace {
    pub id: String,
    pub name: String,
    pub icon: Icon,
    pub methods: Vec<Method>,
}

/// A documented RPC method.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Method {
    pub name: String,
    pub description: String,
    pub implemented: bool,
    /// The method is only exposed over authenticated or unsafe RPC
    /// endpoints.
    #[serde(default, skip_serializing_if = "is_false")]
    pub private: bool,
    /// A known caveat with the current implementation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// A method parameter descriptor.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Parameter {
    pub name: String,
    /// Free-form type tag, for example `address`, `hash` or `object`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Members of object-typed parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

/// A member of an object-typed parameter.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// An example invocation along with the response it is expected to produce.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Example {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Value>,
    pub response: Outcome,
}

/// The expected outcome of an example call.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Error { error: jsonrpc::Error },
    Result { result: Value },
}

impl Outcome {
    /// Returns `true` if the example is expected to fail.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl Example {
    /// Returns the full expected JSON RPC response for display.
    pub fn response_envelope(&self) -> jsonrpc::Response<'_> {
        jsonrpc::Response::new(&self.response)
    }
}

/// The method catalog.
///
/// Namespaces and methods are stored in declaration order, with an index
/// from method name to its position for lookups.
#[derive(Clone, Debug)]
pub struct Catalog {
    namespaces: Vec<Namespace>,
    methods: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Returns the built-in catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded catalog data is malformed, which is a bug in
    /// this crate.
    pub fn builtin() -> &'static Self {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Self::from_json(include_str!("catalog.json")).expect("embedded catalog is invalid")
        })
    }

    /// Creates a catalog from namespaces, checking that namespace IDs and
    /// method names are unique.
    pub fn new(namespaces: Vec<Namespace>) -> Result<Self, Error> {
        let mut ids = HashSet::new();
        let mut methods = HashMap::new();
        for (n, namespace) in namespaces.iter().enumerate() {
            if namespace.id == ALL {
                return Err(Error::ReservedNamespace);
            }
            if !ids.insert(namespace.id.clone()) {
                return Err(Error::DuplicateNamespace(namespace.id.clone()));
            }
            for (m, method) in namespace.methods.iter().enumerate() {
                if methods.insert(method.name.clone(), (n, m)).is_some() {
                    return Err(Error::DuplicateMethod(method.name.clone()));
                }
            }
        }

        Ok(Self {
            namespaces,
            methods,
        })
    }

    /// Parses a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Reads a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Returns all namespaces in declaration order.
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Returns the namespace with the specified ID.
    pub fn namespace(&self, id: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|namespace| namespace.id == id)
    }

    /// Looks up a method by name.
    pub fn method(&self, name: &str) -> Option<Entry<'_>> {
        let (n, m) = *self.methods.get(name)?;
        let namespace = &self.namespaces[n];
        Some(Entry {
            namespace,
            method: &namespace.methods[m],
        })
    }

    /// Returns every method paired with its namespace, namespace-major in
    /// declaration order.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.namespaces.iter().flat_map(|namespace| {
            namespace
                .methods
                .iter()
                .map(move |method| Entry { namespace, method })
        })
    }

    /// Returns the total number of methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if the catalog documents no methods.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// A method together with the namespace it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct Entry<'a> {
    pub namespace: &'a Namespace,
    pub method: &'a Method,
}

/// An error loading a catalog.
#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("duplicate namespace '{0}'")]
    DuplicateNamespace(String),
    #[error("duplicate method '{0}'")]
    DuplicateMethod(String),
    #[error("namespace ID 'all' is reserved")]
    ReservedNamespace,
}
