//! A browsable catalog of Ethereum JSON RPC methods.
//!
//! The crate bundles a static method catalog with search and namespace
//! filtering, per-language code sample generation, OpenAPI documents and
//! Markdown pages for documentation sites, and a small live invocation client
//! for trying methods against a real endpoint.
//!
//! ```
//! use rpcdocs::{filter::Query, Catalog};
//!
//! let catalog = Catalog::builtin();
//! let listing = catalog.filter(&Query {
//!     search: "balance".to_owned(),
//!     ..Default::default()
//! });
//! assert!(listing.names().any(|name| name == "eth_getBalance"));
//!
//! let samples = rpcdocs::sample::generate("eth_blockNumber", &[]);
//! assert!(samples.get("curl").unwrap().contains("eth_blockNumber"));
//! ```

pub mod catalog;
#[cfg(feature = "curl")]
pub mod curl;
pub mod filter;
#[cfg(feature = "http")]
pub mod http;
pub mod jsonrpc;
pub mod live;
pub mod openapi;
pub mod page;
pub mod probe;
pub mod sample;
pub mod session;

pub use self::{
    catalog::{Catalog, Entry},
    live::{Invoker, LiveResult},
    sample::Generator,
    session::Session,
};
