//! Per-viewer presentation state.
//!
//! None of this is stored in the catalog: expansion and language selection
//! are keyed by method name (and example index) so the catalog itself stays
//! immutable and shared.

use crate::{
    catalog::Catalog,
    filter::{Listing, Query},
};
use std::collections::{HashMap, HashSet};

/// The language tab selected when none was chosen.
pub const DEFAULT_LANGUAGE: &str = "curl";

/// The state of one viewer's session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub query: Query,
    /// Free-form RPC endpoint text as entered.
    pub endpoint: String,
    /// Whether live execution is enabled.
    pub interactive: bool,
    expanded: HashSet<String>,
    languages: HashMap<(String, usize), String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the methods to display for the current query.
    pub fn listing<'a>(&self, catalog: &'a Catalog) -> Listing<'a> {
        catalog.filter(&self.query)
    }

    /// Expands or collapses a method, returning whether it is now expanded.
    pub fn toggle_expanded(&mut self, method: &str) -> bool {
        if self.expanded.remove(method) {
            false
        } else {
            self.expanded.insert(method.to_owned());
            true
        }
    }

    pub fn is_expanded(&self, method: &str) -> bool {
        self.expanded.contains(method)
    }

    /// Selects the sample language shown for one example of a method.
    pub fn select_language(&mut self, method: &str, example: usize, language: &str) {
        self.languages
            .insert((method.to_owned(), example), language.to_owned());
    }

    /// Returns the sample language shown for one example of a method.
    pub fn language(&self, method: &str, example: usize) -> &str {
        self.languages
            .get(&(method.to_owned(), example))
            .map(String::as_str)
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Returns `true` if examples can be executed live.
    pub fn can_execute(&self) -> bool {
        self.interactive && !self.endpoint.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Selector;

    #[test]
    fn lists_methods_for_query() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        assert_eq!(session.listing(catalog).entries.len(), catalog.len());

        session.query.selector = "txpool".parse().unwrap();
        let listing = session.listing(catalog);
        assert!(!listing.show_namespace);
        assert_eq!(
            listing.names().collect::<Vec<_>>(),
            ["txpool_content", "txpool_inspect", "txpool_status"],
        );

        session.query.search = "TXPOOL_STATUS".to_owned();
        assert_eq!(
            session.listing(catalog).names().collect::<Vec<_>>(),
            ["txpool_status"]
        );

        session.query = Query {
            search: "no such method".to_owned(),
            selector: Selector::All,
            implemented_only: false,
        };
        assert!(session.listing(catalog).is_empty());
    }

    #[test]
    fn toggles_expansion_per_method() {
        let mut session = Session::new();
        assert!(!session.is_expanded("eth_chainId"));
        assert!(session.toggle_expanded("eth_chainId"));
        assert!(session.is_expanded("eth_chainId"));
        assert!(!session.is_expanded("eth_gasPrice"));
        assert!(!session.toggle_expanded("eth_chainId"));
        assert!(!session.is_expanded("eth_chainId"));
    }

    #[test]
    fn selects_languages_per_example() {
        let mut session = Session::new();
        assert_eq!(session.language("eth_getBalance", 0), DEFAULT_LANGUAGE);

        session.select_language("eth_getBalance", 1, "go");
        assert_eq!(session.language("eth_getBalance", 0), "curl");
        assert_eq!(session.language("eth_getBalance", 1), "go");
        assert_eq!(session.language("eth_getCode", 1), "curl");

        session.select_language("eth_getBalance", 1, "python");
        assert_eq!(session.language("eth_getBalance", 1), "python");
    }

    #[test]
    fn executes_only_when_interactive_with_endpoint() {
        let mut session = Session::new();
        assert!(!session.can_execute());

        session.endpoint = "http://localhost:8545".to_owned();
        assert!(!session.can_execute());

        session.interactive = true;
        assert!(session.can_execute());

        session.endpoint.clear();
        assert!(!session.can_execute());
    }
}
