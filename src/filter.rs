//! Search and namespace filtering over the method catalog.

use crate::catalog::{self, Catalog, Entry};
use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Namespace selection.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Selector {
    /// Methods from every namespace.
    #[default]
    All,
    /// Methods from the namespace with the specified ID.
    Namespace(String),
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == catalog::ALL {
            Self::All
        } else {
            Self::Namespace(s.to_owned())
        })
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::All => f.write_str(catalog::ALL),
            Self::Namespace(id) => f.write_str(id),
        }
    }
}

/// The user's current filter inputs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Query {
    /// Case-insensitive search text. When non-empty, it matches against all
    /// namespaces and the selector is ignored.
    pub search: String,
    pub selector: Selector,
    /// Hide methods that are not implemented.
    pub implemented_only: bool,
}

impl Query {
    fn includes(&self, entry: &Entry) -> bool {
        !self.implemented_only || entry.method.implemented
    }
}

/// The filtered methods to display.
#[derive(Clone, Debug)]
pub struct Listing<'a> {
    pub entries: Vec<Entry<'a>>,
    /// Whether each entry should be shown with its namespace. This is the
    /// case whenever the listing can span more than one namespace.
    pub show_namespace: bool,
}

impl Listing<'_> {
    /// Returns `true` when nothing matched, in which case an explicit empty
    /// state should be shown.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the names of the listed methods.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.method.name.as_str())
    }
}

impl Catalog {
    /// Returns the methods matching a query, in catalog order.
    pub fn filter(&self, query: &Query) -> Listing<'_> {
        if !query.search.is_empty() {
            let needle = query.search.to_lowercase();
            return Listing {
                entries: self
                    .entries()
                    .filter(|entry| is_match(entry, &needle) && query.includes(entry))
                    .collect(),
                show_namespace: true,
            };
        }

        match &query.selector {
            Selector::All => Listing {
                entries: self
                    .entries()
                    .filter(|entry| query.includes(entry))
                    .collect(),
                show_namespace: true,
            },
            Selector::Namespace(id) => Listing {
                entries: self
                    .namespace(id)
                    .into_iter()
                    .flat_map(|namespace| {
                        namespace
                            .methods
                            .iter()
                            .map(move |method| Entry { namespace, method })
                    })
                    .filter(|entry| query.includes(entry))
                    .collect(),
                show_namespace: false,
            },
        }
    }
}

fn is_match(entry: &Entry, needle: &str) -> bool {
    entry.method.name.to_lowercase().contains(needle)
        || entry.method.description.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(search: &str, selector: &str, implemented_only: bool) -> Query {
        Query {
            search: search.to_owned(),
            selector: selector.parse().unwrap(),
            implemented_only,
        }
    }

    #[test]
    fn parses_selectors() {
        assert_eq!("all".parse::<Selector>().unwrap(), Selector::All);
        assert_eq!(
            "eth".parse::<Selector>().unwrap(),
            Selector::Namespace("eth".to_owned()),
        );
        assert_eq!(Selector::Namespace("net".to_owned()).to_string(), "net");
        assert_eq!(Selector::All.to_string(), "all");
    }

    #[test]
    fn searches_names_and_descriptions() {
        let catalog = Catalog::builtin();
        let listing = catalog.filter(&query("balance", "all", false));
        assert!(listing.show_namespace);

        let balance = listing
            .entries
            .iter()
            .find(|entry| entry.method.name == "eth_getBalance")
            .unwrap();
        assert_eq!(balance.namespace.id, "eth");
        assert!(listing.names().all(|name| name != "eth_blockNumber"));
        assert!(listing.names().all(|name| name != "web3_clientVersion"));

        // "Call balanceOf" is only an example name, not a description.
        assert!(listing.names().all(|name| name != "eth_call"));
    }

    #[test]
    fn search_is_case_insensitive_and_ignores_selector() {
        let catalog = Catalog::builtin();
        let lower = catalog.filter(&query("hashrate", "net", false));
        let upper = catalog.filter(&query("HashRate", "web3", false));
        assert_eq!(
            lower.names().collect::<Vec<_>>(),
            ["eth_hashrate", "miner_getHashrate"],
        );
        assert_eq!(
            lower.names().collect::<Vec<_>>(),
            upper.names().collect::<Vec<_>>(),
        );
    }

    #[test]
    fn search_matches_exactly_the_substring_rule() {
        let catalog = Catalog::builtin();
        for search in ["eth", "GET", "profile", "tx", "account", "zzz"] {
            for implemented_only in [false, true] {
                let listing = catalog.filter(&query(search, "all", implemented_only));
                let expected = catalog
                    .entries()
                    .filter(|entry| {
                        let needle = search.to_lowercase();
                        (entry.method.name.to_lowercase().contains(&needle)
                            || entry.method.description.to_lowercase().contains(&needle))
                            && (!implemented_only || entry.method.implemented)
                    })
                    .map(|entry| entry.method.name.as_str())
                    .collect::<Vec<_>>();
                assert_eq!(listing.names().collect::<Vec<_>>(), expected);
            }
        }
    }

    #[test]
    fn unmatched_search_is_empty() {
        let listing = Catalog::builtin().filter(&query("no such method", "all", false));
        assert!(listing.is_empty());
    }

    #[test]
    fn lists_everything_in_catalog_order() {
        let catalog = Catalog::builtin();
        let listing = catalog.filter(&Query::default());
        assert!(listing.show_namespace);
        assert_eq!(listing.entries.len(), catalog.len());
        assert_eq!(
            listing.names().collect::<Vec<_>>(),
            catalog
                .entries()
                .map(|entry| entry.method.name.as_str())
                .collect::<Vec<_>>(),
        );
        assert_eq!(listing.entries[0].method.name, "web3_clientVersion");
    }

    #[test]
    fn lists_single_namespace() {
        let catalog = Catalog::builtin();
        let listing = catalog.filter(&query("", "personal", false));
        assert!(!listing.show_namespace);
        assert_eq!(
            listing.names().collect::<Vec<_>>(),
            catalog
                .namespace("personal")
                .unwrap()
                .methods
                .iter()
                .map(|method| method.name.as_str())
                .collect::<Vec<_>>(),
        );
        assert!(listing
            .entries
            .iter()
            .all(|entry| entry.namespace.id == "personal" && entry.method.private));
    }

    #[test]
    fn hides_unimplemented_methods() {
        let listing = Catalog::builtin().filter(&query("", "miner", true));
        assert_eq!(
            listing.names().collect::<Vec<_>>(),
            [
                "miner_getHashrate",
                "miner_setGasPrice",
                "miner_stop",
                "miner_setEtherbase",
            ],
        );
    }

    #[test]
    fn unknown_namespace_is_empty() {
        let listing = Catalog::builtin().filter(&query("", "shh", false));
        assert!(listing.is_empty());
    }
}
