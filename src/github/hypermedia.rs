// Hypermedia links attached to API resources.
// Resources carry their `_links` relations as a field, exposed through a trait.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hyperlink::Hyperlink;

/// A single link relation, HAL style: `{ "href": "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: Hyperlink,
}

/// Link relations of a resource, keyed by relation name (`self`, `html`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    pub fn get(&self, rel: &str) -> Option<&Hyperlink> {
        self.0.get(rel).map(|link| &link.href)
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resources that can be navigated through their link relations.
pub trait Hypermedia {
    fn links(&self) -> &Links;

    /// The link for `rel`, ready to be expanded and handed to a service.
    fn link(&self, rel: &str) -> Option<&Hyperlink> {
        self.links().get(rel)
    }
}
