//! Directory entry representation.

use std::collections::{BTreeSet, HashMap};

use ldap3::SearchEntry;

/// A directory entry with its text attributes.
#[derive(Debug, Clone, Default)]
pub struct DirectoryEntry {
    /// Distinguished name.
    pub dn: String,

    /// Attributes (all values are multi-valued).
    pub attributes: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    /// Creates an entry from an `ldap3` search result.
    ///
    /// Binary attribute values are folded in lossily; the attributes the
    /// bridge reads (keys, shell, members) are text in practice.
    #[must_use]
    pub fn from_search_entry(entry: SearchEntry) -> Self {
        let mut attributes = entry.attrs;
        for (name, values) in entry.bin_attrs {
            let decoded = values
                .into_iter()
                .map(|v| String::from_utf8_lossy(&v).into_owned());
            attributes.entry(name).or_default().extend(decoded);
        }

        Self {
            dn: entry.dn,
            attributes,
        }
    }

    /// Gets a single-valued attribute.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Gets a multi-valued attribute.
    #[must_use]
    pub fn get_attrs(&self, name: &str) -> Option<&Vec<String>> {
        self.attributes.get(name)
    }

    /// Checks if the entry has an attribute.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Returns the value set of an attribute, empty when absent.
    ///
    /// Used to diff a desired state against the current entry without
    /// being sensitive to value order.
    #[must_use]
    pub fn attr_set(&self, name: &str) -> BTreeSet<&str> {
        self.attributes
            .get(name)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
