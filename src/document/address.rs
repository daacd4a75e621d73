//! Ordered, case-insensitive set of watch-addresses.

use std::collections::HashSet;

/// Returns the identity used to compare two addresses.
///
/// Two addresses are the same watch-address iff their lowercased forms match.
#[must_use]
pub fn identity(address: &str) -> String {
    address.to_lowercase()
}

/// An ordered sequence of addresses with case-insensitive uniqueness.
///
/// The first-seen casing of an address is the one that is kept; later
/// spellings of the same identity are ignored. Iteration yields entries in
/// insertion order.
///
/// # Example
///
/// ```
/// use whale_boot::document::AddressSet;
///
/// let mut set = AddressSet::new();
/// assert!(set.insert("0xABC"));
/// assert!(!set.insert("0xabc"));
/// assert_eq!(set.as_slice(), ["0xABC"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSet {
    entries: Vec<String>,
    identities: HashSet<String>,
}

impl AddressSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from existing entries, keeping the first occurrence of
    /// each identity.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for entry in entries {
            set.insert(entry);
        }
        set
    }

    /// Appends `address` if its identity is not present yet.
    ///
    /// Returns `true` if the address was appended.
    pub fn insert(&mut self, address: impl Into<String>) -> bool {
        let address = address.into();
        if !self.identities.insert(identity(&address)) {
            return false;
        }
        self.entries.push(address);
        true
    }

    /// Returns `true` if an address with the same identity is present.
    #[must_use]
    pub fn contains(&self, address: &str) -> bool {
        self.identities.contains(&identity(address))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    /// Consumes the set, returning the ordered entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a AddressSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
