//! In-memory configuration document shared with the monitoring process.
//!
//! The document is a YAML top-level mapping. Only the `whales_<chain>`
//! address sections are interpreted here; every other section is carried
//! through untouched and in its original position, so loading and saving a
//! document never drops or reorders settings this crate does not know about.

mod address;
mod chain;

pub use address::{AddressSet, identity};
pub use chain::ChainKey;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Errors raised while interpreting a configuration document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not valid YAML.
    #[error("Invalid YAML: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The content is not UTF-8 text.
    #[error("Document is not valid UTF-8: {0}")]
    Encoding(#[source] std::str::Utf8Error),

    /// The document has no content at all.
    #[error("Document is empty")]
    Empty,

    /// The top-level value is not a mapping of sections.
    #[error("Top-level value must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of value that was found instead
        found: &'static str,
    },

    /// An address section exists but is not a sequence.
    #[error("Section '{section}' must be a sequence of addresses, found {found}")]
    SectionType {
        /// Section name
        section: String,
        /// Kind of value that was found instead
        found: &'static str,
    },

    /// An address section contains a non-string element.
    #[error("Section '{section}' entry #{index} must be a string, found {found}")]
    EntryType {
        /// Section name
        section: String,
        /// Zero-based position of the offending entry
        index: usize,
        /// Kind of value that was found instead
        found: &'static str,
    },
}

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Mapping,
}

impl ConfigDocument {
    /// Builds a document from an arbitrary YAML value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Empty`] for a null value and
    /// [`DocumentError::NotAMapping`] for any other non-mapping value.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Err(DocumentError::Empty),
            other => Err(DocumentError::NotAMapping {
                found: value_kind(&other),
            }),
        }
    }

    /// Parses YAML text.
    ///
    /// An empty file is rejected rather than treated as an empty mapping so a
    /// truncated file is never mistaken for a valid one.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`], [`DocumentError::Empty`] or
    /// [`DocumentError::NotAMapping`].
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        let value: Value = serde_yaml::from_str(text).map_err(DocumentError::Parse)?;
        Self::from_value(value)
    }

    /// Parses raw file content.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Encoding`] for non-UTF-8 input, otherwise the
    /// errors of [`Self::parse`].
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes).map_err(DocumentError::Encoding)?;
        Self::parse(text)
    }

    /// Serializes the document to YAML, keeping section order.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.root)
    }

    /// Returns the raw value of a top-level section.
    #[must_use]
    pub fn get(&self, section: &str) -> Option<&Value> {
        self.root.get(section)
    }

    /// Top-level section names in document order. Non-string keys are skipped.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.root.keys().filter_map(Value::as_str)
    }

    /// Number of top-level sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns `true` if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Materializes the address set of `chain`.
    ///
    /// A missing or null section yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::SectionType`] if the section is not a sequence
    /// and [`DocumentError::EntryType`] if an element is not a string.
    pub fn address_set(&self, chain: &ChainKey) -> Result<AddressSet, DocumentError> {
        let section = chain.section();
        let entries = match self.root.get(section.as_str()) {
            None | Some(Value::Null) => return Ok(AddressSet::new()),
            Some(Value::Sequence(entries)) => entries,
            Some(other) => {
                return Err(DocumentError::SectionType {
                    section,
                    found: value_kind(other),
                });
            }
        };

        let mut addresses = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Some(address) = entry.as_str() else {
                return Err(DocumentError::EntryType {
                    section,
                    index,
                    found: value_kind(entry),
                });
            };
            addresses.push(address.to_string());
        }

        Ok(AddressSet::from_entries(addresses))
    }

    /// Writes `set` back into the section of `chain`.
    ///
    /// An existing section keeps its position; a new one is appended.
    pub fn set_address_set(&mut self, chain: &ChainKey, set: &AddressSet) {
        let sequence = set.iter().cloned().map(Value::String).collect();
        self.root
            .insert(Value::String(chain.section()), Value::Sequence(sequence));
    }
}

/// Short human-readable name of a YAML value kind.
const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
