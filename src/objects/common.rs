//! Common types shared across DFXML objects.
//!
//! This module contains the foundational types an HFS conversion emits:
//! - [`Hashes`] - MD5 and SHA-1 digests of a data fork
//! - [`Timestamp`] - Listing timestamps with precision
//! - [`ForeignElements`] - Elements outside the DFXML namespace (HFS extensions)

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use std::fmt;

// ============================================================================
// DFXML Namespaces and Constants
// ============================================================================

/// DFXML schema version written by this crate
pub const DFXML_VERSION: &str = "1.1.1";

/// Dublin Core namespace
pub const XMLNS_DC: &str = "http://purl.org/dc/elements/1.1/";

/// DFXML namespace
pub const XMLNS_DFXML: &str = "http://www.forensicswiki.org/wiki/Category:Digital_Forensics_XML";

/// Projected HFS extension namespace
///
/// See dfxml_schema issue #23 for the proposal these element names follow.
pub const XMLNS_HFS: &str = "http://www.forensicswiki.org/wiki/HFS";

// ============================================================================
// Hash Types
// ============================================================================

/// Hash algorithms computed over HFS data forks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HashType {
    /// MD5 (128-bit)
    Md5,
    /// SHA-1 (160-bit)
    Sha1,
}

impl HashType {
    /// Returns the `type` attribute value for this hash.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashType::Md5 => "md5",
            HashType::Sha1 => "sha1",
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Digests of a file's content, stored as lowercase hex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hashes {
    /// MD5 hash (32 hex characters)
    pub md5: Option<String>,
    /// SHA-1 hash (40 hex characters)
    pub sha1: Option<String>,
}

impl Hashes {
    /// Creates a new empty Hashes collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any hash is set.
    pub fn has_any(&self) -> bool {
        self.md5.is_some() || self.sha1.is_some()
    }

    /// Sets a hash value by type.
    pub fn set(&mut self, hash_type: HashType, value: String) {
        let normalized = value.to_lowercase();
        match hash_type {
            HashType::Md5 => self.md5 = Some(normalized),
            HashType::Sha1 => self.sha1 = Some(normalized),
        }
    }

    /// Gets a hash value by type.
    pub fn get(&self, hash_type: HashType) -> Option<&str> {
        match hash_type {
            HashType::Md5 => self.md5.as_deref(),
            HashType::Sha1 => self.sha1.as_deref(),
        }
    }

    /// Iterates over all set hashes in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (HashType, &str)> {
        [
            (HashType::Md5, self.md5.as_deref()),
            (HashType::Sha1, self.sha1.as_deref()),
        ]
        .into_iter()
        .filter_map(|(t, v)| v.map(|val| (t, val)))
    }
}

// ============================================================================
// Timestamp Types
// ============================================================================

/// Time unit of a timestamp precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// Days
    Day,
    /// Seconds
    Second,
}

impl TimeUnit {
    /// Returns the string representation of this time unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Day => "d",
            TimeUnit::Second => "s",
        }
    }
}

/// Timestamp precision as (resolution, unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Precision {
    /// The numeric resolution value
    pub resolution: i32,
    /// The time unit
    pub unit: TimeUnit,
}

impl Precision {
    /// Creates a new Precision with the given resolution and unit.
    pub fn new(resolution: i32, unit: TimeUnit) -> Self {
        Self { resolution, unit }
    }

    /// One day: listing shows only the calendar date.
    pub fn day() -> Self {
        Self::new(1, TimeUnit::Day)
    }

    /// One minute: listing shows hours and minutes.
    pub fn minute() -> Self {
        Self::new(60, TimeUnit::Second)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.resolution, self.unit.as_str())
    }
}

/// The timestamps an HFS listing can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimestampName {
    /// Modification time
    Mtime,
    /// Creation time
    Crtime,
}

impl TimestampName {
    /// Returns the XML element name for this timestamp type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampName::Mtime => "mtime",
            TimestampName::Crtime => "crtime",
        }
    }
}

impl fmt::Display for TimestampName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A listing timestamp.
///
/// hfsutils prints local wall-clock time with no zone, so the value is kept
/// naive and rendered as ISO 8601 without an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp {
    /// Which timestamp this is; also the XML element name
    pub name: TimestampName,
    /// The wall-clock value
    pub time: NaiveDateTime,
    /// Precision information
    pub prec: Option<Precision>,
}

impl Timestamp {
    /// Creates a timestamp with a specific name, time and precision.
    pub fn new(name: TimestampName, time: NaiveDateTime, prec: Precision) -> Self {
        Self {
            name,
            time,
            prec: Some(prec),
        }
    }

    /// Returns the ISO 8601 rendering (`YYYY-MM-DDTHH:MM:SS`).
    pub fn to_iso8601(&self) -> String {
        self.time.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso8601())
    }
}

// ============================================================================
// Foreign Elements (non-DFXML namespace, e.g. HFS extensions)
// ============================================================================

/// An XML element from a non-DFXML namespace with text content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignElement {
    /// The XML namespace URI
    pub namespace: String,
    /// The local tag name (without namespace prefix)
    pub tag_name: String,
    /// Text content of the element
    pub text: String,
}

impl ForeignElement {
    /// Creates an element in the given namespace.
    pub fn new(
        namespace: impl Into<String>,
        tag_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            tag_name: tag_name.into(),
            text: text.into(),
        }
    }

    /// Creates an element in the HFS extension namespace.
    pub fn hfs(tag_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(XMLNS_HFS, tag_name, text)
    }
}

/// An ordered list of foreign-namespace elements attached to an object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignElements {
    elements: Vec<ForeignElement>,
}

impl ForeignElements {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no foreign elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of foreign elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Adds an element, rejecting anything in the DFXML namespace.
    pub fn try_push(&mut self, element: ForeignElement) -> Result<()> {
        if element.namespace == XMLNS_DFXML {
            return Err(Error::InvalidForeignElement(format!(
                "{} must not use the DFXML namespace",
                element.tag_name
            )));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Returns the text of the first element with this namespace and tag.
    pub fn get(&self, namespace: &str, tag_name: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.namespace == namespace && e.tag_name == tag_name)
            .map(|e| e.text.as_str())
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &ForeignElement> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a ForeignElements {
    type Item = &'a ForeignElement;
    type IntoIter = std::slice::Iter<'a, ForeignElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_hashes() {
        let mut hashes = Hashes::new();
        assert!(!hashes.has_any());

        hashes.set(HashType::Md5, "D41D8CD98F00B204E9800998ECF8427E".to_string());
        assert_eq!(
            hashes.get(HashType::Md5),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
        assert_eq!(hashes.iter().count(), 1);
    }

    #[test]
    fn test_timestamp_iso8601() {
        let time = NaiveDate::from_ymd_opt(2001, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let ts = Timestamp::new(TimestampName::Mtime, time, Precision::day());
        assert_eq!(ts.to_iso8601(), "2001-01-05T00:00:00");
        assert_eq!(Precision::day().to_string(), "1d");
        assert_eq!(Precision::minute().to_string(), "60s");
    }

    #[test]
    fn test_foreign_elements() {
        let mut elems = ForeignElements::new();
        elems
            .try_push(ForeignElement::hfs("HFStype_creator", "TEXT/ttxt"))
            .unwrap();
        assert_eq!(elems.get(XMLNS_HFS, "HFStype_creator"), Some("TEXT/ttxt"));
        assert!(elems
            .try_push(ForeignElement::new(XMLNS_DFXML, "filename", "x"))
            .is_err());
        assert_eq!(elems.len(), 1);
    }
}
