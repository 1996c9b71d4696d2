//! Index of the modification-ordered listing.
//!
//! Only the date and quoted name are kept per catalog ID; every other
//! attribute comes from the creation listing.

use crate::error::{Error, Result};
use crate::hls::classify::{classify_line, CatalogId, ClassifiedLine};
use log::debug;
use std::collections::HashMap;

/// What the modification listing says about one catalog ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModTimeFact {
    /// Date column as printed
    pub raw_date: String,
    /// Quoted, escaped name as printed
    pub raw_name: String,
}

/// Modification facts keyed by catalog ID.
#[derive(Debug, Clone, Default)]
pub struct ModTimeIndex {
    facts: HashMap<CatalogId, ModTimeFact>,
}

impl ModTimeIndex {
    /// Builds the index from a full modification listing.
    ///
    /// Section headers and blank lines are skipped. Any other line must
    /// classify cleanly, and a catalog ID may only appear once.
    pub fn build(report: &str) -> Result<Self> {
        let mut facts = HashMap::new();

        for line in report.lines() {
            if line.starts_with(':') || line.trim().is_empty() {
                continue;
            }
            let entry = match classify_line(line)? {
                ClassifiedLine::Entry(entry) => entry,
                ClassifiedLine::Header(_) | ClassifiedLine::Blank => continue,
            };

            let cnid = entry.cnid().clone();
            if facts.contains_key(&cnid) {
                return Err(Error::DuplicateCatalogId {
                    cnid: cnid.to_string(),
                    line: line.trim().to_string(),
                });
            }
            facts.insert(
                cnid,
                ModTimeFact {
                    raw_date: entry.raw_date().to_string(),
                    raw_name: entry.raw_name().to_string(),
                },
            );
        }

        debug!("Indexed {} modification entries", facts.len());
        Ok(Self { facts })
    }

    /// Looks up a catalog ID.
    pub fn get(&self, cnid: &CatalogId) -> Option<&ModTimeFact> {
        self.facts.get(cnid)
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// True when the listing held no entries.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
