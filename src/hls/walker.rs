//! Walks the creation-ordered listing and merges in modification facts.
//!
//! The creation listing is split into sections on blank lines. The first
//! section lists the volume root; every later section starts with a
//! `:path:` header naming the directory it lists.

use crate::content::{ContentDescriptor, ContentSource};
use crate::error::{Error, Result};
use crate::hls::classify::{classify_line, directory_header, CatalogEntry, ClassifiedLine};
use crate::hls::date::{DateNormalizer, HfsDate};
use crate::hls::modtime::ModTimeIndex;
use log::{debug, warn};

/// HFS path separator.
pub const HFS_SEPARATOR: char = ':';

/// One catalog entry with everything known about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    /// The creation listing entry
    pub entry: CatalogEntry,
    /// Classic HFS path (`:dir:name`)
    pub path: String,
    /// Creation date, absent for the epoch sentinel
    pub crtime: Option<HfsDate>,
    /// Modification date, absent for the epoch sentinel
    pub mtime: Option<HfsDate>,
    /// Data fork content facts, when resolved
    pub content: Option<ContentDescriptor>,
    /// Why content could not be resolved
    pub content_error: Option<String>,
}

/// Joins a directory path and an entry name into a classic HFS path.
pub fn join_hfs_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        format!("{}{}", HFS_SEPARATOR, name)
    } else {
        format!("{}{}{}{}", HFS_SEPARATOR, dir, HFS_SEPARATOR, name)
    }
}

/// Splits a report into non-empty sections separated by blank lines.
fn split_sections(report: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();

    for line in report.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Creation-listing walker.
pub struct CreationWalker<'a> {
    index: &'a ModTimeIndex,
    dates: &'a DateNormalizer,
}

impl<'a> CreationWalker<'a> {
    /// Creates a walker over an already-built modification index.
    pub fn new(index: &'a ModTimeIndex, dates: &'a DateNormalizer) -> Self {
        Self { index, dates }
    }

    /// Walks the creation listing, returning records in listing order.
    ///
    /// When `content` is given, data forks with a non-zero size are
    /// resolved through it. A failed resolution is recorded on the record
    /// and does not stop the walk.
    pub fn walk(
        &self,
        report: &str,
        mut content: Option<&mut dyn ContentSource>,
    ) -> Result<Vec<MergedRecord>> {
        let mut records = Vec::new();

        for (number, section) in split_sections(report).into_iter().enumerate() {
            let (dir, entries) = if number == 0 {
                match section.first() {
                    Some(first) if first.trim_start().starts_with(HFS_SEPARATOR) => {
                        debug!("Skipping root section header |{}|", first.trim());
                        (String::new(), &section[1..])
                    }
                    _ => (String::new(), &section[..]),
                }
            } else {
                let first = section[0];
                let dir = directory_header(first)
                    .ok_or_else(|| Error::MissingDirectoryHeader(first.trim().to_string()))?;
                debug!("Entering directory :{}:", dir);
                (dir, &section[1..])
            };

            for line in entries {
                let mut record = self.merge_line(line, &dir)?;

                if let (Some(source), CatalogEntry::File(file)) =
                    (content.as_deref_mut(), &record.entry)
                {
                    if file.data_size > 0 {
                        match source.resolve(&record.path) {
                            Ok(descriptor) => record.content = Some(descriptor),
                            Err(e) => {
                                warn!("Could not read content of {}: {}", record.path, e);
                                record.content_error = Some(e.to_string());
                            }
                        }
                    }
                }
                records.push(record);
            }
        }

        debug!("Walked {} catalog entries", records.len());
        Ok(records)
    }

    fn merge_line(&self, line: &str, dir: &str) -> Result<MergedRecord> {
        let entry = match classify_line(line)? {
            ClassifiedLine::Entry(entry) => entry,
            ClassifiedLine::Header(_) | ClassifiedLine::Blank => {
                return Err(Error::UnrecognizedLine(line.trim().to_string()))
            }
        };

        let fact = self
            .index
            .get(entry.cnid())
            .ok_or_else(|| Error::MissingCatalogId {
                cnid: entry.cnid().to_string(),
                line: line.trim().to_string(),
            })?;
        if fact.raw_name != entry.raw_name() {
            return Err(Error::NameMismatch {
                cnid: entry.cnid().to_string(),
                modification: fact.raw_name.clone(),
                creation: entry.raw_name().to_string(),
            });
        }

        let crtime = self.dates.normalize(entry.raw_date())?;
        let mtime = self.dates.normalize(&fact.raw_date)?;
        let path = join_hfs_path(dir, entry.display_name());

        Ok(MergedRecord {
            entry,
            path,
            crtime,
            mtime,
            content: None,
            content_error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::fixtures;
    use crate::hls::classify::EntryKind;
    use crate::objects::NameType;
    use crate::record::{build_records, PathDelimiter};
    use std::collections::HashMap;

    struct FakeContent {
        requested: Vec<String>,
        failing: Option<String>,
    }

    impl ContentSource for FakeContent {
        fn resolve(&mut self, hfs_path: &str) -> Result<ContentDescriptor> {
            self.requested.push(hfs_path.to_string());
            if self.failing.as_deref() == Some(hfs_path) {
                return Err(Error::tool(format!("hcopy -r {} -", hfs_path), "no such file"));
            }
            Ok(ContentDescriptor {
                libmagic: "ASCII text".to_string(),
                md5: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
                sha1: "da39a3ee5e6b4b0d3255bfef95601890afd80709".to_string(),
            })
        }
    }

    fn walk(creation: &str, modification: &str) -> Result<Vec<MergedRecord>> {
        let index = ModTimeIndex::build(modification)?;
        let dates = DateNormalizer::new(2024);
        CreationWalker::new(&index, &dates).walk(creation, None)
    }

    #[test]
    fn test_walk_fixture_paths_and_order() {
        let records = walk(fixtures::CREATION, fixtures::MODIFICATION).unwrap();
        assert_eq!(records.len(), fixtures::ENTRY_COUNT);

        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![":Docs", ":ReadMe", ":Docs:Hello.txt", ":Docs:Tool"]
        );
    }

    #[test]
    fn test_walk_merges_modification_dates() {
        let records = walk(fixtures::CREATION, fixtures::MODIFICATION).unwrap();
        let by_path: HashMap<_, _> = records.iter().map(|r| (r.path.as_str(), r)).collect();

        let tool = by_path[":Docs:Tool"];
        assert_eq!(tool.crtime.unwrap().value.to_string(), "1999-02-14 00:00:00");
        assert_eq!(tool.mtime.unwrap().value.to_string(), "1999-02-20 00:00:00");

        let readme = by_path[":ReadMe"];
        assert!(readme.crtime.is_none());
        assert!(readme.mtime.is_none());
    }

    #[test]
    fn test_missing_catalog_id_is_desync() {
        let modification = "16 d     2 items Apr  1 1998 \"Docs\":\n";
        let err = walk(fixtures::CREATION, modification).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Desync);
        assert!(matches!(err, Error::MissingCatalogId { .. }));
    }

    #[test]
    fn test_name_mismatch_is_desync() {
        let modification = fixtures::MODIFICATION.replace("\"Tool\"", "\"Tool2\"");
        let err = walk(fixtures::CREATION, &modification).unwrap_err();
        match err {
            Error::NameMismatch {
                cnid,
                modification,
                creation,
            } => {
                assert_eq!(cnid, "13");
                assert_eq!(modification, "\"Tool2\"");
                assert_eq!(creation, "\"Tool\"");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_header_is_structural() {
        let creation = concat!(
            "16 d     2 items Mar  3 1998 \"Docs\":\n",
            "\n",
            "12 f____ ____/____ 0000 0042 Jan  5 2001 \"Hello.txt\"\n",
        );
        let err = walk(creation, fixtures::MODIFICATION).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Structural);
    }

    #[test]
    fn test_root_header_and_extra_blank_lines_tolerated() {
        let creation = format!(":Volume:\n{}\n\n", fixtures::CREATION.replace("\n\n", "\n\n\n"));
        let records = walk(&creation, fixtures::MODIFICATION).unwrap();
        assert_eq!(records.len(), fixtures::ENTRY_COUNT);
    }

    #[test]
    fn test_content_resolution_and_failure() {
        let index = ModTimeIndex::build(fixtures::MODIFICATION).unwrap();
        let dates = DateNormalizer::new(2024);
        let mut source = FakeContent {
            requested: Vec::new(),
            failing: Some(":Docs:Tool".to_string()),
        };

        let records = CreationWalker::new(&index, &dates)
            .walk(fixtures::CREATION, Some(&mut source))
            .unwrap();

        assert_eq!(
            source.requested,
            vec![":ReadMe", ":Docs:Hello.txt", ":Docs:Tool"]
        );
        assert!(records[0].content.is_none());
        assert_eq!(records[2].content.as_ref().unwrap().libmagic, "ASCII text");
        assert!(records[3].content.is_none());
        assert!(records[3]
            .content_error
            .as_deref()
            .unwrap()
            .contains("no such file"));
    }

    #[test]
    fn test_nested_unknown_flag_entry() {
        let listing = concat!(
            "16 d     1 item Mar  3 1998 \"Docs\":\n",
            "\n",
            ":Docs:\n",
            "17 d     1 item Mar  4 1998 \"Sub\":\n",
            "\n",
            ":Docs:Sub:\n",
            "30 x     ABCD/EFGH     10       5 Jun  1 2000 \"Odd\"\n",
        );
        let records = walk(listing, listing).unwrap();
        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec![":Docs", ":Docs:Sub", ":Docs:Sub:Odd"]);

        let odd = &records[2];
        assert_eq!(odd.entry.flags().kind, EntryKind::Unknown);
        assert!(!odd.entry.flags().locked);

        let forks = build_records(odd, PathDelimiter::Companion).unwrap();
        assert_eq!(forks.data.filename.as_deref(), Some("Docs/Sub/Odd"));
        assert_eq!(forks.data.name_type, Some(NameType::Unknown));
        let rsrc = forks.resource.unwrap();
        assert_eq!(rsrc.filename.as_deref(), Some("Docs/Sub/._Odd"));
        assert_eq!(rsrc.name_type, Some(NameType::Unknown));
        assert_eq!(rsrc.parent_object, Some(30));
        assert_eq!(rsrc.filesize, Some(10));

        let forks = build_records(odd, PathDelimiter::Classic).unwrap();
        assert_eq!(forks.data.filename.as_deref(), Some(":Docs:Sub:Odd"));
        assert_eq!(
            forks.resource.unwrap().filename.as_deref(),
            Some(":Docs:Sub:Odd:rsrc")
        );
    }

    #[test]
    fn test_impossible_recent_date_does_not_stop_walk() {
        let listing = concat!(
            "12 f     TEXT/ttxt      0      42 Feb 29 10:00 \"Leap\"\n",
            "13 f     TEXT/ttxt      0      42 Mar  1 10:00 \"After\"\n",
        );
        let index = ModTimeIndex::build(listing).unwrap();
        let dates = DateNormalizer::new(2025);
        let records = CreationWalker::new(&index, &dates).walk(listing, None).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].crtime.is_none());
        assert!(records[0].mtime.is_none());
        assert_eq!(
            records[1].crtime.unwrap().value.to_string(),
            "2025-03-01 10:00:00"
        );
    }

    #[test]
    fn test_join_hfs_path() {
        assert_eq!(join_hfs_path("", "Hello.txt"), ":Hello.txt");
        assert_eq!(join_hfs_path("Docs:Sub", "x"), ":Docs:Sub:x");
    }
}
