//! Classification of single `hls -1ilQRUFN` output lines.
//!
//! Each line is one of: a file entry, a directory entry, a directory header
//! opening a recursive section (`:path:`), or blank.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref FILE_LINE: Regex = Regex::new(
        r#"^(\d+)\s+(\w+)\s+(.{4}/.{4})\s+(\d+)\s+(\d+)\s+(\w{3}\s{1,2}\d{1,2}\s{1,2}\d{2}:?\d{2})\s(".*")(\**)$"#
    )
    .unwrap();
    static ref DIR_LINE: Regex = Regex::new(
        r#"^(\d+)\s+(\w+)\s+(\d+)\sitems?\s+(\w{3}\s{1,2}\d{1,2}\s{1,2}\d{2}:?\d{2})\s(".*"):$"#
    )
    .unwrap();
    static ref DIR_HEADER: Regex = Regex::new(r"^:(.*):$").unwrap();
}

/// Type/creator values hls prints when a file has none.
const TYPE_CREATOR_PLACEHOLDERS: [&str; 3] = ["    /    ", "????/????", "____/____"];

/// HFS catalog node ID, kept as the listing's token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogId(String);

impl CatalogId {
    /// Wraps a catalog ID token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value used as the DFXML inode.
    pub fn to_inode(&self) -> Result<u64> {
        Ok(self.0.parse()?)
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of catalog entry implied by the entry-type flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `f` / `F`
    File,
    /// `d` / `D`
    Directory,
    /// Any other leading character
    Unknown,
}

/// Decoded entry-type token (e.g. `f`, `Fi`, `d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFlags {
    /// Kind from the first character
    pub kind: EntryKind,
    /// Upper-case first character
    pub locked: bool,
    /// Token ends in `i`
    pub invisible: bool,
}

impl EntryFlags {
    /// Decodes a flag token; `expected` is the letter this grammar uses.
    fn from_token(token: &str, expected: char) -> Self {
        let first = token.chars().next();
        let (kind, locked) = match first {
            Some(c) if c == expected => (EntryKind::for_letter(expected), false),
            Some(c) if c == expected.to_ascii_uppercase() => (EntryKind::for_letter(expected), true),
            _ => (EntryKind::Unknown, false),
        };
        Self {
            kind,
            locked,
            invisible: token.ends_with('i'),
        }
    }
}

impl EntryKind {
    fn for_letter(letter: char) -> Self {
        match letter {
            'f' => EntryKind::File,
            'd' => EntryKind::Directory,
            _ => EntryKind::Unknown,
        }
    }
}

/// A file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Catalog node ID
    pub cnid: CatalogId,
    /// Entry-type flags
    pub flags: EntryFlags,
    /// `TYPE/CRTR`, absent when hls printed a placeholder
    pub type_creator: Option<String>,
    /// Resource fork size in bytes
    pub rsrc_size: u64,
    /// Data fork size in bytes
    pub data_size: u64,
    /// Date column as printed
    pub raw_date: String,
    /// Quoted, escaped name as printed
    pub raw_name: String,
    /// Trailing `*` (application)
    pub application: bool,
}

/// A directory line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Catalog node ID
    pub cnid: CatalogId,
    /// Entry-type flags
    pub flags: EntryFlags,
    /// Number of items the directory holds
    pub item_count: u32,
    /// Date column as printed
    pub raw_date: String,
    /// Quoted, escaped name as printed
    pub raw_name: String,
}

/// A file or directory line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    /// File entry
    File(FileEntry),
    /// Directory entry
    Directory(DirEntry),
}

impl CatalogEntry {
    /// Catalog node ID.
    pub fn cnid(&self) -> &CatalogId {
        match self {
            CatalogEntry::File(f) => &f.cnid,
            CatalogEntry::Directory(d) => &d.cnid,
        }
    }

    /// Entry-type flags.
    pub fn flags(&self) -> EntryFlags {
        match self {
            CatalogEntry::File(f) => f.flags,
            CatalogEntry::Directory(d) => d.flags,
        }
    }

    /// Date column as printed.
    pub fn raw_date(&self) -> &str {
        match self {
            CatalogEntry::File(f) => &f.raw_date,
            CatalogEntry::Directory(d) => &d.raw_date,
        }
    }

    /// Name exactly as printed, quotes included.
    pub fn raw_name(&self) -> &str {
        match self {
            CatalogEntry::File(f) => &f.raw_name,
            CatalogEntry::Directory(d) => &d.raw_name,
        }
    }

    /// Name with the surrounding quotes removed.
    pub fn display_name(&self) -> &str {
        self.raw_name().trim_matches('"')
    }
}

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// File or directory entry
    Entry(CatalogEntry),
    /// Section header; holds the path between the outer colons
    Header(String),
    /// Empty or whitespace-only line
    Blank,
}

/// Returns the directory path of a `:path:` section header.
pub fn directory_header(line: &str) -> Option<String> {
    DIR_HEADER
        .captures(line.trim())
        .map(|caps| caps[1].to_string())
}

/// Classifies one line of hls output.
///
/// A line matching neither or both entry grammars is an error.
pub fn classify_line(line: &str) -> Result<ClassifiedLine> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ClassifiedLine::Blank);
    }
    if line.starts_with(':') {
        return directory_header(line)
            .map(ClassifiedLine::Header)
            .ok_or_else(|| Error::UnrecognizedLine(line.to_string()));
    }

    let file = FILE_LINE.captures(line);
    let dir = DIR_LINE.captures(line);

    match (file, dir) {
        (Some(caps), None) => {
            let type_creator = &caps[3];
            let type_creator = if TYPE_CREATOR_PLACEHOLDERS.contains(&type_creator) {
                None
            } else {
                Some(type_creator.to_string())
            };
            Ok(ClassifiedLine::Entry(CatalogEntry::File(FileEntry {
                cnid: CatalogId::new(&caps[1]),
                flags: EntryFlags::from_token(&caps[2], 'f'),
                type_creator,
                rsrc_size: caps[4].parse()?,
                data_size: caps[5].parse()?,
                raw_date: caps[6].to_string(),
                raw_name: caps[7].to_string(),
                application: !caps[8].is_empty(),
            })))
        }
        (None, Some(caps)) => Ok(ClassifiedLine::Entry(CatalogEntry::Directory(DirEntry {
            cnid: CatalogId::new(&caps[1]),
            flags: EntryFlags::from_token(&caps[2], 'd'),
            item_count: caps[3].parse()?,
            raw_date: caps[4].to_string(),
            raw_name: caps[5].to_string(),
        }))),
        (Some(_), Some(_)) => Err(Error::AmbiguousLine(line.to_string())),
        (None, None) => Err(Error::UnrecognizedLine(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn file(line: &str) -> FileEntry {
        match classify_line(line).unwrap() {
            ClassifiedLine::Entry(CatalogEntry::File(f)) => f,
            other => panic!("expected file entry, got {:?}", other),
        }
    }

    fn dir(line: &str) -> DirEntry {
        match classify_line(line).unwrap() {
            ClassifiedLine::Entry(CatalogEntry::Directory(d)) => d,
            other => panic!("expected directory entry, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_file_line() {
        let f = file(r#"13 Fi    APPL/CARO    512     100 Feb 14 1999 "Tool"*"#);
        assert_eq!(f.cnid.as_str(), "13");
        assert_eq!(f.flags.kind, EntryKind::File);
        assert!(f.flags.locked);
        assert!(f.flags.invisible);
        assert_eq!(f.type_creator.as_deref(), Some("APPL/CARO"));
        assert_eq!(f.rsrc_size, 512);
        assert_eq!(f.data_size, 100);
        assert_eq!(f.raw_date, "Feb 14 1999");
        assert_eq!(f.raw_name, "\"Tool\"");
        assert!(f.application);
    }

    #[test]
    fn test_classify_padded_day_and_placeholder() {
        let f = file(r#"20 f     ????/????      0       0 Jan  1 1904 "Empty""#);
        assert_eq!(f.raw_date, "Jan  1 1904");
        assert!(f.type_creator.is_none());
        assert!(!f.flags.locked);
        assert!(!f.application);

        let f = file(r#"21 f         /         0       0 Jan  1 1904 "Blank""#);
        assert!(f.type_creator.is_none());
    }

    #[test]
    fn test_classify_recent_time_column() {
        let f = file(r#"30 f     TEXT/ttxt      0      10 Mar  4 12:30 "Recent""#);
        assert_eq!(f.raw_date, "Mar  4 12:30");
    }

    #[test]
    fn test_classify_directory_line() {
        let d = dir(r#"16 D     1 item  Mar  3 1998 "Docs":"#);
        assert_eq!(d.cnid.as_str(), "16");
        assert_eq!(d.flags.kind, EntryKind::Directory);
        assert!(d.flags.locked);
        assert_eq!(d.item_count, 1);
        assert_eq!(d.raw_name, "\"Docs\"");

        let d = dir(r#"17 di    12 items Mar  3 1998 "Hidden":"#);
        assert!(d.flags.invisible);
        assert_eq!(d.item_count, 12);
    }

    #[test]
    fn test_unknown_entry_type_is_tolerated() {
        let f = file(r#"40 x     TEXT/ttxt      0       5 Jan  5 2001 "Odd""#);
        assert_eq!(f.flags.kind, EntryKind::Unknown);
        assert!(!f.flags.locked);

        let d = dir(r#"41 q     0 items Jan  5 2001 "OddDir":"#);
        assert_eq!(d.flags.kind, EntryKind::Unknown);
    }

    #[test]
    fn test_classify_header_and_blank() {
        assert_eq!(
            classify_line(":Docs:Sub:").unwrap(),
            ClassifiedLine::Header("Docs:Sub".to_string())
        );
        assert_eq!(classify_line("   ").unwrap(), ClassifiedLine::Blank);
        assert_eq!(directory_header(":Docs:"), Some("Docs".to_string()));
        assert_eq!(directory_header("12 f ..."), None);
    }

    #[test]
    fn test_unrecognized_line_is_grammar_error() {
        let err = classify_line("total 12 blocks").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Grammar);
        assert!(err.to_string().contains("total 12 blocks"));
    }

    #[test]
    fn test_display_name_strips_quotes() {
        let f = file(r#"12 f____ ____/____ 0000 0042 Jan  5 2001 "Hello.txt""#);
        let entry = CatalogEntry::File(f);
        assert_eq!(entry.display_name(), "Hello.txt");
        assert_eq!(entry.raw_name(), "\"Hello.txt\"");
        assert_eq!(entry.cnid().to_inode().unwrap(), 12);
    }
}
