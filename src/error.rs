//! Error types for HFS listing conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classes of failure, used to decide what is recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The creation and modification listings disagree
    Desync,
    /// A listing line matched neither or both entry grammars
    Grammar,
    /// Listing sections are not laid out as expected
    Structural,
    /// An external hfsutils or probe command failed
    Tool,
    /// Anything else (I/O, XML, bad arguments)
    Other,
}

/// Errors that can occur while converting an HFS volume.
#[derive(Error, Debug)]
pub enum Error {
    /// Line matched neither the file nor the directory grammar
    #[error("Unrecognized listing line: |{0}|")]
    UnrecognizedLine(String),

    /// Line matched both the file and the directory grammar
    #[error("Ambiguous listing line (matches file and directory formats): |{0}|")]
    AmbiguousLine(String),

    /// Catalog ID listed twice in the modification listing
    #[error("Duplicate catalog ID {cnid} in modification listing: |{line}|")]
    DuplicateCatalogId {
        /// The repeated catalog ID
        cnid: String,
        /// The second line carrying it
        line: String,
    },

    /// Catalog ID from the creation listing is absent from the modification listing
    #[error("Catalog ID {cnid} missing from modification listing: |{line}|")]
    MissingCatalogId {
        /// The catalog ID that could not be found
        cnid: String,
        /// The creation listing line that referenced it
        line: String,
    },

    /// Both listings carry the catalog ID but under different names
    #[error("Catalog ID/name mismatch for {cnid}: |{modification}|{creation}|")]
    NameMismatch {
        /// The catalog ID
        cnid: String,
        /// Name in the modification listing
        modification: String,
        /// Name in the creation listing
        creation: String,
    },

    /// First line of a listing section is not a directory header
    #[error("Directory header not found on first line of section: |{0}|")]
    MissingDirectoryHeader(String),

    /// Listing date could not be parsed
    #[error("Invalid listing date: {0}")]
    InvalidDate(String),

    /// External command failed or could not be started
    #[error("{command} failed: {detail}")]
    Tool {
        /// Command line that was run
        command: String,
        /// Captured output or OS error
        detail: String,
    },

    /// Unknown path delimiter mode
    #[error("Invalid path delimiter: {0} (expected classic, macosx, osx or companion)")]
    InvalidDelimiter(String),

    /// Foreign element placed in the DFXML namespace
    #[error("Invalid foreign element: {0}")]
    InvalidForeignElement(String),

    /// Output file already exists
    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),

    /// HFS image not found
    #[error("HFS volume not found: {0}")]
    ImageNotFound(PathBuf),

    /// XML writing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Integer parsing error
    #[error("Integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl Error {
    /// Creates a tool failure for the given command line.
    pub fn tool(command: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::Tool {
            command: command.into(),
            detail: detail.into(),
        }
    }

    /// Returns the failure class of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::DuplicateCatalogId { .. }
            | Error::MissingCatalogId { .. }
            | Error::NameMismatch { .. } => ErrorCategory::Desync,
            Error::UnrecognizedLine(_) | Error::AmbiguousLine(_) => ErrorCategory::Grammar,
            Error::MissingDirectoryHeader(_) => ErrorCategory::Structural,
            Error::Tool { .. } => ErrorCategory::Tool,
            _ => ErrorCategory::Other,
        }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = Error::NameMismatch {
            cnid: "12".to_string(),
            modification: "\"a\"".to_string(),
            creation: "\"b\"".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Desync);
        assert_eq!(
            Error::AmbiguousLine("x".to_string()).category(),
            ErrorCategory::Grammar
        );
        assert_eq!(Error::tool("hmount", "boom").category(), ErrorCategory::Tool);
    }

    #[test]
    fn test_error_message_carries_line() {
        let err = Error::UnrecognizedLine("garbage here".to_string());
        assert!(err.to_string().contains("|garbage here|"));
    }
}
