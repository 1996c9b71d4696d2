//! FileObject - represents one fork of an HFS file or a directory in DFXML.
//!
//! An HFS file produces one FileObject for its data fork and, when it has
//! resource data, a second one for the resource fork that points back at the
//! data fork through `parent_object`.

use crate::objects::common::{ForeignElements, Hashes, Timestamp, TimestampName};

/// File system name type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameType {
    /// Regular file
    Regular,
    /// Directory
    Directory,
    /// Unknown type (unexpected entry-type flag, or a resource fork)
    Unknown,
}

impl NameType {
    /// Returns the single-character string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NameType::Regular => "r",
            NameType::Directory => "d",
            NameType::Unknown => "-",
        }
    }
}

/// Represents a file object in DFXML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileObject {
    /// Inode of the object this one belongs to (data fork of a resource fork)
    pub parent_object: Option<u64>,
    /// File path/name
    pub filename: Option<String>,
    /// Error message if processing failed
    pub error: Option<String>,
    /// Name type (file, directory, unknown)
    pub name_type: Option<NameType>,
    /// Logical fork size in bytes
    pub filesize: Option<u64>,
    /// Allocation status
    pub alloc: Option<bool>,
    /// Inode number (HFS catalog node ID)
    pub inode: Option<u64>,

    /// Modification time
    pub mtime: Option<Timestamp>,
    /// Creation time
    pub crtime: Option<Timestamp>,

    /// File type from libmagic
    pub libmagic: Option<String>,
    /// Cryptographic hashes of fork content
    pub hashes: Hashes,

    /// Elements in other namespaces (HFS type/creator, flags, ...)
    pub externals: ForeignElements,
}

impl FileObject {
    /// Creates a new empty FileObject.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a FileObject with a filename.
    pub fn with_filename(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Default::default()
        }
    }

    /// Stores a timestamp in the slot its name selects.
    pub fn set_timestamp(&mut self, ts: Timestamp) {
        match ts.name {
            TimestampName::Mtime => self.mtime = Some(ts),
            TimestampName::Crtime => self.crtime = Some(ts),
        }
    }

    /// Gets a timestamp by name.
    pub fn get_timestamp(&self, name: TimestampName) -> Option<&Timestamp> {
        match name {
            TimestampName::Mtime => self.mtime.as_ref(),
            TimestampName::Crtime => self.crtime.as_ref(),
        }
    }

    /// Returns true for a resource-fork record (one that has a parent object).
    pub fn is_resource_fork(&self) -> bool {
        self.parent_object.is_some()
    }
}
