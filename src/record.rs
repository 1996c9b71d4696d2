//! Builds DFXML file objects from merged catalog entries.
//!
//! Every entry yields a data-fork object. A file with resource data also
//! yields a resource-fork object named according to the chosen
//! [`PathDelimiter`].

use crate::error::{Error, Result};
use crate::hls::{CatalogEntry, EntryKind, MergedRecord, HFS_SEPARATOR};
use crate::objects::{FileObject, ForeignElement, HashType, NameType, TimestampName};
use std::fmt;
use std::str::FromStr;

/// How paths and resource-fork names are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PathDelimiter {
    /// `:Docs:Tool`, resource fork `:Docs:Tool:rsrc`
    #[default]
    Classic,
    /// `Docs/Tool`, resource fork `Docs/Tool/rsrc`
    Macosx,
    /// `Docs/Tool`, resource fork `Docs/Tool/..namedfork/rsrc`
    Osx,
    /// `Docs/Tool`, resource fork `Docs/._Tool` (AppleDouble sibling)
    Companion,
}

impl PathDelimiter {
    /// Returns the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PathDelimiter::Classic => "classic",
            PathDelimiter::Macosx => "macosx",
            PathDelimiter::Osx => "osx",
            PathDelimiter::Companion => "companion",
        }
    }

    /// Renders a classic `:dir:name` path in this mode.
    pub fn render_path(&self, classic: &str) -> String {
        match self {
            PathDelimiter::Classic => classic.to_string(),
            _ => classic
                .replace(HFS_SEPARATOR, "/")
                .trim_start_matches('/')
                .to_string(),
        }
    }

    /// Names the resource fork of a data fork already rendered in this mode.
    pub fn resource_fork_name(&self, data_name: &str) -> String {
        match self {
            PathDelimiter::Classic => format!("{}:rsrc", data_name),
            PathDelimiter::Macosx => format!("{}/rsrc", data_name),
            PathDelimiter::Osx => format!("{}/..namedfork/rsrc", data_name),
            PathDelimiter::Companion => {
                let (dir, leaf) = match data_name.rsplit_once('/') {
                    Some((dir, leaf)) => (format!("{}/", dir), leaf),
                    None => (String::new(), data_name),
                };
                format!("{}._{}", dir, leaf)
                    .trim_start_matches('/')
                    .to_string()
            }
        }
    }
}

impl FromStr for PathDelimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(PathDelimiter::Classic),
            "macosx" => Ok(PathDelimiter::Macosx),
            "osx" => Ok(PathDelimiter::Osx),
            "companion" => Ok(PathDelimiter::Companion),
            _ => Err(Error::InvalidDelimiter(s.to_string())),
        }
    }
}

impl fmt::Display for PathDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The objects built for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkRecords {
    /// Data fork (or directory)
    pub data: FileObject,
    /// Resource fork, when the file has resource data
    pub resource: Option<FileObject>,
}

impl ForkRecords {
    /// Iterates the data fork then the resource fork.
    pub fn into_objects(self) -> impl Iterator<Item = FileObject> {
        std::iter::once(self.data).chain(self.resource)
    }
}

fn name_type(kind: EntryKind) -> NameType {
    match kind {
        EntryKind::File => NameType::Regular,
        EntryKind::Directory => NameType::Directory,
        EntryKind::Unknown => NameType::Unknown,
    }
}

/// Builds the data-fork object and, if needed, the resource-fork object.
pub fn build_records(record: &MergedRecord, delimiter: PathDelimiter) -> Result<ForkRecords> {
    let inode = record.entry.cnid().to_inode()?;
    let flags = record.entry.flags();

    let mut data = FileObject::with_filename(delimiter.render_path(&record.path));
    data.inode = Some(inode);
    data.alloc = Some(true);
    data.name_type = Some(name_type(flags.kind));
    if let Some(crtime) = &record.crtime {
        data.set_timestamp(crtime.to_timestamp(TimestampName::Crtime));
    }
    if let Some(mtime) = &record.mtime {
        data.set_timestamp(mtime.to_timestamp(TimestampName::Mtime));
    }

    let mut rsrc_size = 0;
    if let CatalogEntry::File(file) = &record.entry {
        data.filesize = Some(file.data_size);
        rsrc_size = file.rsrc_size;
        if let Some(code) = &file.type_creator {
            data.externals
                .try_push(ForeignElement::hfs("HFStype_creator", code.as_str()))?;
        }
        if rsrc_size > 0 {
            data.externals
                .try_push(ForeignElement::hfs("HFSrsrcsize", rsrc_size.to_string()))?;
        }
    }
    if flags.locked {
        data.externals.try_push(ForeignElement::hfs("HFSlocked", "1"))?;
    }
    if flags.invisible {
        data.externals.try_push(ForeignElement::hfs("HFSflags", "i"))?;
    }

    if let Some(content) = &record.content {
        data.libmagic = Some(content.libmagic.clone());
        data.hashes.set(HashType::Md5, content.md5.clone());
        data.hashes.set(HashType::Sha1, content.sha1.clone());
    }
    data.error = record.content_error.clone();

    let resource = (rsrc_size > 0).then(|| {
        let filename = data
            .filename
            .as_deref()
            .map(|name| delimiter.resource_fork_name(name));
        FileObject {
            parent_object: Some(inode),
            filename,
            name_type: Some(match delimiter {
                PathDelimiter::Companion => name_type(flags.kind),
                _ => NameType::Unknown,
            }),
            filesize: Some(rsrc_size),
            alloc: Some(true),
            inode: Some(inode),
            ..Default::default()
        }
    });

    Ok(ForkRecords { data, resource })
}
