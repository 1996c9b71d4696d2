//! Parsing of hfsutils `hls` recursive listings.
//!
//! Two listings of the same volume are needed: one sorted by creation date
//! (`-c`) and one sorted by modification date (`-m`). hls only prints the
//! date column it sorts on, so the creation listing drives the walk and the
//! modification listing is indexed by catalog ID to supply the other date.
//!
//! - [`classify_line`] - One line to a file, directory, header or blank
//! - [`DateNormalizer`] - Date column to [`HfsDate`]
//! - [`ModTimeIndex`] - Catalog ID to modification facts
//! - [`CreationWalker`] - Produces [`MergedRecord`]s in listing order

mod classify;
mod date;
mod modtime;
mod walker;

pub use classify::{
    classify_line, directory_header, CatalogEntry, CatalogId, ClassifiedLine, DirEntry,
    EntryFlags, EntryKind, FileEntry,
};
pub use date::{is_hfs_epoch, DateNormalizer, HfsDate};
pub use modtime::{ModTimeFact, ModTimeIndex};
pub use walker::{join_hfs_path, CreationWalker, MergedRecord, HFS_SEPARATOR};
