//! DFXML object types.
//!
//! The subset of Digital Forensics XML an HFS conversion produces:
//!
//! - [`DFXMLObject`] - The root document container
//! - [`VolumeObject`] - The HFS volume
//! - [`FileObject`] - A data fork, resource fork or directory
//!
//! Also provides common types:
//! - [`Timestamp`] - Listing timestamps with precision
//! - [`Hashes`] - Content digests
//! - [`ForeignElements`] - HFS extension elements

mod common;
mod dfxml;
mod fileobject;
mod volume;

pub use common::{
    ForeignElement, ForeignElements, HashType, Hashes, Precision, TimeUnit, Timestamp,
    TimestampName, DFXML_VERSION, XMLNS_DC, XMLNS_DFXML, XMLNS_HFS,
};
pub use dfxml::{DFXMLObject, LibraryObject};
pub use fileobject::{FileObject, NameType};
pub use volume::VolumeObject;
