//! Convert classic Mac HFS volumes to Digital Forensics XML (DFXML).
//!
//! The volume is read through the hfsutils command-line tools: it is mounted
//! with `hmount`, listed twice with `hls` (sorted by creation and by
//! modification date), and optionally copied file by file with `hcopy` so
//! data forks can be hashed and typed. The two listings are merged by catalog
//! node ID into one record per file or directory, and each file's resource
//! fork gets a record of its own.
//!
//! # Features
//!
//! - **Listing parser**: Line grammar, date handling and cross-checks between
//!   the two listings ([`hls`]).
//! - **Path conventions**: Classic `:` paths or one of three `/`-separated
//!   resource-fork conventions ([`record::PathDelimiter`]).
//! - **Writer**: DFXML output with HFS extension elements ([`writer`]).
//! - **Serde Support**: Optional serialization of the object model with the
//!   `serde` feature.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hfs2dfxml::config::ConvertConfig;
//! use hfs2dfxml::document::convert_image;
//! use hfs2dfxml::writer;
//! use std::path::Path;
//!
//! let config = ConvertConfig::new();
//! let dfxml = convert_image(Path::new("floppy.hfs"), &config).unwrap();
//!
//! for file in dfxml.iter_files() {
//!     println!("File: {:?}, Size: {:?}", file.filename, file.filesize);
//! }
//! println!("{}", writer::to_string(&dfxml).unwrap());
//! ```
//!
//! # Replaying Saved Listings
//!
//! Listings captured earlier (for instance with `--debug-dump`) can be
//! converted without hfsutils:
//!
//! ```rust
//! use hfs2dfxml::assembler::VolumeAssembler;
//! use hfs2dfxml::document::hfs2dfxml;
//! use hfs2dfxml::probe::FileCommand;
//! use hfs2dfxml::toolkit::ReplayToolkit;
//! use std::path::Path;
//!
//! let listing = "12 f     TEXT/ttxt      0      42 Jan  5 2001 \"Hello.txt\"\n";
//! let mut assembler = VolumeAssembler::new(ReplayToolkit::new(listing, None), FileCommand::default())
//!     .with_content_resolution(false);
//! let dfxml = hfs2dfxml(Path::new("saved.hfs"), &mut assembler).unwrap();
//! assert_eq!(dfxml.iter_files().count(), 1);
//! ```
//!
//! # Module Structure
//!
//! - [`objects`] - DFXML data structures
//! - [`hls`] - Listing parsing and merging
//! - [`record`] - Catalog entries to file objects
//! - [`toolkit`] - hfsutils access
//! - [`probe`] - File type probing and volume geometry
//! - [`content`] - Data fork hashing
//! - [`assembler`] - Volume assembly
//! - [`document`] - Document assembly and output
//! - [`writer`] - XML serialization
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` - Enable serde serialization/deserialization support
//! - `cli` - Build the `hfs2dfxml` command-line tool

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod assembler;
pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod hls;
pub mod objects;
pub mod probe;
pub mod record;
pub mod toolkit;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types at the crate root
pub use assembler::{VolumeAssembler, VolumeState};
pub use config::ConvertConfig;
pub use document::{convert_image, hfs2dfxml, write_document};
pub use error::{Error, Result};
pub use objects::{DFXMLObject, FileObject, Hashes, Timestamp, VolumeObject};
pub use record::PathDelimiter;
pub use toolkit::{HfsToolkit, HfsUtils, ReplayToolkit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
