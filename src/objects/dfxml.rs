//! DFXMLObject - the root document container for DFXML.
//!
//! Holds document metadata (version, Dublin Core entries, creator info),
//! the source image names, registered namespaces and the volumes.

use crate::objects::common::{DFXML_VERSION, XMLNS_DC, XMLNS_DFXML};
use crate::objects::fileobject::FileObject;
use crate::objects::volume::VolumeObject;
use std::collections::BTreeMap;

/// Information about a library used to create the DFXML.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LibraryObject {
    /// Library name
    pub name: String,
    /// Library version
    pub version: String,
}

impl LibraryObject {
    /// Creates a new LibraryObject with name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The root DFXML document object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DFXMLObject {
    // === Document Metadata ===
    /// DFXML schema version
    pub version: String,
    /// Program that created this DFXML
    pub program: Option<String>,
    /// Version of the creating program
    pub program_version: Option<String>,
    /// Command line used to create this DFXML
    pub command_line: Option<String>,

    // === Sources ===
    /// Source image filenames (basenames)
    pub sources: Vec<String>,

    /// Libraries used to create this DFXML
    creator_libraries: Vec<LibraryObject>,

    /// Dublin Core metadata elements (local name -> value)
    pub dc: BTreeMap<String, String>,

    /// XML namespaces (prefix -> URI)
    namespaces: BTreeMap<String, String>,

    /// Volumes directly attached to this document
    volumes: Vec<VolumeObject>,
}

impl DFXMLObject {
    /// Creates a new DFXMLObject with the DFXML and Dublin Core namespaces.
    pub fn new() -> Self {
        let mut obj = Self {
            version: DFXML_VERSION.to_string(),
            ..Default::default()
        };

        obj.add_namespace("", XMLNS_DFXML);
        obj.add_namespace("dc", XMLNS_DC);

        obj
    }

    /// Creates a DFXMLObject with a specific version.
    pub fn with_version(version: impl Into<String>) -> Self {
        let mut obj = Self::new();
        obj.version = version.into();
        obj
    }

    /// Adds a namespace to the document.
    ///
    /// If the prefix already exists, the existing mapping is preserved.
    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.namespaces
            .entry(prefix.into())
            .or_insert_with(|| uri.into());
    }

    /// Returns an iterator over namespaces (prefix, uri), ordered by prefix.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the prefix registered for a namespace URI.
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|(_, v)| v.as_str() == uri)
            .map(|(k, _)| k.as_str())
    }

    /// Adds a creator library.
    pub fn add_creator_library(&mut self, library: LibraryObject) {
        self.creator_libraries.push(library);
    }

    /// Returns an iterator over creator libraries.
    pub fn creator_libraries(&self) -> impl Iterator<Item = &LibraryObject> {
        self.creator_libraries.iter()
    }

    /// Appends a volume to the document.
    pub fn append_volume(&mut self, volume: VolumeObject) {
        self.volumes.push(volume);
    }

    /// Returns an iterator over volumes.
    pub fn volumes(&self) -> impl Iterator<Item = &VolumeObject> {
        self.volumes.iter()
    }

    /// Returns the number of volumes.
    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    /// Returns an iterator over all files in all volumes.
    pub fn iter_files(&self) -> impl Iterator<Item = &FileObject> {
        self.volumes.iter().flat_map(|v| v.files())
    }
}
