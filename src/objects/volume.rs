//! VolumeObject - represents an HFS volume in DFXML.

use crate::objects::fileobject::FileObject;

/// Represents a file system volume in DFXML.
///
/// For HFS images the volume carries the geometry sniffed from the image,
/// the file objects built from the listings, and an error message when the
/// hfsutils calls failed (in which case it has no files).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeObject {
    /// Block/allocation size (bytes)
    pub block_size: Option<u32>,
    /// Total number of blocks
    pub block_count: Option<u64>,
    /// File system type string (always "HFS" here)
    pub ftype_str: Option<String>,
    /// Error message if volume processing failed
    pub error: Option<String>,

    /// Files contained in this volume, in listing order
    files: Vec<FileObject>,
}

impl VolumeObject {
    /// Creates a new empty VolumeObject.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a VolumeObject with a file system type string.
    pub fn with_ftype(ftype_str: impl Into<String>) -> Self {
        Self {
            ftype_str: Some(ftype_str.into()),
            ..Default::default()
        }
    }

    /// Appends a FileObject to this volume.
    pub fn append_file(&mut self, file: FileObject) {
        self.files.push(file);
    }

    /// Returns an iterator over the files in this volume.
    pub fn files(&self) -> impl Iterator<Item = &FileObject> {
        self.files.iter()
    }

    /// Returns the number of files in this volume.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_object_new() {
        let vol = VolumeObject::new();
        assert!(vol.ftype_str.is_none());
        assert_eq!(vol.file_count(), 0);
    }

    #[test]
    fn test_volume_with_files() {
        let mut vol = VolumeObject::with_ftype("HFS");
        vol.append_file(FileObject::with_filename(":Docs"));
        vol.append_file(FileObject::with_filename(":Docs:Hello.txt"));

        assert_eq!(vol.ftype_str, Some("HFS".to_string()));
        assert_eq!(vol.file_count(), 2);
        assert_eq!(
            vol.files().last().and_then(|f| f.filename.as_deref()),
            Some(":Docs:Hello.txt")
        );
    }
}
