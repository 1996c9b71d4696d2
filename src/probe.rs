//! File type probing and volume geometry.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::path::Path;
use std::process::Command;

lazy_static! {
    static ref DRIVER_MAP_GEOMETRY: Regex =
        Regex::new(r"blocksize (\d+), blockcount (\d+)").unwrap();
    static ref HFS_DATA_GEOMETRY: Regex =
        Regex::new(r"block size: (\d+), number of blocks: (\d+)").unwrap();
}

/// Describes a file's type as text, libmagic style.
pub trait TypeProbe {
    /// Returns a one-line description of the file at `path`.
    fn describe_path(&self, path: &Path) -> Result<String>;
}

/// Runs the `file` command in brief mode.
#[derive(Debug, Clone)]
pub struct FileCommand {
    program: String,
}

impl Default for FileCommand {
    fn default() -> Self {
        Self::new("file")
    }
}

impl FileCommand {
    /// Uses the given executable instead of `file`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TypeProbe for FileCommand {
    fn describe_path(&self, path: &Path) -> Result<String> {
        let command = format!("{} -b {}", self.program, path.display());
        let output = Command::new(&self.program)
            .arg("-b")
            .arg(path)
            .output()
            .map_err(|e| Error::tool(&command, e.to_string()))?;
        if !output.status.success() {
            return Err(Error::tool(
                &command,
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }
        let description = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("{} -> {}", command, description);
        Ok(description)
    }
}

/// Block size and count sniffed from an image description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeGeometry {
    /// Block size in bytes
    pub block_size: Option<u32>,
    /// Number of blocks
    pub block_count: Option<u64>,
}

impl VolumeGeometry {
    /// Extracts geometry from a `file -b` description.
    ///
    /// Partitioned images report an Apple Driver Map, bare volumes report
    /// Macintosh HFS data. Anything else yields no geometry.
    pub fn from_description(description: &str) -> Self {
        let pattern = if description.starts_with("Apple Driver Map") {
            &*DRIVER_MAP_GEOMETRY
        } else if description.starts_with("Macintosh HFS data") {
            &*HFS_DATA_GEOMETRY
        } else {
            return Self::default();
        };

        match pattern.captures(description) {
            Some(caps) => Self {
                block_size: caps[1].parse().ok(),
                block_count: caps[2].parse().ok(),
            },
            None => {
                warn!("No block geometry in image description: {}", description);
                Self::default()
            }
        }
    }

    /// True when neither value was found.
    pub fn is_unknown(&self) -> bool {
        self.block_size.is_none() && self.block_count.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hfs_data_geometry() {
        let geometry = VolumeGeometry::from_description(
            "Macintosh HFS data block size: 512, number of blocks: 1600, volume name: Untitled",
        );
        assert_eq!(geometry.block_size, Some(512));
        assert_eq!(geometry.block_count, Some(1600));
    }

    #[test]
    fn test_driver_map_geometry() {
        let geometry = VolumeGeometry::from_description(
            "Apple Driver Map, blocksize 512, blockcount 2048, devtype 0, devid 0, driver count 0",
        );
        assert_eq!(geometry.block_size, Some(512));
        assert_eq!(geometry.block_count, Some(2048));
    }

    #[test]
    fn test_unrecognized_description() {
        assert!(VolumeGeometry::from_description("data").is_unknown());
        assert!(VolumeGeometry::from_description("Macintosh HFS data, truncated").is_unknown());
        assert!(
            VolumeGeometry::from_description("ISO 9660 block size: 2048, number of blocks: 9")
                .is_unknown()
        );
    }

    #[test]
    fn test_missing_program_is_tool_error() {
        let probe = FileCommand::new("hfs2dfxml-no-such-program");
        let err = probe.describe_path(Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, Error::Tool { .. }));
    }
}
