//! Access to the hfsutils command-line tools.
//!
//! hfsutils keeps the "current volume" in per-user state outside the
//! process, so only one volume can be mounted at a time. Its text output is
//! MacRoman and is decoded before any parsing.

use crate::error::{Error, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Which date the recursive listing is sorted on and prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrder {
    /// Creation date (`-c`)
    Creation,
    /// Modification date (`-m`)
    Modification,
}

impl ListingOrder {
    /// hls flags: one per line, the date column, catalog IDs, quoted names,
    /// recursive, unsorted directories first, type indicators, no escaping
    /// of non-printable characters.
    pub fn hls_flags(&self) -> &'static str {
        match self {
            ListingOrder::Creation => "-1acilQRUFN",
            ListingOrder::Modification => "-1amilQRUFN",
        }
    }
}

/// The hfsutils operations a conversion needs.
pub trait HfsToolkit {
    /// Mounts an image; returns the tool's banner.
    fn mount(&mut self, image: &Path) -> Result<String>;

    /// Produces a full recursive listing of the mounted volume.
    fn list(&mut self, order: ListingOrder) -> Result<String>;

    /// Copies the data fork at a classic HFS path, raw.
    fn copy(&mut self, hfs_path: &str) -> Result<Vec<u8>>;

    /// Unmounts the current volume.
    fn unmount(&mut self) -> Result<()>;
}

/// Decodes MacRoman tool output.
pub fn decode_mac_roman(bytes: &[u8]) -> String {
    let (text, _) = encoding_rs::MACINTOSH.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// The real hfsutils binaries, found on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HfsUtils;

impl HfsUtils {
    fn run(program: &str, args: &[&str]) -> Result<Output> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        debug!("Running {}", command);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::tool(&command, e.to_string()))?;
        if !output.status.success() {
            let mut detail = decode_mac_roman(&output.stderr);
            detail.push_str(&decode_mac_roman(&output.stdout));
            return Err(Error::tool(
                command,
                format!("{} ({})", detail.trim(), output.status),
            ));
        }
        Ok(output)
    }
}

impl HfsToolkit for HfsUtils {
    fn mount(&mut self, image: &Path) -> Result<String> {
        let image = image.to_string_lossy();
        let output = Self::run("hmount", &[&*image])?;
        let mut banner = decode_mac_roman(&output.stdout);
        banner.push_str(&decode_mac_roman(&output.stderr));
        Ok(banner)
    }

    fn list(&mut self, order: ListingOrder) -> Result<String> {
        let output = Self::run("hls", &[order.hls_flags()])?;
        Ok(decode_mac_roman(&output.stdout))
    }

    fn copy(&mut self, hfs_path: &str) -> Result<Vec<u8>> {
        let output = Self::run("hcopy", &["-r", hfs_path, "-"])?;
        Ok(output.stdout)
    }

    fn unmount(&mut self) -> Result<()> {
        Self::run("humount", &[]).map(|_| ())
    }
}

/// Replays listings captured earlier instead of running hfsutils.
///
/// Mounting and unmounting always succeed; content cannot be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayToolkit {
    creation: String,
    modification: String,
}

impl ReplayToolkit {
    /// Replays the given listings. Without a modification listing the
    /// creation listing stands in for both, so creation and modification
    /// dates come out equal.
    pub fn new(creation: impl Into<String>, modification: Option<String>) -> Self {
        let creation = creation.into();
        let modification = modification.unwrap_or_else(|| creation.clone());
        Self {
            creation,
            modification,
        }
    }

    /// Reads saved listings from disk.
    pub fn from_files(creation: &Path, modification: Option<&Path>) -> Result<Self> {
        let creation_text = fs::read_to_string(creation)?;
        let modification_text = modification.map(fs::read_to_string).transpose()?;
        info!("Replaying listing from {}", creation.display());
        Ok(Self::new(creation_text, modification_text))
    }
}

impl HfsToolkit for ReplayToolkit {
    fn mount(&mut self, image: &Path) -> Result<String> {
        Ok(format!("replaying listings for {}", image.display()))
    }

    fn list(&mut self, order: ListingOrder) -> Result<String> {
        Ok(match order {
            ListingOrder::Creation => self.creation.clone(),
            ListingOrder::Modification => self.modification.clone(),
        })
    }

    fn copy(&mut self, hfs_path: &str) -> Result<Vec<u8>> {
        Err(Error::tool(
            format!("hcopy -r {} -", hfs_path),
            "content is not available when replaying listings",
        ))
    }

    fn unmount(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_listing_flags() {
        assert_eq!(ListingOrder::Creation.hls_flags(), "-1acilQRUFN");
        assert_eq!(ListingOrder::Modification.hls_flags(), "-1amilQRUFN");
    }

    #[test]
    fn test_decode_mac_roman() {
        // 0x8E is e-acute, 0xAA is the trade mark sign
        assert_eq!(decode_mac_roman(b"Caf\x8E"), "Caf\u{e9}");
        assert_eq!(decode_mac_roman(b"Apple\xAA"), "Apple\u{2122}");
        assert_eq!(decode_mac_roman(b"plain"), "plain");
    }

    #[test]
    fn test_replay_falls_back_to_creation_listing() {
        let mut toolkit = ReplayToolkit::new("cre", None);
        assert_eq!(toolkit.list(ListingOrder::Modification).unwrap(), "cre");

        let mut toolkit = ReplayToolkit::new("cre", Some("mod".to_string()));
        assert_eq!(toolkit.list(ListingOrder::Creation).unwrap(), "cre");
        assert_eq!(toolkit.list(ListingOrder::Modification).unwrap(), "mod");
        assert!(toolkit.copy(":x").is_err());
        assert!(toolkit.unmount().is_ok());
    }

    #[test]
    fn test_replay_from_files() {
        let mut creation = tempfile::NamedTempFile::new().unwrap();
        creation.write_all(b"16 d     0 items Mar  3 1998 \"Docs\":\n").unwrap();

        let mut toolkit = ReplayToolkit::from_files(creation.path(), None).unwrap();
        assert!(toolkit
            .list(ListingOrder::Creation)
            .unwrap()
            .contains("\"Docs\""));
        assert!(ReplayToolkit::from_files(Path::new("/nonexistent/listing"), None).is_err());
    }
}
