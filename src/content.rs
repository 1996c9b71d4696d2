//! Data-fork content resolution.
//!
//! A file's data fork is copied out of the mounted volume with `hcopy -r`,
//! spooled to a temporary file for the type probe, and hashed with MD5 and
//! SHA-1. The temporary file is removed when the resolution returns, on
//! success or failure.

use crate::error::Result;
use crate::probe::TypeProbe;
use crate::toolkit::HfsToolkit;
use digest::Digest;
use log::debug;
use md5::Md5;
use sha1::Sha1;
use std::io::Write;
use tempfile::NamedTempFile;

/// Content facts for one data fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    /// Type description from the probe
    pub libmagic: String,
    /// Lowercase hex MD5
    pub md5: String,
    /// Lowercase hex SHA-1
    pub sha1: String,
}

/// Anything that can describe the data fork at a classic HFS path.
pub trait ContentSource {
    /// Resolves the content of the file at `hfs_path`.
    fn resolve(&mut self, hfs_path: &str) -> Result<ContentDescriptor>;
}

/// Replaces non-ASCII characters with `?`, which hcopy treats as a wildcard.
///
/// Names with MacRoman characters are otherwise not found by hcopy.
pub fn sanitize_hcopy_path(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

/// Lowercase hex digest of `data`.
pub fn hex_digest<D: Digest>(data: &[u8]) -> String {
    D::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Spools `bytes` to a temporary file, probes it, and hashes it.
pub fn describe_bytes<P: TypeProbe + ?Sized>(probe: &P, bytes: &[u8]) -> Result<ContentDescriptor> {
    let mut spool = NamedTempFile::new()?;
    spool.write_all(bytes)?;
    spool.flush()?;

    let libmagic = probe.describe_path(spool.path())?;

    Ok(ContentDescriptor {
        libmagic,
        md5: hex_digest::<Md5>(bytes),
        sha1: hex_digest::<Sha1>(bytes),
    })
}

/// Resolves content through an HFS toolkit and a type probe.
pub struct ContentResolver<'a, T: ?Sized, P: ?Sized> {
    toolkit: &'a mut T,
    probe: &'a P,
}

impl<'a, T: HfsToolkit + ?Sized, P: TypeProbe + ?Sized> ContentResolver<'a, T, P> {
    /// Borrows the toolkit holding the mounted volume and the probe.
    pub fn new(toolkit: &'a mut T, probe: &'a P) -> Self {
        Self { toolkit, probe }
    }
}

impl<T: HfsToolkit + ?Sized, P: TypeProbe + ?Sized> ContentSource for ContentResolver<'_, T, P> {
    fn resolve(&mut self, hfs_path: &str) -> Result<ContentDescriptor> {
        let sanitized = sanitize_hcopy_path(hfs_path);
        let bytes = self.toolkit.copy(&sanitized)?;
        debug!("Copied {} bytes from {}", bytes.len(), sanitized);
        describe_bytes(self.probe, &bytes)
    }
}
