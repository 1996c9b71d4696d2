//! Volume assembly: probe, mount, list, parse, unmount.

use crate::config::ConvertConfig;
use crate::content::ContentResolver;
use crate::error::{Error, Result};
use crate::hls::{CreationWalker, DateNormalizer, ModTimeIndex};
use crate::objects::{FileObject, VolumeObject};
use crate::probe::{TypeProbe, VolumeGeometry};
use crate::record::{build_records, PathDelimiter};
use crate::toolkit::{HfsToolkit, ListingOrder};
use log::{debug, error, info, warn};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File system type written on every volume.
pub const HFS_FTYPE: &str = "HFS";

/// Progress of a volume assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeState {
    /// Not started
    Idle,
    /// Sniffing image geometry
    Probing,
    /// Running hmount
    Mounting,
    /// Running hls twice
    Listing,
    /// Building records from the listings
    Parsing,
    /// Running humount
    Unmounting,
    /// Volume complete
    Done,
    /// Mount or listing failed; the volume carries the error
    Errored,
}

impl fmt::Display for VolumeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Builds one [`VolumeObject`] from an HFS image.
pub struct VolumeAssembler<T: HfsToolkit, P: TypeProbe> {
    toolkit: T,
    probe: P,
    delimiter: PathDelimiter,
    resolve_content: bool,
    dates: DateNormalizer,
    debug_sink: Option<Box<dyn Write>>,
    state: VolumeState,
}

impl<T: HfsToolkit, P: TypeProbe> VolumeAssembler<T, P> {
    /// Creates an assembler with classic paths and content resolution on.
    pub fn new(toolkit: T, probe: P) -> Self {
        Self {
            toolkit,
            probe,
            delimiter: PathDelimiter::Classic,
            resolve_content: true,
            dates: DateNormalizer::default(),
            debug_sink: None,
            state: VolumeState::Idle,
        }
    }

    /// Creates an assembler from a [`ConvertConfig`].
    ///
    /// The debug dump file, if any, is created (or truncated) here.
    pub fn from_config(toolkit: T, probe: P, config: &ConvertConfig) -> Result<Self> {
        let mut assembler = Self::new(toolkit, probe)
            .with_delimiter(config.delimiter)
            .with_content_resolution(config.resolve_content);
        if let Some(year) = config.reference_year {
            assembler = assembler.with_reference_year(year);
        }
        if let Some(path) = &config.debug_dump {
            let file = File::create(path)?;
            assembler = assembler.with_debug_sink(Box::new(BufWriter::new(file)));
        }
        Ok(assembler)
    }

    /// Sets the path rendering mode.
    pub fn with_delimiter(mut self, delimiter: PathDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables content resolution.
    pub fn with_content_resolution(mut self, enabled: bool) -> Self {
        self.resolve_content = enabled;
        self
    }

    /// Fixes the year used for dates printed without one.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.dates = DateNormalizer::new(year);
        self
    }

    /// Receives a copy of the raw creation listing.
    pub fn with_debug_sink(mut self, sink: Box<dyn Write>) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    /// Current state.
    pub fn state(&self) -> VolumeState {
        self.state
    }

    /// The toolkit in use.
    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Mutable access to the toolkit.
    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    fn transition(&mut self, next: VolumeState) {
        debug!("Volume state {} -> {}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, mut volume: VolumeObject, err: Error) -> VolumeObject {
        error!("{}", err);
        self.transition(VolumeState::Errored);
        volume.error = Some(err.to_string());
        volume
    }

    /// Assembles the volume for `image`.
    ///
    /// Mount and listing failures are recorded on the returned volume.
    /// Listing inconsistencies are returned as errors after the volume has
    /// been unmounted.
    pub fn assemble(&mut self, image: &Path) -> Result<VolumeObject> {
        let mut volume = VolumeObject::with_ftype(HFS_FTYPE);

        self.transition(VolumeState::Probing);
        match self.probe.describe_path(image) {
            Ok(description) => {
                let geometry = VolumeGeometry::from_description(&description);
                volume.block_size = geometry.block_size;
                volume.block_count = geometry.block_count;
            }
            Err(e) => warn!("Could not probe {}: {}", image.display(), e),
        }

        self.transition(VolumeState::Mounting);
        match self.toolkit.mount(image) {
            Ok(banner) => info!("Mounted {}: {}", image.display(), banner.trim()),
            Err(e) => return Ok(self.fail(volume, e)),
        }

        self.transition(VolumeState::Listing);
        let (creation, modification) = match self.list_both() {
            Ok(listings) => listings,
            Err(e) => return Ok(self.fail(volume, e)),
        };
        self.dump_creation_listing(&creation);

        self.transition(VolumeState::Parsing);
        let parsed = self.parse(&creation, &modification);

        self.transition(VolumeState::Unmounting);
        if let Err(e) = self.toolkit.unmount() {
            warn!("Unmount failed (prior mount may have been stale): {}", e);
        }

        for file in parsed? {
            volume.append_file(file);
        }
        info!("Volume has {} file objects", volume.file_count());
        self.transition(VolumeState::Done);
        Ok(volume)
    }

    fn list_both(&mut self) -> Result<(String, String)> {
        let creation = self.toolkit.list(ListingOrder::Creation)?;
        let modification = self.toolkit.list(ListingOrder::Modification)?;
        Ok((creation, modification))
    }

    fn dump_creation_listing(&mut self, creation: &str) {
        if let Some(sink) = self.debug_sink.as_mut() {
            let written = sink
                .write_all(creation.as_bytes())
                .and_then(|_| sink.flush());
            if let Err(e) = written {
                warn!("Could not write debug dump: {}", e);
            }
        }
    }

    fn parse(&mut self, creation: &str, modification: &str) -> Result<Vec<FileObject>> {
        let index = ModTimeIndex::build(modification)?;
        let walker = CreationWalker::new(&index, &self.dates);

        let records = if self.resolve_content {
            let mut resolver = ContentResolver::new(&mut self.toolkit, &self.probe);
            walker.walk(creation, Some(&mut resolver))?
        } else {
            walker.walk(creation, None)?
        };

        let mut files = Vec::with_capacity(records.len());
        for record in &records {
            files.extend(build_records(record, self.delimiter)?.into_objects());
        }
        Ok(files)
    }
}
