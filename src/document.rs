//! Document assembly and output.
//!
//! One HFS image becomes one DFXML document holding one volume.

use crate::assembler::VolumeAssembler;
use crate::config::ConvertConfig;
use crate::error::{Error, Result};
use crate::objects::{DFXMLObject, LibraryObject, DFXML_VERSION, XMLNS_HFS};
use crate::probe::{FileCommand, TypeProbe};
use crate::toolkit::{HfsToolkit, HfsUtils};
use crate::writer::{DFXMLWriter, WriterConfig};
use log::{debug, info};
use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

/// Program name recorded in the creator section.
pub const PROGRAM_NAME: &str = "hfs2dfxml";

/// Dublin Core `type` of every document.
pub const DOCUMENT_TYPE: &str = "Disk Image";

/// Builds the DFXML document for `image` using an existing assembler.
///
/// Any volume left mounted by an earlier run is unmounted first; failure to
/// do so is ignored.
pub fn hfs2dfxml<T: HfsToolkit, P: TypeProbe>(
    image: &Path,
    assembler: &mut VolumeAssembler<T, P>,
) -> Result<DFXMLObject> {
    if let Err(e) = assembler.toolkit_mut().unmount() {
        debug!("Nothing unmounted before start: {}", e);
    }

    let mut doc = DFXMLObject::with_version(DFXML_VERSION);
    doc.add_namespace("hfs", XMLNS_HFS);
    doc.dc.insert("type".to_string(), DOCUMENT_TYPE.to_string());
    doc.program = Some(PROGRAM_NAME.to_string());
    doc.program_version = Some(crate::VERSION.to_string());
    doc.add_creator_library(LibraryObject::new(PROGRAM_NAME, crate::VERSION));

    let source = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.display().to_string());
    doc.sources.push(source);

    doc.append_volume(assembler.assemble(image)?);
    Ok(doc)
}

/// Converts `image` with the installed hfsutils and `file` commands.
pub fn convert_image(image: &Path, config: &ConvertConfig) -> Result<DFXMLObject> {
    let mut assembler = VolumeAssembler::from_config(HfsUtils, FileCommand::default(), config)?;
    hfs2dfxml(image, &mut assembler)
}

/// Writes `doc` to a new file at `output`.
///
/// An existing file is never overwritten.
pub fn write_document(doc: &DFXMLObject, output: &Path, config: &WriterConfig) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => Error::OutputExists(output.to_path_buf()),
            _ => Error::Io(e),
        })?;

    let mut out = BufWriter::new(file);
    DFXMLWriter::with_config(config.clone()).write(doc, &mut out)?;
    out.write_all(b"\n")?;
    out.flush()?;

    info!("Wrote {}", output.display());
    Ok(())
}
