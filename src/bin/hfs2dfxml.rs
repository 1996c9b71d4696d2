//! hfs2dfxml - Convert an HFS disk image to DFXML.
//!
//! Mounts the image with hfsutils, lists it, hashes every data fork, and
//! writes a DFXML document to a new file.
//!
//! # Usage
//!
//! ```bash
//! hfs2dfxml [OPTIONS] <HFSVOL> <OUTPUT>
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Classic colon-separated paths
//! hfs2dfxml floppy.hfs floppy.xml
//!
//! # Mac OS X named-fork paths, no content hashing
//! hfs2dfxml -d osx --no-content floppy.hfs floppy.xml
//!
//! # Keep the raw listing, then convert it again later without hfsutils
//! hfs2dfxml --debug-dump floppy.hls floppy.hfs floppy.xml
//! hfs2dfxml --replay floppy.hls floppy.hfs floppy-again.xml
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};

use hfs2dfxml::assembler::VolumeAssembler;
use hfs2dfxml::config::ConvertConfig;
use hfs2dfxml::document;
use hfs2dfxml::objects::DFXMLObject;
use hfs2dfxml::probe::FileCommand;
use hfs2dfxml::record::PathDelimiter;
use hfs2dfxml::toolkit::{HfsToolkit, HfsUtils, ReplayToolkit};
use hfs2dfxml::writer::WriterConfig;
use hfs2dfxml::{Error, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert an HFS disk image to DFXML.
#[derive(Parser, Debug)]
#[command(name = "hfs2dfxml")]
#[command(version = VERSION)]
#[command(about = "Generate DFXML from an HFS disk image using hfsutils")]
struct Args {
    /// Path to the HFS disk image
    hfsvol: PathBuf,

    /// Name of the output XML file (must not exist)
    output: PathBuf,

    /// Path and resource fork naming convention
    #[arg(short, long, value_enum, default_value_t = PathDelimiter::Classic)]
    delimiter: PathDelimiter,

    /// Do not copy files out to hash and type them
    #[arg(long)]
    no_content: bool,

    /// Write the raw creation-date listing to this file
    #[arg(long, value_name = "FILE")]
    debug_dump: Option<PathBuf>,

    /// Convert a saved creation-date listing instead of running hfsutils
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Saved modification-date listing to pair with --replay
    #[arg(long, value_name = "FILE", requires = "replay")]
    replay_mod: Option<PathBuf>,

    /// Year for listing dates that show a time instead of a year
    #[arg(long, value_name = "YEAR")]
    reference_year: Option<i32>,

    /// Output compact XML (no indentation)
    #[arg(long)]
    compact: bool,

    /// Log level
    #[arg(
        short,
        long,
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

fn build_document<T: HfsToolkit>(
    toolkit: T,
    image: &Path,
    config: &ConvertConfig,
) -> Result<DFXMLObject> {
    let mut assembler = VolumeAssembler::from_config(toolkit, FileCommand::default(), config)?;
    document::hfs2dfxml(image, &mut assembler)
}

fn run(args: &Args) -> Result<()> {
    if args.replay.is_none() && !args.hfsvol.is_file() {
        return Err(Error::ImageNotFound(args.hfsvol.clone()));
    }
    if args.output.exists() {
        return Err(Error::OutputExists(args.output.clone()));
    }

    let mut config = ConvertConfig::new()
        .with_delimiter(args.delimiter)
        .with_content_resolution(!args.no_content && args.replay.is_none());
    if let Some(path) = &args.debug_dump {
        config = config.with_debug_dump(path);
    }
    if let Some(year) = args.reference_year {
        config = config.with_reference_year(year);
    }
    if args.compact {
        config = config.with_writer(WriterConfig::compact());
    }

    let mut doc = match &args.replay {
        Some(creation) => {
            let toolkit = ReplayToolkit::from_files(creation, args.replay_mod.as_deref())?;
            build_document(toolkit, &args.hfsvol, &config)?
        }
        None => build_document(HfsUtils, &args.hfsvol, &config)?,
    };
    doc.command_line = Some(std::env::args().collect::<Vec<_>>().join(" "));

    document::write_document(&doc, &args.output, &config.writer)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::new().filter_level(level).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("hfs2dfxml: {}", e);
            ExitCode::FAILURE
        }
    }
}
