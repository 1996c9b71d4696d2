//! demo_timeline - Produce a creation/modification timeline from saved hls listings.
//!
//! This demo replays hls listings captured earlier (for example with
//! `hfs2dfxml --debug-dump`) and prints every creation and modification
//! time in order. No hfsutils installation or disk image is needed.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example demo_timeline <creation-listing> [modification-listing]
//! ```
//!
//! # Output
//!
//! The output is a tab-separated timeline with three columns:
//! - Timestamp (ISO 8601 format, no zone)
//! - Filename (classic HFS path)
//! - Event type (created or modified)

use std::env;
use std::path::Path;

use hfs2dfxml::assembler::VolumeAssembler;
use hfs2dfxml::document::hfs2dfxml;
use hfs2dfxml::objects::TimestampName;
use hfs2dfxml::probe::FileCommand;
use hfs2dfxml::toolkit::ReplayToolkit;

/// A single timestamp event.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TimelineEntry {
    timestamp: String,
    filename: String,
    event_type: &'static str,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <creation-listing> [modification-listing]",
            args[0]
        );
        std::process::exit(1);
    }

    let creation = Path::new(&args[1]);
    let modification = args.get(2).map(Path::new);
    let toolkit = ReplayToolkit::from_files(creation, modification)?;

    let mut assembler =
        VolumeAssembler::new(toolkit, FileCommand::default()).with_content_resolution(false);
    let dfxml = hfs2dfxml(creation, &mut assembler)?;

    let mut timeline = Vec::new();
    for fi in dfxml.iter_files().filter(|f| !f.is_resource_fork()) {
        let filename = fi.filename.clone().unwrap_or_default();
        for (name, event_type) in [
            (TimestampName::Crtime, "created"),
            (TimestampName::Mtime, "modified"),
        ] {
            if let Some(ts) = fi.get_timestamp(name) {
                timeline.push(TimelineEntry {
                    timestamp: ts.to_iso8601(),
                    filename: filename.clone(),
                    event_type,
                });
            }
        }
    }

    timeline.sort();

    for entry in &timeline {
        println!(
            "{}\t{}\t{}",
            entry.timestamp, entry.filename, entry.event_type
        );
    }

    Ok(())
}
