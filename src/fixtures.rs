//! Sample hls output and fake collaborators shared by the unit tests.
//!
//! Volume layout:
//!
//! ```text
//! :Docs            (16, directory)
//! :ReadMe          (20, no dates, 1024 data bytes)
//! :Docs:Hello.txt  (12, 42 data bytes)
//! :Docs:Tool       (13, locked, invisible, 512 resource bytes)
//! ```

use crate::error::{Error, Result};
use crate::probe::TypeProbe;
use crate::toolkit::{HfsToolkit, ListingOrder};
use std::path::Path;

/// `hls -1acilQRUFN`
pub const CREATION: &str = r#"16 d     2 items Mar  3 1998 "Docs":
20 f     TEXT/ttxt      0    1024 Jan  1 1904 "ReadMe"

:Docs:
12 f____ ____/____ 0000 0042 Jan  5 2001 "Hello.txt"
13 Fi    APPL/CARO    512     100 Feb 14 1999 "Tool"*
"#;

/// `hls -1amilQRUFN`
pub const MODIFICATION: &str = r#"16 d     2 items Apr  1 1998 "Docs":
20 f     TEXT/ttxt      0    1024 Jan  1 1904 "ReadMe"

:Docs:
13 Fi    APPL/CARO    512     100 Feb 20 1999 "Tool"*
12 f____ ____/____ 0000 0042 Jan  5 2001 "Hello.txt"
"#;

/// Number of catalog entries in the fixture volume.
pub const ENTRY_COUNT: usize = 4;

/// `file -b` output for the fixture image.
pub const VOLUME_DESCRIPTION: &str =
    "Macintosh HFS data block size: 512, number of blocks: 1600, volume name: Fixture";

/// Toolkit serving the fixture listings and recording every call.
#[derive(Debug, Default)]
pub struct FakeToolkit {
    pub creation: String,
    pub modification: String,
    pub fail_mount: bool,
    pub fail_list: bool,
    pub fail_copy: bool,
    pub calls: Vec<String>,
}

impl FakeToolkit {
    pub fn fixture() -> Self {
        Self {
            creation: CREATION.to_string(),
            modification: MODIFICATION.to_string(),
            ..Default::default()
        }
    }
}

impl HfsToolkit for FakeToolkit {
    fn mount(&mut self, image: &Path) -> Result<String> {
        self.calls.push(format!("hmount {}", image.display()));
        if self.fail_mount {
            return Err(Error::tool("hmount", "not an HFS volume"));
        }
        Ok("Volume name is \"Fixture\"".to_string())
    }

    fn list(&mut self, order: ListingOrder) -> Result<String> {
        self.calls.push(format!("hls {}", order.hls_flags()));
        if self.fail_list {
            return Err(Error::tool("hls", "no volume is current"));
        }
        Ok(match order {
            ListingOrder::Creation => self.creation.clone(),
            ListingOrder::Modification => self.modification.clone(),
        })
    }

    fn copy(&mut self, hfs_path: &str) -> Result<Vec<u8>> {
        self.calls.push(format!("hcopy {}", hfs_path));
        if self.fail_copy {
            return Err(Error::tool("hcopy", "i/o error"));
        }
        Ok(hfs_path.as_bytes().to_vec())
    }

    fn unmount(&mut self) -> Result<()> {
        self.calls.push("humount".to_string());
        Ok(())
    }
}

/// Describes `*.hfs` paths as the fixture volume and anything else as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeProbe;

impl TypeProbe for FakeProbe {
    fn describe_path(&self, path: &Path) -> Result<String> {
        if path.extension().map_or(false, |ext| ext == "hfs") {
            Ok(VOLUME_DESCRIPTION.to_string())
        } else {
            Ok("ASCII text".to_string())
        }
    }
}
