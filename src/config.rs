//! Conversion settings.

use crate::record::PathDelimiter;
use crate::writer::WriterConfig;
use std::path::PathBuf;

/// Settings for one image conversion.
///
/// # Example
///
/// ```rust
/// use hfs2dfxml::config::ConvertConfig;
/// use hfs2dfxml::record::PathDelimiter;
///
/// let config = ConvertConfig::new()
///     .with_delimiter(PathDelimiter::Osx)
///     .with_content_resolution(false)
///     .with_reference_year(2003);
/// assert_eq!(config.delimiter, PathDelimiter::Osx);
/// ```
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Path rendering mode
    pub delimiter: PathDelimiter,
    /// Copy data forks out to hash and probe them
    pub resolve_content: bool,
    /// File that receives the raw creation listing
    pub debug_dump: Option<PathBuf>,
    /// Year for `Mon DD HH:MM` dates (default: the latest year not after now)
    pub reference_year: Option<i32>,
    /// Output formatting
    pub writer: WriterConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            delimiter: PathDelimiter::Classic,
            resolve_content: true,
            debug_dump: None,
            reference_year: None,
            writer: WriterConfig::default(),
        }
    }
}

impl ConvertConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
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

    /// Dumps the raw creation listing to `path`.
    pub fn with_debug_dump(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_dump = Some(path.into());
        self
    }

    /// Fixes the year used for dates printed without one.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Sets the output formatting.
    pub fn with_writer(mut self, writer: WriterConfig) -> Self {
        self.writer = writer;
        self
    }
}
