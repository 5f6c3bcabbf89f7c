//! Errors reported while turning chart files into songs.

use std::io;

/// Failure of a chartread operation.
///
/// Malformed lines and unknown codes inside a chart are not errors, they are
/// skipped with a debug log. Only the cases below stop a parse.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// The chart cannot produce a song. Either no permitted instrument has a
    /// track with a valid note, or a `TS` line carries a denominator exponent
    /// of 32 or more.
    #[error("parsing error: {0}")]
    ParsingError(String),

    /// `ParserConfig::from_json` got invalid JSON, or `ParserConfig::to_json`
    /// could not serialize the configuration.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// `ChartParser::parse_file` could not read the chart from disk.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for ChartError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
