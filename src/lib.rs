//! Chartread - `.chart` rhythm game chart parser
//!
//! This library provides:
//! - Parsing of `.chart` files into a song with a tempo map and note tracks
//! - HOPO and tap inference for five and six fret guitar tracks
//! - Solo, star power, drum fill and disco flip extraction
//!
//! # Example
//!
//! ```no_run
//! use chartread::{ChartParser, Difficulty, DrumSettings, Instrument, Metadata};
//!
//! let file_data = std::fs::read("notes.chart").unwrap();
//! let song = ChartParser::new(Metadata::new("Song", "Artist", "Charter"))
//!     .parse_bytes(&file_data)
//!     .unwrap();
//! if let Some(track) = song.track(Instrument::Guitar, Difficulty::Expert) {
//!     let solos = track.solos(&DrumSettings::default_settings());
//!     println!("{} notes, {} solos", track.notes().len(), solos.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod song;

// Re-export main types for convenience
pub use config::{HopoThreshold, Metadata, ParserConfig};
pub use error::ChartError;
pub use parser::chart_parser::{parse_chart_data, ChartParser};
pub use song::{
    instrument::{Difficulty, DrumSettings, Instrument, TrackType},
    note::{Lane, Note, NoteFlags, Tick},
    tempo_map::{Bpm, TempoMap, TimeSignature},
    track::{DiscoFlip, DrumFill, NoteTrack, Solo, StarPower},
    GlobalData, Song,
};
