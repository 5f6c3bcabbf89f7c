use crate::AppError::ConfigError;
use chartread::{
    ChartError, ChartParser, Difficulty, DrumSettings, HopoThreshold, Instrument, ParserConfig,
    Song, TempoMap, TrackType,
};
use clap::Parser;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("chartread=info"))
        .init();

    // args
    let args = CliArgs::parse();
    let chart_file = PathBuf::from(&args.chart_file);
    if !chart_file.exists() {
        let err = ConfigError(format!("Chart file not found {chart_file:?}"));
        return Err(err);
    }

    let config = parser_config(&args)?;
    log::info!("Parsing {chart_file:?}");
    let song = ChartParser::with_config(config).parse_file(&chart_file)?;

    let summary = ChartSummary::new(&song);
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|err| AppError::OtherError(format!("Could not write summary {err:}")))?;
    println!("{json}");
    Ok(())
}

/// Start from the optional JSON configuration then apply command line overrides.
fn parser_config(args: &CliArgs) -> Result<ParserConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Reading parser configuration {path:?}");
            let json = std::fs::read_to_string(path)?;
            ParserConfig::from_json(&json)?
        }
        None => ParserConfig::default(),
    };
    if !args.instrument.is_empty() {
        config.permitted_instruments = args.instrument.iter().copied().collect();
    }
    if let Some(ticks) = args.hopo_frequency {
        config.hopo_threshold = HopoThreshold::HopoFrequency(ticks);
    }
    if args.no_solos {
        config.parse_solos = false;
    }
    if let Some(name) = &args.name {
        config.metadata.name.clone_from(name);
    }
    if let Some(artist) = &args.artist {
        config.metadata.artist.clone_from(artist);
    }
    if let Some(charter) = &args.charter {
        config.metadata.charter.clone_from(charter);
    }
    Ok(config)
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the .chart file.
    chart_file: String,
    /// Only parse these instruments (repeatable).
    #[arg(long)]
    instrument: Vec<Instrument>,
    /// Fixed HOPO distance in ticks instead of the resolution based default.
    #[arg(long)]
    hopo_frequency: Option<u32>,
    /// Skip solo extraction.
    #[arg(long, default_value_t = false)]
    no_solos: bool,
    /// Song name reported in the summary.
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    charter: Option<String>,
    /// Optional path to a JSON parser configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TrackSummary {
    instrument: Instrument,
    difficulty: Difficulty,
    track_type: TrackType,
    notes: usize,
    sp_phrases: usize,
    solos: usize,
    drum_fills: usize,
    disco_flips: usize,
}

#[derive(Debug, Serialize)]
struct ChartSummary<'a> {
    name: &'a str,
    artist: &'a str,
    charter: &'a str,
    resolution: u32,
    tempo_map: &'a TempoMap,
    tracks: Vec<TrackSummary>,
}

impl<'a> ChartSummary<'a> {
    fn new(song: &'a Song) -> Self {
        let drum_settings = DrumSettings::default_settings();
        let tracks = song
            .tracks()
            .map(|(&(instrument, difficulty), track)| TrackSummary {
                instrument,
                difficulty,
                track_type: track.track_type(),
                notes: track.notes().len(),
                sp_phrases: track.sp_phrases().len(),
                solos: track.solos(&drum_settings).len(),
                drum_fills: track.drum_fills().len(),
                disco_flips: track.disco_flips().len(),
            })
            .collect();
        let global_data = song.global_data();
        ChartSummary {
            name: global_data.name(),
            artist: global_data.artist(),
            charter: global_data.charter(),
            resolution: global_data.resolution(),
            tempo_map: global_data.tempo_map(),
            tracks,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<ChartError> for AppError {
    fn from(error: ChartError) -> Self {
        match error {
            ChartError::ParsingError(s) => Self::ParsingError(s),
            ChartError::ConfigError(s) => Self::ConfigError(s),
            ChartError::IoError(s) => Self::OtherError(s),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
