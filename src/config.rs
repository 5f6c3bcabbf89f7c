use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::song::instrument::Instrument;
use crate::song::note::Tick;
use crate::ChartError;

/// HOPO distance at the reference resolution.
pub const DEFAULT_HOPO_TICKS: u32 = 65;
/// Resolution the default HOPO distance is expressed in.
pub const REFERENCE_RESOLUTION: u32 = 192;

/// Song metadata supplied by the caller, usually read from a `song.ini`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub artist: String,
    pub charter: String,
}

impl Metadata {
    pub fn new(name: &str, artist: &str, charter: &str) -> Self {
        Metadata {
            name: name.to_string(),
            artist: artist.to_string(),
            charter: charter.to_string(),
        }
    }
}

/// How the maximum distance between two notes for an automatic HOPO is chosen.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HopoThreshold {
    /// 65 ticks at resolution 192, scaled to the chart's resolution.
    #[default]
    Resolution,
    /// Fixed distance in ticks whatever the resolution.
    HopoFrequency(Tick),
}

impl HopoThreshold {
    pub fn max_hopo_gap(&self, resolution: u32) -> Tick {
        match self {
            HopoThreshold::Resolution => {
                let gap = u64::from(resolution) * u64::from(DEFAULT_HOPO_TICKS)
                    / u64::from(REFERENCE_RESOLUTION);
                Tick::try_from(gap).unwrap_or(Tick::MAX)
            }
            HopoThreshold::HopoFrequency(ticks) => *ticks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    pub permitted_instruments: BTreeSet<Instrument>,
    pub parse_solos: bool,
    pub hopo_threshold: HopoThreshold,
    pub metadata: Metadata,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            permitted_instruments: Instrument::ALL.into_iter().collect(),
            parse_solos: true,
            hopo_threshold: HopoThreshold::default(),
            metadata: Metadata::default(),
        }
    }
}

impl ParserConfig {
    pub fn new(metadata: Metadata) -> Self {
        ParserConfig {
            metadata,
            ..ParserConfig::default()
        }
    }

    pub fn is_permitted(&self, instrument: Instrument) -> bool {
        self.permitted_instruments.contains(&instrument)
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let config: ParserConfig = serde_json::from_str(json).map_err(|err| {
            ChartError::ConfigError(format!("Could not read parser configuration {err:}"))
        })?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ChartError> {
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            ChartError::ConfigError(format!("Could not write parser configuration {err:}"))
        })?;
        Ok(json)
    }
}
