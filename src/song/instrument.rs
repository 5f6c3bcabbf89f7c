use serde::{Deserialize, Serialize};

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Instrument {
    Guitar,
    GuitarCoop,
    Bass,
    Rhythm,
    Keys,
    GHLGuitar,
    GHLBass,
    GHLRhythm,
    GHLGuitarCoop,
    Drums,
}

impl Instrument {
    pub const ALL: [Instrument; 10] = [
        Instrument::Guitar,
        Instrument::GuitarCoop,
        Instrument::Bass,
        Instrument::Rhythm,
        Instrument::Keys,
        Instrument::GHLGuitar,
        Instrument::GHLBass,
        Instrument::GHLRhythm,
        Instrument::GHLGuitarCoop,
        Instrument::Drums,
    ];

    /// Suffix of the `[<Difficulty><Suffix>]` section holding this instrument.
    pub const fn section_suffix(&self) -> &'static str {
        match self {
            Instrument::Guitar => "Single",
            Instrument::GuitarCoop => "DoubleGuitar",
            Instrument::Bass => "DoubleBass",
            Instrument::Rhythm => "DoubleRhythm",
            Instrument::Keys => "Keyboard",
            Instrument::GHLGuitar => "GHLGuitar",
            Instrument::GHLBass => "GHLBass",
            Instrument::GHLRhythm => "GHLRhythm",
            Instrument::GHLGuitarCoop => "GHLCoop",
            Instrument::Drums => "Drums",
        }
    }

    pub const fn track_type(&self) -> TrackType {
        match self {
            Instrument::Guitar
            | Instrument::GuitarCoop
            | Instrument::Bass
            | Instrument::Rhythm
            | Instrument::Keys => TrackType::FiveFret,
            Instrument::GHLGuitar
            | Instrument::GHLBass
            | Instrument::GHLRhythm
            | Instrument::GHLGuitarCoop => TrackType::SixFret,
            Instrument::Drums => TrackType::Drums,
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::str::FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|i| format!("{i:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown instrument {s}"))
    }
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub const fn section_prefix(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.section_prefix())
    }
}

/// Instrument family, decides how raw fret codes are read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TrackType {
    FiveFret,
    SixFret,
    Drums,
}

/// Player-side drum options which change how drum notes are counted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrumSettings {
    pub enable_double_kick: bool,
    pub disable_kick: bool,
}

impl DrumSettings {
    pub const fn default_settings() -> Self {
        DrumSettings {
            enable_double_kick: true,
            disable_kick: false,
        }
    }
}

impl Default for DrumSettings {
    fn default() -> Self {
        Self::default_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instrument_from_str_ignores_case() {
        assert_eq!("ghlbass".parse::<Instrument>(), Ok(Instrument::GHLBass));
        assert_eq!("Drums".parse::<Instrument>(), Ok(Instrument::Drums));
        assert!("banjo".parse::<Instrument>().is_err());
    }

    #[test]
    fn instrument_display_parses_back() {
        for instrument in Instrument::ALL {
            assert_eq!(instrument.to_string().parse::<Instrument>(), Ok(instrument));
        }
    }

    #[test]
    fn section_names_follow_chart_convention() {
        let name = format!(
            "{}{}",
            Difficulty::Expert,
            Instrument::GHLGuitarCoop.section_suffix()
        );
        assert_eq!(name, "ExpertGHLCoop");
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
    }
}
