pub mod instrument;
pub mod note;
pub mod tempo_map;
pub mod track;

use crate::song::instrument::{Difficulty, Instrument};
use crate::song::tempo_map::{TempoMap, DEFAULT_RESOLUTION};
use crate::song::track::NoteTrack;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Song-wide data shared by every track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalData {
    resolution: u32,
    name: String,
    artist: String,
    charter: String,
    tempo_map: TempoMap,
    is_from_midi: bool,
}

impl Default for GlobalData {
    fn default() -> Self {
        GlobalData {
            resolution: DEFAULT_RESOLUTION,
            name: String::new(),
            artist: String::new(),
            charter: String::new(),
            tempo_map: TempoMap::default(),
            is_from_midi: false,
        }
    }
}

impl GlobalData {
    pub fn new(
        name: String,
        artist: String,
        charter: String,
        tempo_map: TempoMap,
        is_from_midi: bool,
    ) -> Self {
        GlobalData {
            resolution: tempo_map.resolution(),
            name,
            artist,
            charter,
            tempo_map,
            is_from_midi,
        }
    }

    pub const fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn charter(&self) -> &str {
        &self.charter
    }

    pub const fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    pub const fn is_from_midi(&self) -> bool {
        self.is_from_midi
    }
}

/// A fully parsed chart.
#[derive(Debug, Clone)]
pub struct Song {
    global_data: Arc<GlobalData>,
    tracks: BTreeMap<(Instrument, Difficulty), NoteTrack>,
}

impl Song {
    pub const fn new(
        global_data: Arc<GlobalData>,
        tracks: BTreeMap<(Instrument, Difficulty), NoteTrack>,
    ) -> Self {
        Song {
            global_data,
            tracks,
        }
    }

    pub fn global_data(&self) -> &GlobalData {
        &self.global_data
    }

    /// Instruments with at least one track, in ascending order.
    pub fn instruments(&self) -> Vec<Instrument> {
        let mut instruments: Vec<Instrument> = self.tracks.keys().map(|(i, _)| *i).collect();
        instruments.dedup();
        instruments
    }

    /// Difficulties available for `instrument`, in ascending order.
    pub fn difficulties(&self, instrument: Instrument) -> Vec<Difficulty> {
        self.tracks
            .keys()
            .filter(|(i, _)| *i == instrument)
            .map(|(_, d)| *d)
            .collect()
    }

    pub fn track(&self, instrument: Instrument, difficulty: Difficulty) -> Option<&NoteTrack> {
        self.tracks.get(&(instrument, difficulty))
    }

    pub fn tracks(&self) -> impl Iterator<Item = (&(Instrument, Difficulty), &NoteTrack)> {
        self.tracks.iter()
    }
}
