use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::config::{HopoThreshold, Metadata, ParserConfig};
use crate::parser::drum_resolver::resolve_drum_notes;
use crate::parser::hopo_resolver::resolve_hopos;
use crate::parser::primitive_parser::decode_chart_bytes;
use crate::parser::section_parser::{parse_chart_sections, ChartSection, ChartSections};
use crate::parser::span_parser::{
    parse_disco_flips, parse_drum_fills, parse_solo_spans, parse_sp_phrases,
};
use crate::parser::tempo_parser::{parse_resolution, parse_tempo_map};
use crate::parser::track_builder::{build_chords, group_note_events};
use crate::song::instrument::{Difficulty, Instrument, TrackType};
use crate::song::track::NoteTrack;
use crate::song::{GlobalData, Song};
use crate::ChartError;

/// Builder-style entry point turning `.chart` text into a [`Song`].
#[derive(Debug, Clone, Default)]
pub struct ChartParser {
    config: ParserConfig,
}

impl ChartParser {
    pub fn new(metadata: Metadata) -> Self {
        ChartParser {
            config: ParserConfig::new(metadata),
        }
    }

    pub const fn with_config(config: ParserConfig) -> Self {
        ChartParser { config }
    }

    /// Only keep tracks of the given instruments.
    pub fn permit_instruments(mut self, instruments: impl IntoIterator<Item = Instrument>) -> Self {
        self.config.permitted_instruments = instruments.into_iter().collect();
        self
    }

    pub fn parse_solos(mut self, parse_solos: bool) -> Self {
        self.config.parse_solos = parse_solos;
        self
    }

    pub fn hopo_threshold(mut self, hopo_threshold: HopoThreshold) -> Self {
        self.config.hopo_threshold = hopo_threshold;
        self
    }

    pub fn parse(&self, text: &str) -> Result<Song, ChartError> {
        parse_chart_data(text, &self.config)
    }

    /// Decode raw file contents then parse them.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Song, ChartError> {
        let text = decode_chart_bytes(data);
        self.parse(&text)
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Song, ChartError> {
        let data = std::fs::read(path)?;
        self.parse_bytes(&data)
    }
}

pub fn parse_chart_data(text: &str, config: &ParserConfig) -> Result<Song, ChartError> {
    let sections = parse_chart_sections(text);
    let resolution = parse_resolution(&sections);
    let tempo_map = parse_tempo_map(&sections, resolution)?;
    log::debug!(
        "Chart resolution {resolution} with {} BPM and {} time signature changes",
        tempo_map.bpms().len(),
        tempo_map.time_sigs().len()
    );

    let metadata = &config.metadata;
    let global_data = Arc::new(GlobalData::new(
        metadata.name.clone(),
        metadata.artist.clone(),
        metadata.charter.clone(),
        tempo_map,
        false,
    ));

    let mut tracks = BTreeMap::new();
    for instrument in Instrument::ALL {
        if !config.is_permitted(instrument) {
            log::debug!("Skipping {instrument} tracks, instrument not permitted");
            continue;
        }
        for difficulty in Difficulty::ALL {
            if let Some(track) =
                parse_note_track(&sections, instrument, difficulty, config, &global_data)
            {
                tracks.insert((instrument, difficulty), track);
            }
        }
    }

    if tracks.is_empty() {
        let msg = "chart has no permitted track with a valid note".to_string();
        log::error!("{msg}");
        return Err(ChartError::ParsingError(msg));
    }
    log::info!("Parsed chart with {} tracks", tracks.len());
    Ok(Song::new(global_data, tracks))
}

fn parse_note_track(
    sections: &ChartSections,
    instrument: Instrument,
    difficulty: Difficulty,
    config: &ParserConfig,
    global_data: &Arc<GlobalData>,
) -> Option<NoteTrack> {
    let name = format!("{difficulty}{}", instrument.section_suffix());
    let section = sections.first_non_empty(&name)?;
    let track_type = instrument.track_type();

    let groups = group_note_events(track_type, &section.note_events);
    let notes = match track_type {
        TrackType::Drums => resolve_drum_notes(&groups),
        TrackType::FiveFret | TrackType::SixFret => {
            let max_hopo_gap = config.hopo_threshold.max_hopo_gap(global_data.resolution());
            resolve_hopos(build_chords(track_type, &groups), &groups, max_hopo_gap)
        }
    };
    if notes.is_empty() {
        log::debug!("Section {name} has no valid note");
        return None;
    }
    log::debug!("Section {name} has {} notes", notes.len());

    let solo_spans = if config.parse_solos {
        parse_solo_spans(&section.text_events)
    } else {
        vec![]
    };
    let track = NoteTrack::new(
        track_type,
        notes,
        parse_sp_phrases(&section.special_events),
        solo_spans,
        Arc::clone(global_data),
    );
    Some(match track_type {
        TrackType::Drums => with_drum_spans(track, section),
        TrackType::FiveFret | TrackType::SixFret => track,
    })
}

fn with_drum_spans(track: NoteTrack, section: &ChartSection) -> NoteTrack {
    track.with_drum_spans(
        parse_drum_fills(&section.special_events),
        parse_disco_flips(&section.text_events),
    )
}
