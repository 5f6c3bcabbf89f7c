use crate::song::instrument::{DrumSettings, TrackType};
use crate::song::note::{DrumLane, Lane, Note, NoteFlags, Tick};
use crate::song::GlobalData;
use serde::Serialize;
use std::sync::Arc;

/// Points awarded per counted note of a solo.
pub const SOLO_NOTE_VALUE: u32 = 100;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct StarPower {
    pub position: Tick,
    pub length: Tick,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct DrumFill {
    pub position: Tick,
    pub length: Tick,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoFlip {
    pub position: Tick,
    pub length: Tick,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Solo {
    pub start: Tick,
    pub end: Tick,
    pub value: u32,
}

/// Closed solo markers, scored on demand since drum scoring depends on the
/// player's settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct SoloSpan {
    pub start: Tick,
    pub end: Tick,
}

/// All notes and phrases of one instrument at one difficulty.
#[derive(Debug, Clone)]
pub struct NoteTrack {
    track_type: TrackType,
    notes: Vec<Note>,
    sp_phrases: Vec<StarPower>,
    solo_spans: Vec<SoloSpan>,
    drum_fills: Vec<DrumFill>,
    disco_flips: Vec<DiscoFlip>,
    global_data: Arc<GlobalData>,
}

impl NoteTrack {
    pub fn new(
        track_type: TrackType,
        notes: Vec<Note>,
        sp_phrases: Vec<StarPower>,
        solo_spans: Vec<SoloSpan>,
        global_data: Arc<GlobalData>,
    ) -> Self {
        NoteTrack {
            track_type,
            notes,
            sp_phrases,
            solo_spans,
            drum_fills: vec![],
            disco_flips: vec![],
            global_data,
        }
    }

    pub fn with_drum_spans(
        mut self,
        drum_fills: Vec<DrumFill>,
        disco_flips: Vec<DiscoFlip>,
    ) -> Self {
        self.drum_fills = drum_fills;
        self.disco_flips = disco_flips;
        self
    }

    pub const fn track_type(&self) -> TrackType {
        self.track_type
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn sp_phrases(&self) -> &[StarPower] {
        &self.sp_phrases
    }

    pub fn drum_fills(&self) -> &[DrumFill] {
        &self.drum_fills
    }

    pub fn disco_flips(&self) -> &[DiscoFlip] {
        &self.disco_flips
    }

    pub fn global_data(&self) -> &GlobalData {
        &self.global_data
    }

    /// Scored solos; each counted note inside `[start, end]` is worth
    /// [`SOLO_NOTE_VALUE`] and solos without any counted note are dropped.
    pub fn solos(&self, drum_settings: &DrumSettings) -> Vec<Solo> {
        self.solo_spans
            .iter()
            .filter_map(|span| {
                let note_count = self
                    .notes
                    .iter()
                    .skip_while(|n| n.position < span.start)
                    .take_while(|n| n.position <= span.end)
                    .filter(|n| self.counts_for_solo(n, drum_settings))
                    .count() as u32;
                if note_count == 0 {
                    log::debug!("Dropping empty solo {}-{}", span.start, span.end);
                    return None;
                }
                Some(Solo {
                    start: span.start,
                    end: span.end,
                    value: SOLO_NOTE_VALUE * note_count,
                })
            })
            .collect()
    }

    fn counts_for_solo(&self, note: &Note, drum_settings: &DrumSettings) -> bool {
        if self.track_type != TrackType::Drums {
            return true;
        }
        if !note.has_lane(Lane::Drums(DrumLane::Kick)) {
            return true;
        }
        if note.flags.contains(NoteFlags::DOUBLE_KICK) {
            drum_settings.enable_double_kick && !drum_settings.disable_kick
        } else {
            !drum_settings.disable_kick
        }
    }
}
