use crate::parser::section_parser::NoteEvent;
use crate::song::instrument::TrackType;
use crate::song::note::{FiveFretLane, Lane, Note, NoteFlags, SixFretLane, Tick};
use std::collections::BTreeMap;

/// Drum pad as written in the chart, before fifth-lane resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrumPad {
    Kick,
    Red,
    Yellow,
    Blue,
    /// Code 4: green on four-lane kits, orange on five-lane kits.
    FourLaneGreen,
    /// Code 5: the extra pad of five-lane kits.
    FifthLane,
    DoubleKick,
}

impl DrumPad {
    /// Pad addressed by the low digit of a dynamics or cymbal code.
    const fn from_pad_index(index: u32) -> Option<DrumPad> {
        match index {
            0 => Some(DrumPad::Kick),
            1 => Some(DrumPad::Red),
            2 => Some(DrumPad::Yellow),
            3 => Some(DrumPad::Blue),
            4 => Some(DrumPad::FourLaneGreen),
            5 => Some(DrumPad::FifthLane),
            _ => None,
        }
    }
}

/// Codes altering the note(s) written at the same tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    ForceFlip,
    Tap,
    Accent(DrumPad),
    Ghost(DrumPad),
    Cymbal(DrumPad),
}

/// Meaning of a raw `N` code for a given instrument family.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FretCode {
    Lane(Lane),
    DrumPad(DrumPad),
    Modifier(Modifier),
    Unknown,
}

const ACCENT_CODES: std::ops::RangeInclusive<u32> = 34..=38;
const GHOST_CODES: std::ops::RangeInclusive<u32> = 40..=44;
const CYMBAL_CODES: std::ops::RangeInclusive<u32> = 66..=68;
const ACCENT_OFFSET: u32 = 33;
const GHOST_OFFSET: u32 = 39;
const CYMBAL_OFFSET: u32 = 64;

impl FretCode {
    pub fn from_raw(track_type: TrackType, code: u32) -> FretCode {
        match track_type {
            TrackType::FiveFret => match code {
                0 => FretCode::Lane(Lane::FiveFret(FiveFretLane::Green)),
                1 => FretCode::Lane(Lane::FiveFret(FiveFretLane::Red)),
                2 => FretCode::Lane(Lane::FiveFret(FiveFretLane::Yellow)),
                3 => FretCode::Lane(Lane::FiveFret(FiveFretLane::Blue)),
                4 => FretCode::Lane(Lane::FiveFret(FiveFretLane::Orange)),
                5 => FretCode::Modifier(Modifier::ForceFlip),
                6 => FretCode::Modifier(Modifier::Tap),
                7 => FretCode::Lane(Lane::FiveFret(FiveFretLane::Open)),
                _ => FretCode::Unknown,
            },
            TrackType::SixFret => match code {
                0 => FretCode::Lane(Lane::SixFret(SixFretLane::WhiteLow)),
                1 => FretCode::Lane(Lane::SixFret(SixFretLane::WhiteMid)),
                2 => FretCode::Lane(Lane::SixFret(SixFretLane::WhiteHigh)),
                3 => FretCode::Lane(Lane::SixFret(SixFretLane::BlackLow)),
                4 => FretCode::Lane(Lane::SixFret(SixFretLane::BlackMid)),
                5 => FretCode::Modifier(Modifier::ForceFlip),
                6 => FretCode::Modifier(Modifier::Tap),
                7 => FretCode::Lane(Lane::SixFret(SixFretLane::Open)),
                8 => FretCode::Lane(Lane::SixFret(SixFretLane::BlackHigh)),
                _ => FretCode::Unknown,
            },
            TrackType::Drums => match code {
                0..=5 => {
                    DrumPad::from_pad_index(code).map_or(FretCode::Unknown, FretCode::DrumPad)
                }
                32 => FretCode::DrumPad(DrumPad::DoubleKick),
                c if ACCENT_CODES.contains(&c) => {
                    Self::drum_modifier(c - ACCENT_OFFSET, Modifier::Accent)
                }
                c if GHOST_CODES.contains(&c) => {
                    Self::drum_modifier(c - GHOST_OFFSET, Modifier::Ghost)
                }
                c if CYMBAL_CODES.contains(&c) => {
                    Self::drum_modifier(c - CYMBAL_OFFSET, Modifier::Cymbal)
                }
                _ => FretCode::Unknown,
            },
        }
    }

    fn drum_modifier(pad_index: u32, modifier: fn(DrumPad) -> Modifier) -> FretCode {
        DrumPad::from_pad_index(pad_index)
            .map_or(FretCode::Unknown, |pad| FretCode::Modifier(modifier(pad)))
    }
}

/// Flag tagging every note with its instrument family.
pub const fn family_flag(track_type: TrackType) -> NoteFlags {
    match track_type {
        TrackType::FiveFret => NoteFlags::FIVE_FRET_GUITAR,
        TrackType::SixFret => NoteFlags::SIX_FRET_GUITAR,
        TrackType::Drums => NoteFlags::DRUMS,
    }
}

/// Classified codes found at one tick, in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickEvents {
    pub lanes: Vec<(Lane, Tick)>,
    pub pads: Vec<(DrumPad, Tick)>,
    pub modifiers: Vec<Modifier>,
}

impl TickEvents {
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn has_pad(&self, pad: DrumPad) -> bool {
        self.pads.iter().any(|(p, _)| *p == pad)
    }
}

pub type TickGroups = BTreeMap<Tick, TickEvents>;

/// Classify every note line of a section and group the results by tick.
/// Unknown codes are dropped.
pub fn group_note_events(track_type: TrackType, note_events: &[NoteEvent]) -> TickGroups {
    let mut groups = TickGroups::new();
    for event in note_events {
        let code = FretCode::from_raw(track_type, event.fret);
        if code == FretCode::Unknown {
            log::debug!(
                "Dropping unknown {track_type:?} code {} at {}",
                event.fret,
                event.position
            );
            continue;
        }
        let entry = groups.entry(event.position).or_default();
        match code {
            FretCode::Lane(lane) => entry.lanes.push((lane, event.length)),
            FretCode::DrumPad(pad) => entry.pads.push((pad, event.length)),
            FretCode::Modifier(modifier) => entry.modifiers.push(modifier),
            FretCode::Unknown => {}
        }
    }
    groups
}

/// Merge the lanes of each tick into a single note or chord.
/// Ticks holding only modifiers produce no note.
pub fn build_chords(track_type: TrackType, groups: &TickGroups) -> Vec<Note> {
    let flags = family_flag(track_type);
    groups
        .iter()
        .filter_map(|(&position, events)| {
            let mut lanes = events.lanes.iter();
            let Some(&(first_lane, first_length)) = lanes.next() else {
                if !events.modifiers.is_empty() {
                    log::debug!("Dropping modifiers without note at {position}");
                }
                return None;
            };
            let mut note = Note::new(position, first_lane, first_length, flags);
            for &(lane, length) in lanes {
                note.add_lane(lane, length);
            }
            Some(note)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_event(position: Tick, fret: u32, length: Tick) -> NoteEvent {
        NoteEvent {
            position,
            fret,
            length,
        }
    }

    #[test]
    fn five_fret_table() {
        let t = TrackType::FiveFret;
        assert_eq!(
            FretCode::from_raw(t, 0),
            FretCode::Lane(Lane::FiveFret(FiveFretLane::Green))
        );
        assert_eq!(
            FretCode::from_raw(t, 7),
            FretCode::Lane(Lane::FiveFret(FiveFretLane::Open))
        );
        assert_eq!(FretCode::from_raw(t, 5), FretCode::Modifier(Modifier::ForceFlip));
        assert_eq!(FretCode::from_raw(t, 6), FretCode::Modifier(Modifier::Tap));
        assert_eq!(FretCode::from_raw(t, 8), FretCode::Unknown);
        assert_eq!(FretCode::from_raw(t, 13), FretCode::Unknown);
    }

    #[test]
    fn six_fret_table() {
        let t = TrackType::SixFret;
        assert_eq!(
            FretCode::from_raw(t, 3),
            FretCode::Lane(Lane::SixFret(SixFretLane::BlackLow))
        );
        assert_eq!(
            FretCode::from_raw(t, 8),
            FretCode::Lane(Lane::SixFret(SixFretLane::BlackHigh))
        );
        assert_eq!(FretCode::from_raw(t, 9), FretCode::Unknown);
    }

    #[test]
    fn drum_table() {
        let t = TrackType::Drums;
        assert_eq!(FretCode::from_raw(t, 0), FretCode::DrumPad(DrumPad::Kick));
        assert_eq!(FretCode::from_raw(t, 5), FretCode::DrumPad(DrumPad::FifthLane));
        assert_eq!(FretCode::from_raw(t, 6), FretCode::Unknown);
        assert_eq!(FretCode::from_raw(t, 32), FretCode::DrumPad(DrumPad::DoubleKick));
        assert_eq!(FretCode::from_raw(t, 33), FretCode::Unknown);
        assert_eq!(
            FretCode::from_raw(t, 34),
            FretCode::Modifier(Modifier::Accent(DrumPad::Red))
        );
        assert_eq!(
            FretCode::from_raw(t, 38),
            FretCode::Modifier(Modifier::Accent(DrumPad::FifthLane))
        );
        assert_eq!(
            FretCode::from_raw(t, 40),
            FretCode::Modifier(Modifier::Ghost(DrumPad::Red))
        );
        assert_eq!(
            FretCode::from_raw(t, 66),
            FretCode::Modifier(Modifier::Cymbal(DrumPad::Yellow))
        );
        assert_eq!(
            FretCode::from_raw(t, 68),
            FretCode::Modifier(Modifier::Cymbal(DrumPad::FourLaneGreen))
        );
        assert_eq!(FretCode::from_raw(t, 69), FretCode::Unknown);
        // drum-only codes mean nothing to guitars
        assert_eq!(FretCode::from_raw(TrackType::FiveFret, 32), FretCode::Unknown);
    }

    #[test]
    fn chords_are_grouped_and_unknown_codes_dropped() {
        let events = vec![
            note_event(768, 2, 0),
            note_event(768, 0, 96),
            note_event(768, 13, 0),
            note_event(960, 5, 0),
            note_event(1152, 1, 0),
        ];
        let groups = group_note_events(TrackType::FiveFret, &events);
        let notes = build_chords(TrackType::FiveFret, &groups);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].position, 768);
        assert!(notes[0].is_chord());
        assert_eq!(notes[0].lanes[0].lane, Lane::FiveFret(FiveFretLane::Green));
        assert_eq!(notes[0].lanes[0].length, 96);
        assert_eq!(notes[0].lanes[1].lane, Lane::FiveFret(FiveFretLane::Yellow));
        assert_eq!(notes[1].position, 1152);
        assert_eq!(notes[1].flags, NoteFlags::FIVE_FRET_GUITAR);
    }

    #[test]
    fn duplicate_lanes_collapse() {
        let events = vec![note_event(0, 1, 0), note_event(0, 1, 50)];
        let groups = group_note_events(TrackType::FiveFret, &events);
        let notes = build_chords(TrackType::FiveFret, &groups);
        assert_eq!(notes.len(), 1);
        assert!(!notes[0].is_chord());
        assert_eq!(notes[0].length(), 50);
    }
}
