use serde::Serialize;
use std::ops::{BitOr, BitOrAssign};

pub type Tick = u32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FiveFretLane {
    Green,
    Red,
    Yellow,
    Blue,
    Orange,
    Open,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SixFretLane {
    WhiteLow,
    WhiteMid,
    WhiteHigh,
    BlackLow,
    BlackMid,
    BlackHigh,
    Open,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DrumLane {
    Kick,
    Red,
    Yellow,
    Blue,
    Green,
}

/// Playable lane of a note, tagged with its instrument family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Lane {
    FiveFret(FiveFretLane),
    SixFret(SixFretLane),
    Drums(DrumLane),
}

/// Bitset of per-note attributes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NoteFlags(u32);

impl NoteFlags {
    pub const NONE: NoteFlags = NoteFlags(0);
    pub const HOPO: NoteFlags = NoteFlags(1 << 0);
    pub const TAP: NoteFlags = NoteFlags(1 << 1);
    pub const FORCE_FLIP: NoteFlags = NoteFlags(1 << 2);
    pub const FIVE_FRET_GUITAR: NoteFlags = NoteFlags(1 << 3);
    pub const SIX_FRET_GUITAR: NoteFlags = NoteFlags(1 << 4);
    pub const DRUMS: NoteFlags = NoteFlags(1 << 5);
    pub const CYMBAL: NoteFlags = NoteFlags(1 << 6);
    pub const ACCENT: NoteFlags = NoteFlags(1 << 7);
    pub const GHOST: NoteFlags = NoteFlags(1 << 8);
    pub const DOUBLE_KICK: NoteFlags = NoteFlags(1 << 9);

    pub const fn contains(&self, other: NoteFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: NoteFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: NoteFlags) {
        self.0 &= !other.0;
    }

    pub fn toggle(&mut self, other: NoteFlags) {
        self.0 ^= other.0;
    }
}

impl BitOr for NoteFlags {
    type Output = NoteFlags;

    fn bitor(self, rhs: NoteFlags) -> NoteFlags {
        NoteFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for NoteFlags {
    fn bitor_assign(&mut self, rhs: NoteFlags) {
        self.insert(rhs);
    }
}

/// A single lane struck at a tick with its sustain length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct NoteLane {
    pub lane: Lane,
    pub length: Tick,
}

/// One note or chord of a track.
///
/// Lanes are kept sorted by ascending lane so chords compare equal
/// regardless of the order they were written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub position: Tick,
    pub lanes: Vec<NoteLane>,
    pub flags: NoteFlags,
}

impl Note {
    pub fn new(position: Tick, lane: Lane, length: Tick, flags: NoteFlags) -> Self {
        Note {
            position,
            lanes: vec![NoteLane { lane, length }],
            flags,
        }
    }

    /// Add a lane to the chord, a lane already present only takes the new length.
    pub fn add_lane(&mut self, lane: Lane, length: Tick) {
        match self.lanes.binary_search_by(|l| l.lane.cmp(&lane)) {
            Ok(index) => self.lanes[index].length = length,
            Err(index) => self.lanes.insert(index, NoteLane { lane, length }),
        }
    }

    pub fn is_chord(&self) -> bool {
        self.lanes.len() > 1
    }

    pub fn has_lane(&self, lane: Lane) -> bool {
        self.lanes.iter().any(|l| l.lane == lane)
    }

    /// Longest sustain among the lanes of the note.
    pub fn length(&self) -> Tick {
        self.lanes.iter().map(|l| l.length).max().unwrap_or(0)
    }

    pub const fn is_hopo(&self) -> bool {
        self.flags.contains(NoteFlags::HOPO)
    }

    pub const fn is_tap(&self) -> bool {
        self.flags.contains(NoteFlags::TAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_lanes_are_sorted() {
        let mut note = Note::new(
            0,
            Lane::FiveFret(FiveFretLane::Blue),
            0,
            NoteFlags::FIVE_FRET_GUITAR,
        );
        note.add_lane(Lane::FiveFret(FiveFretLane::Green), 10);
        note.add_lane(Lane::FiveFret(FiveFretLane::Yellow), 0);
        let lanes: Vec<Lane> = note.lanes.iter().map(|l| l.lane).collect();
        assert_eq!(
            lanes,
            vec![
                Lane::FiveFret(FiveFretLane::Green),
                Lane::FiveFret(FiveFretLane::Yellow),
                Lane::FiveFret(FiveFretLane::Blue),
            ]
        );
        assert!(note.is_chord());
        assert_eq!(note.length(), 10);
    }

    #[test]
    fn repeated_lane_keeps_single_entry() {
        let green = Lane::FiveFret(FiveFretLane::Green);
        let mut note = Note::new(0, green, 0, NoteFlags::FIVE_FRET_GUITAR);
        note.add_lane(green, 96);
        assert!(!note.is_chord());
        assert_eq!(note.length(), 96);
    }

    #[test]
    fn flags_toggle() {
        let mut flags = NoteFlags::FIVE_FRET_GUITAR;
        flags.toggle(NoteFlags::HOPO);
        assert!(flags.contains(NoteFlags::HOPO));
        flags.toggle(NoteFlags::HOPO);
        assert_eq!(flags, NoteFlags::FIVE_FRET_GUITAR);
    }
}
