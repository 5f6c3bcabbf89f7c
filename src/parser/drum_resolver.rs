use crate::parser::track_builder::{DrumPad, Modifier, TickGroups};
use crate::song::note::{DrumLane, Lane, Note, NoteFlags};

/// Lane and intrinsic flags of a pad hit. The fifth-lane pad moves to blue
/// when the four-lane green pad is hit at the same tick.
const fn pad_lane(pad: DrumPad, has_four_lane_green: bool) -> (DrumLane, NoteFlags) {
    match pad {
        DrumPad::Kick => (DrumLane::Kick, NoteFlags::NONE),
        DrumPad::DoubleKick => (DrumLane::Kick, NoteFlags::DOUBLE_KICK),
        DrumPad::Red => (DrumLane::Red, NoteFlags::NONE),
        DrumPad::Yellow => (DrumLane::Yellow, NoteFlags::NONE),
        DrumPad::Blue => (DrumLane::Blue, NoteFlags::NONE),
        DrumPad::FourLaneGreen => (DrumLane::Green, NoteFlags::NONE),
        DrumPad::FifthLane if has_four_lane_green => (DrumLane::Blue, NoteFlags::NONE),
        DrumPad::FifthLane => (DrumLane::Green, NoteFlags::NONE),
    }
}

const fn target_pad(modifier: Modifier) -> Option<(DrumPad, NoteFlags)> {
    match modifier {
        Modifier::Accent(pad) => Some((pad, NoteFlags::ACCENT)),
        Modifier::Ghost(pad) => Some((pad, NoteFlags::GHOST)),
        Modifier::Cymbal(pad) => Some((pad, NoteFlags::CYMBAL)),
        Modifier::ForceFlip | Modifier::Tap => None,
    }
}

fn modifier_flags(pad: DrumPad, modifiers: &[Modifier]) -> NoteFlags {
    modifiers
        .iter()
        .filter_map(|m| target_pad(*m))
        .filter(|(target, _)| *target == pad)
        .fold(NoteFlags::NONE, |acc, (_, flags)| acc | flags)
}

fn is_double_kick(note: &Note) -> bool {
    note.flags.contains(NoteFlags::DOUBLE_KICK)
}

/// Turn each pad hit into its own drum note with dynamics and cymbal flags.
///
/// Notes of one tick are ordered by lane, a double kick following the plain
/// kick. A pad hit twice at the same tick keeps the last length.
pub fn resolve_drum_notes(groups: &TickGroups) -> Vec<Note> {
    let mut notes = Vec::new();
    for (&position, events) in groups {
        for modifier in &events.modifiers {
            match target_pad(*modifier) {
                Some((pad, _)) if events.has_pad(pad) => {}
                _ => log::debug!("Dropping orphaned drum modifier {modifier:?} at {position}"),
            }
        }

        let has_four_lane_green = events.has_pad(DrumPad::FourLaneGreen);
        let mut tick_notes: Vec<Note> = Vec::with_capacity(events.pads.len());
        for &(pad, length) in &events.pads {
            let (lane, pad_flags) = pad_lane(pad, has_four_lane_green);
            let flags = NoteFlags::DRUMS | pad_flags | modifier_flags(pad, &events.modifiers);
            let note = Note::new(position, Lane::Drums(lane), length, flags);
            let duplicate = tick_notes.iter_mut().find(|n| {
                n.lanes[0].lane == note.lanes[0].lane && is_double_kick(n) == is_double_kick(&note)
            });
            match duplicate {
                Some(existing) => existing.lanes[0].length = length,
                None => tick_notes.push(note),
            }
        }
        tick_notes.sort_by_key(|n| (n.lanes[0].lane, is_double_kick(n)));
        notes.extend(tick_notes);
    }
    notes
}
