use crate::parser::track_builder::{Modifier, TickGroups};
use crate::song::note::{Lane, Note, NoteFlags, Tick};

/// Set the HOPO, force and tap flags of guitar notes.
///
/// A single note is a natural HOPO when it follows a different single note
/// by at most `max_hopo_gap` ticks. A force modifier flips that state, a tap
/// modifier turns the note into a tap which is never a HOPO.
pub fn resolve_hopos(mut notes: Vec<Note>, groups: &TickGroups, max_hopo_gap: Tick) -> Vec<Note> {
    // lane of the previous note, `None` when it was a chord
    let mut previous: Option<(Tick, Option<Lane>)> = None;
    for note in &mut notes {
        let single_lane = (!note.is_chord()).then(|| note.lanes[0].lane);
        let natural_hopo = match (previous, single_lane) {
            (Some((prev_position, Some(prev_lane))), Some(lane)) => {
                prev_lane != lane && note.position - prev_position <= max_hopo_gap
            }
            _ => false,
        };
        previous = Some((note.position, single_lane));
        if natural_hopo {
            note.flags.insert(NoteFlags::HOPO);
        }

        let Some(events) = groups.get(&note.position) else {
            continue;
        };
        if events.has_modifier(Modifier::ForceFlip) {
            note.flags.toggle(NoteFlags::HOPO);
            note.flags.insert(NoteFlags::FORCE_FLIP);
        }
        if events.has_modifier(Modifier::Tap) {
            note.flags.remove(NoteFlags::HOPO);
            note.flags.insert(NoteFlags::TAP);
        }
    }
    notes
}
