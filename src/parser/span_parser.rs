use crate::parser::section_parser::{SpecialEvent, TextEvent};
use crate::song::note::Tick;
use crate::song::track::{DiscoFlip, DrumFill, SoloSpan, StarPower};
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1};
use nom::combinator::{eof, opt, recognize};
use nom::{IResult, Parser};

pub const SOLO_START: &str = "solo";
pub const SOLO_END: &str = "soloend";
pub const STAR_POWER_KEY: u32 = 2;
pub const DRUM_FILL_KEY: u32 = 64;

/// Pair `solo`/`soloend` markers into spans.
///
/// A start inside an open solo and an end outside of one are ignored, a solo
/// still open at the end of the track is discarded.
pub fn parse_solo_spans(text_events: &[TextEvent]) -> Vec<SoloSpan> {
    let mut markers: Vec<&TextEvent> = text_events
        .iter()
        .filter(|e| e.data == SOLO_START || e.data == SOLO_END)
        .collect();
    markers.sort_by_key(|e| e.position);

    let mut spans = Vec::new();
    let mut open: Option<Tick> = None;
    for marker in markers {
        match (marker.data, open) {
            (SOLO_START, None) => open = Some(marker.position),
            (SOLO_END, Some(start)) => {
                spans.push(SoloSpan {
                    start,
                    end: marker.position,
                });
                open = None;
            }
            _ => log::debug!("Ignoring {} marker at {}", marker.data, marker.position),
        }
    }
    if let Some(start) = open {
        log::debug!("Discarding solo started at {start} without end");
    }
    spans
}

fn special_spans(
    special_events: &[SpecialEvent],
    key: u32,
) -> impl Iterator<Item = (Tick, Tick)> + '_ {
    special_events
        .iter()
        .filter(move |e| e.key == key)
        .map(|e| (e.position, e.length))
}

/// Star power phrases, every other special key is ignored.
pub fn parse_sp_phrases(special_events: &[SpecialEvent]) -> Vec<StarPower> {
    special_spans(special_events, STAR_POWER_KEY)
        .map(|(position, length)| StarPower { position, length })
        .collect()
}

pub fn parse_drum_fills(special_events: &[SpecialEvent]) -> Vec<DrumFill> {
    special_spans(special_events, DRUM_FILL_KEY)
        .map(|(position, length)| DrumFill { position, length })
        .collect()
}

/// Parse `mix_<difficulty>_drums<mode>` with an optional trailing `d`,
/// returning the tag without the `d` and whether the `d` is present.
fn parse_mix_event(i: &str) -> IResult<&str, (&str, bool)> {
    let (i, (base, suffix)) = (
        recognize((tag("mix_"), digit1, tag("_drums"), digit1)),
        opt(char('d')),
    )
        .parse(i)?;
    let (i, _) = eof(i)?;
    Ok((i, (base, suffix.is_some())))
}

/// Pair disco flip markers: `mix_<n>_drums<m>d` starts a flip, the same tag
/// without the `d` ends it.
pub fn parse_disco_flips<'a>(text_events: &[TextEvent<'a>]) -> Vec<DiscoFlip> {
    let mut mix_events: Vec<(Tick, &'a str, bool)> = text_events
        .iter()
        .filter_map(|e| {
            parse_mix_event(e.data)
                .ok()
                .map(|(_, (base, is_start))| (e.position, base, is_start))
        })
        .collect();
    mix_events.sort_by_key(|(position, _, _)| *position);

    let mut flips = Vec::new();
    let mut open: Option<(Tick, &str)> = None;
    for (position, base, is_start) in mix_events {
        match (is_start, open) {
            (true, None) => open = Some((position, base)),
            (false, Some((start, open_base))) if open_base == base => {
                flips.push(DiscoFlip {
                    position: start,
                    length: position - start,
                });
                open = None;
            }
            _ => log::debug!("Ignoring unpaired disco flip marker {base} at {position}"),
        }
    }
    if let Some((start, base)) = open {
        log::debug!("Discarding disco flip {base} started at {start} without end");
    }
    flips
}
