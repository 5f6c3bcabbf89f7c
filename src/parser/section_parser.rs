use crate::parser::primitive_parser::{
    parse_event_tag, parse_key_value, parse_opt_uint_arg, parse_section_header,
    parse_tick_prefix, parse_uint_arg, unquote,
};
use crate::song::note::Tick;
use nom::character::complete::space1;
use nom::combinator::rest;
use nom::sequence::preceded;
use nom::{IResult, Parser};

/// Denominator exponent used by `TS` lines which only carry a numerator.
pub const DEFAULT_TS_EXPONENT: u32 = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NoteEvent {
    pub position: Tick,
    pub fret: u32,
    pub length: Tick,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpecialEvent {
    pub position: Tick,
    pub key: u32,
    pub length: Tick,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextEvent<'a> {
    pub position: Tick,
    pub data: &'a str,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BpmEvent {
    pub position: Tick,
    pub bpm: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeSigEvent {
    pub position: Tick,
    pub numerator: u32,
    /// Stored as a power of two exponent, 2 means a quarter note.
    pub denominator_exponent: u32,
}

/// One `[Name] { ... }` block of a chart, lines already typed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChartSection<'a> {
    pub name: &'a str,
    pub key_values: Vec<(&'a str, &'a str)>,
    pub note_events: Vec<NoteEvent>,
    pub special_events: Vec<SpecialEvent>,
    pub text_events: Vec<TextEvent<'a>>,
    pub bpm_events: Vec<BpmEvent>,
    pub ts_events: Vec<TimeSigEvent>,
}

impl<'a> ChartSection<'a> {
    fn new(name: &'a str) -> Self {
        ChartSection {
            name,
            ..ChartSection::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<&'a str> {
        self.key_values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.key_values.is_empty()
            && self.note_events.is_empty()
            && self.special_events.is_empty()
            && self.text_events.is_empty()
            && self.bpm_events.is_empty()
            && self.ts_events.is_empty()
    }
}

/// Every section of a chart in order of appearance; a name written twice
/// yields two separate occurrences.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChartSections<'a> {
    sections: Vec<ChartSection<'a>>,
}

impl<'a> ChartSections<'a> {
    pub fn all(&self) -> &[ChartSection<'a>] {
        &self.sections
    }

    /// Occurrences of the section `name` in file order.
    pub fn named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s ChartSection<'a>> {
        self.sections.iter().filter(move |s| s.name == name)
    }

    /// First occurrence of the section `name` that is not empty.
    pub fn first_non_empty(&self, name: &str) -> Option<&ChartSection<'a>> {
        self.sections
            .iter()
            .find(|s| s.name == name && !s.is_empty())
    }
}

enum ChartLine<'a> {
    Note(NoteEvent),
    Special(SpecialEvent),
    Text(TextEvent<'a>),
    Bpm(BpmEvent),
    TimeSig(TimeSigEvent),
    KeyValue(&'a str, &'a str),
}

/// Split chart text into sections, malformed lines are skipped.
pub fn parse_chart_sections(text: &str) -> ChartSections<'_> {
    let mut sections = Vec::new();
    let mut current: Option<ChartSection> = None;
    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line == "{" {
            continue;
        }
        if let Ok((_, name)) = parse_section_header(line) {
            if let Some(section) = current.take() {
                log::debug!("Section {} not closed before [{name}]", section.name);
                sections.push(section);
            }
            log::debug!("Parsing section {name}");
            current = Some(ChartSection::new(name));
            continue;
        }
        if line == "}" {
            match current.take() {
                Some(section) => sections.push(section),
                None => log::debug!("Skipping stray closing brace at line {line_number}"),
            }
            continue;
        }
        let Some(section) = current.as_mut() else {
            log::debug!("Skipping line {line_number} outside of any section: {line}");
            continue;
        };
        match parse_chart_line(line) {
            Some(ChartLine::Note(e)) => section.note_events.push(e),
            Some(ChartLine::Special(e)) => section.special_events.push(e),
            Some(ChartLine::Text(e)) => section.text_events.push(e),
            Some(ChartLine::Bpm(e)) => section.bpm_events.push(e),
            Some(ChartLine::TimeSig(e)) => section.ts_events.push(e),
            Some(ChartLine::KeyValue(k, v)) => section.key_values.push((k, v)),
            None => log::debug!("Skipping malformed line {line_number}: {line}"),
        }
    }
    if let Some(section) = current {
        log::debug!("Section {} not closed at end of chart", section.name);
        sections.push(section);
    }
    ChartSections { sections }
}

fn parse_chart_line(line: &str) -> Option<ChartLine<'_>> {
    match parse_tick_prefix(line) {
        Ok((i, position)) => parse_timed_line(i, position)
            .ok()
            .and_then(|(_, parsed)| parsed),
        Err(_) => parse_key_value(line)
            .ok()
            .map(|(_, (key, value))| ChartLine::KeyValue(key, value.trim())),
    }
}

/// Parse the part of a timed line following `<tick> = `.
/// Unsupported tags such as anchors give `None`.
fn parse_timed_line(i: &str, position: Tick) -> IResult<&str, Option<ChartLine<'_>>> {
    let (i, tag) = parse_event_tag(i)?;
    match tag {
        "N" => {
            let (i, (fret, length)) = (parse_uint_arg, parse_uint_arg).parse(i)?;
            let note = NoteEvent {
                position,
                fret,
                length,
            };
            Ok((i, Some(ChartLine::Note(note))))
        }
        "S" => {
            let (i, (key, length)) = (parse_uint_arg, parse_uint_arg).parse(i)?;
            let special = SpecialEvent {
                position,
                key,
                length,
            };
            Ok((i, Some(ChartLine::Special(special))))
        }
        "E" => {
            let (i, data) = preceded(space1, rest).parse(i)?;
            let text = TextEvent {
                position,
                data: unquote(data.trim()),
            };
            Ok((i, Some(ChartLine::Text(text))))
        }
        "B" => {
            let (i, bpm) = parse_uint_arg(i)?;
            Ok((i, Some(ChartLine::Bpm(BpmEvent { position, bpm }))))
        }
        "TS" => {
            let (i, (numerator, exponent)) =
                (parse_uint_arg, parse_opt_uint_arg).parse(i)?;
            let time_sig = TimeSigEvent {
                position,
                numerator,
                denominator_exponent: exponent.unwrap_or(DEFAULT_TS_EXPONENT),
            };
            Ok((i, Some(ChartLine::TimeSig(time_sig))))
        }
        _ => {
            log::debug!("Skipping unsupported event tag {tag} at {position}");
            Ok((i, None))
        }
    }
}
