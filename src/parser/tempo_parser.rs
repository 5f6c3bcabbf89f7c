use crate::parser::primitive_parser::parse_whole_uint;
use crate::parser::section_parser::{ChartSections, TimeSigEvent};
use crate::song::tempo_map::{
    Bpm, TempoMap, TimeSignature, DEFAULT_RESOLUTION, MAX_DENOMINATOR_EXPONENT,
};
use crate::ChartError;

pub const HEADER_SECTION: &str = "Song";
pub const SYNC_TRACK_SECTION: &str = "SyncTrack";

/// Resolution declared in the `[Song]` header.
///
/// Quoted, negative or zero values are ignored in favor of the default.
pub fn parse_resolution(sections: &ChartSections) -> u32 {
    let Some(value) = sections
        .first_non_empty(HEADER_SECTION)
        .and_then(|header| header.value("Resolution"))
    else {
        return DEFAULT_RESOLUTION;
    };
    match parse_whole_uint(value) {
        Some(resolution) if resolution > 0 => resolution,
        _ => {
            log::debug!("Ignoring invalid resolution {value}");
            DEFAULT_RESOLUTION
        }
    }
}

/// Build the tempo map from the `[SyncTrack]` section.
pub fn parse_tempo_map(sections: &ChartSections, resolution: u32) -> Result<TempoMap, ChartError> {
    let Some(sync_track) = sections.first_non_empty(SYNC_TRACK_SECTION) else {
        log::debug!("No sync track, using default tempo map");
        return Ok(TempoMap::new(vec![], vec![], resolution));
    };
    let time_sigs = sync_track
        .ts_events
        .iter()
        .filter(|e| {
            if e.numerator == 0 {
                log::debug!("Skipping time signature with zero numerator at {}", e.position);
            }
            e.numerator > 0
        })
        .map(decode_time_signature)
        .collect::<Result<Vec<_>, _>>()?;
    let bpms = sync_track
        .bpm_events
        .iter()
        .map(|e| Bpm {
            position: e.position,
            bpm: e.bpm,
        })
        .collect();
    Ok(TempoMap::new(time_sigs, bpms, resolution))
}

fn decode_time_signature(event: &TimeSigEvent) -> Result<TimeSignature, ChartError> {
    let exponent = event.denominator_exponent;
    if exponent >= MAX_DENOMINATOR_EXPONENT {
        let msg = format!(
            "time signature denominator exponent {exponent} at tick {} is too large",
            event.position
        );
        log::error!("{msg}");
        return Err(ChartError::ParsingError(msg));
    }
    Ok(TimeSignature {
        position: event.position,
        numerator: event.numerator,
        denominator: 1 << exponent,
    })
}
