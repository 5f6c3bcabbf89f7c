use crate::song::note::Tick;
use serde::Serialize;

pub const DEFAULT_RESOLUTION: u32 = 192;

/// Millibeats per minute used when a chart has no tempo at tick 0.
pub const DEFAULT_BPM: u32 = 120_000;

/// Time signature denominators are stored as powers of two in charts; larger
/// exponents would not fit the denominator.
pub const MAX_DENOMINATOR_EXPONENT: u32 = 32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Bpm {
    pub position: Tick,
    /// Beats per minute times 1000, as written in the chart.
    pub bpm: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSignature {
    pub position: Tick,
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    /// Length of a measure in quarter notes.
    fn quarters_per_measure(&self) -> f64 {
        f64::from(self.numerator) * 4.0 / f64::from(self.denominator)
    }
}

/// Sorted tempo and time signature timeline of a song.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempoMap {
    time_sigs: Vec<TimeSignature>,
    bpms: Vec<Bpm>,
    resolution: u32,
}

impl Default for TempoMap {
    fn default() -> Self {
        TempoMap::new(vec![], vec![], DEFAULT_RESOLUTION)
    }
}

impl TempoMap {
    /// Events are sorted by tick, the last event written at a given tick wins
    /// and 4/4 plus the default tempo are added at tick 0 when missing.
    pub fn new(time_sigs: Vec<TimeSignature>, bpms: Vec<Bpm>, resolution: u32) -> Self {
        let mut time_sigs = dedup_by_position(time_sigs, |ts| ts.position);
        if time_sigs.first().map_or(true, |ts| ts.position != 0) {
            time_sigs.insert(
                0,
                TimeSignature {
                    position: 0,
                    numerator: 4,
                    denominator: 4,
                },
            );
        }
        let mut bpms = dedup_by_position(bpms, |bpm| bpm.position);
        if bpms.first().map_or(true, |bpm| bpm.position != 0) {
            bpms.insert(
                0,
                Bpm {
                    position: 0,
                    bpm: DEFAULT_BPM,
                },
            );
        }
        TempoMap {
            time_sigs,
            bpms,
            resolution,
        }
    }

    pub fn time_sigs(&self) -> &[TimeSignature] {
        &self.time_sigs
    }

    pub fn bpms(&self) -> &[Bpm] {
        &self.bpms
    }

    pub const fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of quarter note beats elapsed at `tick`.
    pub fn to_beats(&self, tick: Tick) -> f64 {
        f64::from(tick) / f64::from(self.resolution)
    }

    /// Seconds elapsed at `tick`, following every tempo change before it.
    pub fn to_seconds(&self, tick: Tick) -> f64 {
        let mut seconds = 0.0;
        let mut last_tick = 0;
        let mut last_bpm = DEFAULT_BPM;
        for bpm in self.bpms.iter().take_while(|bpm| bpm.position <= tick) {
            seconds += self.ticks_to_seconds(bpm.position - last_tick, last_bpm);
            last_tick = bpm.position;
            last_bpm = bpm.bpm;
        }
        seconds + self.ticks_to_seconds(tick - last_tick, last_bpm)
    }

    /// Measures elapsed at `tick`, following every time signature before it.
    pub fn to_measures(&self, tick: Tick) -> f64 {
        let mut measures = 0.0;
        let mut last_tick = 0;
        let mut last_quarters = 4.0;
        for ts in self.time_sigs.iter().take_while(|ts| ts.position <= tick) {
            measures += self.to_beats(ts.position - last_tick) / last_quarters;
            last_tick = ts.position;
            last_quarters = ts.quarters_per_measure();
        }
        measures + self.to_beats(tick - last_tick) / last_quarters
    }

    fn ticks_to_seconds(&self, ticks: Tick, millibeats: u32) -> f64 {
        if millibeats == 0 {
            return 0.0;
        }
        self.to_beats(ticks) * 60_000.0 / f64::from(millibeats)
    }
}

fn dedup_by_position<T>(mut events: Vec<T>, position: impl Fn(&T) -> Tick) -> Vec<T> {
    // stable sort keeps input order among equal ticks
    events.sort_by_key(|e| position(e));
    let mut deduped: Vec<T> = Vec::with_capacity(events.len());
    for event in events {
        match deduped.last_mut() {
            Some(last) if position(last) == position(&event) => *last = event,
            _ => deduped.push(event),
        }
    }
    deduped
}
