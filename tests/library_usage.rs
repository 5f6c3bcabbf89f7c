//! Integration tests for chartread library usage.
//!
//! These tests verify that the library can be used as a dependency
//! from external projects.

use chartread::{
    parse_chart_data, ChartError, ChartParser, Difficulty, DrumSettings, HopoThreshold,
    Instrument, Metadata, NoteFlags, ParserConfig, Song,
};

const DEMO_CHART: &str = "test-files/demo.chart";

fn parse_demo() -> Song {
    ChartParser::new(Metadata::new("Demo", "Someone", "Somebody"))
        .parse_file(DEMO_CHART)
        .expect("Failed to parse demo chart")
}

/// Test that all major types are accessible from the library.
#[test]
fn test_types_accessible() {
    // If any re-export is missing, this test will fail to compile.
    fn _assert_types() {
        let _: fn(&str, &ParserConfig) -> Result<Song, ChartError> = parse_chart_data;
        let _: HopoThreshold = HopoThreshold::default();
        let _: DrumSettings = DrumSettings::default_settings();
    }
}

#[test]
fn test_parse_demo_file() {
    let song = parse_demo();

    assert_eq!(
        song.instruments(),
        vec![Instrument::Guitar, Instrument::Bass, Instrument::Drums]
    );
    assert_eq!(
        song.difficulties(Instrument::Guitar),
        vec![Difficulty::Hard, Difficulty::Expert]
    );

    // caller metadata wins over the header
    let global_data = song.global_data();
    assert_eq!(global_data.name(), "Demo");
    assert_eq!(global_data.artist(), "Someone");
    assert_eq!(global_data.charter(), "Somebody");
    assert_eq!(global_data.resolution(), 192);
}

#[test]
fn test_demo_tempo_map() {
    let song = parse_demo();
    let tempo_map = song.global_data().tempo_map();

    assert_eq!(tempo_map.bpms().len(), 2);
    assert_eq!(tempo_map.time_sigs().len(), 2);
    assert_eq!(tempo_map.time_sigs()[1].denominator, 8);
    assert!((tempo_map.to_seconds(768) - 2.0).abs() < 1e-9);
    assert!((tempo_map.to_seconds(1536) - 3.6).abs() < 1e-9);
    assert!((tempo_map.to_measures(1536) - 2.0).abs() < 1e-9);
}

#[test]
fn test_demo_guitar_track() {
    let song = parse_demo();
    let track = song
        .track(Instrument::Guitar, Difficulty::Expert)
        .expect("Expert guitar should be present");
    let notes = track.notes();

    assert_eq!(notes.len(), 8);
    assert!(notes[1].is_hopo(), "close single notes are HOPOs");
    assert!(notes[2].is_chord());
    assert!(!notes[2].is_hopo());
    assert!(notes[3].flags.contains(NoteFlags::FORCE_FLIP));
    assert!(notes[3].is_hopo(), "forced note after a chord");
    assert_eq!(notes[3].length(), 96);
    assert!(notes[4].is_tap());
    assert_eq!(track.sp_phrases().len(), 1);

    let solos = track.solos(&DrumSettings::default_settings());
    assert_eq!(solos.len(), 1);
    assert_eq!(solos[0].value, 300);
}

#[test]
fn test_demo_drum_track() {
    let song = parse_demo();
    let track = song
        .track(Instrument::Drums, Difficulty::Expert)
        .expect("Expert drums should be present");

    assert_eq!(track.notes().len(), 7);
    assert!(track
        .notes()
        .iter()
        .all(|n| n.flags.contains(NoteFlags::DRUMS)));
    assert_eq!(track.drum_fills().len(), 1);
    assert_eq!(track.disco_flips().len(), 1);
    assert_eq!(track.disco_flips()[0].position, 192);
    assert_eq!(track.disco_flips()[0].length, 384);

    let all_pads = track.solos(&DrumSettings::default_settings());
    assert_eq!(all_pads[0].value, 700);
    let no_kick = track.solos(&DrumSettings {
        enable_double_kick: true,
        disable_kick: true,
    });
    assert_eq!(no_kick[0].value, 500);
    let single_kick = track.solos(&DrumSettings {
        enable_double_kick: false,
        disable_kick: false,
    });
    assert_eq!(single_kick[0].value, 600);
}

#[test]
fn test_parser_options() {
    let song = ChartParser::default()
        .permit_instruments([Instrument::Drums])
        .parse_solos(false)
        .parse_file(DEMO_CHART)
        .expect("Failed to parse demo chart");

    assert_eq!(song.instruments(), vec![Instrument::Drums]);
    let track = song.track(Instrument::Drums, Difficulty::Expert).unwrap();
    assert!(track
        .solos(&DrumSettings::default_settings())
        .is_empty());
}

#[test]
fn test_json_configuration() {
    let config = ParserConfig {
        hopo_threshold: HopoThreshold::HopoFrequency(200),
        ..ParserConfig::default()
    };
    let json = config.to_json().unwrap();
    let config = ParserConfig::from_json(&json).unwrap();

    let text = std::fs::read_to_string(DEMO_CHART).unwrap();
    let song = parse_chart_data(&text, &config).unwrap();
    let notes = song
        .track(Instrument::Guitar, Difficulty::Expert)
        .unwrap()
        .notes();
    // 768 -> 960 is now close enough
    assert!(notes[6].is_hopo());
}

/// Test error handling for invalid data.
#[test]
fn test_parse_error() {
    let result = ChartParser::default().parse_bytes(&[0u8; 10]);
    assert!(
        matches!(result, Err(ChartError::ParsingError(_))),
        "Should be a ParsingError"
    );

    let result = ChartParser::default().parse_file("test-files/missing.chart");
    assert!(
        matches!(result, Err(ChartError::IoError(_))),
        "Should be an IoError"
    );
}
