use super::*;

const STACK: [ClipKind; 4] = [
    ClipKind::Graphics,
    ClipKind::Video,
    ClipKind::Audio,
    ClipKind::Music,
];

#[test]
fn contiguous_bands_map_by_division() {
    let bands = TrackBands {
        top_px: 0.0,
        band_height_px: 50.0,
        group_gap_px: 0.0,
    };
    assert_eq!(bands.track_index_at(0.0, &STACK), Some(0));
    assert_eq!(bands.track_index_at(49.9, &STACK), Some(0));
    assert_eq!(bands.track_index_at(50.0, &STACK), Some(1));
    assert_eq!(bands.track_index_at(199.0, &STACK), Some(3));
    assert_eq!(bands.track_index_at(200.0, &STACK), None);
    assert_eq!(bands.track_index_at(-1.0, &STACK), None);
}

#[test]
fn group_gap_is_inserted_once_between_picture_and_sound() {
    let bands = TrackBands {
        top_px: 20.0,
        band_height_px: 40.0,
        group_gap_px: 30.0,
    };
    assert_eq!(bands.band_top(0, &STACK), 20.0);
    assert_eq!(bands.band_top(1, &STACK), 60.0);
    assert_eq!(bands.band_top(2, &STACK), 130.0);
    assert_eq!(bands.band_top(3, &STACK), 170.0);

    assert_eq!(bands.track_index_at(70.0, &STACK), Some(1));
    // Inside the gap.
    assert_eq!(bands.track_index_at(110.0, &STACK), None);
    assert_eq!(bands.track_index_at(135.0, &STACK), Some(2));
    assert_eq!(bands.track_index_at(209.0, &STACK), Some(3));
}

#[test]
fn sound_only_stack_has_no_gap() {
    let bands = TrackBands {
        top_px: 0.0,
        band_height_px: 10.0,
        group_gap_px: 100.0,
    };
    let kinds = [ClipKind::Audio, ClipKind::Music];
    assert_eq!(bands.track_index_at(15.0, &kinds), Some(1));
}

#[test]
fn validate_rejects_bad_geometry() {
    assert!(TrackBands::default().validate().is_ok());
    let bad = TrackBands {
        band_height_px: 0.0,
        ..TrackBands::default()
    };
    assert!(bad.validate().is_err());
    let bad = TrackBands {
        group_gap_px: -2.0,
        ..TrackBands::default()
    };
    assert!(bad.validate().is_err());
}
