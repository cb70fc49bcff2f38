use super::*;

#[test]
fn defaults_are_valid() {
    let opts = EditorOpts::default();
    opts.validate().unwrap();
    assert_eq!(opts.tick_period(), Duration::from_millis(100));
    assert_eq!(opts.min_zoom, 1.0);
    assert_eq!(opts.max_zoom, 50.0);
}

#[test]
fn partial_json_keeps_defaults() {
    let opts = EditorOpts::from_reader(
        r#"{ "grid_size_sec": 0.5, "bands": { "band_height_px": 48, "group_gap_px": 12 } }"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(opts.grid_size_sec, 0.5);
    assert_eq!(opts.bands.band_height_px, 48.0);
    assert_eq!(opts.bands.group_gap_px, 12.0);
    assert_eq!(opts.bands.top_px, 0.0);
    assert_eq!(opts.fit_ratio, 0.9);
}

#[test]
fn invalid_values_are_config_errors() {
    let cases = [
        EditorOpts {
            min_zoom: 60.0,
            ..EditorOpts::default()
        },
        EditorOpts {
            fit_ratio: 1.0,
            ..EditorOpts::default()
        },
        EditorOpts {
            zoom_step: 1.0,
            ..EditorOpts::default()
        },
        EditorOpts {
            tick_period_ms: 0,
            ..EditorOpts::default()
        },
        EditorOpts {
            grid_size_sec: f64::NAN,
            ..EditorOpts::default()
        },
    ];
    for opts in cases {
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("config error:"), "{err}");
    }
}

#[test]
fn missing_file_is_reported() {
    let err = EditorOpts::from_path("target/definitely/missing/opts.json").unwrap_err();
    assert!(err.to_string().contains("open editor options"));
}
