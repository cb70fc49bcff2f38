use super::*;

const DOC: &str = r##"
{
  "tracks": [
    { "id": 3, "name": "audio", "colorHex": "#33aa66", "orderIndex": 2 },
    { "id": 1, "name": "Video", "colorHex": "#3366ff", "orderIndex": 0 },
    { "id": 2, "name": "GRAPHICS", "orderIndex": 1, "isActive": false }
  ],
  "clips": [
    { "id": 1, "name": "Intro", "startTime": 0.0, "duration": 10.0, "trackId": 1, "clipType": "Video" },
    { "id": 2, "name": "Lower third", "startTime": 2.0, "duration": 4.0, "trackId": 2, "clipType": "graphics", "locked": true }
  ]
}
"##;

#[test]
fn document_loads_into_valid_model() {
    let doc = TimelineDocument::from_reader(DOC.as_bytes()).unwrap();
    let model = doc.to_model(60.0).unwrap();

    let ids: Vec<u64> = model.tracks().iter().map(|t| t.id.0).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert!(!model.track(TrackId(2)).unwrap().visible);
    assert_eq!(
        model.track(TrackId(1)).unwrap().color_hex.as_deref(),
        Some("#3366ff")
    );
    assert!(model.clip(ClipId(2)).unwrap().locked);
    assert_eq!(model.total_duration_sec(), 60.0);
}

#[test]
fn unknown_layer_name_fails_load() {
    let record = TrackRecord {
        id: TrackId(9),
        name: "Subtitles".to_string(),
        color_hex: None,
        order_index: 0,
        is_active: true,
    };
    let err = record.to_track().unwrap_err();
    assert!(err.to_string().contains("unrecognized layer name"));
}

#[test]
fn mismatched_clip_fails_load() {
    let doc = TimelineDocument {
        tracks: vec![TrackRecord {
            id: TrackId(1),
            name: "Video".to_string(),
            color_hex: None,
            order_index: 0,
            is_active: true,
        }],
        clips: vec![ClipRecord {
            id: ClipId(1),
            name: "bed".to_string(),
            start_time: 0.0,
            duration: 30.0,
            track_id: TrackId(1),
            clip_type: ClipKind::Music,
            locked: false,
        }],
    };
    assert!(doc.to_model(60.0).is_err());
}

#[test]
fn library_item_duration_fallback() {
    let item: LibraryItem = serde_json::from_str(
        r#"{ "id": "lib-7", "name": "Drone shot", "type": "video" }"#,
    )
    .unwrap();
    assert_eq!(item.kind, ClipKind::Video);
    assert_eq!(item.clip_duration(30.0), 30.0);

    let item = LibraryItem {
        estimated_duration: Some(12.5),
        ..item
    };
    assert_eq!(item.clip_duration(30.0), 12.5);

    let item = LibraryItem {
        estimated_duration: Some(-1.0),
        ..item
    };
    assert_eq!(item.clip_duration(30.0), 30.0);

    let draft = item.draft(4.0, TrackId(1), 30.0);
    assert_eq!(draft.name, "Drone shot");
    assert_eq!(draft.duration_sec, 30.0);
    assert_eq!(draft.track_id, TrackId(1));
}

#[test]
fn snapshot_uses_sink_field_names() {
    let doc = TimelineDocument::from_reader(DOC.as_bytes()).unwrap();
    let model = doc.to_model(60.0).unwrap();
    let saved = TimelineDocument::from_model(doc.tracks.clone(), &model);
    let json = saved.to_json_pretty().unwrap();
    assert!(json.contains("\"startTime\""));
    assert!(json.contains("\"clipType\": \"Graphics\""));
    assert!(json.contains("\"locked\": true"));

    let reloaded = TimelineDocument::from_reader(json.as_bytes()).unwrap();
    assert_eq!(reloaded.clips.len(), 2);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = TimelineDocument::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
