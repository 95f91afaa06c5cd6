use super::*;

#[test]
fn defaults_match_session_rules() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.turtle.pen_color, Color::rgb(0x22, 0xc5, 0x5e));
    assert_eq!(cfg.turtle.pen_width, 2.0);
    assert_eq!(cfg.turtle.heading, 0.0);
    assert_eq!(cfg.playback.mode, PlaybackMode::Animated);
    assert_eq!(cfg.playback.fill_alpha, 0.35);
    assert_eq!(cfg.grid.spacing, 20.0);
    assert_eq!(cfg.fps, Fps::default());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg: EngineConfig = serde_json::from_str(
        r##"{
            "background": "#000000",
            "playback": { "mode": "instant" },
            "turtle": { "pen_color": "red", "circle": { "divisor": 3.0, "min_steps": 12 } }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.background, Color::rgb(0, 0, 0));
    assert_eq!(cfg.playback.mode, PlaybackMode::Instant);
    assert_eq!(cfg.playback.turn_frames, 10);
    assert_eq!(cfg.turtle.pen_color, Color::rgb(255, 0, 0));
    assert_eq!(cfg.turtle.pen_width, 2.0);
    assert_eq!(cfg.turtle.circle.min_steps, 12);
    assert!(cfg.grid.enabled);
}

#[test]
fn playback_override_values() {
    let base = EngineConfig::default();
    let instant = base.clone().with_playback_override(Some(" Instant "));
    assert_eq!(instant.playback.mode, PlaybackMode::Instant);
    let back = instant.with_playback_override(Some("animated"));
    assert_eq!(back.playback.mode, PlaybackMode::Animated);
    let unknown = base.clone().with_playback_override(Some("warp"));
    assert_eq!(unknown, base);
    assert_eq!(base.clone().with_playback_override(None), base);
}

#[test]
fn missing_config_file_is_validation_error() {
    let err = EngineConfig::from_json_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, TurtleError::Validation(_)));
}

#[test]
fn reads_config_file() {
    let dir = std::env::temp_dir().join(format!("turtle_canvas_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cfg.json");
    std::fs::write(&path, r#"{ "cursor_size": 4.0 }"#).unwrap();
    let cfg = EngineConfig::from_json_path(&path).unwrap();
    assert_eq!(cfg.cursor_size, 4.0);

    std::fs::write(&path, "{ not json").unwrap();
    let err = EngineConfig::from_json_path(&path).unwrap_err();
    assert!(matches!(err, TurtleError::Serde(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rejects_zero_frame_rate() {
    let mut cfg = EngineConfig::default();
    assert!(cfg.validate().is_ok());
    cfg.fps.den = 0;
    assert!(matches!(cfg.validate(), Err(TurtleError::Validation(_))));

    let dir = std::env::temp_dir().join(format!("turtle_canvas_fps_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cfg.json");
    std::fs::write(&path, r#"{ "fps": { "num": 0, "den": 1 } }"#).unwrap();
    let err = EngineConfig::from_json_path(&path).unwrap_err();
    assert!(matches!(err, TurtleError::Validation(_)));
    let _ = std::fs::remove_dir_all(&dir);
}
