use super::*;

fn frame(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: [px, px].concat(),
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::default(),
    }
}

#[test]
fn in_memory_sink_resets_on_begin() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([1, 2, 3, 255])).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.config(), Some(cfg()));

    sink.begin(cfg()).unwrap();
    assert!(sink.frames.is_empty());
}

#[test]
fn in_memory_sink_reports_duration_at_configured_fps() {
    let mut sink = InMemorySink::new();
    assert_eq!(sink.duration_secs(), None);
    sink.begin(SinkConfig {
        fps: Fps::new(30, 1).unwrap(),
        ..cfg()
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &frame([1, 2, 3, 255])).unwrap();
    sink.push_frame(FrameIndex(44), &frame([1, 2, 3, 255])).unwrap();
    assert_eq!(sink.duration_secs(), Some(1.5));
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    assert_eq!(unpremultiply(&[64, 0, 128, 128]), vec![128, 0, 255, 128]);
    assert_eq!(unpremultiply(&[9, 9, 9, 0]), vec![9, 9, 9, 0]);
    assert_eq!(unpremultiply(&[9, 8, 7, 255]), vec![9, 8, 7, 255]);
}

#[test]
fn frame_paths_are_zero_padded() {
    let p = PngSequenceSink::frame_path(Path::new("out"), FrameIndex(42));
    assert_eq!(p, Path::new("out").join("frame_000042.png"));
}

#[test]
fn png_sequence_writes_decodable_files() {
    let dir = std::env::temp_dir().join(format!("turtle_canvas_pngs_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([10, 20, 30, 255])).unwrap();
    sink.push_frame(FrameIndex(3), &frame([40, 50, 60, 255])).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    let img = image::open(dir.join("frame_000003.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(1, 0).0, [40, 50, 60, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}
