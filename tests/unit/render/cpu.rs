use super::*;

const BG: Color = Color::rgb(10, 20, 30);

fn renderer(w: u32, h: u32) -> CpuRenderer {
    let mut r = CpuRenderer::new(SurfaceDesc::new(w, h)).unwrap();
    r.clear(BG).unwrap();
    r
}

fn thick(color: Color) -> StrokeStyle {
    StrokeStyle { color, width: 8.0 }
}

#[test]
fn rejects_zero_sized_surface() {
    assert!(CpuRenderer::new(SurfaceDesc::new(0, 10)).is_err());
}

#[test]
fn clear_fills_background() {
    let mut r = renderer(16, 8);
    let frame = r.snapshot(None).unwrap();
    assert_eq!((frame.width, frame.height), (16, 8));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(frame.pixel(15, 7), Some([10, 20, 30, 255]));
}

#[test]
fn strokes_persist_across_flushes() {
    let mut r = renderer(64, 32);
    let red = Color::rgb(255, 0, 0);
    r.stroke_segment(Point::new(4.0, 16.0), Point::new(30.0, 16.0), &thick(red))
        .unwrap();
    r.flush().unwrap();
    r.stroke_segment(Point::new(30.0, 16.0), Point::new(60.0, 16.0), &thick(red))
        .unwrap();
    r.flush().unwrap();

    let frame = r.snapshot(None).unwrap();
    assert_eq!(frame.pixel(16, 16), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(45, 16), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(45, 2), Some([10, 20, 30, 255]));
}

#[test]
fn clear_discards_previous_drawing() {
    let mut r = renderer(32, 32);
    r.stroke_segment(
        Point::new(0.0, 16.0),
        Point::new(32.0, 16.0),
        &thick(Color::rgb(255, 255, 255)),
    )
    .unwrap();
    r.flush().unwrap();
    r.clear(BG).unwrap();
    let frame = r.snapshot(None).unwrap();
    assert_eq!(frame.pixel(16, 16), Some([10, 20, 30, 255]));
}

#[test]
fn fill_is_translucent() {
    let mut r = renderer(32, 32);
    r.fill_polygon(
        &[
            Point::new(2.0, 2.0),
            Point::new(30.0, 2.0),
            Point::new(30.0, 30.0),
            Point::new(2.0, 30.0),
        ],
        Color::rgb(255, 255, 255),
        0.35,
    )
    .unwrap();
    let frame = r.snapshot(None).unwrap();
    let [red, _, _, a] = frame.pixel(16, 16).unwrap();
    assert_eq!(a, 255);
    assert!(red > 10 && red < 255, "expected blended channel, got {red}");
}

#[test]
fn cursor_only_appears_in_snapshot() {
    let mut r = renderer(40, 40);
    let cursor = Cursor {
        position: Point::new(20.0, 20.0),
        heading: 0.0,
        color: Color::rgb(0, 255, 0),
        size: 12.0,
    };
    let with = r.snapshot(Some(&cursor)).unwrap();
    assert_eq!(with.pixel(24, 20), Some([0, 255, 0, 255]));

    let without = r.snapshot(None).unwrap();
    assert_eq!(without.pixel(24, 20), Some([10, 20, 30, 255]));
}

#[test]
fn device_scale_enlarges_backing_store() {
    let desc = SurfaceDesc::new(20, 10).with_device_scale(2.0);
    let mut r = CpuRenderer::new(desc).unwrap();
    r.clear(BG).unwrap();
    r.stroke_segment(
        Point::new(0.0, 5.0),
        Point::new(20.0, 5.0),
        &thick(Color::rgb(0, 0, 255)),
    )
    .unwrap();
    let frame = r.snapshot(None).unwrap();
    assert_eq!((frame.width, frame.height), (40, 20));
    assert_eq!(frame.pixel(20, 10), Some([0, 0, 255, 255]));
}

#[test]
fn disabled_grid_draws_nothing() {
    let mut r = renderer(40, 40);
    r.draw_grid(&GridStyle {
        enabled: false,
        ..GridStyle::default()
    })
    .unwrap();
    let frame = r.snapshot(None).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}
