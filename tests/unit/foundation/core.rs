use super::*;

#[test]
fn layout_sizing_follows_container_with_floor() {
    let s = SurfaceDesc::from_layout(832.0, 2.0);
    assert_eq!(s.canvas, Canvas { width: 800, height: 360 });
    assert_eq!(s.device_scale, 2.0);

    let narrow = SurfaceDesc::from_layout(120.0, 1.0);
    assert_eq!(narrow.canvas.width, 300);
}

#[test]
fn backing_size_scales_and_validates() {
    let s = SurfaceDesc::new(300, 200).with_device_scale(1.5);
    assert_eq!(s.backing_size().unwrap(), (450, 300));

    assert!(SurfaceDesc::new(0, 10).backing_size().is_err());
    assert!(
        SurfaceDesc::new(10, 10)
            .with_device_scale(f64::NAN)
            .backing_size()
            .is_err()
    );
    assert!(SurfaceDesc::new(70_000, 10).backing_size().is_err());
}

#[test]
fn canvas_center_is_half_extent() {
    let c = Canvas {
        width: 400,
        height: 360,
    };
    assert_eq!(c.center(), Point::new(200.0, 180.0));
}

#[test]
fn fps_converts_frames_to_secs() {
    let fps = Fps::new(60, 1).unwrap();
    assert!((fps.frames_to_secs(90) - 1.5).abs() < 1e-12);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}
