use super::*;
use crate::engine::session::TurtleEngine;
use crate::foundation::core::SurfaceDesc;

fn bound_bridge() -> Bridge {
    let mut engine = TurtleEngine::default();
    engine.init(SurfaceDesc::new(400, 300)).unwrap();
    Bridge::new(SharedEngine::new(engine))
}

fn queued(bridge: &Bridge) -> Vec<AnimationCommand> {
    bridge
        .engine()
        .unwrap()
        .lock()
        .queued_commands()
        .cloned()
        .collect()
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn unbound_bridge_is_a_no_op() {
    let bridge = Bridge::unbound();
    assert!(!bridge.is_bound());
    bridge.forward(10.0);
    bridge.color("red");
    bridge.circle(5.0, None);
    bridge.end_fill();
    assert_eq!(bridge.position(), None);
    assert_eq!(bridge.heading(), None);
    assert_eq!(bridge.isdown(), None);
}

#[test]
fn bridge_over_unbound_engine_is_a_no_op() {
    let bridge = Bridge::new(SharedEngine::new(TurtleEngine::default()));
    assert!(!bridge.is_bound());
    bridge.forward(10.0);
    assert_eq!(bridge.position(), None);
    assert!(queued(&bridge).is_empty());
}

#[test]
fn square_walk_scenario() {
    let bridge = bound_bridge();
    bridge.forward(100.0);
    assert!(close(bridge.position().unwrap(), Point::new(0.0, 100.0)));
    bridge.right(90.0);
    assert_eq!(bridge.heading(), Some(90.0));
    bridge.forward(100.0);
    assert!(close(bridge.position().unwrap(), Point::new(100.0, 100.0)));
    assert_eq!(queued(&bridge).len(), 3);
}

#[test]
fn pen_up_reposition_scenario() {
    let bridge = bound_bridge();
    bridge.penup();
    bridge.goto(50.0, 50.0);
    bridge.pendown();
    bridge.forward(10.0);

    let cmds = queued(&bridge);
    assert_eq!(cmds.len(), 2);
    match &cmds[0] {
        AnimationCommand::Line { to, strokes, .. } => {
            assert!(!strokes);
            assert_eq!(*to, Point::new(250.0, 100.0));
        }
        other => panic!("expected line, got {other:?}"),
    }
    match &cmds[1] {
        AnimationCommand::Line {
            from, to, strokes, ..
        } => {
            assert!(strokes);
            assert!(((*to - *from).hypot() - 10.0).abs() < 1e-9);
        }
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn full_circle_restores_heading() {
    let bridge = bound_bridge();
    bridge.setheading(33.0);
    bridge.circle(40.0, None);
    let h = bridge.heading().unwrap();
    let diff = (h - 33.0).rem_euclid(360.0);
    assert!(diff < 1e-6 || 360.0 - diff < 1e-6, "heading {h}");
}

#[test]
fn empty_fill_is_single_point() {
    let bridge = bound_bridge();
    bridge.begin_fill();
    assert_eq!(bridge.filling(), Some(true));
    bridge.end_fill();
    assert_eq!(bridge.filling(), Some(false));
    let cmds = queued(&bridge);
    assert!(matches!(&cmds[..], [AnimationCommand::Fill { path, .. }] if path.len() == 1));
}

#[test]
fn invalid_input_is_ignored() {
    let bridge = bound_bridge();
    bridge.color("blue");
    bridge.color("definitely-not-a-color");
    bridge.pensize(-3.0);
    bridge.pensize(f64::NAN);
    bridge.forward(f64::INFINITY);
    bridge.right(f64::NAN);

    let engine = bridge.engine().unwrap().lock();
    let turtle = engine.turtle().unwrap();
    assert_eq!(turtle.pen().color, Color::rgb(0, 0, 255));
    assert_eq!(turtle.pen().width, 2.0);
    assert_eq!(engine.pending_commands(), 0);
}

#[test]
fn color_sets_pen_and_fill() {
    let bridge = bound_bridge();
    bridge.color("#ff0000");
    bridge.pencolor(ColorArg::Components(vec![0.0, 1.0, 0.0]));
    bridge.begin_fill();
    bridge.forward(10.0);
    bridge.right(90.0);
    bridge.forward(10.0);
    bridge.end_fill();

    let cmds = queued(&bridge);
    let Some(AnimationCommand::Fill { color, path }) = cmds.last() else {
        panic!("expected trailing fill");
    };
    assert_eq!(*color, Color::rgb(255, 0, 0));
    assert_eq!(path.len(), 3);
    let AnimationCommand::Line { color, .. } = &cmds[0] else {
        panic!("expected line");
    };
    assert_eq!(*color, Color::rgb(0, 255, 0));
}

#[test]
fn visibility_and_pen_queries() {
    let bridge = bound_bridge();
    assert_eq!(bridge.isdown(), Some(true));
    assert_eq!(bridge.isvisible(), Some(true));
    bridge.penup();
    bridge.hideturtle();
    assert_eq!(bridge.isdown(), Some(false));
    assert_eq!(bridge.isvisible(), Some(false));
    bridge.showturtle();
    assert_eq!(bridge.isvisible(), Some(true));
}

#[test]
fn dispatch_all_matches_direct_calls() {
    let program = HostCall::parse_program(
        r#"[
            {"op": "fd", "distance": 30},
            {"op": "lt", "angle": 90},
            {"op": "bk", "distance": 10},
            {"op": "width", "width": 5},
            {"op": "circle", "radius": 10, "extent": 180}
        ]"#,
    )
    .unwrap();
    let a = bound_bridge();
    a.dispatch_all(&program);

    let b = bound_bridge();
    b.forward(30.0);
    b.left(90.0);
    b.backward(10.0);
    b.pensize(5.0);
    b.circle(10.0, Some(180.0));

    assert_eq!(queued(&a), queued(&b));
    assert_eq!(a.position(), b.position());
}

#[test]
fn unbind_detaches() {
    let mut bridge = bound_bridge();
    assert!(bridge.is_bound());
    bridge.unbind();
    assert!(!bridge.is_bound());
    bridge.forward(5.0);
    assert_eq!(bridge.position(), None);
}
