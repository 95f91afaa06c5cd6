use super::*;

#[test]
fn parses_canonical_and_alias_ops() {
    let program = HostCall::parse_program(
        r##"[
            {"op": "forward", "distance": 10},
            {"op": "fd", "distance": 5},
            {"op": "back", "distance": 2},
            {"op": "rt", "angle": 90},
            {"op": "setpos", "x": 1, "y": -2},
            {"op": "seth", "angle": 180},
            {"op": "pu"},
            {"op": "down"},
            {"op": "width", "width": 4},
            {"op": "circle", "radius": 20},
            {"op": "circle", "radius": -5, "extent": 90},
            {"op": "begin_fill"},
            {"op": "end_fill"},
            {"op": "ht"},
            {"op": "st"}
        ]"##,
    )
    .unwrap();

    assert_eq!(
        program,
        vec![
            HostCall::Forward { distance: 10.0 },
            HostCall::Forward { distance: 5.0 },
            HostCall::Backward { distance: 2.0 },
            HostCall::Right { angle: 90.0 },
            HostCall::Goto { x: 1.0, y: -2.0 },
            HostCall::Setheading { angle: 180.0 },
            HostCall::Penup,
            HostCall::Pendown,
            HostCall::Pensize { width: 4.0 },
            HostCall::Circle {
                radius: 20.0,
                extent: 360.0
            },
            HostCall::Circle {
                radius: -5.0,
                extent: 90.0
            },
            HostCall::BeginFill,
            HostCall::EndFill,
            HostCall::Hideturtle,
            HostCall::Showturtle,
        ]
    );
}

#[test]
fn color_arguments_accept_text_and_components() {
    let program = HostCall::parse_program(
        r##"[
            {"op": "color", "color": "#ff8800"},
            {"op": "pencolor", "color": [0, 0, 1]},
            {"op": "fillcolor", "color": [1, 1, 1, 0.5]}
        ]"##,
    )
    .unwrap();
    let colors: Vec<Color> = program
        .iter()
        .map(|c| match c {
            HostCall::Color { color }
            | HostCall::Pencolor { color }
            | HostCall::Fillcolor { color } => color.resolve().unwrap(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(colors[0], Color::rgb(255, 136, 0));
    assert_eq!(colors[1], Color::rgb(0, 0, 255));
    assert_eq!(colors[2].a, 128);
}

#[test]
fn bad_color_arguments_fail_to_resolve() {
    assert!(ColorArg::from("not-a-color").resolve().is_err());
    assert!(ColorArg::Components(vec![1.0, 0.0]).resolve().is_err());
    assert_eq!(
        ColorArg::from(Color::rgb(1, 2, 3)).resolve().unwrap(),
        Color::rgb(1, 2, 3)
    );
}

#[test]
fn unknown_op_is_serde_error() {
    let err = HostCall::parse_program(r#"[{"op": "teleport"}]"#).unwrap_err();
    assert!(matches!(err, TurtleError::Serde(_)));
}

#[test]
fn serializes_with_canonical_names() {
    let json = serde_json::to_value(HostCall::BeginFill).unwrap();
    assert_eq!(json, serde_json::json!({"op": "begin_fill"}));
    let json = serde_json::to_value(HostCall::Forward { distance: 3.0 }).unwrap();
    assert_eq!(json, serde_json::json!({"op": "forward", "distance": 3.0}));
}
