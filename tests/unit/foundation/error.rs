use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TurtleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TurtleError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        TurtleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TurtleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
