use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CrossPlotError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CrossPlotError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        CrossPlotError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_error_names_the_path() {
    let err = CrossPlotError::io("out/0001.png", std::io::Error::other("disk full"));
    let msg = err.to_string();
    assert!(msg.starts_with("io error:"));
    assert!(msg.contains("out/0001.png"));
    assert!(msg.contains("disk full"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CrossPlotError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
