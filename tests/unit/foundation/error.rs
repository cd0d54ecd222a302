use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CldError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        CldError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CldError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CldError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
