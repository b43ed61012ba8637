use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ForgeError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(ForgeError::decode("x").to_string().contains("decode error:"));
    assert!(
        ForgeError::contract("x")
            .to_string()
            .contains("contract violation:")
    );
    assert!(ForgeError::encode("x").to_string().contains("encode error:"));
    assert!(
        ForgeError::resource("x")
            .to_string()
            .contains("resource error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ForgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
