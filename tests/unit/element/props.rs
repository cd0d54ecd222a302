use super::*;
use serde_json::json;

fn props(v: Value) -> VideoProps {
    serde_json::from_value(v).unwrap()
}

#[test]
fn resolves_identity_and_controls() {
    let p = props(json!({
        "cloudName": "demo",
        "publicId": "dog",
        "sourceTypes": ["webm", "mp4"],
        "sourceTransformation": { "webm": { "overlay": "A" } },
        "secure": true,
        "controls": true,
        "width": 300,
        "crop": "scale"
    }));
    let r = p.resolve(&CloudContext::new()).unwrap();

    assert_eq!(r.config.asset, AssetRef::video("demo", "dog"));
    assert!(r.config.secure);
    assert_eq!(
        r.config.source_types,
        vec![SourceType::Webm, SourceType::Mp4]
    );
    assert!(r.config.source_overrides.get(SourceType::Webm).is_some());
    assert_eq!(r.config.params.len(), 2);
    assert_eq!(r.passthrough.get("controls"), Some(&json!(true)));
    assert_eq!(r.passthrough.len(), 1);
}

#[test]
fn base_chain_puts_flat_params_before_descriptors() {
    let p = props(json!({
        "cloud_name": "demo",
        "public_id": "dog",
        "quality": 70,
        "transformation": [{ "effect": "sepia" }],
        "children": [{ "transformation": { "fps": "24" } }]
    }));
    let r = p.resolve(&CloudContext::new()).unwrap();
    let chain = r.config.base_chain();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0].get("quality"), Some(&json!(70)));
    assert_eq!(chain[1].get("effect"), Some(&json!("sepia")));
    assert_eq!(chain[2].get("fps"), Some(&json!("24")));
}

#[test]
fn named_transformation_stays_a_flat_param() {
    let p = props(json!({ "cloud_name": "demo", "public_id": "dog", "transformation": "hero" }));
    let r = p.resolve(&CloudContext::new()).unwrap();
    assert!(r.config.transformation.is_empty());
    assert_eq!(r.config.params.get("transformation"), Some(&json!("hero")));
}

#[test]
fn context_supplies_cloud_name() {
    let p = VideoProps::new().attr("publicId", "dog");
    let r = p.resolve(&CloudContext::with_cloud_name("demo")).unwrap();
    assert_eq!(r.config.asset.cloud_name, "demo");
}

#[test]
fn missing_public_id_is_a_configuration_error() {
    let p = VideoProps::new().attr("cloudName", "demo");
    assert!(matches!(
        p.resolve(&CloudContext::new()),
        Err(CldError::Configuration(_))
    ));
    let p = VideoProps::new().attr("publicId", "dog");
    assert!(matches!(
        p.resolve(&CloudContext::new()),
        Err(CldError::Configuration(_))
    ));
}

#[test]
fn malformed_controls_are_configuration_errors() {
    let base = || VideoProps::new().attr("cloudName", "demo").attr("publicId", "dog");
    assert!(base().attr("secure", "yes").resolve(&CloudContext::new()).is_err());
    assert!(base().attr("sourceTypes", json!(["avi"])).resolve(&CloudContext::new()).is_err());
    assert!(base().attr("resourceType", "audio").resolve(&CloudContext::new()).is_err());
    assert!(base().attr("publicId", 7).resolve(&CloudContext::new()).is_err());
}

#[test]
fn fallback_prefers_property_over_text_children() {
    let p = VideoProps::new()
        .attr("cloudName", "demo")
        .attr("publicId", "dog")
        .text("Cannot display video");
    let r = p.resolve(&CloudContext::new()).unwrap();
    assert_eq!(r.fallback.as_deref(), Some("Cannot display video"));

    let p = p.attr("fallback", "Explicit");
    let r = p.resolve(&CloudContext::new()).unwrap();
    assert_eq!(r.fallback.as_deref(), Some("Explicit"));
    assert!(!r.passthrough.contains_key("fallback"));
}
