use super::*;
use serde_json::json;

fn render(v: Value) -> VideoElement {
    let props: VideoProps = serde_json::from_value(v).unwrap();
    render_video(&props, &CloudContext::new()).unwrap().element
}

#[test]
fn single_format_exposes_direct_src() {
    let el = render(json!({
        "cloudName": "demo",
        "publicId": "dog",
        "sourceTypes": "webm",
        "sourceTransformation": { "webm": { "overlay": "text:verdana_30:webm!" } },
        "children": [{ "transformation": { "quality": "70" } }]
    }));
    assert!(
        el.src()
            .unwrap()
            .ends_with("/q_70/l_text:verdana_30:webm!/dog.webm")
    );
    assert!(el.sources().is_empty());
}

#[test]
fn multiple_formats_expose_labeled_sources() {
    let el = render(json!({
        "cloudName": "demo",
        "publicId": "dog",
        "sourceTypes": ["webm", "ogv", "mp4"],
        "sourceTransformation": {
            "webm": { "aspectRatio": "1:1" },
            "ogv": { "aspect_ratio": "3:2" }
        }
    }));
    assert_eq!(el.src(), None);
    let mimes = el
        .sources()
        .iter()
        .map(|s| s.mime_type.as_deref().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(mimes, vec!["video/webm", "video/ogg", "video/mp4"]);
    assert!(el.source_for("video/webm").unwrap().url.ends_with("/ar_1:1/dog.webm"));
    assert!(el.source_for("video/ogg").unwrap().url.ends_with("/ar_3:2/dog.ogv"));
    assert_eq!(
        el.source_for("video/mp4").unwrap().url,
        "http://res.cloudinary.com/demo/video/upload/dog.mp4"
    );
}

#[test]
fn flat_params_form_the_first_segment() {
    let el = render(json!({
        "cloudName": "demo",
        "publicId": "dog",
        "width": 300,
        "crop": "scale",
        "sourceTypes": "mp4",
        "children": [{ "transformation": { "quality": 70 } }]
    }));
    assert_eq!(
        el.src(),
        Some("http://res.cloudinary.com/demo/video/upload/c_scale,w_300/q_70/dog.mp4")
    );
}

#[test]
fn no_formats_uses_the_native_asset() {
    let el = render(json!({ "cloudName": "demo", "publicId": "dog" }));
    assert_eq!(el.src(), Some("http://res.cloudinary.com/demo/video/upload/dog"));
    assert_eq!(el.poster(), "http://res.cloudinary.com/demo/video/upload/dog.jpg");
}

#[test]
fn secure_component_uses_https_everywhere() {
    let el = render(json!({ "cloudName": "demo", "publicId": "dog", "secure": true, "sourceTypes": "mp4" }));
    assert!(el.src().unwrap().starts_with("https://"));
    assert!(el.poster().starts_with("https://"));
}

#[test]
fn attributes_and_fallback_reach_the_element() {
    let el = render(json!({
        "cloudName": "demo",
        "publicId": "dog",
        "plays_inline": true,
        "controls": true,
        "fallback": "Cannot display video"
    }));
    assert_eq!(el.attributes().get("playsInline"), Some(&json!(true)));
    assert_eq!(el.attributes().get("controls"), Some(&json!(true)));
    assert_eq!(el.fallback(), Some("Cannot display video"));
}

#[test]
fn element_serializes_with_kind_tag() {
    let el = render(json!({ "cloudName": "demo", "publicId": "dog", "sourceTypes": ["webm", "mp4"] }));
    let v = serde_json::to_value(&el).unwrap();
    assert_eq!(v["kind"], json!("multi"));
    assert_eq!(v["sources"][1]["mime_type"], json!("video/mp4"));
    assert!(v.get("attributes").is_none());
}

#[test]
fn missing_public_id_surfaces_immediately() {
    let props: VideoProps = serde_json::from_value(json!({ "cloudName": "demo" })).unwrap();
    assert!(matches!(
        render_video(&props, &CloudContext::new()),
        Err(CldError::Configuration(_))
    ));
}
