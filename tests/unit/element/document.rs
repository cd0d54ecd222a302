use super::*;
use serde_json::json;

const DOC: &str = r#"{
    "context": [ { "cloudName": "demo", "width": 300 }, { "secure": true, "controls": true } ],
    "props": {
        "publicId": "dog",
        "sourceTypes": ["webm", "mp4"],
        "children": [ { "transformation": { "quality": 70 } }, "Your browser cannot play this video" ]
    }
}"#;

#[test]
fn context_layers_nest_outermost_first() {
    let doc = VideoDocument::from_json_str(DOC).unwrap();
    let ctx = doc.context();
    assert_eq!(ctx.config().get("cloud_name"), Some(&json!("demo")));
    assert_eq!(ctx.config().get("secure"), Some(&json!(true)));
    assert!(ctx.config().get("controls").is_none());
}

#[test]
fn document_renders_under_its_context() {
    let doc = VideoDocument::from_json_str(DOC).unwrap();
    let el = doc.render().unwrap().element;

    assert_eq!(
        el.source_for("video/webm").unwrap().url,
        "https://res.cloudinary.com/demo/video/upload/w_300/q_70/dog.webm"
    );
    assert_eq!(el.poster(), "https://res.cloudinary.com/demo/video/upload/dog.jpg");
    assert_eq!(el.fallback(), Some("Your browser cannot play this video"));
    assert!(el.attributes().is_empty());
}

#[test]
fn reader_and_string_agree() {
    let a = VideoDocument::from_json_str(DOC).unwrap();
    let b = VideoDocument::from_reader(DOC.as_bytes()).unwrap();
    assert_eq!(a, b);
    let again = VideoDocument::from_json_str(&a.to_json_pretty().unwrap()).unwrap();
    assert_eq!(a, again);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = VideoDocument::from_json_str("{ \"props\": ").unwrap_err();
    assert!(matches!(err, CldError::Serde(_)));
}

#[test]
fn unknown_top_level_key_is_rejected() {
    let err = VideoDocument::from_json_str(r#"{ "props": {}, "extra": 1 }"#).unwrap_err();
    assert!(matches!(err, CldError::Serde(_)));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = VideoDocument::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
