use super::*;
use serde_json::json;

fn step(v: serde_json::Value) -> TransformationStep {
    serde_json::from_value(v).unwrap()
}

#[test]
fn segments_follow_chain_order() {
    let asset = AssetRef::video("demo", "dog").with_format("webm");
    let chain = vec![
        step(json!({ "quality": 70 })),
        step(json!({ "overlay": "text:verdana_30:webm!" })),
    ];
    let url = compile(&asset, &chain, Protocol::Http).unwrap();
    assert_eq!(
        url,
        "http://res.cloudinary.com/demo/video/upload/q_70/l_text:verdana_30:webm!/dog.webm"
    );
}

#[test]
fn tokens_within_a_segment_are_sorted() {
    let s = step(json!({ "width": 100, "crop": "scale" }));
    assert_eq!(compile_step(&s).as_deref(), Some("c_scale,w_100"));
}

#[test]
fn raw_tokens_follow_parameter_tokens() {
    let s = step(json!({ "raw_transformation": "e_blur:300", "width": 10 }));
    assert_eq!(compile_step(&s).as_deref(), Some("w_10,e_blur:300"));
}

#[test]
fn empty_steps_are_omitted() {
    let asset = AssetRef::video("demo", "dog").with_format("jpg");
    let chain = vec![
        TransformationStep::new(),
        step(json!({ "unknown": 1 })),
        step(json!({ "quality": null })),
    ];
    assert_eq!(
        compile(&asset, &chain, Protocol::Https).unwrap(),
        "https://res.cloudinary.com/demo/video/upload/dog.jpg"
    );
}

#[test]
fn format_is_appended_only_when_present() {
    let asset = AssetRef::image("demo", "elephants");
    assert_eq!(
        compile(&asset, &[], Protocol::Http).unwrap(),
        "http://res.cloudinary.com/demo/image/upload/elephants"
    );
    let asset = asset.with_format("");
    assert!(compile(&asset, &[], Protocol::Http).unwrap().ends_with("/elephants"));
}

#[test]
fn compile_is_deterministic() {
    let asset = AssetRef::video("demo", "dog").with_format("mp4");
    let chain = vec![step(json!({ "fps": "24-29.97", "quality": "auto" }))];
    let a = compile(&asset, &chain, Protocol::Http).unwrap();
    let b = compile(&asset, &chain, Protocol::Http).unwrap();
    assert_eq!(a, b);
}

#[test]
fn missing_identity_is_a_configuration_error() {
    let no_id = AssetRef::video("demo", "");
    assert!(matches!(
        compile(&no_id, &[], Protocol::Http),
        Err(CldError::Configuration(_))
    ));
    let no_cloud = AssetRef::video(" ", "dog");
    assert!(matches!(
        compile(&no_cloud, &[], Protocol::Http),
        Err(CldError::Configuration(_))
    ));
}

#[test]
fn resource_type_parses_case_insensitively() {
    assert_eq!("VIDEO".parse::<ResourceType>().unwrap(), ResourceType::Video);
    assert_eq!("image".parse::<ResourceType>().unwrap(), ResourceType::Image);
    assert!("audio".parse::<ResourceType>().is_err());
}

#[test]
fn aliased_parameter_emits_one_token() {
    let s = step(json!({ "aspectRatio": "1:1", "aspect_ratio": "3:2" }));
    assert_eq!(compile_step(&s).as_deref(), Some("ar_3:2"));
}
