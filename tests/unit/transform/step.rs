use super::*;
use serde_json::json;

fn step(v: Value) -> TransformationStep {
    serde_json::from_value(v).unwrap()
}

#[test]
fn flatten_is_preorder_and_keeps_declaration_order() {
    let children = vec![
        ChildNode::Transformation(TransformationNode {
            transformation: step(json!({ "quality": 70 })),
            children: vec![ChildNode::Transformation(TransformationNode::new(step(
                json!({ "fps": "24" }),
            )))],
        }),
        ChildNode::Transformation(TransformationNode::new(step(json!({ "width": 100 })))),
    ];

    let flat = flatten_children(&children);
    assert_eq!(
        flat.steps,
        vec![
            step(json!({ "quality": 70 })),
            step(json!({ "fps": "24" })),
            step(json!({ "width": 100 })),
        ]
    );
    assert_eq!(flat.text, None);
}

#[test]
fn text_children_become_fallback_text() {
    let children: Vec<ChildNode> = serde_json::from_value(json!([
        "Your browser does not support the video tag.",
        { "transformation": { "quality": 70 } }
    ]))
    .unwrap();

    let flat = flatten_children(&children);
    assert_eq!(
        flat.text.as_deref(),
        Some("Your browser does not support the video tag.")
    );
    assert_eq!(flat.steps.len(), 1);
}

#[test]
fn steps_from_value_accepts_object_or_array() {
    assert_eq!(steps_from_value(&json!({ "dpr": "2.0" })).unwrap().len(), 1);
    assert_eq!(
        steps_from_value(&json!([{ "width": 100 }, { "dpr": "2.0" }]))
            .unwrap()
            .len(),
        2
    );
    assert!(steps_from_value(&Value::Null).unwrap().is_empty());
}

#[test]
fn steps_from_value_rejects_scalars() {
    assert!(matches!(
        steps_from_value(&json!("c_scale")),
        Err(CldError::Configuration(_))
    ));
    assert!(matches!(
        steps_from_value(&json!([{ "width": 1 }, 3])),
        Err(CldError::Configuration(_))
    ));
}

#[test]
fn keys_are_stored_canonically() {
    let s = step(json!({ "aspectRatio": "1:1", "startOffset": 2, "bogus": 1 }));
    assert_eq!(s, step(json!({ "aspect_ratio": "1:1", "start_offset": 2 })));
    assert_eq!(s.get("ASPECT_RATIO"), Some(&json!("1:1")));
    assert_eq!(s.len(), 2);
}

#[test]
fn canonical_spelling_wins_over_alias() {
    let s = step(json!({ "aspectRatio": "1:1", "aspect_ratio": "3:2" }));
    assert_eq!(s.get("aspect_ratio"), Some(&json!("3:2")));

    let s = TransformationStep::new()
        .with("aspect_ratio", "3:2")
        .with("aspectRatio", "1:1");
    assert_eq!(s.get("aspect_ratio"), Some(&json!("3:2")));
}

#[test]
fn is_chain_value_distinguishes_named_transformations() {
    assert!(is_chain_value(&json!({ "width": 1 })));
    assert!(is_chain_value(&json!([{ "width": 1 }])));
    assert!(!is_chain_value(&json!("thumb")));
    assert!(!is_chain_value(&json!(["a", "b"])));
}
