use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    foundation::error::{CldError, CldResult},
    transform::codec::canonical_param_name,
};

/// One parameter set of a transformation chain; compiles to one URL path segment.
///
/// Keys are stored in canonical snake_case spelling whatever spelling the caller used, so two
/// steps that compile to the same segment compare equal. Names that are not transformation
/// parameters are dropped on insert. When one step names a parameter twice, the canonical
/// spelling wins; among aliases the first inserted wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransformationStep(Map<String, Value>);

impl TransformationStep {
    /// Empty step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a parameter under its canonical name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let Some(canon) = canonical_param_name(&name) else {
            tracing::debug!(param = %name, "dropping unknown transformation parameter");
            return;
        };
        if name == canon {
            self.0.insert(name, value.into());
        } else {
            self.0.entry(canon.to_string()).or_insert_with(|| value.into());
        }
    }

    /// Value of parameter `name`, in any spelling.
    pub fn get(&self, name: &str) -> Option<&Value> {
        canonical_param_name(name).and_then(|canon| self.0.get(canon))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the step carries no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for TransformationStep {
    fn from(map: Map<String, Value>) -> Self {
        let mut step = Self::new();
        for (name, value) in map {
            step.insert(name, value);
        }
        step
    }
}

impl<'de> Deserialize<'de> for TransformationStep {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(Self::from)
    }
}

/// Child of a declarative video descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChildNode {
    /// Inner text, rendered as fallback content.
    Text(String),
    /// Nested transformation descriptor.
    Transformation(TransformationNode),
}

/// Transformation descriptor, possibly with nested descriptors of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationNode {
    /// Parameters contributed by this descriptor.
    pub transformation: TransformationStep,
    /// Nested descriptors, appended after this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildNode>,
}

impl TransformationNode {
    /// Leaf descriptor.
    pub fn new(step: TransformationStep) -> Self {
        Self {
            transformation: step,
            children: Vec::new(),
        }
    }
}

/// Result of walking a descriptor tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlattenedChildren {
    /// Steps in declaration order (pre-order: a descriptor precedes its nested descriptors).
    pub steps: Vec<TransformationStep>,
    /// Concatenated top-level text children, if any.
    pub text: Option<String>,
}

/// Walk the descriptor tree and collect its chain steps.
pub fn flatten_children(children: &[ChildNode]) -> FlattenedChildren {
    let mut out = FlattenedChildren::default();
    let mut text = String::new();

    for child in children {
        match child {
            ChildNode::Text(t) => text.push_str(t),
            ChildNode::Transformation(node) => collect_steps(node, &mut out.steps),
        }
    }

    let trimmed = text.trim();
    if !trimmed.is_empty() {
        out.text = Some(trimmed.to_string());
    }
    out
}

fn collect_steps(node: &TransformationNode, steps: &mut Vec<TransformationStep>) {
    steps.push(node.transformation.clone());
    for child in &node.children {
        // Text nested inside a descriptor carries no meaning.
        if let ChildNode::Transformation(inner) = child {
            collect_steps(inner, steps);
        }
    }
}

/// A `transformation` property holding parameter objects, as opposed to a named transformation.
pub(crate) fn is_chain_value(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().any(Value::is_object),
        _ => false,
    }
}

/// Read a `transformation` property: one object or an array of objects.
pub(crate) fn steps_from_value(value: &Value) -> CldResult<Vec<TransformationStep>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(vec![TransformationStep::from(map.clone())]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(TransformationStep::from(map.clone())),
                _ => Err(CldError::configuration(format!(
                    "transformation[{i}] must be an object of parameters"
                ))),
            })
            .collect(),
        _ => Err(CldError::configuration(
            "transformation must be an object or an array of objects",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/step.rs"]
mod tests;
