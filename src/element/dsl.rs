use serde_json::{Map, Value};

use crate::{
    delivery::{poster::PosterSpec, source::SourceType},
    element::props::VideoProps,
    transform::step::{ChildNode, TransformationNode, TransformationStep},
};

/// Fluent construction of [`VideoProps`] without hand-written JSON.
///
/// Everything lands in the same property map a declarative caller would write, so a built
/// value and the equivalent JSON resolve identically.
#[derive(Clone, Debug, Default)]
pub struct VideoBuilder {
    attributes: Map<String, Value>,
    source_types: Vec<SourceType>,
    overrides: Map<String, Value>,
    children: Vec<ChildNode>,
}

impl VideoBuilder {
    /// Builder addressing `public_id`.
    pub fn new(public_id: impl Into<String>) -> Self {
        Self::default().attr("public_id", public_id.into())
    }

    /// Account the asset lives in.
    pub fn cloud_name(self, cloud_name: impl Into<String>) -> Self {
        self.attr("cloud_name", cloud_name.into())
    }

    /// Deliver over `https`.
    pub fn secure(self, secure: bool) -> Self {
        self.attr("secure", secure)
    }

    /// Append a delivery format; formats are emitted in call order.
    pub fn source_type(mut self, source_type: SourceType) -> Self {
        self.source_types.push(source_type);
        self
    }

    /// Extra step for one format only.
    pub fn source_transformation(mut self, source_type: SourceType, step: TransformationStep) -> Self {
        self.overrides.insert(
            source_type.token().to_string(),
            Value::Object(step.as_map().clone()),
        );
        self
    }

    /// Flat top-level transformation parameter.
    pub fn param(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attr(name, value)
    }

    /// Nested transformation descriptor.
    pub fn transformation(mut self, step: TransformationStep) -> Self {
        self.children
            .push(ChildNode::Transformation(TransformationNode::new(step)));
        self
    }

    /// Poster given as a typed spec.
    pub fn poster(self, poster: PosterSpec) -> Self {
        self.attr("poster", poster.to_value())
    }

    /// Poster given as a complete URL.
    pub fn poster_url(self, url: impl Into<String>) -> Self {
        self.attr("poster", url.into())
    }

    /// Text shown when the video cannot play.
    pub fn fallback(mut self, text: impl Into<String>) -> Self {
        self.children.push(ChildNode::Text(text.into()));
        self
    }

    /// Any other property, configuration or pass-through, in any spelling.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Finish into declarative props.
    pub fn build(self) -> VideoProps {
        let mut attributes = self.attributes;
        if !self.source_types.is_empty() {
            let types = self
                .source_types
                .iter()
                .map(|st| Value::String(st.token().to_string()))
                .collect();
            attributes.insert("source_types".to_string(), Value::Array(types));
        }
        if !self.overrides.is_empty() {
            attributes.insert(
                "source_transformation".to_string(),
                Value::Object(self.overrides),
            );
        }
        VideoProps {
            children: self.children,
            attributes,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/dsl.rs"]
mod tests;
