use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    delivery::{
        poster::PosterSpec,
        source::{SourceOverrides, SourceType, parse_source_types},
    },
    element::{attrs::classify, context::CloudContext},
    foundation::error::{CldError, CldResult},
    transform::{
        compiler::{AssetRef, ResourceType},
        step::{
            ChildNode, TransformationNode, TransformationStep, flatten_children, is_chain_value,
            steps_from_value,
        },
    },
};

/// Declarative description of one video element, as the caller writes it.
///
/// `attributes` holds every property in whatever spelling the caller used; `children` holds
/// nested transformation descriptors and inner text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoProps {
    /// Nested descriptors and fallback text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildNode>,
    /// All other properties.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl VideoProps {
    /// Props with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute insert.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a nested transformation descriptor.
    pub fn transformation(mut self, step: TransformationStep) -> Self {
        self.children
            .push(ChildNode::Transformation(TransformationNode::new(step)));
        self
    }

    /// Append inner text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ChildNode::Text(text.into()));
        self
    }

    /// Classify, merge with the inherited context and type the configuration.
    pub fn resolve(&self, ctx: &CloudContext) -> CldResult<ResolvedProps> {
        let classified = classify(&self.attributes);
        let mut config = ctx.apply(classified.config);
        let flat = flatten_children(&self.children);

        let fallback = match config.remove("fallback") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => flat.text,
        };

        Ok(ResolvedProps {
            config: VideoConfig::from_config(config, flat.steps)?,
            passthrough: classified.passthrough,
            fallback,
        })
    }
}

/// Typed configuration of one video element; everything here affects asset identity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VideoConfig {
    /// Primary asset.
    pub asset: AssetRef,
    /// Use `https`.
    pub secure: bool,
    /// Requested delivery formats, in request order.
    pub source_types: Vec<SourceType>,
    /// Flat top-level transformation parameters; the first chain step.
    pub params: TransformationStep,
    /// Explicit `transformation` steps followed by nested descriptors.
    pub transformation: Vec<TransformationStep>,
    /// Per-format final steps.
    pub source_overrides: SourceOverrides,
    /// Poster specification; `None` derives the default frame.
    pub poster: Option<PosterSpec>,
}

impl VideoConfig {
    /// Chain shared by every delivery format.
    pub fn base_chain(&self) -> Vec<TransformationStep> {
        let mut chain = Vec::with_capacity(self.transformation.len() + 1);
        if !self.params.is_empty() {
            chain.push(self.params.clone());
        }
        chain.extend(self.transformation.iter().cloned());
        chain
    }

    fn from_config(
        config: Map<String, Value>,
        child_steps: Vec<TransformationStep>,
    ) -> CldResult<Self> {
        let mut cloud_name = None;
        let mut public_id = None;
        let mut resource_type = ResourceType::Video;
        let mut format = None;
        let mut secure = false;
        let mut source_types = Vec::new();
        let mut source_overrides = SourceOverrides::new();
        let mut poster = None;
        let mut params = TransformationStep::new();
        let mut transformation = Vec::new();

        for (key, value) in config {
            match key.as_str() {
                "cloud_name" => cloud_name = Some(expect_string(&key, &value)?),
                "public_id" => public_id = Some(expect_string(&key, &value)?),
                "resource_type" => resource_type = expect_string(&key, &value)?.parse()?,
                "format" => {
                    format = match value {
                        Value::Null => None,
                        _ => Some(expect_string(&key, &value)?),
                    }
                }
                "secure" => {
                    secure = match value {
                        Value::Null => false,
                        Value::Bool(b) => b,
                        other => {
                            return Err(CldError::configuration(format!(
                                "secure must be a boolean, got {other}"
                            )));
                        }
                    }
                }
                "source_types" => source_types = parse_source_types(&value)?,
                "source_transformation" => source_overrides = SourceOverrides::from_value(&value)?,
                "poster" => poster = PosterSpec::from_value(&value)?,
                "transformation" if is_chain_value(&value) => {
                    transformation = steps_from_value(&value)?;
                }
                _ => params.insert(key.clone(), value),
            }
        }
        transformation.extend(child_steps);

        let cloud_name = cloud_name
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CldError::configuration("cloud name is required"))?;
        let public_id = public_id.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
            CldError::configuration("public id is required; the asset cannot be addressed")
        })?;

        Ok(Self {
            asset: AssetRef {
                cloud_name,
                public_id,
                resource_type,
                format,
            },
            secure,
            source_types,
            params,
            transformation,
            source_overrides,
            poster,
        })
    }
}

/// Output of [`VideoProps::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedProps {
    /// Identity-affecting configuration.
    pub config: VideoConfig,
    /// Attributes forwarded to the element.
    pub passthrough: Map<String, Value>,
    /// Content shown when the element cannot play.
    pub fallback: Option<String>,
}

fn expect_string(key: &str, value: &Value) -> CldResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(CldError::configuration(format!(
            "{key} must be a string, got {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/props.rs"]
mod tests;
