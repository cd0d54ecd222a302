use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    foundation::{
        error::{CldError, CldResult},
        naming::fold_name,
    },
    transform::{
        compiler::{AssetRef, Protocol, ResourceType, compile},
        step::{TransformationStep, is_chain_value, steps_from_value},
    },
};

/// Extension of the derived default poster frame.
pub const DEFAULT_POSTER_FORMAT: &str = "jpg";

/// How the poster image of a video is given.
#[derive(Clone, Debug, PartialEq)]
pub enum PosterSpec {
    /// Complete URL, used verbatim.
    Url(String),
    /// Derive the poster frame of the primary asset.
    Default {
        /// Protocol override; the component's setting applies when absent.
        secure: Option<bool>,
    },
    /// Independent asset with its own transformation chain.
    Asset(PosterAsset),
}

/// Poster addressed as its own asset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PosterAsset {
    /// Account override; the primary asset's cloud applies when absent.
    pub cloud_name: Option<String>,
    /// Poster asset identifier.
    pub public_id: String,
    /// Defaults to [`ResourceType::Image`].
    pub resource_type: Option<ResourceType>,
    /// Appended as `.<format>` only when given.
    pub format: Option<String>,
    /// Protocol override.
    pub secure: Option<bool>,
    /// Flat transformation parameters; compiled as the first step.
    pub params: TransformationStep,
    /// Explicit chain, one step per element.
    pub transformation: Vec<TransformationStep>,
}

impl PosterAsset {
    /// Poster asset with no transformation.
    pub fn new(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            ..Self::default()
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let mut chain = self.transformation.clone();
        // A named transformation shares its key with the chain; it then travels as the head step.
        if self.params.get("transformation").is_some() && !chain.is_empty() {
            chain.insert(0, self.params.clone());
        } else {
            map.extend(self.params.as_map().clone());
        }

        map.insert("public_id".to_string(), Value::String(self.public_id.clone()));
        if let Some(cloud_name) = &self.cloud_name {
            map.insert("cloud_name".to_string(), Value::String(cloud_name.clone()));
        }
        if let Some(resource_type) = self.resource_type {
            map.insert(
                "resource_type".to_string(),
                Value::String(resource_type.as_str().to_string()),
            );
        }
        if let Some(format) = &self.format {
            map.insert("format".to_string(), Value::String(format.clone()));
        }
        if let Some(secure) = self.secure {
            map.insert("secure".to_string(), Value::Bool(secure));
        }
        if !chain.is_empty() {
            let steps = chain
                .into_iter()
                .map(|step| Value::Object(step.as_map().clone()))
                .collect();
            map.insert("transformation".to_string(), Value::Array(steps));
        }
        map
    }

    fn chain(&self) -> Vec<TransformationStep> {
        let mut chain = Vec::with_capacity(self.transformation.len() + 1);
        if !self.params.is_empty() {
            chain.push(self.params.clone());
        }
        chain.extend(self.transformation.iter().cloned());
        chain
    }
}

impl PosterSpec {
    /// Classify a dynamic `poster` property.
    ///
    /// Objects carrying a non-empty public id become [`PosterSpec::Asset`]; every other object
    /// (including unrecognized shapes) becomes [`PosterSpec::Default`].
    pub fn from_value(value: &Value) -> CldResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(url) => Ok(Some(Self::Url(url.clone()))),
            Value::Object(map) => Self::from_object(map).map(Some),
            other => {
                tracing::debug!(poster = %other, "unrecognized poster value, using default poster");
                Ok(Some(Self::Default { secure: None }))
            }
        }
    }

    /// Property value that [`PosterSpec::from_value`] reads back as this spec.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Url(url) => Value::String(url.clone()),
            Self::Default { secure } => {
                let mut map = Map::new();
                if let Some(secure) = secure {
                    map.insert("secure".to_string(), Value::Bool(*secure));
                }
                Value::Object(map)
            }
            Self::Asset(asset) => Value::Object(asset.to_map()),
        }
    }

    fn from_object(map: &Map<String, Value>) -> CldResult<Self> {
        let mut asset = PosterAsset::default();
        for (key, value) in map {
            match fold_name(key).as_str() {
                "cloudname" => asset.cloud_name = value.as_str().map(str::to_string),
                "publicid" => asset.public_id = value.as_str().unwrap_or_default().to_string(),
                "resourcetype" => {
                    asset.resource_type = match value.as_str() {
                        Some(s) => Some(s.parse()?),
                        None => None,
                    }
                }
                "format" => asset.format = value.as_str().map(str::to_string),
                "secure" => asset.secure = value.as_bool(),
                "transformation" if is_chain_value(value) => {
                    asset.transformation = steps_from_value(value)?;
                }
                _ => asset.params.insert(key.clone(), value.clone()),
            }
        }

        if asset.public_id.trim().is_empty() {
            return Ok(Self::Default {
                secure: asset.secure,
            });
        }
        Ok(Self::Asset(asset))
    }
}

impl<'de> Deserialize<'de> for PosterSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom("poster must not be null"))
    }
}

impl Serialize for PosterSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

/// What the poster inherits from the primary asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosterDefaults {
    /// Primary asset's cloud.
    pub cloud_name: String,
    /// Primary asset's public id.
    pub public_id: String,
    /// Component-level protocol setting.
    pub secure: bool,
}

/// Resolve a poster specification into exactly one URL.
pub fn resolve_poster(spec: Option<&PosterSpec>, defaults: &PosterDefaults) -> CldResult<String> {
    match spec {
        Some(PosterSpec::Url(url)) => Ok(url.clone()),
        Some(PosterSpec::Default { secure }) => default_poster(defaults, *secure),
        None => default_poster(defaults, None),
        Some(PosterSpec::Asset(poster)) => {
            let asset = AssetRef {
                cloud_name: poster
                    .cloud_name
                    .clone()
                    .unwrap_or_else(|| defaults.cloud_name.clone()),
                public_id: poster.public_id.clone(),
                resource_type: poster.resource_type.unwrap_or(ResourceType::Image),
                format: poster.format.clone(),
            };
            let protocol = Protocol::from_secure(poster.secure.unwrap_or(defaults.secure));
            compile(&asset, &poster.chain(), protocol)
        }
    }
}

fn default_poster(defaults: &PosterDefaults, secure: Option<bool>) -> CldResult<String> {
    let asset = AssetRef::video(defaults.cloud_name.clone(), defaults.public_id.clone())
        .with_format(DEFAULT_POSTER_FORMAT);
    compile(
        &asset,
        &[],
        Protocol::from_secure(secure.unwrap_or(defaults.secure)),
    )
    .map_err(|e| match e {
        CldError::Configuration(msg) => {
            CldError::configuration(format!("default poster: {msg}"))
        }
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/delivery/poster.rs"]
mod tests;
