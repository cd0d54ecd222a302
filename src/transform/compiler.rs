use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{CldError, CldResult},
    transform::{
        codec::{Token, encode},
        step::TransformationStep,
    },
};

/// Delivery host every URL is built against.
pub const DELIVERY_HOST: &str = "res.cloudinary.com";

/// Kind of hosted asset; the second path component after the cloud name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Still images (and poster frames derived from them).
    Image,
    /// Video assets.
    #[default]
    Video,
    /// Unprocessed files.
    Raw,
}

impl ResourceType {
    /// Path spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Raw => "raw",
        }
    }
}

impl FromStr for ResourceType {
    type Err = CldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "raw" => Ok(Self::Raw),
            other => Err(CldError::configuration(format!(
                "unknown resource type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// `http://`
    #[default]
    Http,
    /// `https://`
    Https,
}

impl Protocol {
    /// Pick the scheme for a `secure` flag.
    pub fn from_secure(secure: bool) -> Self {
        if secure { Self::Https } else { Self::Http }
    }

    /// Scheme name without `://`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// Address of one hosted asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    /// Account the asset lives in.
    pub cloud_name: String,
    /// Asset identifier within the account.
    pub public_id: String,
    /// Asset kind.
    #[serde(default)]
    pub resource_type: ResourceType,
    /// Extension appended as `.<format>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl AssetRef {
    /// Video asset without an explicit format.
    pub fn video(cloud_name: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            public_id: public_id.into(),
            resource_type: ResourceType::Video,
            format: None,
        }
    }

    /// Image asset without an explicit format.
    pub fn image(cloud_name: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            resource_type: ResourceType::Image,
            ..Self::video(cloud_name, public_id)
        }
    }

    /// Same asset with another extension.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Same asset with another resource type.
    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = resource_type;
        self
    }

    fn path(&self) -> String {
        match self.format.as_deref() {
            Some(fmt) if !fmt.is_empty() => format!("{}.{fmt}", self.public_id),
            _ => self.public_id.clone(),
        }
    }
}

/// Compile one step into a path segment; `None` when it yields no tokens.
///
/// Parameter tokens are ordered lexicographically, raw tokens follow in key order.
pub fn compile_step(step: &TransformationStep) -> Option<String> {
    let mut params = Vec::new();
    let mut raw = Vec::new();
    for (name, value) in step.iter() {
        match encode(name, value) {
            Some(tok @ Token::Param { .. }) => params.push(tok.to_string()),
            Some(tok @ Token::Raw(_)) => raw.push(tok.to_string()),
            None => {}
        }
    }
    params.sort();
    params.extend(raw);

    if params.is_empty() {
        None
    } else {
        Some(params.join(","))
    }
}

/// Compile `asset` plus `chain` into a full delivery URL.
///
/// `<protocol>://res.cloudinary.com/<cloud>/<type>/upload/<seg>/.../<public_id>[.<format>]`
pub fn compile(
    asset: &AssetRef,
    chain: &[TransformationStep],
    protocol: Protocol,
) -> CldResult<String> {
    if asset.cloud_name.trim().is_empty() {
        return Err(CldError::configuration(
            "cloud name is required to address an asset",
        ));
    }
    if asset.public_id.trim().is_empty() {
        return Err(CldError::configuration(
            "public id is required; the asset cannot be addressed",
        ));
    }

    let mut url = format!(
        "{}://{DELIVERY_HOST}/{}/{}/upload/",
        protocol.as_str(),
        asset.cloud_name,
        asset.resource_type.as_str()
    );
    for segment in chain.iter().filter_map(compile_step) {
        url.push_str(&segment);
        url.push('/');
    }
    url.push_str(&asset.path());
    Ok(url)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/compiler.rs"]
mod tests;
