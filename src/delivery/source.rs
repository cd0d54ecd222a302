use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    foundation::error::{CldError, CldResult},
    transform::{
        compiler::{AssetRef, Protocol, compile},
        step::TransformationStep,
    },
};

/// Delivery format a video source can be requested in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceType {
    /// WebM container.
    Webm,
    /// MPEG-4 container.
    Mp4,
    /// Ogg/Theora container.
    Ogv,
    /// QuickTime container.
    Mov,
    /// HLS playlist.
    M3u8,
    /// MPEG-DASH manifest.
    Mpd,
}

impl SourceType {
    /// Format token as written in configuration.
    pub fn token(self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
            Self::Ogv => "ogv",
            Self::Mov => "mov",
            Self::M3u8 => "m3u8",
            Self::Mpd => "mpd",
        }
    }

    /// File extension of the delivered asset.
    pub fn extension(self) -> &'static str {
        self.token()
    }

    /// MIME type advertised on the source element.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Webm => "video/webm",
            Self::Mp4 => "video/mp4",
            Self::Ogv => "video/ogg",
            Self::Mov => "video/quicktime",
            Self::M3u8 => "application/x-mpegURL",
            Self::Mpd => "application/dash+xml",
        }
    }
}

impl FromStr for SourceType {
    type Err = CldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webm" => Ok(Self::Webm),
            "mp4" => Ok(Self::Mp4),
            "ogv" => Ok(Self::Ogv),
            "mov" => Ok(Self::Mov),
            "m3u8" => Ok(Self::M3u8),
            "mpd" => Ok(Self::Mpd),
            other => Err(CldError::configuration(format!(
                "unknown delivery format '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for SourceType {
    type Error = CldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SourceType> for String {
    fn from(st: SourceType) -> Self {
        st.token().to_string()
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Read a `sourceTypes` property: one token or an array of tokens.
pub fn parse_source_types(value: &Value) -> CldResult<Vec<SourceType>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s.parse()?]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.parse(),
                other => Err(CldError::configuration(format!(
                    "source type must be a string, got {other}"
                ))),
            })
            .collect(),
        other => Err(CldError::configuration(format!(
            "sourceTypes must be a string or an array of strings, got {other}"
        ))),
    }
}

/// Per-format extra step, appended to that format's chain only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceOverrides(BTreeMap<SourceType, TransformationStep>);

impl SourceOverrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, source_type: SourceType, step: TransformationStep) -> Self {
        self.0.insert(source_type, step);
        self
    }

    /// Override for `source_type`, if any.
    pub fn get(&self, source_type: SourceType) -> Option<&TransformationStep> {
        self.0.get(&source_type)
    }

    /// Overrides in format order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceType, &TransformationStep)> {
        self.0.iter().map(|(st, step)| (*st, step))
    }

    /// Number of formats with an override.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no format has an override.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a `sourceTransformation` property: `{ "<format>": { ...params } }`.
    pub fn from_value(value: &Value) -> CldResult<Self> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(CldError::configuration(format!(
                    "sourceTransformation must be an object keyed by format, got {other}"
                )));
            }
        };

        let mut out = BTreeMap::new();
        for (key, step) in map {
            let source_type: SourceType = key.parse()?;
            let Value::Object(params) = step else {
                return Err(CldError::configuration(format!(
                    "sourceTransformation.{key} must be an object of parameters"
                )));
            };
            out.insert(source_type, TransformationStep::from(params.clone()));
        }
        Ok(Self(out))
    }
}

/// One resolved `<source>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    /// MIME type; absent for the unrestricted default source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Delivery URL.
    pub url: String,
}

/// Expand one asset into one URL per requested format, in request order.
///
/// With no formats requested a single source is produced from the asset's own format, without a
/// MIME type.
#[tracing::instrument(skip(base_chain, overrides))]
pub fn resolve_sources(
    asset: &AssetRef,
    formats: &[SourceType],
    base_chain: &[TransformationStep],
    overrides: &SourceOverrides,
    protocol: Protocol,
) -> CldResult<Vec<VideoSource>> {
    if formats.is_empty() {
        let url = compile(asset, base_chain, protocol)?;
        return Ok(vec![VideoSource {
            mime_type: None,
            url,
        }]);
    }

    let mut sources = Vec::with_capacity(formats.len());
    for &format in formats {
        let target = asset.clone().with_format(format.extension());
        let url = match overrides.get(format) {
            Some(extra) => {
                let mut chain = base_chain.to_vec();
                chain.push(extra.clone());
                compile(&target, &chain, protocol)?
            }
            None => compile(&target, base_chain, protocol)?,
        };
        sources.push(VideoSource {
            mime_type: Some(format.mime_type().to_string()),
            url,
        });
    }
    Ok(sources)
}

#[cfg(test)]
#[path = "../../tests/unit/delivery/source.rs"]
mod tests;
