use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    delivery::{
        poster::{PosterDefaults, resolve_poster},
        source::{VideoSource, resolve_sources},
    },
    element::{context::CloudContext, props::VideoProps, reload::ConfigSnapshot},
    foundation::error::{CldError, CldResult},
    transform::compiler::Protocol,
};

/// Record handed to the rendering collaborator.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VideoElement {
    /// Zero or one delivery format: the URL sits directly on the element.
    Single {
        /// Video URL.
        src: String,
        /// Poster URL.
        poster: String,
        /// Pass-through attributes.
        #[serde(skip_serializing_if = "Map::is_empty")]
        attributes: Map<String, Value>,
        /// Content for clients that cannot play the video.
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },
    /// Several delivery formats, one labeled source each.
    Multi {
        /// Poster URL.
        poster: String,
        /// Pass-through attributes.
        #[serde(skip_serializing_if = "Map::is_empty")]
        attributes: Map<String, Value>,
        /// Sources in request order.
        sources: Vec<VideoSource>,
        /// Content for clients that cannot play the video.
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },
}

impl VideoElement {
    /// Direct `src`, only set for single-source elements.
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Single { src, .. } => Some(src),
            Self::Multi { .. } => None,
        }
    }

    /// Poster URL.
    pub fn poster(&self) -> &str {
        match self {
            Self::Single { poster, .. } | Self::Multi { poster, .. } => poster,
        }
    }

    /// Pass-through attributes.
    pub fn attributes(&self) -> &Map<String, Value> {
        match self {
            Self::Single { attributes, .. } | Self::Multi { attributes, .. } => attributes,
        }
    }

    /// Fallback content.
    pub fn fallback(&self) -> Option<&str> {
        match self {
            Self::Single { fallback, .. } | Self::Multi { fallback, .. } => fallback.as_deref(),
        }
    }

    /// Labeled sources; empty for single-source elements.
    pub fn sources(&self) -> &[VideoSource] {
        match self {
            Self::Single { .. } => &[],
            Self::Multi { sources, .. } => sources,
        }
    }

    /// First source advertising `mime_type`.
    pub fn source_for(&self, mime_type: &str) -> Option<&VideoSource> {
        self.sources()
            .iter()
            .find(|s| s.mime_type.as_deref() == Some(mime_type))
    }
}

/// Element plus the identity snapshot it was rendered from.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    /// Output record.
    pub element: VideoElement,
    /// Identity-affecting configuration of this render.
    pub snapshot: ConfigSnapshot,
}

/// Resolve `props` under `ctx` and compile every URL.
#[tracing::instrument(skip(props, ctx))]
pub fn render_video(props: &VideoProps, ctx: &CloudContext) -> CldResult<Rendered> {
    let resolved = props.resolve(ctx)?;
    let config = &resolved.config;
    let protocol = Protocol::from_secure(config.secure);

    let sources = resolve_sources(
        &config.asset,
        &config.source_types,
        &config.base_chain(),
        &config.source_overrides,
        protocol,
    )?;

    let poster = resolve_poster(
        config.poster.as_ref(),
        &PosterDefaults {
            cloud_name: config.asset.cloud_name.clone(),
            public_id: config.asset.public_id.clone(),
            secure: config.secure,
        },
    )?;

    let element = if config.source_types.len() > 1 {
        VideoElement::Multi {
            poster,
            attributes: resolved.passthrough,
            sources,
            fallback: resolved.fallback,
        }
    } else {
        let Some(first) = sources.into_iter().next() else {
            return Err(CldError::configuration("no video source could be resolved"));
        };
        VideoElement::Single {
            src: first.url,
            poster,
            attributes: resolved.passthrough,
            fallback: resolved.fallback,
        }
    };

    Ok(Rendered {
        element,
        snapshot: ConfigSnapshot::capture(config),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/element/render.rs"]
mod tests;
