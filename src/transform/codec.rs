//! Semantic parameter names to URL transformation tokens.
//!
//! Lookup is by folded name (see [`fold_name`]), so camelCase and snake_case spellings share a
//! code. Unknown names are dropped; the only escape hatch is `raw_transformation`, whose string
//! value is emitted verbatim.

use std::fmt;

use serde_json::Value;

use crate::foundation::naming::fold_name;

/// Canonical name of the raw escape parameter.
pub const RAW_TRANSFORMATION: &str = "raw_transformation";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListJoin {
    /// `24-29.97`; `null` keeps its slot (`25-`).
    Range,
    Dot,
    Colon,
    Comma,
}

impl ListJoin {
    fn separator(self) -> &'static str {
        match self {
            Self::Range => "-",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::Comma => ",",
        }
    }
}

struct ParamDef {
    name: &'static str,
    code: &'static str,
    join: ListJoin,
}

const fn def(name: &'static str, code: &'static str, join: ListJoin) -> ParamDef {
    ParamDef { name, code, join }
}

const PARAMS: &[ParamDef] = &[
    def("angle", "a", ListJoin::Dot),
    def("aspect_ratio", "ar", ListJoin::Comma),
    def("audio_codec", "ac", ListJoin::Comma),
    def("audio_frequency", "af", ListJoin::Comma),
    def("background", "b", ListJoin::Comma),
    def("bit_rate", "br", ListJoin::Comma),
    def("border", "bo", ListJoin::Comma),
    def("color", "co", ListJoin::Comma),
    def("color_space", "cs", ListJoin::Comma),
    def("crop", "c", ListJoin::Comma),
    def("default_image", "d", ListJoin::Comma),
    def("delay", "dl", ListJoin::Comma),
    def("density", "dn", ListJoin::Comma),
    def("dpr", "dpr", ListJoin::Comma),
    def("duration", "du", ListJoin::Range),
    def("effect", "e", ListJoin::Colon),
    def("end_offset", "eo", ListJoin::Range),
    def("fetch_format", "f", ListJoin::Comma),
    def("flags", "fl", ListJoin::Dot),
    def("fps", "fps", ListJoin::Range),
    def("gravity", "g", ListJoin::Comma),
    def("height", "h", ListJoin::Comma),
    def("keyframe_interval", "ki", ListJoin::Comma),
    def("opacity", "o", ListJoin::Comma),
    def("overlay", "l", ListJoin::Comma),
    def("page", "pg", ListJoin::Comma),
    def("prefix", "p", ListJoin::Comma),
    def("quality", "q", ListJoin::Comma),
    def("radius", "r", ListJoin::Colon),
    def("start_offset", "so", ListJoin::Range),
    def("streaming_profile", "sp", ListJoin::Comma),
    def("transformation", "t", ListJoin::Dot),
    def("underlay", "u", ListJoin::Comma),
    def("video_codec", "vc", ListJoin::Colon),
    def("video_sampling", "vs", ListJoin::Comma),
    def("width", "w", ListJoin::Comma),
    def("x", "x", ListJoin::Comma),
    def("y", "y", ListJoin::Comma),
    def("zoom", "z", ListJoin::Comma),
];

/// One encoded entry of a path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `<code>_<value>`.
    Param {
        /// Short code, e.g. `q`.
        code: &'static str,
        /// Encoded value, e.g. `70`.
        value: String,
    },
    /// Raw transformation text, emitted unchanged.
    Raw(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param { code, value } => write!(f, "{code}_{value}"),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

fn find_def(name: &str) -> Option<&'static ParamDef> {
    let key = fold_name(name);
    PARAMS.iter().find(|d| fold_name(d.name) == key)
}

/// Canonical (snake_case) spelling of a transformation parameter, raw escape included.
pub fn canonical_param_name(name: &str) -> Option<&'static str> {
    if is_raw(name) {
        return Some(RAW_TRANSFORMATION);
    }
    find_def(name).map(|d| d.name)
}

/// `true` when `name` is a transformation parameter in any spelling.
pub fn is_param(name: &str) -> bool {
    canonical_param_name(name).is_some()
}

fn is_raw(name: &str) -> bool {
    fold_name(name) == fold_name(RAW_TRANSFORMATION)
}

/// Encode one parameter. `None` means no token is emitted.
pub fn encode(name: &str, value: &Value) -> Option<Token> {
    if is_raw(name) {
        return match value {
            Value::String(s) if !s.is_empty() => Some(Token::Raw(s.clone())),
            _ => None,
        };
    }

    let Some(d) = find_def(name) else {
        tracing::debug!(param = name, "dropping unknown transformation parameter");
        return None;
    };

    let encoded = encode_value(value, d.join);
    if encoded.is_none() && !value.is_null() {
        tracing::debug!(param = name, "dropping transformation parameter with unencodable value");
    }
    encoded.map(|value| Token::Param {
        code: d.code,
        value,
    })
}

fn encode_value(value: &Value, join: ListJoin) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts = items.iter().map(encode_scalar).collect::<Vec<_>>();
            if parts.iter().all(Option::is_none) {
                return None;
            }
            let parts: Vec<String> = if join == ListJoin::Range {
                parts.into_iter().map(Option::unwrap_or_default).collect()
            } else {
                parts.into_iter().flatten().collect()
            };
            Some(parts.join(join.separator()))
        }
        other => encode_scalar(other),
    }
}

fn encode_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/codec.rs"]
mod tests;
