//! Split incoming properties into configuration and pass-through attributes.
//!
//! Both tables are static. A recognized name is rewritten to exactly one canonical spelling; an
//! unrecognized name is forwarded untouched.

use serde_json::{Map, Value};

use crate::{foundation::naming::lookup_folded, transform::codec::canonical_param_name};

/// Asset identity and source/poster controls, in canonical spelling.
pub const CONTROL_NAMES: &[&str] = &[
    "cloud_name",
    "public_id",
    "resource_type",
    "format",
    "secure",
    "source_types",
    "source_transformation",
    "poster",
    "fallback",
];

/// Media element attributes in the spelling the rendered element expects.
///
/// Callers may also use any spelling that folds to the same key (`auto_play`, `autoplay`).
pub const MEDIA_ATTRIBUTES: &[&str] = &[
    "autoPlay",
    "playsInline",
    "crossOrigin",
    "controlsList",
    "disablePictureInPicture",
    "disableRemotePlayback",
    "defaultMuted",
    "defaultPlaybackRate",
];

/// Output of [`classify`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedProps {
    /// Recognized configuration, keyed by canonical snake_case name.
    pub config: Map<String, Value>,
    /// Attributes forwarded to the rendered element.
    pub passthrough: Map<String, Value>,
}

/// Canonical name of a configuration property (control or transformation parameter).
pub fn canonical_config_name(name: &str) -> Option<&'static str> {
    lookup_folded(CONTROL_NAMES, name).or_else(|| canonical_param_name(name))
}

/// Canonical element spelling of an aliased media attribute.
pub fn canonical_media_attribute(name: &str) -> Option<&'static str> {
    lookup_folded(MEDIA_ATTRIBUTES, name)
}

/// Partition `props`. Total: unknown names never fail.
pub fn classify(props: &Map<String, Value>) -> ClassifiedProps {
    let mut out = ClassifiedProps::default();
    for (name, value) in props {
        if let Some(canon) = canonical_config_name(name) {
            insert_canonical(&mut out.config, canon, name, value);
        } else if let Some(canon) = canonical_media_attribute(name) {
            insert_canonical(&mut out.passthrough, canon, name, value);
        } else {
            out.passthrough.insert(name.clone(), value.clone());
        }
    }
    out
}

/// The canonical spelling wins over an alias; among aliases the first seen wins.
fn insert_canonical(map: &mut Map<String, Value>, canon: &str, given: &str, value: &Value) {
    if given == canon {
        map.insert(canon.to_string(), value.clone());
    } else {
        map.entry(canon.to_string()).or_insert_with(|| value.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/attrs.rs"]
mod tests;
