use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    element::{
        context::CloudContext,
        props::VideoProps,
        render::{Rendered, render_video},
    },
    foundation::error::{CldError, CldResult},
};

/// On-disk description of one video element and the context layers around it.
///
/// `context` lists the enclosing context elements outermost first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoDocument {
    /// Enclosing context properties, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<Map<String, Value>>,
    /// Properties of the video element itself.
    pub props: VideoProps,
}

impl VideoDocument {
    /// Parse a document from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> CldResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CldError::serde(format!("parse video document JSON: {e}")))
    }

    /// Parse a document from a JSON string.
    pub fn from_json_str(s: &str) -> CldResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CldError::serde(format!("parse video document JSON: {e}")))
    }

    /// Parse a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CldResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CldError::validation(format!("open video document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Context produced by nesting every layer in order.
    pub fn context(&self) -> CloudContext {
        self.context
            .iter()
            .fold(CloudContext::new(), |ctx, layer| ctx.nest(layer))
    }

    /// Render the element under its own context.
    pub fn render(&self) -> CldResult<Rendered> {
        render_video(&self.props, &self.context())
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> CldResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CldError::serde(format!("encode video document JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/document.rs"]
mod tests;
