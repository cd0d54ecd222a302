//! `cldvideo` compiles declarative video descriptions into Cloudinary delivery URLs.
//!
//! A video element is described by a flat property map plus nested transformation descriptors
//! ([`VideoProps`]). Rendering it ([`render_video`]) produces:
//!
//! - one delivery URL per requested format, each carrying the shared transformation chain and
//!   that format's own final step
//! - a poster URL (explicit URL, independent asset, or the video's own first frame)
//! - the attributes forwarded unchanged to the media element
//! - a [`ConfigSnapshot`] used by [`ReloadController`] to decide when the element must reload
//!
//! URL generation is a pure function of its inputs; the crate performs no I/O besides reading
//! configuration documents on request.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod delivery;
mod element;
mod foundation;
mod transform;

pub use crate::foundation::error::{CldError, CldResult};

pub use crate::transform::codec::{
    RAW_TRANSFORMATION, Token, canonical_param_name, encode, is_param,
};
pub use crate::transform::compiler::{
    AssetRef, DELIVERY_HOST, Protocol, ResourceType, compile, compile_step,
};
pub use crate::transform::step::{
    ChildNode, FlattenedChildren, TransformationNode, TransformationStep, flatten_children,
};

pub use crate::delivery::poster::{
    DEFAULT_POSTER_FORMAT, PosterAsset, PosterDefaults, PosterSpec, resolve_poster,
};
pub use crate::delivery::source::{
    SourceOverrides, SourceType, VideoSource, parse_source_types, resolve_sources,
};

pub use crate::element::attrs::{
    CONTROL_NAMES, ClassifiedProps, MEDIA_ATTRIBUTES, canonical_config_name,
    canonical_media_attribute, classify,
};
pub use crate::element::context::CloudContext;
pub use crate::element::document::VideoDocument;
pub use crate::element::dsl::VideoBuilder;
pub use crate::element::host::{HostAction, MediaHost, RecordingHost, VideoInstance};
pub use crate::element::props::{ResolvedProps, VideoConfig, VideoProps};
pub use crate::element::reload::{ConfigSnapshot, Fingerprint, ReloadController, should_reload};
pub use crate::element::render::{Rendered, VideoElement, render_video};
