pub(crate) mod attrs;
pub(crate) mod context;
pub(crate) mod document;
pub(crate) mod dsl;
pub(crate) mod host;
pub(crate) mod props;
pub(crate) mod reload;
pub(crate) mod render;
