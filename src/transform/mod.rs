pub(crate) mod codec;
pub(crate) mod compiler;
pub(crate) mod step;
