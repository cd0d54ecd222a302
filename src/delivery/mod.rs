pub(crate) mod poster;
pub(crate) mod source;
