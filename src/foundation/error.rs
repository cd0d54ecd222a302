/// Result alias used across the crate.
pub type CldResult<T> = Result<T, CldError>;

/// Error type for every fallible operation in the crate.
#[derive(thiserror::Error, Debug)]
pub enum CldError {
    /// The configuration cannot address an asset or names an unsupported value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An input document is structurally invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON encode/decode failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, forwarded unchanged.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CldError {
    /// Build a [`CldError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`CldError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CldError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
