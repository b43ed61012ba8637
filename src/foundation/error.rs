/// Convenience result type used across memeforge.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these are retried internally: every failure is a deterministic function of the
/// inputs.
#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    /// Caller-supplied options or labels violate a structural precondition.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Supplied bytes are not a decodable image or animation.
    #[error("decode error: {0}")]
    Decode(String),

    /// Caller contract violation (unknown anchor, unknown face, vertex/label mismatch).
    #[error("contract violation: {0}")]
    Contract(String),

    /// Encoding the finished canvas failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Startup resource loading failed.
    #[error("resource error: {0}")]
    Resource(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ForgeError {
    /// Build a [`ForgeError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ForgeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ForgeError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`ForgeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ForgeError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
