/// Convenience result type used across the engine.
pub type TurtleResult<T> = Result<T, TurtleError>;

/// Top-level error taxonomy used by host-facing APIs.
///
/// Drawing operations issued through the bridge never produce these; they only surface on the
/// host side (surface binding, configuration and program loading, frame output).
#[derive(thiserror::Error, Debug)]
pub enum TurtleError {
    /// Invalid user-provided surface, configuration or color data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while rasterizing or reading back the drawing surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TurtleError {
    /// Build a [`TurtleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TurtleError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TurtleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
