use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type CertResult<T> = Result<T, CertError>;

/// Errors produced while validating, rendering or logging a donation.
///
/// `FontUnavailable` and `ShapingUnsupported` are recovered inside the renderer and never reach a
/// submission report; they are public so the text engine can be driven directly.
#[derive(thiserror::Error, Debug)]
pub enum CertError {
    /// User input rejected before any side effect.
    #[error("validation error: {0}")]
    Validation(String),

    /// The certificate template file does not exist.
    #[error("asset not found: '{}'", .0.display())]
    AssetNotFound(PathBuf),

    /// An asset exists but could not be used.
    #[error("asset error: {0}")]
    Asset(String),

    /// The configured font could not be loaded.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// The text engine cannot honour the requested script hint.
    #[error("shaping unsupported: {0}")]
    ShapingUnsupported(String),

    /// The donation log collaborator failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Encoding or writing the output image failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration could not be read or is invalid.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CertError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    pub fn shaping_unsupported(msg: impl Into<String>) -> Self {
        Self::ShapingUnsupported(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
