//! Error types for easel-core.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by descriptor lookups and image constructors.
///
/// The hot paths (codec, materializer, blend kernels) never return these:
/// their preconditions are caller contract, enforced by debug assertions
/// only.
#[derive(Debug, Error)]
pub enum Error {
    /// No registered color model matches the requested id.
    #[error("unknown color model: {id}")]
    UnknownColorModel {
        /// The id that failed to resolve.
        id: String,
    },

    /// Pixel data length does not match the declared geometry.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Why the dimensions were rejected.
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::UnknownColorModel`] error.
    #[inline]
    pub fn unknown_color_model(id: impl Into<String>) -> Self {
        Self::UnknownColorModel { id: id.into() }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::unknown_color_model("CMYK");
        assert!(err.to_string().contains("CMYK"));

        let err = Error::invalid_dimensions(16, 9, "short buffer");
        let msg = err.to_string();
        assert!(msg.contains("16x9"));
        assert!(msg.contains("short buffer"));
    }
}
