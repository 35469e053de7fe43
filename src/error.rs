//! Error types and result utilities for acoustic signal operations.

use semver::Version;
use thiserror::Error;

/// Convenience type alias for results that may contain AcousticError
pub type AcousticResult<T> = Result<T, AcousticError>;

/// Error types that can occur while using the library.
#[derive(Error, Debug)]
pub enum AcousticError {
    /// A guarded symbol has passed its cutover version and no longer exists.
    ///
    /// Raised instead of running the symbol; the replacement, when one exists,
    /// names the surface callers should migrate to.
    #[error("`{symbol}` was removed in version {removed_in}{}", replacement_hint(.replacement))]
    MemberRemoved {
        /// Fully qualified name of the removed symbol.
        symbol: &'static str,
        /// First version in which the symbol is unreachable.
        removed_in: Version,
        /// Surface that replaces the removed symbol.
        replacement: Option<&'static str>,
    },

    /// A value was passed that the parameter does not (or no longer) accept.
    #[error(
        "Invalid value {value:?} for `{parameter}`; allowed values are {}",
        .allowed.join(", ")
    )]
    InvalidValue {
        /// Name of the parameter that received the value.
        parameter: &'static str,
        /// The rejected value.
        value: String,
        /// Values the parameter accepts at the running version.
        allowed: Vec<&'static str>,
    },

    /// Error that occurs when invalid parameters are provided to an operation.
    ///
    /// This includes cases like zero filter orders, cutoffs above Nyquist, etc.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),

    /// Error that occurs when array dimensions don't match expected values.
    #[error("Dimension mismatch error: {0}")]
    DimensionMismatch(String),

    /// Audio file content that the reader cannot decode.
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Underlying file system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A version string that does not follow semantic versioning.
    #[error("Invalid version: {0}")]
    Version(#[from] semver::Error),

    /// Configuration that could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AcousticError {
    /// Create an [`AcousticError::InvalidValue`] error.
    pub fn invalid_value(
        parameter: &'static str,
        value: impl Into<String>,
        allowed: &[&'static str],
    ) -> Self {
        Self::InvalidValue {
            parameter,
            value: value.into(),
            allowed: allowed.to_vec(),
        }
    }

    /// Returns true for errors raised by the deprecation gate after a cutover.
    pub const fn is_removal(&self) -> bool {
        matches!(
            self,
            Self::MemberRemoved { .. } | Self::InvalidValue { .. }
        )
    }
}

fn replacement_hint(replacement: &Option<&'static str>) -> String {
    match replacement {
        Some(name) => format!("; use `{name}` instead"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_removed_message() {
        let err = AcousticError::MemberRemoved {
            symbol: "filter::butter",
            removed_in: Version::new(0, 5, 0),
            replacement: Some("filter::butterworth"),
        };
        assert_eq!(
            err.to_string(),
            "`filter::butter` was removed in version 0.5.0; use `filter::butterworth` instead"
        );
        assert!(err.is_removal());
    }

    #[test]
    fn test_invalid_value_lists_allowed() {
        let err = AcousticError::invalid_value("mode", "before", &["beginning", "end"]);
        assert!(err.to_string().contains("\"before\""));
        assert!(err.to_string().contains("beginning, end"));
        assert!(err.is_removal());
    }

    #[test]
    fn test_io_error_is_not_removal() {
        let err: AcousticError = std::io::Error::other("disk").into();
        assert!(!err.is_removal());
    }
}
