//! Error types for streamline operations.

use thiserror::Error;

/// Errors that can occur while building or processing streamlines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamlineError {
    /// A flat coordinate buffer does not have the expected width.
    #[error("invalid shape: {len} values cannot be split into rows of {width}")]
    InvalidShape {
        /// Number of values supplied.
        len: usize,
        /// Expected row width.
        width: usize,
    },

    /// A numeric parameter is outside its valid range.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name as exposed to callers.
        name: &'static str,
        /// Offending value, formatted.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A linear system arising from a spline fit has no unique solution.
    #[error("singular system of size {size} in spline fit")]
    SingularSystem {
        /// Number of unknowns.
        size: usize,
    },
}

impl StreamlineError {
    pub(crate) fn invalid_parameter(
        name: &'static str,
        value: impl std::fmt::Display,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Result alias for streamline operations.
pub type Result<T> = std::result::Result<T, StreamlineError>;
