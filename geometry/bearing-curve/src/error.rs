//! Error types for node, bearing and segment operations.

use thiserror::Error;

/// Errors that can occur while building nodes, bearings and curve segments.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CurveError {
    /// A radius was negative.
    #[error("invalid radius: {0} (must be non-negative)")]
    NegativeRadius(f64),

    /// An input value was NaN or infinite.
    #[error("non-finite {what}: {value}")]
    NonFinite {
        /// Which input was not finite.
        what: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Sampling needs at least one interval.
    #[error("invalid sample count {0}: must be at least 1")]
    InvalidSampleCount(usize),

    /// The bridge blend factor is outside [0, 1].
    #[error("alpha {0} is outside valid range [0, 1]")]
    AlphaOutOfRange(f64),

    /// A bearing depth does not fit the bundle it belongs to.
    #[error("bearing depth {depth} is out of range for a bundle of {len} bearings")]
    InvalidDepth {
        /// Requested or stored depth.
        depth: usize,
        /// Number of bearings in the bundle.
        len: usize,
    },

    /// Two bearings of one bundle share a depth.
    #[error("duplicate bearing depth {0}")]
    DuplicateDepth(usize),

    /// A bearing was attached to a bundle of a different node.
    #[error("bearing belongs to node {actual}, expected node {expected}")]
    BearingNodeMismatch {
        /// Index of the bundle's node.
        expected: usize,
        /// Node index carried by the bearing.
        actual: usize,
    },

    /// No node with this index is stored.
    #[error("unknown node index {0}")]
    UnknownNode(usize),

    /// Insufficient points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Stored values that should agree with each other do not.
    #[error("inconsistent {0}")]
    Inconsistent(&'static str),

    /// Display bar bounds are invalid.
    #[error("invalid bar length bounds: min {min}, max {max}")]
    InvalidBarLength {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl CurveError {
    /// Create a non-finite input error.
    #[must_use]
    pub fn non_finite(what: &'static str, value: f64) -> Self {
        Self::NonFinite { what, value }
    }

    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Create an invalid depth error.
    #[must_use]
    pub fn invalid_depth(depth: usize, len: usize) -> Self {
        Self::InvalidDepth { depth, len }
    }

    /// Check if this error was caused by an invalid numeric input.
    ///
    /// Domain errors are raised instead of letting NaN or undefined values
    /// reach the curve.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::NegativeRadius(_)
                | Self::NonFinite { .. }
                | Self::InvalidSampleCount(_)
                | Self::AlphaOutOfRange(_)
                | Self::InvalidDepth { .. }
                | Self::InvalidBarLength { .. }
        )
    }

    /// Check if this is an insufficient points error.
    #[must_use]
    pub fn is_insufficient_points(&self) -> bool {
        matches!(self, Self::InsufficientPoints { .. })
    }
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(what: &'static str, value: f64) -> crate::Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CurveError::non_finite(what, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::insufficient_points(2, 1);
        assert!(err.to_string().contains("need at least 2"));
        assert!(err.to_string().contains("got 1"));

        let err = CurveError::AlphaOutOfRange(1.5);
        assert!(err.to_string().contains("1.5"));

        let err = CurveError::NegativeRadius(-1.0);
        assert!(err.to_string().contains("-1"));

        let err = CurveError::invalid_depth(3, 2);
        assert!(err.to_string().contains("depth 3"));

        let err = CurveError::Inconsistent("node views");
        assert_eq!(err.to_string(), "inconsistent node views");
    }

    #[test]
    fn test_error_predicates() {
        assert!(CurveError::InvalidSampleCount(0).is_domain());
        assert!(CurveError::NegativeRadius(-2.0).is_domain());
        assert!(CurveError::non_finite("phi", f64::NAN).is_domain());
        assert!(!CurveError::UnknownNode(4).is_domain());

        let err = CurveError::insufficient_points(2, 0);
        assert!(err.is_insufficient_points());
        assert!(!err.is_domain());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("r", 2.5), Ok(2.5));
        assert!(matches!(
            ensure_finite("theta", f64::INFINITY),
            Err(CurveError::NonFinite { what: "theta", .. })
        ));
    }
}
