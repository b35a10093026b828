//! Parameters for curve segments and bearing display.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CurveError, Result};

/// Parameters for building and sampling a [`CurveSegment`](crate::CurveSegment).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentParams {
    /// Number of sampling intervals. The curve yields `level_of_detail + 1`
    /// points. Default: 100
    pub level_of_detail: usize,

    /// Blend between the two endpoints' offsets for the bridge control
    /// point, in [0, 1]. 1 follows the start node, 0 the end node.
    /// Default: 0.5
    pub alpha: f64,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            level_of_detail: 100,
            alpha: 0.5,
        }
    }
}

impl SegmentParams {
    /// Create params with the given level of detail.
    #[must_use]
    pub fn with_level_of_detail(level_of_detail: usize) -> Self {
        Self {
            level_of_detail,
            ..Default::default()
        }
    }

    /// Minimal sampling: only endpoints and the parametric midpoint.
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            level_of_detail: 2,
            ..Default::default()
        }
    }

    /// Set the bridge blend factor.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleCount`] for a zero level of detail
    /// and [`CurveError::AlphaOutOfRange`] for alpha outside [0, 1] or NaN.
    pub fn validate(&self) -> Result<()> {
        validate_sample_count(self.level_of_detail)?;
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(CurveError::AlphaOutOfRange(self.alpha));
        }
        Ok(())
    }
}

/// Reject a zero sample count.
pub(crate) fn validate_sample_count(sample_count: usize) -> Result<()> {
    if sample_count == 0 {
        Err(CurveError::InvalidSampleCount(sample_count))
    } else {
        Ok(())
    }
}

/// Display length bounds for bearing bars.
///
/// A bar for a vector of magnitude `m` is drawn with length
/// `min + (max - min) · m`, with `m` clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawBarLength")
)]
pub struct BarLength {
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBarLength {
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBarLength> for BarLength {
    type Error = CurveError;

    fn try_from(raw: RawBarLength) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl Default for BarLength {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 10.0,
        }
    }
}

impl BarLength {
    /// Create bar length bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidBarLength`] unless
    /// `0 <= min <= max` and both are finite.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(CurveError::InvalidBarLength { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Bar length for a vector magnitude.
    #[must_use]
    pub fn length_for(&self, magnitude: f64) -> f64 {
        let m = if magnitude.is_nan() {
            0.0
        } else {
            magnitude.clamp(0.0, 1.0)
        };
        self.min + (self.max - self.min) * m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SegmentParams::default();
        assert_eq!(params.level_of_detail, 100);
        assert!((params.alpha - 0.5).abs() < 1e-12);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let params = SegmentParams::with_level_of_detail(8).with_alpha(0.25);
        assert_eq!(params.level_of_detail, 8);
        assert!((params.alpha - 0.25).abs() < 1e-12);

        let params = SegmentParams::coarse().with_alpha(1.0);
        assert_eq!(params.level_of_detail, 2);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            SegmentParams::with_level_of_detail(0).validate(),
            Err(CurveError::InvalidSampleCount(0))
        );
        assert_eq!(
            SegmentParams::default().with_alpha(1.5).validate(),
            Err(CurveError::AlphaOutOfRange(1.5))
        );
        assert!(SegmentParams::default().with_alpha(f64::NAN).validate().is_err());
        assert!(SegmentParams::default().with_alpha(0.0).validate().is_ok());
        assert!(SegmentParams::default().with_alpha(1.0).validate().is_ok());
    }

    #[test]
    fn test_bar_length() {
        let bars = BarLength::default();
        assert!((bars.length_for(0.0) - 0.1).abs() < 1e-12);
        assert!((bars.length_for(1.0) - 10.0).abs() < 1e-12);
        assert!((bars.length_for(0.5) - 5.05).abs() < 1e-12);
        assert!((bars.length_for(3.0) - 10.0).abs() < 1e-12);
        assert!((bars.length_for(f64::NAN) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_bar_length_validation() {
        assert!(BarLength::new(0.5, 2.0).is_ok());
        assert!(BarLength::new(2.0, 0.5).is_err());
        assert!(BarLength::new(-1.0, 0.5).is_err());
        assert!(BarLength::new(0.0, f64::INFINITY).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_bar_length_serde_validates() {
        let bars = BarLength::new(0.5, 2.0).unwrap();
        let json = serde_json::to_string(&bars).unwrap();
        assert_eq!(serde_json::from_str::<BarLength>(&json).unwrap(), bars);

        assert!(serde_json::from_str::<BarLength>(r#"{"min":2.0,"max":0.5}"#).is_err());
        assert!(serde_json::from_str::<BarLength>(r#"{"min":-1.0,"max":0.5}"#).is_err());
    }
}
