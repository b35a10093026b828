//! Bézier curves of arbitrary degree.
//!
//! A curve with control points `P₀ … Pₙ` is the Bernstein polynomial
//!
//! ```text
//! B(t) = Σ_{j=0}^{n} C(n, j) (1-t)^{n-j} t^j P_j,   0 ≤ t ≤ 1
//! ```
//!
//! The whole control polygon defines a single segment of degree `n`; there
//! is no knot vector and no piecewise structure. Evaluation runs de
//! Casteljau's recurrence, which yields the same polynomial without forming
//! `C(n, j)`, so it stays finite for polygons of any length.

use nalgebra::{Point3, Vector3};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::validate_sample_count;
use crate::{Curve, CurveError, Result};

/// Binomial coefficient `C(n, k)`.
///
/// Computed with the multiplicative recurrence. `C(n, k) = 0` for `k > n`;
/// results that do not fit in a `u64` saturate.
///
/// ```
/// use bearing_curve::binomial;
///
/// assert_eq!(binomial(4, 2), 6);
/// assert_eq!(binomial(5, 0), 1);
/// assert_eq!(binomial(3, 4), 0);
/// ```
#[must_use]
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 1..=u128::from(k) {
        // Exact: after this step `result` is C(n - k + i, i).
        result = result * (u128::from(n - k) + i) / i;
        if result > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    u64::try_from(result).unwrap_or(u64::MAX)
}

/// Evaluate the Bézier curve over `points` at `t` by de Casteljau.
///
/// Every step is a convex blend `(1 - t)·a + t·b`, so no binomial
/// coefficient is ever formed and the result is exact at `t = 0` and `t = 1`.
fn de_casteljau(points: &[Vector3<f64>], t: f64) -> Vector3<f64> {
    let s = 1.0 - t;
    let mut scratch = points.to_vec();
    for level in (1..scratch.len()).rev() {
        for i in 0..level {
            scratch[i] = scratch[i] * s + scratch[i + 1] * t;
        }
    }
    scratch.first().copied().unwrap_or_else(Vector3::zeros)
}

/// A single Bézier curve over all of its control points.
///
/// # Example
///
/// ```
/// use bearing_curve::{BezierCurve, Curve, Point3};
///
/// let curve = BezierCurve::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ])?;
///
/// let samples = curve.sample(4)?;
/// assert_eq!(samples.len(), 5);
/// assert_eq!(samples[0], Point3::new(0.0, 0.0, 0.0));
/// assert!(curve.point_at(0.5).y > 0.0);
/// # Ok::<(), bearing_curve::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawBezierCurve")
)]
pub struct BezierCurve {
    control_points: Vec<Point3<f64>>,
}

/// Unchecked wire form of [`BezierCurve`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBezierCurve {
    control_points: Vec<Point3<f64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBezierCurve> for BezierCurve {
    type Error = CurveError;

    fn try_from(raw: RawBezierCurve) -> Result<Self> {
        Self::new(raw.control_points)
    }
}

impl BezierCurve {
    /// Create a curve from its control polygon.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] for fewer than 2 points.
    pub fn new(control_points: Vec<Point3<f64>>) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(CurveError::insufficient_points(2, control_points.len()));
        }
        Ok(Self { control_points })
    }

    /// Degree `n`, one less than the number of control points.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    /// The control polygon.
    #[must_use]
    pub fn control_points(&self) -> &[Point3<f64>] {
        &self.control_points
    }

    /// Total length of the control polygon, an upper bound on arc length.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        self.control_points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    /// Sample the curve at `t_k = k / sample_count` for `k = 0..=sample_count`.
    ///
    /// The first and last samples are the first and last control points.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleCount`] if `sample_count` is 0.
    pub fn sample(&self, sample_count: usize) -> Result<Vec<Point3<f64>>> {
        validate_sample_count(sample_count)?;

        let coords = self.coords();
        let at = |k: usize| Point3::from(de_casteljau(&coords, k as f64 / sample_count as f64));

        #[cfg(feature = "parallel")]
        let samples: Vec<Point3<f64>> = (0..=sample_count).into_par_iter().map(at).collect();
        #[cfg(not(feature = "parallel"))]
        let samples: Vec<Point3<f64>> = (0..=sample_count).map(at).collect();

        debug!(
            degree = self.degree(),
            samples = samples.len(),
            "Sampled Bézier curve"
        );
        Ok(samples)
    }

    fn coords(&self) -> Vec<Vector3<f64>> {
        self.control_points.iter().map(|p| p.coords).collect()
    }

    /// Forward differences `P_{j+1} - P_j`, scaled by the degree.
    fn hodograph(&self) -> Vec<Vector3<f64>> {
        let n = self.degree() as f64;
        self.control_points
            .windows(2)
            .map(|w| (w[1] - w[0]) * n)
            .collect()
    }
}

impl Curve for BezierCurve {
    fn point_at(&self, t: f64) -> Point3<f64> {
        Point3::from(de_casteljau(&self.coords(), t.clamp(0.0, 1.0)))
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        de_casteljau(&self.hodograph(), t.clamp(0.0, 1.0))
    }

    fn second_derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let first = self.hodograph();
        if first.len() < 2 {
            return Vector3::zeros();
        }
        let m = (first.len() - 1) as f64;
        let second: Vec<Vector3<f64>> = first.windows(2).map(|w| (w[1] - w[0]) * m).collect();
        de_casteljau(&second, t)
    }
}
