//! Curve segments between two node bundles.
//!
//! # Control polygon
//!
//! For a start bundle `(N₁, [B₁₁ … B₁D₁])` and an end bundle
//! `(N₂, [B₂₁ … B₂D₂])`, with `C(B)` the bearing's contribution, the
//! polygon has `n + 1 = D₁ + D₂ + 2` slots:
//!
//! ```text
//! P₀            = N₁
//! P_i           = N₁ + C(B₁ᵢ)                              1 ≤ i ≤ D₁
//! P_{D₁+1}      = α (N₁ + C(B₁D₁)) + (1 - α) (N₂ - C(B₂₁))
//! P_{D₁+1+j}    = N₂ - C(B₂_{D₂-j+1})                       1 ≤ j < D₂
//! P_n           = N₂
//! ```
//!
//! Slot `n` always holds `N₂`. The incoming bearing `B₂₁` reaches the
//! polygon only through the bridge point, and without incoming bearings the
//! bridge slot is slot `n`. Without outgoing bearings the bridge uses a zero
//! offset on the start side. Two bare bundles give the straight edge
//! `[N₁, N₂]`.

use nalgebra::{Point3, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BezierCurve, Combine, Curve, Hadamard, NodeBundle, Result, SegmentParams};

/// A sampled curve joining two nodes, shaped by their bearings.
///
/// Control points are derived once at construction and never change;
/// [`Self::resample`] only recomputes the sampled points.
///
/// # Example
///
/// ```
/// use bearing_curve::{CurveSegment, NodeBundle, NodeVector, SphericalPosition};
/// use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
///
/// let n1 = NodeVector::from_spherical(SphericalPosition::new(1, 10.0, FRAC_PI_2, FRAC_PI_4))?;
/// let n2 = NodeVector::from_spherical(SphericalPosition::new(2, 15.0, FRAC_PI_4, FRAC_PI_2))?;
///
/// let segment = CurveSegment::new(NodeBundle::bare(n1), NodeBundle::bare(n2), 2)?;
///
/// assert_eq!(segment.control_points().len(), 2);
/// assert_eq!(segment.sampled_points().len(), 3);
/// assert_eq!(segment.sampled_points()[0], n1.position());
/// # Ok::<(), bearing_curve::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawCurveSegment")
)]
pub struct CurveSegment {
    start: NodeBundle,
    end: NodeBundle,
    level_of_detail: usize,
    alpha: f64,
    curve: BezierCurve,
    sampled_points: Vec<Point3<f64>>,
}

impl CurveSegment {
    /// Build a segment with the default blend factor of 0.5.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleCount`](crate::CurveError::InvalidSampleCount)
    /// if `level_of_detail` is 0.
    pub fn new(start: NodeBundle, end: NodeBundle, level_of_detail: usize) -> Result<Self> {
        Self::with_params(
            start,
            end,
            &SegmentParams::with_level_of_detail(level_of_detail),
        )
    }

    /// Build a segment from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the parameters fail
    /// [`SegmentParams::validate`].
    pub fn with_params(start: NodeBundle, end: NodeBundle, params: &SegmentParams) -> Result<Self> {
        Self::with_combiner(start, end, params, &Hadamard)
    }

    /// Build a segment using a custom bearing/force combination.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the parameters fail
    /// [`SegmentParams::validate`].
    pub fn with_combiner<C: Combine + ?Sized>(
        start: NodeBundle,
        end: NodeBundle,
        params: &SegmentParams,
        combiner: &C,
    ) -> Result<Self> {
        params.validate()?;

        let control_points = control_polygon(&start, &end, params.alpha, combiner);
        debug!(
            start = start.node().index(),
            end = end.node().index(),
            control_points = control_points.len(),
            alpha = params.alpha,
            "Assembled control polygon"
        );

        let curve = BezierCurve::new(control_points)?;
        let sampled_points = curve.sample(params.level_of_detail)?;

        Ok(Self {
            start,
            end,
            level_of_detail: params.level_of_detail,
            alpha: params.alpha,
            curve,
            sampled_points,
        })
    }

    /// Recompute the sampled points at a new level of detail.
    ///
    /// The control points are reused as they are. On error the segment is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleCount`](crate::CurveError::InvalidSampleCount)
    /// if `level_of_detail` is 0.
    pub fn resample(&mut self, level_of_detail: usize) -> Result<()> {
        self.sampled_points = self.curve.sample(level_of_detail)?;
        self.level_of_detail = level_of_detail;
        Ok(())
    }

    /// Control polygon, from the start node to the end node.
    #[must_use]
    pub fn control_points(&self) -> &[Point3<f64>] {
        self.curve.control_points()
    }

    /// Sampled curve points, `level_of_detail + 1` of them.
    #[must_use]
    pub fn sampled_points(&self) -> &[Point3<f64>] {
        &self.sampled_points
    }

    /// Start bundle.
    #[must_use]
    pub const fn start(&self) -> &NodeBundle {
        &self.start
    }

    /// End bundle.
    #[must_use]
    pub const fn end(&self) -> &NodeBundle {
        &self.end
    }

    /// Number of sampling intervals.
    #[must_use]
    pub const fn level_of_detail(&self) -> usize {
        self.level_of_detail
    }

    /// Bridge blend factor.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Degree of the underlying Bézier curve.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.curve.degree()
    }

    /// The underlying curve, for evaluation at arbitrary parameters.
    #[must_use]
    pub const fn curve(&self) -> &BezierCurve {
        &self.curve
    }

    /// Whether neither end carries bearings.
    ///
    /// Such a segment is the straight edge between the two nodes.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Curvature at parameter `t`.
    #[must_use]
    pub fn curvature_at(&self, t: f64) -> f64 {
        self.curve.curvature_at(t)
    }

    /// Largest curvature over the sampling parameters.
    #[must_use]
    pub fn max_curvature(&self) -> f64 {
        let n = self.level_of_detail as f64;
        (0..=self.level_of_detail)
            .map(|k| self.curve.curvature_at(k as f64 / n))
            .fold(0.0, f64::max)
    }
}

/// Unchecked wire form of [`CurveSegment`]. Stored samples are ignored.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawCurveSegment {
    start: NodeBundle,
    end: NodeBundle,
    level_of_detail: usize,
    alpha: f64,
    curve: BezierCurve,
}

/// The stored curve is kept, since it may come from a custom combiner, but
/// it must run between the two nodes. Samples are recomputed from it.
#[cfg(feature = "serde")]
impl TryFrom<RawCurveSegment> for CurveSegment {
    type Error = crate::CurveError;

    fn try_from(raw: RawCurveSegment) -> Result<Self> {
        let params = SegmentParams {
            level_of_detail: raw.level_of_detail,
            alpha: raw.alpha,
        };
        params.validate()?;

        let cps = raw.curve.control_points();
        let (first, last) = (cps[0], cps[cps.len() - 1]);
        if first != raw.start.node().position() || last != raw.end.node().position() {
            return Err(crate::CurveError::Inconsistent("segment endpoints"));
        }

        let sampled_points = raw.curve.sample(params.level_of_detail)?;
        Ok(Self {
            start: raw.start,
            end: raw.end,
            level_of_detail: params.level_of_detail,
            alpha: params.alpha,
            curve: raw.curve,
            sampled_points,
        })
    }
}

/// Assemble the control polygon for two bundles.
fn control_polygon<C: Combine + ?Sized>(
    start: &NodeBundle,
    end: &NodeBundle,
    alpha: f64,
    combiner: &C,
) -> Vec<Point3<f64>> {
    let p0 = start.node().position();
    let pn = end.node().position();
    let outgoing = start.contributions_with(combiner);
    let incoming = end.contributions_with(combiner);

    let mut points = Vec::with_capacity(outgoing.len() + incoming.len() + 2);
    points.push(p0);
    points.extend(outgoing.iter().map(|c| p0 + c));

    if let Some(first_in) = incoming.first() {
        let last_out = outgoing.last().copied().unwrap_or_else(Vector3::zeros);
        let bridge = (p0 + last_out).coords * alpha + (pn - first_in).coords * (1.0 - alpha);
        points.push(Point3::from(bridge));
        points.extend(incoming[1..].iter().rev().map(|c| pn - c));
    }
    points.push(pn);
    points
}
