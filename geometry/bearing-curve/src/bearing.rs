//! Bearing vectors and node bundles.
//!
//! A bearing is a directional force attached to a node. Its unit direction
//! comes from the angles `(phi, theta)`; combined with the force it yields
//! the control-point offset ("contribution") used by
//! [`CurveSegment`](crate::CurveSegment).

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coords::{SphericalCoords, cartesian_to_spherical};
use crate::error::ensure_finite;
use crate::{BarLength, Combine, CurveError, Hadamard, NodeVector, Result};

/// A directional force anchored to a node.
///
/// `depth` is the bearing's 0-based position in its node's ordered bearing
/// list, which decides where its control point lands in a segment.
///
/// # Example
///
/// ```
/// use bearing_curve::{BearingVector, NodeVector, Vector3};
/// use std::f64::consts::FRAC_PI_2;
///
/// let anchor = NodeVector::origin(0);
/// // Pointing along +X with a force of 2 on every axis.
/// let bearing = BearingVector::new(0, 0, &anchor, FRAC_PI_2, 0.0, Vector3::new(2.0, 2.0, 2.0))?;
///
/// let c = bearing.contribution();
/// assert!((c.x - 2.0).abs() < 1e-12);
/// assert!(c.y.abs() < 1e-12);
/// # Ok::<(), bearing_curve::CurveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawBearingVector")
)]
pub struct BearingVector {
    node_index: usize,
    depth: usize,
    anchor: NodeVector,
    phi: f64,
    theta: f64,
    force: Vector3<f64>,
}

/// Unchecked wire form of [`BearingVector`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBearingVector {
    node_index: usize,
    depth: usize,
    anchor: NodeVector,
    phi: f64,
    theta: f64,
    force: Vector3<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBearingVector> for BearingVector {
    type Error = CurveError;

    fn try_from(raw: RawBearingVector) -> Result<Self> {
        Self::new(
            raw.node_index,
            raw.depth,
            &raw.anchor,
            raw.phi,
            raw.theta,
            raw.force,
        )
    }
}

impl BearingVector {
    /// Create a bearing.
    ///
    /// Any finite angle is accepted as given; values outside `[0, π]` for
    /// `phi` or outside `(-π, π]` for `theta` are neither clamped nor
    /// wrapped, they simply go through `sin`/`cos`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if an angle or force component is not finite.
    pub fn new(
        node_index: usize,
        depth: usize,
        anchor: &NodeVector,
        phi: f64,
        theta: f64,
        force: Vector3<f64>,
    ) -> Result<Self> {
        ensure_finite("phi", phi)?;
        ensure_finite("theta", theta)?;
        for f in force.iter() {
            ensure_finite("force", *f)?;
        }
        Ok(Self {
            node_index,
            depth,
            anchor: *anchor,
            phi,
            theta,
            force,
        })
    }

    /// Rebuild a bearing from its cartesian description.
    ///
    /// The angles are recovered from the offset between `cartesian.point`
    /// and the anchor position; the force is carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the point or force is not finite.
    pub fn from_cartesian(cartesian: &CartesianBearing, anchor: &NodeVector) -> Result<Self> {
        let offset = cartesian.point - anchor.position();
        for v in offset.iter() {
            ensure_finite("bearing point", *v)?;
        }
        let s = cartesian_to_spherical(&offset);
        Self::new(
            cartesian.node_index,
            cartesian.depth,
            anchor,
            s.phi,
            s.theta,
            cartesian.force,
        )
    }

    /// Index of the node this bearing belongs to.
    #[must_use]
    pub const fn node_index(&self) -> usize {
        self.node_index
    }

    /// Position in the node's bearing list.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The anchor node.
    #[must_use]
    pub const fn anchor(&self) -> &NodeVector {
        &self.anchor
    }

    /// Polar angle φ.
    #[must_use]
    pub const fn phi(&self) -> f64 {
        self.phi
    }

    /// Azimuthal angle θ.
    #[must_use]
    pub const fn theta(&self) -> f64 {
        self.theta
    }

    /// Force vector.
    #[must_use]
    pub const fn force(&self) -> Vector3<f64> {
        self.force
    }

    /// Unit bearing direction `(sin φ cos θ, sin φ sin θ, cos φ)`.
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        SphericalCoords::unit(self.theta, self.phi).to_cartesian()
    }

    /// Control-point offset: element-wise product of direction and force.
    #[must_use]
    pub fn contribution(&self) -> Vector3<f64> {
        self.contribution_with(&Hadamard)
    }

    /// Control-point offset with an explicit combination strategy.
    #[must_use]
    pub fn contribution_with<C: Combine + ?Sized>(&self, combiner: &C) -> Vector3<f64> {
        combiner.combine(&self.direction(), &self.force)
    }

    /// Tip of the unit bearing drawn from the anchor. Display only.
    #[must_use]
    pub fn cartesian_point(&self) -> Point3<f64> {
        self.anchor.position() + self.direction()
    }

    /// Length of the bar drawn for this bearing.
    #[must_use]
    pub fn bar_length(&self, bars: &BarLength) -> f64 {
        bars.length_for(self.contribution().norm())
    }

    /// The same bearing attached to an updated copy of its node.
    pub(crate) fn reanchored(mut self, anchor: &NodeVector) -> Self {
        self.anchor = *anchor;
        self
    }

    /// Cartesian description of this bearing.
    #[must_use]
    pub fn to_cartesian(&self) -> CartesianBearing {
        CartesianBearing {
            node_index: self.node_index,
            depth: self.depth,
            point: self.cartesian_point(),
            force: self.force,
        }
    }
}

/// A bearing described by a cartesian point instead of angles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CartesianBearing {
    /// Index of the owning node.
    pub node_index: usize,
    /// Position in the node's bearing list.
    pub depth: usize,
    /// Tip of the bearing in world space.
    pub point: Point3<f64>,
    /// Force vector.
    pub force: Vector3<f64>,
}

/// A node together with its ordered bearings.
///
/// Bearings are stored sorted by depth and depths form exactly `0..len`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawNodeBundle")
)]
pub struct NodeBundle {
    node: NodeVector,
    bearings: Vec<BearingVector>,
}

/// Unchecked wire form of [`NodeBundle`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawNodeBundle {
    node: NodeVector,
    bearings: Vec<BearingVector>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNodeBundle> for NodeBundle {
    type Error = CurveError;

    fn try_from(raw: RawNodeBundle) -> Result<Self> {
        Self::new(raw.node, raw.bearings)
    }
}

impl NodeBundle {
    /// Create a bundle, ordering the bearings by depth.
    ///
    /// # Errors
    ///
    /// - [`CurveError::BearingNodeMismatch`] if a bearing names another node
    /// - [`CurveError::InvalidDepth`] if a depth is not below the bearing count
    /// - [`CurveError::DuplicateDepth`] if two bearings share a depth
    pub fn new(node: NodeVector, mut bearings: Vec<BearingVector>) -> Result<Self> {
        let len = bearings.len();
        let mut seen = vec![false; len];

        for bearing in &bearings {
            if bearing.node_index != node.index() {
                return Err(CurveError::BearingNodeMismatch {
                    expected: node.index(),
                    actual: bearing.node_index,
                });
            }
            let slot = seen
                .get_mut(bearing.depth)
                .ok_or_else(|| CurveError::invalid_depth(bearing.depth, len))?;
            if *slot {
                return Err(CurveError::DuplicateDepth(bearing.depth));
            }
            *slot = true;
        }

        bearings.sort_by_key(BearingVector::depth);
        Ok(Self { node, bearings })
    }

    /// A bundle without bearings.
    #[must_use]
    pub const fn bare(node: NodeVector) -> Self {
        Self {
            node,
            bearings: Vec::new(),
        }
    }

    /// The node.
    #[must_use]
    pub const fn node(&self) -> &NodeVector {
        &self.node
    }

    /// Bearings in depth order.
    #[must_use]
    pub fn bearings(&self) -> &[BearingVector] {
        &self.bearings
    }

    /// Number of bearings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bearings.len()
    }

    /// Whether the node has no bearings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bearings.is_empty()
    }

    /// Bearing at `depth`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidDepth`] past the end of the bundle.
    pub fn bearing(&self, depth: usize) -> Result<&BearingVector> {
        self.bearings
            .get(depth)
            .ok_or_else(|| CurveError::invalid_depth(depth, self.bearings.len()))
    }

    /// Contributions of all bearings in depth order.
    #[must_use]
    pub fn contributions_with<C: Combine + ?Sized>(&self, combiner: &C) -> Vec<Vector3<f64>> {
        self.bearings
            .iter()
            .map(|b| b.contribution_with(combiner))
            .collect()
    }

    /// Contribution of the shallowest bearing, zero for an empty bundle.
    #[must_use]
    pub fn first_contribution(&self) -> Vector3<f64> {
        self.bearings
            .first()
            .map_or_else(Vector3::zeros, BearingVector::contribution)
    }

    /// Contribution of the deepest bearing, zero for an empty bundle.
    #[must_use]
    pub fn last_contribution(&self) -> Vector3<f64> {
        self.bearings
            .last()
            .map_or_else(Vector3::zeros, BearingVector::contribution)
    }

    /// Depth-weighted sum of contributions, `Σ (d + 1) · (B_d ⊗ F_d)`.
    #[must_use]
    pub fn total_contribution(&self) -> Vector3<f64> {
        self.bearings
            .iter()
            .map(|b| b.contribution() * (b.depth + 1) as f64)
            .sum()
    }

    /// Node position displaced by [`Self::total_contribution`].
    #[must_use]
    pub fn final_point(&self) -> Point3<f64> {
        self.node.position() + self.total_contribution()
    }
}
