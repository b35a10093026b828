//! Node vectors: anchor points with spherical and cartesian views.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::coords::{SphericalCoords, cartesian_to_spherical};
use crate::error::ensure_finite;

/// A node position in spherical form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphericalPosition {
    /// Node index.
    pub index: usize,
    /// Radius.
    pub r: f64,
    /// Azimuthal angle θ.
    pub theta: f64,
    /// Polar angle φ.
    pub phi: f64,
}

impl SphericalPosition {
    /// Create a spherical position.
    #[must_use]
    pub const fn new(index: usize, r: f64, theta: f64, phi: f64) -> Self {
        Self {
            index,
            r,
            theta,
            phi,
        }
    }

    /// The bare coordinate triple.
    #[must_use]
    pub const fn coords(&self) -> SphericalCoords {
        SphericalCoords::new(self.r, self.theta, self.phi)
    }
}

/// A node position in cartesian form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CartesianPosition {
    /// Node index.
    pub index: usize,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl CartesianPosition {
    /// Create a cartesian position.
    #[must_use]
    pub const fn new(index: usize, x: f64, y: f64, z: f64) -> Self {
        Self { index, x, y, z }
    }

    /// The position as a point.
    #[must_use]
    pub fn point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

/// A node in 3D space, held in both spherical and cartesian form.
///
/// One view is given at construction and the other is derived from it
/// right away. Both are private and never change afterwards, so they cannot
/// drift apart: a moved node is a new `NodeVector`.
///
/// # Example
///
/// ```
/// use bearing_curve::{NodeVector, SphericalPosition};
/// use std::f64::consts::FRAC_PI_2;
///
/// let node = NodeVector::from_spherical(SphericalPosition::new(1, 2.0, 0.0, FRAC_PI_2))?;
/// assert!((node.cartesian().x - 2.0).abs() < 1e-12);
/// # Ok::<(), bearing_curve::CurveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawNodeVector")
)]
pub struct NodeVector {
    spherical: SphericalPosition,
    cartesian: CartesianPosition,
}

/// Unchecked wire form of [`NodeVector`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawNodeVector {
    spherical: SphericalPosition,
    cartesian: CartesianPosition,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNodeVector> for NodeVector {
    type Error = crate::CurveError;

    fn try_from(raw: RawNodeVector) -> Result<Self> {
        let derived = Self::from_spherical(raw.spherical)?;
        let tolerance = 1e-9 * raw.spherical.r.max(1.0);
        let gap = (derived.position() - raw.cartesian.point()).norm();
        // `!(<=)` also rejects NaN.
        if raw.cartesian.index != raw.spherical.index || !(gap <= tolerance) {
            return Err(crate::CurveError::Inconsistent("node views"));
        }
        Ok(Self {
            spherical: raw.spherical,
            cartesian: raw.cartesian,
        })
    }
}

impl NodeVector {
    /// Build a node from spherical coordinates, deriving the cartesian view.
    ///
    /// # Errors
    ///
    /// Returns a domain error for a negative radius or non-finite input.
    pub fn from_spherical(spherical: SphericalPosition) -> Result<Self> {
        spherical.coords().validate()?;
        let v = spherical.coords().to_cartesian();
        let cartesian = CartesianPosition::new(spherical.index, v.x, v.y, v.z);
        Ok(Self {
            spherical,
            cartesian,
        })
    }

    /// Build a node from cartesian coordinates, deriving the spherical view.
    ///
    /// # Errors
    ///
    /// Returns a domain error for non-finite input.
    pub fn from_cartesian(cartesian: CartesianPosition) -> Result<Self> {
        ensure_finite("x", cartesian.x)?;
        ensure_finite("y", cartesian.y)?;
        ensure_finite("z", cartesian.z)?;
        let s = cartesian_to_spherical(&Vector3::new(cartesian.x, cartesian.y, cartesian.z));
        let spherical = SphericalPosition::new(cartesian.index, s.r, s.theta, s.phi);
        Ok(Self {
            spherical,
            cartesian,
        })
    }

    /// A node at the origin.
    #[must_use]
    pub const fn origin(index: usize) -> Self {
        Self {
            spherical: SphericalPosition::new(index, 0.0, 0.0, 0.0),
            cartesian: CartesianPosition::new(index, 0.0, 0.0, 0.0),
        }
    }

    /// Node index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.spherical.index
    }

    /// Copy of the spherical view.
    #[must_use]
    pub const fn spherical(&self) -> SphericalPosition {
        self.spherical
    }

    /// Copy of the cartesian view.
    #[must_use]
    pub const fn cartesian(&self) -> CartesianPosition {
        self.cartesian
    }

    /// Cartesian position as a point.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        self.cartesian.point()
    }
}
