//! Spherical ↔ cartesian coordinate conversion.
//!
//! Angles follow the physics convention:
//!
//! - `r`: radius (distance from the origin)
//! - `theta`: azimuth in the XY plane, measured from +X
//! - `phi`: polar angle, measured from +Z
//!
//! ```text
//! x = r · sin φ · cos θ
//! y = r · sin φ · sin θ
//! z = r · cos φ
//! ```

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ensure_finite;
use crate::{CurveError, Result};

/// A spherical coordinate triple.
///
/// `r ≥ 0` and `phi ∈ [0, π]` are expected but only the radius sign is
/// enforced (by [`Self::validate`]). `theta` is unconstrained and is taken
/// modulo 2π by the trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphericalCoords {
    /// Radius.
    pub r: f64,
    /// Azimuthal angle θ.
    pub theta: f64,
    /// Polar angle φ.
    pub phi: f64,
}

impl SphericalCoords {
    /// Create a new spherical triple.
    #[must_use]
    pub const fn new(r: f64, theta: f64, phi: f64) -> Self {
        Self { r, theta, phi }
    }

    /// Unit direction with the given angles.
    #[must_use]
    pub const fn unit(theta: f64, phi: f64) -> Self {
        Self::new(1.0, theta, phi)
    }

    /// Check that all components are finite and the radius is non-negative.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("radius", self.r)?;
        ensure_finite("theta", self.theta)?;
        ensure_finite("phi", self.phi)?;
        if self.r < 0.0 {
            return Err(CurveError::NegativeRadius(self.r));
        }
        Ok(())
    }

    /// Convert to a cartesian vector.
    #[must_use]
    pub fn to_cartesian(&self) -> Vector3<f64> {
        spherical_to_cartesian(self.r, self.theta, self.phi)
    }
}

/// Convert spherical coordinates to a cartesian vector.
///
/// Total for all inputs; NaN inputs produce NaN outputs.
#[must_use]
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> Vector3<f64> {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vector3::new(r * sin_phi * cos_theta, r * sin_phi * sin_theta, r * cos_phi)
}

/// Convert a cartesian vector to spherical coordinates.
///
/// `theta` is 0 on the Z axis and both angles are 0 at the origin. The
/// cosine fed to `acos` is clamped to [-1, 1] so round-off never yields NaN.
#[must_use]
pub fn cartesian_to_spherical(v: &Vector3<f64>) -> SphericalCoords {
    let r = v.norm();
    let theta = if v.x == 0.0 && v.y == 0.0 {
        0.0
    } else {
        v.y.atan2(v.x)
    };
    let phi = if r == 0.0 {
        0.0
    } else {
        (v.z / r).clamp(-1.0, 1.0).acos()
    };
    SphericalCoords::new(r, theta, phi)
}
