//! Combination of a bearing direction with its force.
//!
//! A bearing contributes a control-point offset `C = B ⊗ F`, where `B` is
//! the unit bearing direction and `F` the force vector. The operator is a
//! [`Combine`] strategy so callers can inject their own, but the crate only
//! ships the element-wise (Hadamard) product.

use nalgebra::Vector3;

/// Strategy combining a unit direction and a force into an offset vector.
pub trait Combine {
    /// Combine `direction` and `force` into a control-point offset.
    fn combine(&self, direction: &Vector3<f64>, force: &Vector3<f64>) -> Vector3<f64>;
}

/// Element-wise product `(bx·fx, by·fy, bz·fz)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hadamard;

impl Combine for Hadamard {
    fn combine(&self, direction: &Vector3<f64>, force: &Vector3<f64>) -> Vector3<f64> {
        hadamard(direction, force)
    }
}

impl<F> Combine for F
where
    F: Fn(&Vector3<f64>, &Vector3<f64>) -> Vector3<f64>,
{
    fn combine(&self, direction: &Vector3<f64>, force: &Vector3<f64>) -> Vector3<f64> {
        self(direction, force)
    }
}

/// Element-wise product of two vectors.
#[inline]
#[must_use]
pub fn hadamard(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.component_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hadamard() {
        let a = Vector3::new(1.0, -2.0, 0.5);
        let b = Vector3::new(3.0, 4.0, 8.0);
        assert_eq!(hadamard(&a, &b), Vector3::new(3.0, -8.0, 4.0));
        assert_eq!(Hadamard.combine(&a, &b), hadamard(&a, &b));
    }

    #[test]
    fn test_closure_strategy() {
        let scaled = |d: &Vector3<f64>, f: &Vector3<f64>| d * f.norm();
        let d = Vector3::z();
        let f = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(scaled.combine(&d, &f), Vector3::new(0.0, 0.0, 5.0));
    }
}
