//! Core curve trait.

use nalgebra::{Point3, Vector3};

/// A parametric curve in 3D space over `t ∈ [0, 1]`.
///
/// Implementors supply position and the first two derivatives; tangent,
/// curvature and sampling are derived from them.
pub trait Curve {
    /// Evaluate the curve position at parameter `t ∈ [0, 1]`.
    fn point_at(&self, t: f64) -> Point3<f64>;

    /// First derivative (velocity) at parameter `t`.
    fn derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Second derivative (acceleration) at parameter `t`.
    fn second_derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Unit tangent at parameter `t`.
    ///
    /// Falls back to the second derivative where the first vanishes, and to
    /// +X on a curve that does not move at all.
    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        let d = self.derivative_at(t);
        let norm = d.norm();
        if norm > 1e-10 {
            return d / norm;
        }
        let d2 = self.second_derivative_at(t);
        let norm2 = d2.norm();
        if norm2 > 1e-10 { d2 / norm2 } else { Vector3::x() }
    }

    /// Curvature `κ(t) = |B''(t) × B'(t)| / |B'(t)|³`.
    ///
    /// Returns 0 for straight segments and where the derivative vanishes.
    fn curvature_at(&self, t: f64) -> f64 {
        let d1 = self.derivative_at(t);
        let d2 = self.second_derivative_at(t);
        let d1_norm = d1.norm();

        if d1_norm > 1e-10 {
            d2.cross(&d1).norm() / d1_norm.powi(3)
        } else {
            0.0
        }
    }

    /// Start point (`t = 0`).
    fn start(&self) -> Point3<f64> {
        self.point_at(0.0)
    }

    /// End point (`t = 1`).
    fn end(&self) -> Point3<f64> {
        self.point_at(1.0)
    }

    /// `n` points evenly spaced in parameter space (at least 2).
    fn sample_uniform(&self, n: usize) -> Vec<Point3<f64>> {
        let n = n.max(2);
        (0..n)
            .map(|i| self.point_at(i as f64 / (n - 1) as f64))
            .collect()
    }

    /// Length of the polyline through `n` uniform samples.
    ///
    /// Converges to the arc length from below as `n` grows.
    fn polyline_length(&self, n: usize) -> f64 {
        self.sample_uniform(n)
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    /// Axis-aligned bounding box of 100 samples as `(min, max)`.
    fn bounding_box(&self) -> (Point3<f64>, Point3<f64>) {
        let samples = self.sample_uniform(100);
        let mut min = samples[0];
        let mut max = samples[0];

        for p in &samples[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct LineSegment {
        start: Point3<f64>,
        end: Point3<f64>,
    }

    impl Curve for LineSegment {
        fn point_at(&self, t: f64) -> Point3<f64> {
            self.start + (self.end - self.start) * t
        }

        fn derivative_at(&self, _t: f64) -> Vector3<f64> {
            self.end - self.start
        }

        fn second_derivative_at(&self, _t: f64) -> Vector3<f64> {
            Vector3::zeros()
        }
    }

    /// Unit circle in the XY plane, `t` mapped to a full turn.
    struct Circle;

    impl Curve for Circle {
        fn point_at(&self, t: f64) -> Point3<f64> {
            let a = t * std::f64::consts::TAU;
            Point3::new(a.cos(), a.sin(), 0.0)
        }

        fn derivative_at(&self, t: f64) -> Vector3<f64> {
            let a = t * std::f64::consts::TAU;
            Vector3::new(-a.sin(), a.cos(), 0.0) * std::f64::consts::TAU
        }

        fn second_derivative_at(&self, t: f64) -> Vector3<f64> {
            let a = t * std::f64::consts::TAU;
            Vector3::new(-a.cos(), -a.sin(), 0.0) * std::f64::consts::TAU.powi(2)
        }
    }

    #[test]
    fn test_line_segment() {
        let line = LineSegment {
            start: Point3::new(0.0, 0.0, 0.0),
            end: Point3::new(3.0, 4.0, 0.0),
        };

        assert_relative_eq!(line.start().coords, Vector3::zeros());
        assert_relative_eq!(line.end().coords, Vector3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(line.tangent_at(0.5), Vector3::new(0.6, 0.8, 0.0));
        assert_relative_eq!(line.curvature_at(0.3), 0.0);
        assert_relative_eq!(line.polyline_length(10), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circle_curvature() {
        for t in [0.0, 0.2, 0.7] {
            assert_relative_eq!(Circle.curvature_at(t), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sampling() {
        let line = LineSegment {
            start: Point3::origin(),
            end: Point3::new(1.0, 0.0, 0.0),
        };
        let samples = line.sample_uniform(5);
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[2].x, 0.5);
        assert_eq!(line.sample_uniform(0).len(), 2);
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = Circle.bounding_box();
        assert_relative_eq!(min.x, -1.0, epsilon = 1e-3);
        assert_relative_eq!(max.y, 1.0, epsilon = 2e-3);
        assert_relative_eq!(min.z, 0.0);
    }

    #[test]
    fn test_stationary_tangent_falls_back() {
        let point = LineSegment {
            start: Point3::new(1.0, 1.0, 1.0),
            end: Point3::new(1.0, 1.0, 1.0),
        };
        assert_eq!(point.tangent_at(0.5), Vector3::x());
        assert_eq!(point.curvature_at(0.5), 0.0);
    }
}
