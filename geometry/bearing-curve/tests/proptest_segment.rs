//! Property-based tests for coordinates and curve segments.
//!
//! Run with: cargo test -p bearing-curve -- proptest

#![allow(clippy::unwrap_used)]

use bearing_curve::{
    BearingVector, CurveSegment, NodeBundle, NodeVector, SegmentParams, SphericalPosition,
    Vector3, cartesian_to_spherical, spherical_to_cartesian,
};
use proptest::prelude::*;
use std::f64::consts::PI;

// =============================================================================
// Strategies
// =============================================================================

/// A node somewhere inside a sphere of radius 50.
fn arb_node(index: usize) -> impl Strategy<Value = NodeVector> {
    (0.0..50.0f64, -PI..PI, 0.0..PI).prop_map(move |(r, theta, phi)| {
        NodeVector::from_spherical(SphericalPosition::new(index, r, theta, phi)).unwrap()
    })
}

/// Angles and force for one bearing.
fn arb_bearing_input() -> impl Strategy<Value = (f64, f64, [f64; 3])> {
    (
        0.0..PI,
        -PI..PI,
        prop::array::uniform3(-5.0..5.0f64),
    )
}

/// A bundle of up to `max_bearings` bearings on a random node.
fn arb_bundle(index: usize, max_bearings: usize) -> impl Strategy<Value = NodeBundle> {
    (
        arb_node(index),
        prop::collection::vec(arb_bearing_input(), 0..=max_bearings),
    )
        .prop_map(move |(node, inputs)| {
            let bearings = inputs
                .into_iter()
                .enumerate()
                .map(|(depth, (phi, theta, [fx, fy, fz]))| {
                    BearingVector::new(index, depth, &node, phi, theta, Vector3::new(fx, fy, fz))
                        .unwrap()
                })
                .collect();
            NodeBundle::new(node, bearings).unwrap()
        })
}

// =============================================================================
// Property Tests: Coordinates
// =============================================================================

proptest! {
    /// Spherical -> cartesian -> spherical reproduces the input away from the
    /// poles, where theta is well defined.
    #[test]
    fn spherical_round_trip(
        r in 0.01..1000.0f64,
        theta in (-PI + 1e-3)..PI,
        phi in 1e-3..(PI - 1e-3),
    ) {
        let back = cartesian_to_spherical(&spherical_to_cartesian(r, theta, phi));
        prop_assert!((back.r - r).abs() < 1e-4 * r.max(1.0));
        prop_assert!((back.theta - theta).abs() < 1e-4);
        prop_assert!((back.phi - phi).abs() < 1e-4);
    }

    /// Zero radius lands on the origin for any angles.
    #[test]
    fn zero_radius_is_origin(theta in -10.0..10.0f64, phi in -10.0..10.0f64) {
        prop_assert_eq!(spherical_to_cartesian(0.0, theta, phi).norm(), 0.0);
    }

    /// The inverse never produces NaN for finite input.
    #[test]
    fn inverse_is_finite(v in prop::array::uniform3(-1e6..1e6f64)) {
        let s = cartesian_to_spherical(&Vector3::from(v));
        prop_assert!(s.r.is_finite() && s.theta.is_finite() && s.phi.is_finite());
        prop_assert!((0.0..=PI).contains(&s.phi));
    }
}

// =============================================================================
// Property Tests: Segments
// =============================================================================

proptest! {
    /// The polygon has D1 + D2 + 2 points and starts/ends exactly on the nodes.
    #[test]
    fn control_polygon_shape(
        start in arb_bundle(0, 6),
        end in arb_bundle(1, 6),
        alpha in 0.0..=1.0f64,
    ) {
        let expected = start.len() + end.len() + 2;
        let n1 = start.node().position();
        let n2 = end.node().position();

        let params = SegmentParams::with_level_of_detail(8).with_alpha(alpha);
        let segment = CurveSegment::with_params(start, end, &params).unwrap();
        let cps = segment.control_points();

        prop_assert_eq!(cps.len(), expected);
        prop_assert_eq!(cps[0], n1);
        prop_assert_eq!(cps[cps.len() - 1], n2);
    }

    /// `level_of_detail + 1` samples, ending on the polygon's endpoints.
    #[test]
    fn sampled_points_follow_level_of_detail(
        start in arb_bundle(0, 4),
        end in arb_bundle(1, 4),
        lod in 1usize..200,
    ) {
        let segment = CurveSegment::new(start, end, lod).unwrap();
        let cps = segment.control_points();
        let samples = segment.sampled_points();

        prop_assert_eq!(samples.len(), lod + 1);
        prop_assert!((samples[0] - cps[0]).norm() < 1e-9);
        prop_assert!((samples[lod] - cps[cps.len() - 1]).norm() < 1e-9);
    }

    /// Samples stay inside the bounding box of the control polygon.
    #[test]
    fn samples_inside_control_hull(
        start in arb_bundle(0, 5),
        end in arb_bundle(1, 5),
    ) {
        let segment = CurveSegment::new(start, end, 40).unwrap();
        let cps = segment.control_points();
        let (lo, hi) = cps[1..]
            .iter()
            .fold((cps[0], cps[0]), |(lo, hi), p| (lo.inf(p), hi.sup(p)));

        for p in segment.sampled_points() {
            for axis in 0..3 {
                prop_assert!(p[axis] >= lo[axis] - 1e-9 && p[axis] <= hi[axis] + 1e-9);
            }
        }
    }

    /// Resampling never moves the control polygon.
    #[test]
    fn resample_keeps_polygon(
        start in arb_bundle(0, 3),
        end in arb_bundle(1, 3),
        first in 1usize..50,
        second in 1usize..50,
    ) {
        let mut segment = CurveSegment::new(start, end, first).unwrap();
        let before = segment.control_points().to_vec();
        segment.resample(second).unwrap();

        prop_assert_eq!(segment.control_points(), before.as_slice());
        prop_assert_eq!(segment.sampled_points().len(), second + 1);
    }
}
