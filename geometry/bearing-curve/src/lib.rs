//! Bearing-driven Bézier segments between spatial nodes.
//!
//! A network of nodes is joined by smooth curves whose shape is steered by
//! *bearings*: directional forces attached to each node. This crate provides:
//!
//! - [`NodeVector`] - A node with both spherical and cartesian positions
//! - [`BearingVector`] - A direction plus force anchored to a node
//! - [`NodeBundle`] - A node with its bearings ordered by depth
//! - [`CurveSegment`] - The sampled curve between two bundles
//! - [`BezierCurve`] - Single-segment Bézier of arbitrary degree
//! - [`AttributeStore`] - In-memory repository of nodes, bearings and segments
//!
//! # How a segment is shaped
//!
//! Every bearing contributes an offset `C = direction ⊙ force` (element-wise
//! by default, see [`Combine`]). Outgoing offsets are added to the start
//! node, incoming offsets subtracted from the end node, and a blended bridge
//! point joins the two sides. The resulting control polygon is evaluated as
//! one Bézier curve by de Casteljau's recurrence.
//!
//! # Example
//!
//! ```
//! use bearing_curve::{
//!     BearingVector, CurveSegment, NodeBundle, NodeVector, SegmentParams, SphericalPosition,
//!     Vector3,
//! };
//! use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
//!
//! let n1 = NodeVector::from_spherical(SphericalPosition::new(1, 10.0, FRAC_PI_2, FRAC_PI_4))?;
//! let n2 = NodeVector::from_spherical(SphericalPosition::new(2, 15.0, FRAC_PI_4, FRAC_PI_2))?;
//!
//! // Pull the curve upward as it leaves n1.
//! let up = BearingVector::new(1, 0, &n1, 0.0, 0.0, Vector3::new(0.0, 0.0, 3.0))?;
//! let start = NodeBundle::new(n1, vec![up])?;
//!
//! let params = SegmentParams::with_level_of_detail(32).with_alpha(0.5);
//! let segment = CurveSegment::with_params(start, NodeBundle::bare(n2), &params)?;
//!
//! assert_eq!(segment.control_points().len(), 3);
//! assert_eq!(segment.sampled_points().len(), 33);
//! assert_eq!(segment.sampled_points()[32], n2.position());
//! # Ok::<(), bearing_curve::CurveError>(())
//! ```
//!
//! # Coordinate System
//!
//! Spherical coordinates are `(r, θ, φ)` with azimuth `θ` in the XY plane
//! from +X and polar angle `φ` from +Z:
//!
//! ```text
//! x = r sin φ cos θ,   y = r sin φ sin θ,   z = r cos φ
//! ```
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Rendering and
//! file formats live in the layers that consume it.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all data types
//! - `parallel`: Sample curves on the rayon thread pool

#![doc(html_root_url = "https://docs.rs/bearing-curve/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value,
    clippy::option_if_let_else,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::imprecise_flops
)]

mod bearing;
mod bezier;
mod combine;
mod coords;
mod error;
mod node;
mod params;
mod segment;
mod store;
mod traits;

pub use bearing::{BearingVector, CartesianBearing, NodeBundle};
pub use bezier::{BezierCurve, binomial};
pub use combine::{Combine, Hadamard, hadamard};
pub use coords::{SphericalCoords, cartesian_to_spherical, spherical_to_cartesian};
pub use error::CurveError;
pub use node::{CartesianPosition, NodeVector, SphericalPosition};
pub use params::{BarLength, SegmentParams};
pub use segment::CurveSegment;
pub use store::{AttributeStore, Snapshot};
pub use traits::Curve;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for node, bearing and segment operations.
pub type Result<T> = std::result::Result<T, CurveError>;
