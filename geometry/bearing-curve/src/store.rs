//! In-memory repository for nodes, bearings and segments.
//!
//! Entries are kept in insertion order. Edits and deletes act on the first
//! entry that matches; a miss is reported as `false` rather than an error.

use tracing::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BearingVector, CurveError, CurveSegment, NodeBundle, NodeVector, Result, SegmentParams};

/// Owned copy of everything in an [`AttributeStore`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    /// Nodes in insertion order.
    pub nodes: Vec<NodeVector>,
    /// Bearings in insertion order.
    pub bearings: Vec<BearingVector>,
    /// Segments in insertion order.
    pub segments: Vec<CurveSegment>,
}

/// Append-based store of the attributes that make up a curve network.
///
/// # Example
///
/// ```
/// use bearing_curve::{AttributeStore, CartesianPosition, NodeVector, SegmentParams};
///
/// let mut store = AttributeStore::new();
/// store.create_node(NodeVector::from_cartesian(CartesianPosition::new(0, 0.0, 0.0, 0.0))?);
/// store.create_node(NodeVector::from_cartesian(CartesianPosition::new(1, 3.0, 4.0, 0.0))?);
///
/// let segment = store.connect(0, 1, &SegmentParams::coarse())?;
/// assert_eq!(segment.sampled_points().len(), 3);
/// assert_eq!(store.read_all().segments.len(), 1);
/// # Ok::<(), bearing_curve::CurveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    nodes: Vec<NodeVector>,
    bearings: Vec<BearingVector>,
    segments: Vec<CurveSegment>,
}

impl AttributeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return the stored copy.
    pub fn create_node(&mut self, node: NodeVector) -> &NodeVector {
        self.nodes.push(node);
        &self.nodes[self.nodes.len() - 1]
    }

    /// Append a bearing and return the stored copy.
    pub fn create_bearing(&mut self, bearing: BearingVector) -> &BearingVector {
        self.bearings.push(bearing);
        &self.bearings[self.bearings.len() - 1]
    }

    /// Append a segment and return the stored copy.
    pub fn create_segment(&mut self, segment: CurveSegment) -> &CurveSegment {
        self.segments.push(segment);
        &self.segments[self.segments.len() - 1]
    }

    /// Replace the first node with this index.
    ///
    /// Stored bearings attached to the new node's index are re-anchored to
    /// it, so their display points follow the move.
    pub fn edit_node(&mut self, index: usize, node: NodeVector) -> bool {
        match self.nodes.iter_mut().find(|n| n.index() == index) {
            Some(slot) => {
                *slot = node;
                for bearing in &mut self.bearings {
                    if bearing.node_index() == node.index() {
                        *bearing = bearing.reanchored(&node);
                    }
                }
                true
            }
            None => {
                warn!(index, "No node to edit");
                false
            }
        }
    }

    /// Remove the first node with this index.
    pub fn delete_node(&mut self, index: usize) -> bool {
        match self.nodes.iter().position(|n| n.index() == index) {
            Some(pos) => {
                self.nodes.remove(pos);
                true
            }
            None => {
                warn!(index, "No node to delete");
                false
            }
        }
    }

    /// Replace the first bearing with this `(node_index, depth)` key.
    pub fn edit_bearing(&mut self, key: (usize, usize), bearing: BearingVector) -> bool {
        match self.bearings.iter_mut().find(|b| bearing_key(b) == key) {
            Some(slot) => {
                *slot = bearing;
                true
            }
            None => {
                warn!(node = key.0, depth = key.1, "No bearing to edit");
                false
            }
        }
    }

    /// Remove the first bearing with this `(node_index, depth)` key.
    pub fn delete_bearing(&mut self, key: (usize, usize)) -> bool {
        match self.bearings.iter().position(|b| bearing_key(b) == key) {
            Some(pos) => {
                self.bearings.remove(pos);
                true
            }
            None => {
                warn!(node = key.0, depth = key.1, "No bearing to delete");
                false
            }
        }
    }

    /// Replace the segment at `position`.
    pub fn edit_segment(&mut self, position: usize, segment: CurveSegment) -> bool {
        match self.segments.get_mut(position) {
            Some(slot) => {
                *slot = segment;
                true
            }
            None => {
                warn!(position, "No segment to edit");
                false
            }
        }
    }

    /// Remove the segment at `position`.
    pub fn delete_segment(&mut self, position: usize) -> bool {
        if position < self.segments.len() {
            self.segments.remove(position);
            true
        } else {
            warn!(position, "No segment to delete");
            false
        }
    }

    /// Copy out every stored entry.
    #[must_use]
    pub fn read_all(&self) -> Snapshot {
        Snapshot {
            nodes: self.nodes.clone(),
            bearings: self.bearings.clone(),
            segments: self.segments.clone(),
        }
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.bearings.clear();
        self.segments.clear();
    }

    /// First node with this index.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&NodeVector> {
        self.nodes.iter().find(|n| n.index() == index)
    }

    /// Stored segments.
    #[must_use]
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// A node together with every bearing stored for it.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::UnknownNode`] if no such node is stored, or a
    /// bundle error if its bearings' depths do not form `0..len`.
    pub fn bundle(&self, node_index: usize) -> Result<NodeBundle> {
        let node = *self
            .node(node_index)
            .ok_or(CurveError::UnknownNode(node_index))?;
        let bearings = self
            .bearings
            .iter()
            .filter(|b| b.node_index() == node_index)
            .map(|b| b.reanchored(&node))
            .collect();
        NodeBundle::new(node, bearings)
    }

    /// Build a segment between two stored nodes and store it.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::bundle`] and [`CurveSegment::with_params`].
    pub fn connect(&mut self, from: usize, to: usize, params: &SegmentParams) -> Result<&CurveSegment> {
        let segment = CurveSegment::with_params(self.bundle(from)?, self.bundle(to)?, params)?;
        info!(
            from,
            to,
            control_points = segment.control_points().len(),
            samples = segment.sampled_points().len(),
            "Connected nodes"
        );
        Ok(self.create_segment(segment))
    }
}

fn bearing_key(bearing: &BearingVector) -> (usize, usize) {
    (bearing.node_index(), bearing.depth())
}
