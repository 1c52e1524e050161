//! # Road Graph Model
//!
//! Clean DTOs shared by every stage: decoders produce them, the reconciler
//! regroups them, bounds and export read them.
//!
//! Design rule: NO CSV types, NO JSON types here.
//! This module is pure data without I/O or state.

pub mod node;
pub mod edge;
pub mod graph;

pub use node::{Coord, RoadNode, AccessNode, NodeMetrics, NodeType};
pub use edge::{RoadEdge, AccessEdge, LayerTag};
pub use graph::{
    RoadGraph, AccessSubgraph, ReconciledGraph,
    GraphSource, Layer, LayerAvailability,
};
