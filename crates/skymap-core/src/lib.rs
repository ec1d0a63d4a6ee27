//! skymap core: resource classification, relationship inference, and the
//! topology graph model

pub mod model;
pub mod metadata;
pub mod classify;
pub mod resolve;
pub mod builder;
pub mod topology;
pub mod summary;
pub mod snapshot;
pub mod error;


#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use model::{
    Category, Edge, EdgeKind, EdgeRouting, Graph, Metadata, Node, Placement, Position, Resource,
    ResourceId, Size,
};
pub use classify::classify;
pub use resolve::{resolve, resolve_attachment, resolve_parent, Resolution, ResourceIndex};
pub use builder::{build_graph, dedup_last_write_wins};
pub use topology::Topology;
pub use summary::{GraphSummary, HierarchySummary};
pub use snapshot::ResourceSnapshot;
pub use error::{SnapshotError, TopologyError};
