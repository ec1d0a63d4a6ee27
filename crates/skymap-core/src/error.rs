//! Error types for snapshot parsing and topology indexing

use thiserror::Error;

/// Input that violates the snapshot contract. These are caller bugs.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Resource snapshot must be a list of resources, found {found}")]
    NotAList { found: &'static str },
    #[error("Malformed resource at index {index}: {source}")]
    InvalidResource {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Edge {edge} references unknown node {endpoint}")]
    DanglingEdge { edge: String, endpoint: String },
    #[error("Duplicate node id {0}")]
    DuplicateNode(String),
}
