//! Graph-subsystem error type.

use thiserror::Error;

use bm_core::{BmError, NodeId};

/// Errors produced by `bm-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("graph event parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] BmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
