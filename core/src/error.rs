use thiserror::Error;

use crate::graph::VertexId;

/// Errors raised by graph construction and analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} out of range for a graph of {num_vertices} vertices")]
    InvalidVertex { vertex: VertexId, num_vertices: usize },

    #[error("edge index {index} out of range ({edge_count} edges)")]
    InvalidEdge { index: usize, edge_count: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;
