use crate::error::{GraphError, Result};

/// Dense vertex identifier in `0..num_vertices`.
pub type VertexId = usize;

/// An undirected edge as inserted. Endpoint order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }

    /// The endpoint opposite `v`, or None if `v` is not incident.
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.a == v {
            Some(self.b)
        } else if self.b == v {
            Some(self.a)
        } else {
            None
        }
    }
}

/// One entry in a vertex's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    pub vertex: VertexId,
    /// Index of the connecting edge in insertion order.
    pub edge: usize,
}

/// Undirected multigraph over a fixed set of dense vertex ids.
///
/// Edges are append-only. Every `add_edge` also updates the per-vertex
/// adjacency index, so traversals cost O(V + E) instead of scanning the
/// edge list once per visited vertex. Parallel edges are kept; a self-loop
/// is listed once in its vertex's adjacency.
#[derive(Debug, Clone)]
pub struct Graph {
    num_vertices: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Adjacent>>,
}

impl Graph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); num_vertices],
        }
    }

    /// Pre-allocate for a known edge count.
    pub fn with_capacity(num_vertices: usize, edge_count: usize) -> Self {
        Self {
            num_vertices,
            edges: Vec::with_capacity(edge_count),
            adjacency: vec![Vec::new(); num_vertices],
        }
    }

    /// Bulk load from `(a, b)` pairs. Stops at the first out-of-range endpoint.
    pub fn from_edges<I>(num_vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let iter = edges.into_iter();
        let mut graph = Self::with_capacity(num_vertices, iter.size_hint().0);
        for (a, b) in iter {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Append an undirected edge. Both endpoints must be in range.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;

        let index = self.edges.len();
        self.edges.push(Edge { a, b });
        self.adjacency[a].push(Adjacent { vertex: b, edge: index });
        if a != b {
            self.adjacency[b].push(Adjacent { vertex: a, edge: index });
        }
        Ok(())
    }

    /// Other endpoint of edge `edge_index` when `v` is incident to it.
    pub fn adjacent_vertex(&self, edge_index: usize, v: VertexId) -> Result<Option<VertexId>> {
        self.check_vertex(v)?;
        let edge = self.edges.get(edge_index).ok_or(GraphError::InvalidEdge {
            index: edge_index,
            edge_count: self.edges.len(),
        })?;
        Ok(edge.other(v))
    }

    /// Incident edges of `v`, in edge insertion order.
    pub fn neighbors(&self, v: VertexId) -> Result<&[Adjacent]> {
        self.check_vertex(v)?;
        Ok(&self.adjacency[v])
    }

    /// Unchecked adjacency for ids the caller already validated.
    pub(crate) fn adjacent(&self, v: VertexId) -> &[Adjacent] {
        &self.adjacency[v]
    }

    pub fn check_vertex(&self, v: VertexId) -> Result<()> {
        if v < self.num_vertices {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex {
                vertex: v,
                num_vertices: self.num_vertices,
            })
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let edges_mem = self.edges.capacity() * size_of::<Edge>();
        let adj_headers = self.adjacency.capacity() * size_of::<Vec<Adjacent>>();
        let adj_entries: usize = self
            .adjacency
            .iter()
            .map(|list| list.capacity() * size_of::<Adjacent>())
            .sum();

        edges_mem + adj_headers + adj_entries
    }
}
