use crate::error::Result;
use crate::graph::{Graph, VertexId};

/// Vertices excluded from traversal for one analysis.
///
/// Membership is a dense bitmap sized to the graph, so ids are validated
/// once at construction and lookups cannot go out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutageSet {
    down: Vec<bool>,
    count: usize,
}

impl OutageSet {
    /// An outage set with nothing excluded.
    pub fn none(graph: &Graph) -> Self {
        Self {
            down: vec![false; graph.num_vertices()],
            count: 0,
        }
    }

    /// Build from a list of vertex ids. Duplicates collapse.
    pub fn new(graph: &Graph, vertices: &[VertexId]) -> Result<Self> {
        let mut set = Self::none(graph);
        for &v in vertices {
            graph.check_vertex(v)?;
            if !set.down[v] {
                set.down[v] = true;
                set.count += 1;
            }
        }
        Ok(set)
    }

    /// True if `v` is out. Ids beyond the graph are never out.
    pub fn contains(&self, v: VertexId) -> bool {
        self.down.get(v).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn test_outage_membership() {
        let g = Graph::new(5);
        let out = OutageSet::new(&g, &[1, 3, 3]).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.contains(1));
        assert!(out.contains(3));
        assert!(!out.contains(0));
        assert!(!out.contains(99));
    }

    #[test]
    fn test_outage_rejects_out_of_range() {
        let g = Graph::new(2);
        let err = OutageSet::new(&g, &[0, 2]).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidVertex {
                vertex: 2,
                num_vertices: 2
            }
        );
    }

    #[test]
    fn test_outage_none_is_empty() {
        let g = Graph::new(3);
        let out = OutageSet::none(&g);
        assert!(out.is_empty());
        assert!((0..3).all(|v| !out.contains(v)));
    }
}
