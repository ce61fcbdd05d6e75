use log::{debug, trace};
use serde::Serialize;

use crate::graph::{Adjacent, Graph, VertexId};

/// Articulation points: vertices whose removal disconnects their component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CriticalVertices {
    pub count: usize,
    /// Sorted ascending.
    pub vertices: Vec<VertexId>,
}

const UNVISITED: usize = usize::MAX;

/// DFS stack frame: the vertex, how far through its adjacency we are,
/// the tree edge we arrived by (None at a root) and tree children so far.
struct Frame {
    vertex: VertexId,
    cursor: usize,
    parent_edge: Option<usize>,
    children: usize,
}

/// Find every critical vertex with a single low-link DFS per component.
///
/// A root is critical when it has more than one tree child; any other
/// vertex `u` is critical when some tree child `v` has `low[v] >= disc[u]`.
/// Self-loops are ignored. The parent is skipped by edge index, so a
/// parallel edge back to the parent counts as a back edge.
pub fn critical_vertices(graph: &Graph) -> CriticalVertices {
    let n = graph.num_vertices();
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut critical = vec![false; n];
    let mut next_order = 0usize;
    let mut count = 0usize;

    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = next_order;
        low[root] = next_order;
        next_order += 1;
        stack.push(Frame {
            vertex: root,
            cursor: 0,
            parent_edge: None,
            children: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let u = frame.vertex;

            if let Some(&Adjacent { vertex: v, edge }) = graph.adjacent(u).get(frame.cursor) {
                frame.cursor += 1;
                if v == u {
                    continue;
                }
                if disc[v] == UNVISITED {
                    frame.children += 1;
                    disc[v] = next_order;
                    low[v] = next_order;
                    next_order += 1;
                    stack.push(Frame {
                        vertex: v,
                        cursor: 0,
                        parent_edge: Some(edge),
                        children: 0,
                    });
                } else if frame.parent_edge != Some(edge) {
                    low[u] = low[u].min(disc[v]);
                }
                continue;
            }

            // u is finished; fold its low-link into the parent and test the parent.
            stack.pop();
            let Some(parent) = stack.last() else {
                continue;
            };
            let p = parent.vertex;
            low[p] = low[p].min(low[u]);

            let is_root = parent.parent_edge.is_none();
            let cut = if is_root {
                parent.children > 1
            } else {
                low[u] >= disc[p]
            };
            if cut && !critical[p] {
                critical[p] = true;
                count += 1;
                trace!("critical: vertex {} (child {}, low {})", p, u, low[u]);
            }
        }
    }

    let vertices: Vec<VertexId> = (0..n).filter(|&v| critical[v]).collect();
    debug!("critical: {} of {} vertices", count, n);
    CriticalVertices { count, vertices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_path(n: usize) -> Graph {
        Graph::from_edges(n, (0..n.saturating_sub(1)).map(|i| (i, i + 1))).unwrap()
    }

    fn make_cycle(n: usize) -> Graph {
        Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
    }

    fn make_star(leaves: usize) -> Graph {
        Graph::from_edges(leaves + 1, (1..=leaves).map(|i| (0, i))).unwrap()
    }

    #[test]
    fn test_triangle_has_none() {
        let g = Graph::from_edges(3, vec![(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(critical_vertices(&g), CriticalVertices::default());
    }

    #[test]
    fn test_path_interior_vertices() {
        let result = critical_vertices(&make_path(4));
        assert_eq!(result.count, 2);
        assert_eq!(result.vertices, vec![1, 2]);
    }

    #[test]
    fn test_star_center_is_root_cut() {
        let result = critical_vertices(&make_star(4));
        assert_eq!(result.vertices, vec![0]);
    }

    #[test]
    fn test_cycle_has_none() {
        assert_eq!(critical_vertices(&make_cycle(6)).count, 0);
    }

    #[test]
    fn test_bowtie_shared_vertex() {
        // Two triangles sharing vertex 2
        let g = Graph::from_edges(5, vec![(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]).unwrap();
        assert_eq!(critical_vertices(&g).vertices, vec![2]);
    }

    #[test]
    fn test_cut_vertex_reached_late() {
        // Root 0 sits inside a cycle; 3 hangs off vertex 2
        let g = Graph::from_edges(4, vec![(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        assert_eq!(critical_vertices(&g).vertices, vec![2]);
    }

    #[test]
    fn test_flagged_once_with_many_children() {
        // Vertex 1 separates three leaves from root 0
        let g = Graph::from_edges(5, vec![(0, 1), (1, 2), (1, 3), (1, 4)]).unwrap();
        let result = critical_vertices(&g);
        assert_eq!(result.count, 1);
        assert_eq!(result.vertices, vec![1]);
    }

    #[test]
    fn test_self_loops_ignored() {
        let g = Graph::from_edges(3, vec![(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]).unwrap();
        assert_eq!(critical_vertices(&g).vertices, vec![1]);

        let g = Graph::from_edges(2, vec![(0, 1), (1, 1)]).unwrap();
        assert_eq!(critical_vertices(&g).count, 0);
    }

    #[test]
    fn test_parallel_edges_do_not_change_cuts() {
        let g = Graph::from_edges(3, vec![(0, 1), (0, 1), (1, 2)]).unwrap();
        assert_eq!(critical_vertices(&g).vertices, vec![1]);
    }

    #[test]
    fn test_separate_components() {
        // Path 0-1-2 and star centred at 4
        let g = Graph::from_edges(7, vec![(0, 1), (1, 2), (4, 3), (4, 5), (4, 6)]).unwrap();
        assert_eq!(critical_vertices(&g).vertices, vec![1, 4]);
    }

    #[test]
    fn test_isolated_and_empty() {
        assert_eq!(critical_vertices(&Graph::new(3)).count, 0);
        assert_eq!(critical_vertices(&Graph::new(0)).count, 0);
    }

    #[test]
    fn test_deep_path_does_not_overflow() {
        let result = critical_vertices(&make_path(200_000));
        assert_eq!(result.count, 199_998);
        assert_eq!(result.vertices.first(), Some(&1));
        assert_eq!(result.vertices.last(), Some(&199_998));
    }
}
