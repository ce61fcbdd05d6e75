use log::debug;
use serde::Serialize;

use crate::graph::{Graph, VertexId};

/// A connected component, identified by its smallest vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub root: VertexId,
    /// Sorted ascending.
    pub members: Vec<VertexId>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The largest component: its size and sorted members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LargestComponent {
    pub size: usize,
    pub members: Vec<VertexId>,
}

/// Mark everything reachable from `start` and return the vertices in
/// visit order. Uses an explicit stack; `visited[start]` must be false.
fn flood(graph: &Graph, start: VertexId, visited: &mut [bool]) -> Vec<VertexId> {
    let mut reached = Vec::new();
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(v) = stack.pop() {
        reached.push(v);
        for adj in graph.adjacent(v) {
            if !visited[adj.vertex] {
                visited[adj.vertex] = true;
                stack.push(adj.vertex);
            }
        }
    }

    reached
}

/// Number of connected components. Isolated vertices count as one each.
pub fn count_components(graph: &Graph) -> usize {
    let n = graph.num_vertices();
    let mut visited = vec![false; n];
    let mut count = 0;

    for v in 0..n {
        if visited[v] {
            continue;
        }
        flood(graph, v, &mut visited);
        count += 1;
    }

    debug!("components: {} over {} vertices", count, n);
    count
}

/// Every connected component, ordered by root (smallest member).
pub fn components(graph: &Graph) -> Vec<Component> {
    let n = graph.num_vertices();
    let mut visited = vec![false; n];
    let mut out = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        let mut members = flood(graph, root, &mut visited);
        members.sort_unstable();
        out.push(Component { root, members });
    }

    out
}

/// The component with the most vertices.
///
/// Starts are tried in ascending id order and only a strictly larger
/// component replaces the current best, so on a size tie the component
/// holding the smaller id wins. An empty graph yields size 0.
pub fn largest_component(graph: &Graph) -> LargestComponent {
    let n = graph.num_vertices();
    let mut visited = vec![false; n];
    let mut best = LargestComponent::default();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let members = flood(graph, start, &mut visited);
        if members.len() > best.size {
            best = LargestComponent {
                size: members.len(),
                members,
            };
        }
    }

    best.members.sort_unstable();
    debug!(
        "largest component: {} of {} vertices (root {:?})",
        best.size,
        n,
        best.members.first()
    );
    best
}
