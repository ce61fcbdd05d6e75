use log::{debug, trace};
use serde::Serialize;

use crate::config::{AnalysisConfig, QueueKind};
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use crate::outage::OutageSet;
use crate::queue::{LazyHeap, MinQueue, UnsortedQueue};

const INFINITY: u32 = u32::MAX;

/// Single-source shortest paths over unit-weight edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    pub source: VertexId,
    /// Hop count from `source`; None when unreachable.
    pub distance: Vec<Option<u32>>,
    /// Previous vertex on one shortest path; None for the source and for
    /// unreachable vertices.
    pub predecessor: Vec<Option<VertexId>>,
}

impl ShortestPaths {
    /// The reached vertex farthest from the source. Smallest id wins ties.
    /// None if the source reaches nothing over an edge.
    pub fn farthest(&self) -> Option<(VertexId, u32)> {
        let mut best: Option<(VertexId, u32)> = None;
        for (v, (dist, pred)) in self.distance.iter().zip(&self.predecessor).enumerate() {
            let (Some(dist), Some(_)) = (dist, pred) else {
                continue;
            };
            if best.map_or(true, |(_, d)| *dist > d) {
                best = Some((v, *dist));
            }
        }
        best
    }

    /// Vertex sequence from the source to `target`, both inclusive.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if target == self.source {
            return Some(vec![self.source]);
        }
        self.predecessor.get(target).copied().flatten()?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessor[current]?;
            path.push(current);
            if path.len() > self.predecessor.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

/// Longest shortest path among non-outaged vertices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiameterResult {
    /// Edge count of the witness path.
    pub diameter: u32,
    /// Vertices on the witness path: `diameter + 1`, or 0 with no vertices.
    pub path_count: usize,
    /// Witness path, start to end.
    pub path: Vec<VertexId>,
}

/// Classic Dijkstra: every vertex queued up front, relaxation skips
/// outaged neighbors and anything already settled.
fn dijkstra<Q: MinQueue>(graph: &Graph, source: VertexId, outages: &OutageSet) -> ShortestPaths {
    let n = graph.num_vertices();
    let mut dist = vec![INFINITY; n];
    let mut pred: Vec<Option<VertexId>> = vec![None; n];
    dist[source] = 0;

    let mut queue = Q::with_capacity(n);
    for (v, &d) in dist.iter().enumerate() {
        queue.insert(v, d);
    }

    while let Some(u) = queue.extract_min() {
        // Everything left is unreachable
        if dist[u] == INFINITY {
            break;
        }
        let candidate = dist[u] + 1;
        for adj in graph.adjacent(u) {
            let w = adj.vertex;
            if outages.contains(w) {
                continue;
            }
            if candidate < dist[w] && queue.contains(w) {
                dist[w] = candidate;
                pred[w] = Some(u);
                queue.update_priority(w, candidate);
            }
        }
    }

    ShortestPaths {
        source,
        distance: dist
            .into_iter()
            .map(|d| (d != INFINITY).then_some(d))
            .collect(),
        predecessor: pred,
    }
}

/// Shortest hop distances from `source`, treating outaged vertices as
/// deleted. The source itself is always expanded.
pub fn shortest_paths<Q: MinQueue>(
    graph: &Graph,
    source: VertexId,
    outages: &OutageSet,
) -> Result<ShortestPaths> {
    graph.check_vertex(source)?;
    Ok(dijkstra::<Q>(graph, source, outages))
}

/// Best path seen so far, with the run that produced it kept for
/// reconstruction.
#[derive(Debug)]
struct PathCandidate {
    end: VertexId,
    length: u32,
    run: ShortestPaths,
}

impl PathCandidate {
    fn start(&self) -> VertexId {
        self.run.source
    }

    /// Longer wins. On equal length: same start keeps the smaller end,
    /// different starts keep the smaller start.
    fn merge(best: Option<Self>, local: Self) -> Self {
        let Some(best) = best else {
            return local;
        };
        let replace = if local.length != best.length {
            local.length > best.length
        } else if local.start() == best.start() {
            local.end < best.end
        } else {
            local.start() < best.start()
        };
        if replace {
            local
        } else {
            best
        }
    }
}

fn diameter_with<Q: MinQueue>(graph: &Graph, outages: &OutageSet) -> DiameterResult {
    let n = graph.num_vertices();
    let mut best: Option<PathCandidate> = None;

    for source in (0..n).filter(|&v| !outages.contains(v)) {
        let run = dijkstra::<Q>(graph, source, outages);
        let Some((end, length)) = run.farthest() else {
            continue;
        };
        let previous = best.as_ref().map(|b| (b.start(), b.end, b.length));
        let merged = PathCandidate::merge(best, PathCandidate { end, length, run });
        if previous != Some((merged.start(), merged.end, merged.length)) {
            trace!(
                "diameter: candidate {} -> {} ({} hops)",
                merged.start(),
                merged.end,
                merged.length
            );
        }
        best = Some(merged);
    }

    match best {
        Some(candidate) => {
            let path = candidate.run.path_to(candidate.end).unwrap_or_default();
            debug_assert_eq!(path.len(), candidate.length as usize + 1);
            DiameterResult {
                diameter: candidate.length,
                path_count: path.len(),
                path,
            }
        }
        // No connected pair: a lone surviving vertex is a zero-length path.
        None => match (0..n).find(|&v| !outages.contains(v)) {
            Some(v) => DiameterResult {
                diameter: 0,
                path_count: 1,
                path: vec![v],
            },
            None => DiameterResult::default(),
        },
    }
}

/// Network diameter after removing `outages`, with one witness path.
///
/// Every non-outaged vertex is used as a source in ascending order. The
/// witness is the longest shortest path found; ties keep the smaller start
/// vertex, then the smaller end vertex.
pub fn diameter(graph: &Graph, outages: &OutageSet, config: &AnalysisConfig) -> DiameterResult {
    debug!(
        "diameter: {} vertices, {} outaged, {} queue",
        graph.num_vertices(),
        outages.len(),
        config.queue
    );
    let result = match config.queue {
        QueueKind::Unsorted => diameter_with::<UnsortedQueue>(graph, outages),
        QueueKind::Heap => diameter_with::<LazyHeap>(graph, outages),
    };
    debug!("diameter: {} hops via {:?}", result.diameter, result.path);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn make_path(n: usize) -> Graph {
        Graph::from_edges(n, (0..n.saturating_sub(1)).map(|i| (i, i + 1))).unwrap()
    }

    fn make_cycle(n: usize) -> Graph {
        Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
    }

    fn run(graph: &Graph, outaged: &[VertexId]) -> DiameterResult {
        let outages = OutageSet::new(graph, outaged).unwrap();
        diameter(graph, &outages, &AnalysisConfig::default())
    }

    #[test]
    fn test_shortest_paths_chain() {
        let g = make_path(5);
        let sp = shortest_paths::<UnsortedQueue>(&g, 0, &OutageSet::none(&g)).unwrap();
        assert_eq!(sp.distance, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(sp.predecessor[0], None);
        assert_eq!(sp.predecessor[4], Some(3));
        assert_eq!(sp.path_to(4), Some(vec![0, 1, 2, 3, 4]));
        assert_eq!(sp.farthest(), Some((4, 4)));
    }

    #[test]
    fn test_shortest_paths_outage_blocks() {
        let g = make_path(4);
        let out = OutageSet::new(&g, &[1]).unwrap();
        let sp = shortest_paths::<LazyHeap>(&g, 0, &out).unwrap();
        assert_eq!(sp.distance, vec![Some(0), None, None, None]);
        assert_eq!(sp.farthest(), None);
        assert_eq!(sp.path_to(3), None);
    }

    #[test]
    fn test_shortest_paths_invalid_source() {
        let g = make_path(2);
        let err = shortest_paths::<UnsortedQueue>(&g, 2, &OutageSet::none(&g)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidVertex { vertex: 2, .. }));
    }

    #[test]
    fn test_shortest_paths_cycle_takes_short_way() {
        let g = make_cycle(6);
        let sp = shortest_paths::<UnsortedQueue>(&g, 0, &OutageSet::none(&g)).unwrap();
        assert_eq!(sp.distance[3], Some(3));
        assert_eq!(sp.distance[5], Some(1));
        assert_eq!(sp.path_to(0), Some(vec![0]));
    }

    #[test]
    fn test_triangle_diameter() {
        let g = Graph::from_edges(3, vec![(0, 1), (1, 2), (2, 0)]).unwrap();
        let result = run(&g, &[]);
        assert_eq!(result.diameter, 1);
        assert_eq!(result.path_count, 2);
        assert_eq!(result.path, vec![0, 1]);
    }

    #[test]
    fn test_path_diameter() {
        let result = run(&make_path(4), &[]);
        assert_eq!(result.diameter, 3);
        assert_eq!(result.path_count, 4);
        assert_eq!(result.path, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_outage_splits_path() {
        // 0 is isolated from {2, 3}; remaining longest is 2-3
        let result = run(&make_path(4), &[1]);
        assert_eq!(result.diameter, 1);
        assert_eq!(result.path, vec![2, 3]);
        assert_eq!(result.path_count, 2);
    }

    #[test]
    fn test_outaged_vertex_never_on_path() {
        // Square 0-1-2-3-0 with 1 down forces 0 -> 3 -> 2
        let g = make_cycle(4);
        let result = run(&g, &[1]);
        assert_eq!(result.diameter, 2);
        assert_eq!(result.path, vec![0, 3, 2]);
    }

    #[test]
    fn test_tie_prefers_smaller_start_then_end() {
        // Star: every leaf pair is 2 hops; smallest start is leaf 1, smallest end leaf 2
        let g = Graph::from_edges(5, (1..5).map(|i| (0, i))).unwrap();
        let result = run(&g, &[]);
        assert_eq!(result.diameter, 2);
        assert_eq!(result.path, vec![1, 0, 2]);
    }

    #[test]
    fn test_isolated_vertices_single_vertex_path() {
        let g = Graph::new(3);
        let result = run(&g, &[0]);
        assert_eq!(result.diameter, 0);
        assert_eq!(result.path_count, 1);
        assert_eq!(result.path, vec![1]);
    }

    #[test]
    fn test_everything_outaged() {
        let g = make_path(2);
        assert_eq!(run(&g, &[0, 1]), DiameterResult::default());
        assert_eq!(run(&Graph::new(0), &[]), DiameterResult::default());
    }

    #[test]
    fn test_heap_matches_unsorted_diameter() {
        let g = Graph::from_edges(
            8,
            vec![(0, 1), (1, 2), (2, 3), (3, 0), (3, 4), (4, 5), (5, 6), (6, 7), (7, 4)],
        )
        .unwrap();
        let none = OutageSet::none(&g);
        let unsorted = diameter(&g, &none, &AnalysisConfig::with_queue(QueueKind::Unsorted));
        let heap = diameter(&g, &none, &AnalysisConfig::with_queue(QueueKind::Heap));
        assert_eq!(unsorted.diameter, heap.diameter);
        // 1 -> {0|2} -> 3 -> 4 -> {5|7} -> 6
        assert_eq!(unsorted.diameter, 5);
        assert_eq!(heap.path_count, 6);
    }

    #[test]
    fn test_merge_rules() {
        let g = make_path(3);
        let none = OutageSet::none(&g);
        let cand = |source: VertexId, end: VertexId, length: u32| PathCandidate {
            end,
            length,
            run: dijkstra::<UnsortedQueue>(&g, source, &none),
        };

        let kept = PathCandidate::merge(Some(cand(0, 2, 2)), cand(1, 0, 1));
        assert_eq!((kept.start(), kept.end), (0, 2));

        let kept = PathCandidate::merge(Some(cand(1, 2, 2)), cand(0, 2, 2));
        assert_eq!(kept.start(), 0);

        let kept = PathCandidate::merge(Some(cand(0, 2, 2)), cand(0, 1, 2));
        assert_eq!(kept.end, 1);

        let kept = PathCandidate::merge(Some(cand(0, 1, 1)), cand(2, 0, 2));
        assert_eq!((kept.start(), kept.length), (2, 2));
    }
}
