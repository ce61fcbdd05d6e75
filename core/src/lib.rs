//! netgraph-core: analysis engine for undirected server networks.
//!
//! A pure Rust library that stores a fixed-size multigraph with an
//! adjacency index and answers four questions about it: how many connected
//! components there are, which component is largest, how long the longest
//! shortest path is once some servers are down, and which servers are
//! single points of failure.
//!
//! Graphs are built once and then only read; every analysis allocates its
//! own working arrays and returns a plain result value.

mod config;
mod connectivity;
mod critical;
mod diameter;
mod error;
mod graph;
mod outage;
mod queue;
mod solve;

pub use config::{AnalysisConfig, QueueKind};
pub use connectivity::{components, count_components, largest_component, Component, LargestComponent};
pub use critical::{critical_vertices, CriticalVertices};
pub use diameter::{diameter, shortest_paths, DiameterResult, ShortestPaths};
pub use error::{GraphError, Result};
pub use graph::{Adjacent, Edge, Graph, VertexId};
pub use outage::OutageSet;
pub use queue::{LazyHeap, MinQueue, UnsortedQueue};
pub use solve::{solve, Problem, Solution, Task};
