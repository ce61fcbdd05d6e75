use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::connectivity::{count_components, largest_component};
use crate::critical::critical_vertices;
use crate::diameter::diameter;
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use crate::outage::OutageSet;

/// Which analysis to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    ComponentCount,
    LargestComponent,
    Diameter,
    CriticalVertices,
}

impl Task {
    pub const ALL: [Task; 4] = [
        Task::ComponentCount,
        Task::LargestComponent,
        Task::Diameter,
        Task::CriticalVertices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::ComponentCount => "component_count",
            Task::LargestComponent => "largest_component",
            Task::Diameter => "diameter",
            Task::CriticalVertices => "critical_vertices",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        Task::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown task '{}': use component_count, largest_component, diameter or critical_vertices",
                    s
                )
            })
    }
}

/// Result record. Only the fields for the requested task are filled in;
/// the rest keep their default of zero or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub connected_components: usize,
    pub largest_component: usize,
    pub largest_component_members: Vec<VertexId>,
    pub diameter: u32,
    pub diameter_path_count: usize,
    pub diameter_path: Vec<VertexId>,
    pub critical_count: usize,
    pub critical_vertices: Vec<VertexId>,
}

/// Run one task. `outages` is only consulted for [`Task::Diameter`], but
/// is validated against the graph for every task.
pub fn solve(
    graph: &Graph,
    task: Task,
    outages: &[VertexId],
    config: &AnalysisConfig,
) -> Result<Solution> {
    let outages = OutageSet::new(graph, outages)?;
    let mut solution = Solution::default();

    match task {
        Task::ComponentCount => {
            solution.connected_components = count_components(graph);
        }
        Task::LargestComponent => {
            let largest = largest_component(graph);
            solution.largest_component = largest.size;
            solution.largest_component_members = largest.members;
        }
        Task::Diameter => {
            let result = diameter(graph, &outages, config);
            solution.diameter = result.diameter;
            solution.diameter_path_count = result.path_count;
            solution.diameter_path = result.path;
        }
        Task::CriticalVertices => {
            let critical = critical_vertices(graph);
            solution.critical_count = critical.count;
            solution.critical_vertices = critical.vertices;
        }
    }

    Ok(solution)
}

/// A complete request as handed over by an input parser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Problem {
    pub num_vertices: usize,
    pub edges: Vec<(VertexId, VertexId)>,
    pub task: Task,
    #[serde(default)]
    pub outages: Vec<VertexId>,
}

impl Problem {
    pub fn build_graph(&self) -> Result<Graph> {
        Graph::from_edges(self.num_vertices, self.edges.iter().copied())
    }

    pub fn solve(&self, config: &AnalysisConfig) -> Result<Solution> {
        let graph = self.build_graph()?;
        solve(&graph, self.task, &self.outages, config)
    }
}
