use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use netgraph_core::{
    count_components, critical_vertices, diameter, largest_component, AnalysisConfig, Graph,
    OutageSet, Problem, QueueKind,
};

#[derive(Parser)]
#[command(name = "netgraph-bench", about = "Benchmark and driver for netgraph-core")]
struct Cli {
    /// Priority queue backing the diameter analysis
    #[arg(long, global = true, value_enum, default_value_t = QueueArg::Unsorted)]
    queue: QueueArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate synthetic networks and time every analysis
    Bench {
        #[arg(long, value_enum, default_value_t = Mode::All)]
        mode: Mode,

        /// Vertex count for connectivity and critical-vertex runs
        #[arg(long, default_value_t = 1_000_000)]
        vertices: usize,

        /// Vertex count for diameter runs (all-sources Dijkstra)
        #[arg(long, default_value_t = 500)]
        diameter_vertices: usize,

        /// Fraction of vertices taken down for the diameter run
        #[arg(long, default_value_t = 0.01)]
        outage_rate: f64,

        /// Emit one JSON object per topology instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Solve a JSON-encoded problem and print the solution as JSON
    Solve {
        problem: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum QueueArg {
    Unsorted,
    Heap,
}

impl From<QueueArg> for QueueKind {
    fn from(arg: QueueArg) -> Self {
        match arg {
            QueueArg::Unsorted => QueueKind::Unsorted,
            QueueArg::Heap => QueueKind::Heap,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    All,
    Lsystem,
    Scalefree,
    Smallworld,
    Random,
    Barbell,
    Dla,
}

type Generator = fn(usize) -> Graph;

fn generators(mode: Mode) -> Vec<(&'static str, Generator)> {
    let all: [(Mode, &'static str, Generator); 6] = [
        (Mode::Lsystem, "L-system tree", gen_lsystem),
        (Mode::Scalefree, "Scale-free (edge sampling)", gen_scale_free),
        (Mode::Smallworld, "Small-world (Watts-Strogatz)", gen_small_world),
        (Mode::Random, "Erdos-Renyi random", gen_random),
        (Mode::Barbell, "Barbell (clique-bridge-clique)", gen_barbell),
        (Mode::Dla, "DLA (organic branching)", gen_dla),
    ];
    all.into_iter()
        .filter(|(m, _, _)| mode == Mode::All || *m == mode)
        .map(|(_, name, generator)| (name, generator))
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = AnalysisConfig::with_queue(cli.queue.into());

    match cli.command {
        Command::Bench {
            mode,
            vertices,
            diameter_vertices,
            outage_rate,
            json,
        } => {
            if !json {
                println!("netgraph-bench");
                println!("==============");
                println!();
            }
            for (name, generator) in generators(mode) {
                run_benchmark(
                    name,
                    generator,
                    vertices,
                    diameter_vertices,
                    outage_rate,
                    &config,
                    json,
                )?;
            }
        }
        Command::Solve { problem } => {
            let text = std::fs::read_to_string(&problem)
                .with_context(|| format!("reading {}", problem.display()))?;
            let problem: Problem = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", problem.display()))?;
            info!(
                "solving {} over {} vertices, {} edges, {} outages ({} queue)",
                problem.task,
                problem.num_vertices,
                problem.edges.len(),
                problem.outages.len(),
                config.queue
            );
            let solution = problem.solve(&config)?;
            println!("{}", serde_json::to_string_pretty(&solution)?);
        }
    }

    Ok(())
}

fn millis(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(
    name: &str,
    generator: Generator,
    vertices: usize,
    diameter_vertices: usize,
    outage_rate: f64,
    config: &AnalysisConfig,
    json: bool,
) -> Result<()> {
    let t = Instant::now();
    let graph = generator(vertices);
    let gen_ms = millis(t);

    let t = Instant::now();
    let components = count_components(&graph);
    let components_ms = millis(t);

    let t = Instant::now();
    let largest = largest_component(&graph);
    let largest_ms = millis(t);

    let t = Instant::now();
    let critical = critical_vertices(&graph);
    let critical_ms = millis(t);

    // Diameter is all-sources, so it runs on a smaller instance of the same topology
    let small = generator(diameter_vertices);
    let mut rng = FastRng::new(31337);
    let down: Vec<usize> = (0..small.num_vertices())
        .filter(|_| rng.next_f64() < outage_rate)
        .collect();
    let outages = OutageSet::new(&small, &down)?;
    let t = Instant::now();
    let diam = diameter(&small, &outages, config);
    let diameter_ms = millis(t);

    if json {
        let record = serde_json::json!({
            "topology": name,
            "vertices": graph.num_vertices(),
            "edges": graph.edge_count(),
            "memory_bytes": graph.memory_usage(),
            "generate_ms": gen_ms,
            "components": components,
            "components_ms": components_ms,
            "largest_component": largest.size,
            "largest_ms": largest_ms,
            "critical_count": critical.count,
            "critical_ms": critical_ms,
            "diameter_vertices": small.num_vertices(),
            "outages": outages.len(),
            "queue": config.queue,
            "diameter": diam.diameter,
            "diameter_ms": diameter_ms,
        });
        println!("{}", record);
        return Ok(());
    }

    println!("--- {} ---", name);
    println!(
        "Generated in {:.2}s: {} vertices, {} edges, ~{:.0}MB",
        gen_ms / 1000.0,
        graph.num_vertices(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    println!();
    println!("{:>20} {:>14} {:>10}", "analysis", "result", "time");
    println!("{:->20} {:->14} {:->10}", "", "", "");
    println!("{:>20} {:>14} {:>8.1}ms", "components", components, components_ms);
    println!("{:>20} {:>14} {:>8.1}ms", "largest component", largest.size, largest_ms);
    println!("{:>20} {:>14} {:>8.1}ms", "critical vertices", critical.count, critical_ms);
    println!(
        "{:>20} {:>14} {:>8.1}ms  ({} vertices, {} down, {} queue)",
        "diameter",
        diam.diameter,
        diameter_ms,
        small.num_vertices(),
        outages.len(),
        config.queue
    );
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Generators only emit in-range endpoints.
fn link(graph: &mut Graph, a: usize, b: usize) {
    if let Err(e) = graph.add_edge(a, b) {
        debug_assert!(false, "generator produced {e}");
    }
}

/// L-system fractal tree: every interior vertex is a cut vertex.
///
/// Each vertex spawns three children, breadth first.
fn gen_lsystem(n: usize) -> Graph {
    let mut graph = Graph::with_capacity(n, n.saturating_sub(1));
    let branching = 3;

    let mut next_id = 1;
    let mut frontier = vec![0];
    while next_id < n && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= n {
                    break;
                }
                link(&mut graph, parent, next_id);
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint.
/// Hubs make few cut vertices but a very short diameter.
fn gen_scale_free(n: usize) -> Graph {
    let edges_per_vertex = 3;
    let mut graph = Graph::with_capacity(n, n * edges_per_vertex);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<usize> = Vec::with_capacity(n * edges_per_vertex * 2);

    let seed = 5.min(n);
    for i in 0..seed {
        for j in (i + 1)..seed {
            link(&mut graph, i, j);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for v in seed..n {
        for _ in 0..edges_per_vertex.min(v) {
            let target = if endpoints.is_empty() {
                rng.next(v)
            } else {
                endpoints[rng.next(endpoints.len())]
            };
            if target != v {
                link(&mut graph, v, target);
                endpoints.push(v);
                endpoints.push(target);
            }
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice with random rewiring.
fn gen_small_world(n: usize) -> Graph {
    let k = 3;
    let p = 0.05;
    let mut graph = Graph::with_capacity(n, n * k);
    let mut rng = FastRng::new(67890);
    if n < 2 {
        return graph;
    }

    for i in 0..n {
        for j in 1..=k {
            let neighbor = (i + j) % n;
            let target = if rng.next_f64() < p { rng.next(n) } else { neighbor };
            link(&mut graph, i, if target == i { neighbor } else { target });
        }
    }

    graph
}

/// Erdos-Renyi: uniform random edges, ~1.5 per vertex so the graph sits
/// near the giant-component threshold.
fn gen_random(n: usize) -> Graph {
    let target_edges = n * 3 / 2;
    let mut graph = Graph::with_capacity(n, target_edges);
    let mut rng = FastRng::new(54321);
    if n < 2 {
        return graph;
    }

    for _ in 0..target_edges {
        let a = rng.next(n);
        let b = rng.next(n);
        if a != b {
            link(&mut graph, a, b);
        }
    }

    graph
}

/// Barbell: two dense clusters joined by a chain of bridge vertices.
///
/// Every bridge vertex and both chain anchors are critical.
fn gen_barbell(n: usize) -> Graph {
    let bridge_len = 10.min(n);
    let cluster = (n - bridge_len) / 2;
    let mut graph = Graph::with_capacity(n, cluster * 8 + bridge_len + 1);
    let mut rng = FastRng::new(99999);

    let mut dense = |graph: &mut Graph, offset: usize| {
        for i in 0..cluster {
            for _ in 0..4usize.min(cluster.saturating_sub(1)) {
                let target = rng.next(cluster);
                if target != i {
                    link(graph, offset + i, offset + target);
                }
            }
        }
    };

    dense(&mut graph, 0);

    // Chain from the last vertex of cluster A through the bridge into cluster B
    let bridge_start = cluster;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        if id > 0 {
            link(&mut graph, id - 1, id);
        }
    }
    let b_start = bridge_start + bridge_len;
    if cluster > 0 && b_start > 0 {
        link(&mut graph, b_start - 1, b_start);
    }

    dense(&mut graph, b_start);
    graph
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new vertex sticks to a recent "surface" vertex, with an occasional
/// second link that closes a loop.
fn gen_dla(n: usize) -> Graph {
    let mut graph = Graph::with_capacity(n, n * 2);
    let mut rng = FastRng::new(77777);
    if n == 0 {
        return graph;
    }

    let surface_max = 10_000;
    let mut surface: VecDeque<usize> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for v in 1..n {
        let attach_to = surface[rng.next(surface.len())];
        link(&mut graph, v, attach_to);

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && v > 1 {
            let other = rng.next(v);
            if other != attach_to {
                link(&mut graph, v, other);
            }
        }

        surface.push_back(v);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    graph
}
