use std::error::Error;

use itertools::Itertools;
use log::info;
use strum_macros::{Display, EnumString};

use graph_mst::graph::{Edge, Graph};
use graph_mst::mst::stepwise::{StepwiseKruskal, StepwiseMst, StepwisePrim};
use graph_mst::mst::{LazyPrim, MinimumSpanningTree};
use graph_mst::util::types::{DEFAULT_WEIGHT, VertexType, Weight};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
enum Algorithm {
    Kruskal,
    Prim,
    LazyPrim,
}

/// reads a headerless `from,to[,weight]` file into an undirected graph
fn read_graph(filename: &str) -> Result<Graph, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(filename)?;

    let mut graph = Graph::new();
    for record in reader.records() {
        let record = record?;
        let from: VertexType = record.get(0).ok_or("missing source vertex")?.parse()?;
        let to: VertexType = record.get(1).ok_or("missing target vertex")?.parse()?;
        // edges without a weight column get the default weight
        let weight: Weight = match record.get(2) {
            Some(weight) if !weight.is_empty() => weight.parse()?,
            _ => DEFAULT_WEIGHT,
        };
        graph.add_undirected_edge(from, to, weight);
    }

    Ok(graph)
}

fn describe(edge: Option<Edge>) -> String {
    edge.map_or_else(|| "-".to_string(), |edge| edge.to_string())
}

/// Utility to trace a minimum spanning tree computation step by step. Arguments
/// 1. algorithm: one of `{kruskal, prim, lazy-prim}`
/// 2. filename: path of a csv file with one `from,to,weight` edge per line, the weight is optional
/// 3. root (optional): start vertex for prim, picked at random if missing
/// Steps are logged at info level, set `RUST_LOG=info` to see them
fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args();
    args.next();

    let usage = "usage: mst-trace <kruskal|prim|lazy-prim> <edges.csv> [root]";
    let algorithm: Algorithm = args.next().ok_or(usage)?.parse()?;
    let filename = args.next().ok_or(usage)?;
    let root: Option<VertexType> = args.next().map(|root| root.parse()).transpose()?;

    // initialize env_logger
    env_logger::init();

    let graph = read_graph(&filename)?;
    info!("Graph with {} vertices and {} edges loaded from {}", graph.vertex_count(), graph.edge_count(), filename);

    let (edges, weight, complete) = match algorithm {
        Algorithm::Kruskal => {
            let mut engine = StepwiseKruskal::new(&graph);
            for step in engine.steps() {
                let step = step?;
                info!("{} {} weight {} components {}", step.get_kind(), describe(step.get_edge()), step.get_weight(), step.get_partition().len());
            }
            (engine.edges().to_vec(), engine.weight(), engine.is_complete())
        }
        Algorithm::Prim => {
            let mut engine = match root {
                Some(root) => StepwisePrim::new(&graph, root)?,
                None => StepwisePrim::with_random_root(&graph, &mut rand::thread_rng())?,
            };
            info!("Prim starts at {:?}", engine.get_root());
            for step in engine.steps() {
                let step = step?;
                info!("{} {:?} {} weight {} queue [{}]", step.get_kind(), step.get_node(), describe(step.get_edge()), step.get_weight(),
                      step.get_queue().iter().map(|(vertex, distance)| format!("{}:{}", vertex, distance)).join(", "));
            }
            (engine.edges().to_vec(), engine.weight(), engine.is_complete())
        }
        Algorithm::LazyPrim => {
            let mut solver = LazyPrim::new(&graph);
            solver.solve()?;
            (solver.edges().to_vec(), solver.weight(), solver.is_complete())
        }
    };

    println!("{}: {} edges, weight {}, complete: {}", algorithm, edges.len(), weight, complete);
    println!("{}", edges.iter().join(" "));

    Ok(())
}
