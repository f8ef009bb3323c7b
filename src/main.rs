use anyhow::Context;
use densegraph::algo::{
    multiply_vector_transform, neighbors, run_random_walks, Direction, MultiplySide,
    StandardTransform,
};
use densegraph::{remove_edges_randomly, sample_graph, EngineConfig, Graph, GraphKind, NodeId};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => EngineConfig::default(),
    };

    println!("densegraph v{}", densegraph::version());
    println!("==========================================");
    println!();

    let graph = demo_structure()?;
    demo_propagation(&graph, &config)?;
    demo_sampling(&graph, &config)?;

    Ok(())
}

fn demo_structure() -> anyhow::Result<Graph> {
    println!("=== Demo 1: Dense Graph Structure ===");
    let mut graph = Graph::with_name(GraphKind::DirectedWeighted, "ring");

    for i in 0..8 {
        graph.add_node(&format!("r{}", i));
    }
    for i in 0..8 {
        graph.add_edge(NodeId(i), NodeId((i + 1) % 8), 1.0 + i as f64);
    }
    graph.add_edge("r0", "r4", 0.5);
    graph.add_edge("r2", "r2", 2.0);
    println!("✓ Built {} nodes, {} edges", graph.num_nodes(), graph.num_edges());

    graph.add_node("spare");
    graph.remove_node("r3");
    println!(
        "✓ Removed r3; spare renumbered to {}",
        graph.node_id("spare").map_or_else(|| "?".to_string(), |id| id.to_string())
    );

    let out: Vec<NodeId> = neighbors(&graph, "r0", Direction::Outgoing);
    println!("  r0 -> {:?}", out.iter().map(|&id| graph.node_label(id)).collect::<Vec<_>>());

    println!("\nGraph Statistics:");
    println!("{}", serde_json::to_string_pretty(&graph.statistics())?);
    println!();
    Ok(graph)
}

fn demo_propagation(graph: &Graph, config: &EngineConfig) -> anyhow::Result<()> {
    println!("=== Demo 2: Propagation ===");
    let n = graph.num_nodes();
    let uniform = vec![1.0 / n as f64; n];

    let degrees = multiply_vector_transform(
        graph,
        &StandardTransform::Identity,
        MultiplySide::Right,
        &vec![1.0; n],
        &config.propagation,
    )?;
    println!("  weighted out-degree: {:?}", degrees);

    let walk = run_random_walks(graph, &uniform, 3, MultiplySide::Left, &config.propagation)?;
    let mass: f64 = walk.iter().sum();
    println!("  4-step walk distribution (mass {:.3}): {:?}", mass, walk);
    info!(nodes = n, mass, "random walk complete");
    println!();
    Ok(())
}

fn demo_sampling(graph: &Graph, config: &EngineConfig) -> anyhow::Result<()> {
    println!("=== Demo 3: Sampling ===");
    let mut sample = Graph::new(graph.kind());
    let edges = sample_graph(graph, [NodeId(0)], 2, &mut sample)?;
    println!("✓ Sampled '{}': {} nodes, {} edges", sample.name(), sample.num_nodes(), edges);

    let mut rng = config.sampling.rng();
    let kept = remove_edges_randomly(&mut sample, 0.5, &mut rng);
    println!("✓ Thinned sample, kept {:.0}% of edges", kept * 100.0);
    Ok(())
}
