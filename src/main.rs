use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use risk_cascade::config::Config;
use risk_cascade::graph::{Graph, NodeAssessment, ancestors_within, propagate};
use tracing::info;

/// Propagate cascading risk through an operation dependency graph
#[derive(Parser, Debug)]
#[command(name = "risk-cascade", version)]
struct Args {
    /// Path to the graph JSON file (nodes + edges)
    graph: PathBuf,

    /// Path to the assessments JSON file (node id -> { local_risk })
    assessments: PathBuf,

    /// Override the critical-path multiplier from config
    #[arg(long)]
    multiplier: Option<f32>,

    /// Also print the ancestor chain for this node id
    #[arg(long)]
    chain: Option<String>,
}

fn main() -> Result<()> {
    risk_cascade::load_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "risk_cascade=info".to_string()),
        )
        .init();

    let args = Args::parse();
    let config = Config::load()?;
    let multiplier = args.multiplier.unwrap_or(config.propagation.multiplier);

    let graph = Graph::from_json(
        &std::fs::read_to_string(&args.graph)
            .with_context(|| format!("failed to read graph file {}", args.graph.display()))?,
    )?;
    let mut assessments: HashMap<String, NodeAssessment> = serde_json::from_str(
        &std::fs::read_to_string(&args.assessments).with_context(|| {
            format!(
                "failed to read assessments file {}",
                args.assessments.display()
            )
        })?,
    )
    .context("failed to parse assessments JSON")?;

    info!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        multiplier,
        "loaded operation graph"
    );

    propagate(&graph, &mut assessments, multiplier)?;
    println!("{}", serde_json::to_string_pretty(&assessments)?);

    if let Some(id) = args.chain {
        anyhow::ensure!(graph.node(&id).is_some(), "unknown node id '{id}'");
        let chain = ancestors_within(&graph, &id, config.propagation.max_depth);
        info!(node = %id, ancestors = chain.len(), "ancestor chain");
        println!("{}", serde_json::to_string_pretty(&chain)?);
    }

    Ok(())
}
