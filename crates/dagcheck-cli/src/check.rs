//! Check command implementation for dagcheck CLI.
//!
//! Analyzes a pipeline JSON document without starting a server.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use dagcheck_core::{Analysis, AnalyzeOptions, Pipeline};

use crate::colors;

/// Read a pipeline from `source` (a path, or `-` for stdin) and analyze it.
///
/// Prints the result and returns it so the caller can pick an exit status.
pub fn execute(source: &str, options: &AnalyzeOptions, json: bool) -> anyhow::Result<Analysis> {
    let text = read_source(source)?;
    let pipeline: Pipeline = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse pipeline from {}", source))?;

    let graph = pipeline.graph(options)?;
    let analysis = Analysis::of(&graph);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(analysis);
    }

    println!("{}  ◆ Nodes:{} {}", colors::CYAN, colors::RESET, analysis.num_nodes);
    println!("{}  ◆ Edges:{} {}", colors::CYAN, colors::RESET, analysis.num_edges);

    match graph.find_cycle() {
        None => println!("{}  ✓ Pipeline is a DAG{}", colors::GREEN, colors::RESET),
        Some(cycle) => {
            // Close the loop for display
            let first = cycle[0];
            let mut path = cycle;
            path.push(first);
            println!(
                "{}  ✗ Not a DAG{}: cycle {}",
                colors::RED,
                colors::RESET,
                path.join(" → ")
            );
        }
    }

    Ok(analysis)
}

fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read pipeline from stdin")?;
        return Ok(text);
    }

    let path = Path::new(source);
    if !path.exists() {
        anyhow::bail!("Pipeline not found: {}", source);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
