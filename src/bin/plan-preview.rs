// Copyright (c) 2025 - Cowboy AI, Inc.
//! Plan Preview
//!
//! Synthesizes the topology for a NetworkSpec, applies it against the
//! in-memory provider, and prints the plan and the simulated stack outputs
//! as JSON.
//!
//! Run with: cargo run --bin plan-preview -- spec.json
//!
//! The spec path can also be supplied via the VPC_SPEC environment
//! variable. Logging is controlled by RUST_LOG (e.g. RUST_LOG=debug).

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use vpc_planner::adapters::InMemoryProvider;
use vpc_planner::graph::{PlanExecutor, ResourceGraph};
use vpc_planner::outputs::OutputBinder;
use vpc_planner::{NetworkSpec, TopologyModel};

fn spec_path() -> Result<String> {
    if let Some(path) = std::env::args().nth(1) {
        return Ok(path);
    }
    std::env::var("VPC_SPEC")
        .context("no spec given: pass a path argument or set VPC_SPEC")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = spec_path()?;
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read spec file {}", path))?;
    let spec: NetworkSpec =
        serde_json::from_str(&raw).with_context(|| format!("invalid spec in {}", path))?;

    let model = TopologyModel::synthesize(&spec).context("topology synthesis failed")?;
    let graph = ResourceGraph::plan(&model);
    info!(
        network = %spec.resource_name,
        subnets = model.subnet_count(),
        nodes = graph.nodes().len(),
        "topology synthesized"
    );

    let provider = InMemoryProvider::new();
    let realized = PlanExecutor::new(&provider)
        .apply(&model)
        .await
        .context("simulated apply failed")?;

    let outputs = OutputBinder::bind(&spec, &realized).context("output binding failed")?;

    let report = json!({
        "plan": graph.nodes(),
        "outputs": outputs,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
