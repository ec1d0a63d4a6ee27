//! CLI command implementations

use anyhow::Context;
use skymap_core::{GraphSummary, ResourceSnapshot, build_graph, classify as classify_type};
use skymap_layout::{Direction, LayoutConfig, layout_graph_with};
use std::io::{Read, Write};
use std::path::Path;

pub fn layout(
    snapshot: &Path,
    direction: Option<Direction>,
    config: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    if let Some(direction) = direction {
        config.direction = direction;
    }

    let snapshot = read_snapshot(snapshot)?;
    let graph = build_graph(&snapshot.resources);
    let graph = layout_graph_with(graph, &config).context("Layout failed")?;

    write_json(&graph, pretty)
}

pub fn build(snapshot: &Path, pretty: bool) -> anyhow::Result<()> {
    let snapshot = read_snapshot(snapshot)?;
    let graph = build_graph(&snapshot.resources);
    write_json(&graph, pretty)
}

pub fn summary(snapshot: &Path) -> anyhow::Result<()> {
    let snapshot = read_snapshot(snapshot)?;
    let graph = build_graph(&snapshot.resources);
    let summary = GraphSummary::of(&graph);

    tracing::info!(
        "{} nodes, {} edges, {} hierarchies",
        summary.node_count,
        summary.edge_count,
        summary.hierarchies.len()
    );
    write_json(&summary, true)
}

pub fn classify(types: &[String]) {
    for resource_type in types {
        println!("{}\t{}", resource_type, classify_type(resource_type));
    }
}

/// Read a snapshot from a file, or stdin when the path is `-`.
fn read_snapshot(path: &Path) -> anyhow::Result<ResourceSnapshot> {
    let input = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Cannot read snapshot from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read snapshot {}", path.display()))?
    };

    let snapshot = ResourceSnapshot::from_json(&input)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    tracing::info!("Loaded {} resources from {}", snapshot.len(), path.display());
    Ok(snapshot)
}

/// Layout settings from a TOML file, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config {}", path.display()))?;
    let config = LayoutConfig::from_toml_str(&input)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!("Layout config from {}: {:?}", path.display(), config);
    Ok(config)
}

fn write_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
