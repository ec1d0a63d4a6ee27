//! Layered (Sugiyama-style) layout for skymap topology graphs
//!
//! The pipeline has three phases, each deterministic for a given input:
//! 1. Rank assignment (longest path from the roots)
//! 2. Crossing reduction (barycenter sweeps)
//! 3. Coordinate assignment (fixed node boxes, center-anchored, then
//!    shifted to top-left)
//!
//! A node's rank is its containment depth. Its drawing row also follows
//! attachment edges, so an attached volume sits below its instance.
//! Unconnected nodes other than network roots are not interleaved with the
//! hierarchy; they are placed in a pool grid after the last row.

pub mod config;
pub mod error;
mod order;
pub mod position;
mod rank;


use skymap_core::{EdgeRouting, Graph, Placement, Size, Topology};

pub use config::{Direction, LayoutConfig};
pub use error::{ConfigError, LayoutError};
pub use position::{diagram_bounds, Bounds};

/// Lay out `graph` with default geometry.
pub fn layout_graph(graph: Graph, direction: Direction) -> Result<Graph, LayoutError> {
    layout_graph_with(graph, &LayoutConfig::default().with_direction(direction))
}

/// Lay out `graph`, filling in every node's rank, size and top-left position
/// and marking every edge for stepped routing.
pub fn layout_graph_with(mut graph: Graph, config: &LayoutConfig) -> Result<Graph, LayoutError> {
    config.validate()?;
    let topology = Topology::new(&graph)?;

    let ranking = rank::assign_ranks(&graph, &topology);
    let layers = order::order_layers(
        ranking.layers(),
        &ranking.rows,
        &topology,
        config.ordering_sweeps,
    );
    let pool = pool_order(&graph, &ranking.pooled);

    let centers = position::center_positions(&layers, &pool, graph.nodes.len(), config);
    let size = Size {
        width: config.node_width,
        height: config.node_height,
    };

    for (slot, node) in graph.nodes.iter_mut().enumerate() {
        node.rank = ranking.ranks[slot];
        node.size = size;
        node.position = position::to_top_left(centers[slot], size);
    }
    for edge in &mut graph.edges {
        edge.routing = EdgeRouting::SmoothStep;
    }

    tracing::info!(
        "Laid out {} nodes ({}) in {} rows, {} pooled",
        graph.nodes.len(),
        config.direction,
        layers.len(),
        pool.len()
    );

    Ok(graph)
}

/// Pooled slots: orphans first, then globals, then any other unconnected
/// non-root node, each in node order.
fn pool_order(graph: &Graph, pooled: &[bool]) -> Vec<usize> {
    let group = |placement: Placement| match placement {
        Placement::Orphan => 0,
        Placement::Global => 1,
        _ => 2,
    };
    let mut pool: Vec<usize> = (0..graph.nodes.len()).filter(|&slot| pooled[slot]).collect();
    pool.sort_by_key(|&slot| group(graph.nodes[slot].placement));
    pool
}
