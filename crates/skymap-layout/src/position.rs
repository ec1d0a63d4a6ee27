//! Coordinate assignment

use serde::{Deserialize, Serialize};
use skymap_core::{Graph, Position, Size};

use crate::config::LayoutConfig;

/// Center of a node's box, before re-anchoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Center {
    pub x: f64,
    pub y: f64,
    /// Row of the drawing the node was placed in: hierarchy ranks first,
    /// then one layer per pool row.
    pub layer: usize,
}

/// Axis-aligned extent of a laid-out diagram.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Place hierarchy layers and then the pool, centering every row on the
/// widest one. Returns one center per slot in `0..slot_count`.
pub(crate) fn center_positions(
    layers: &[Vec<usize>],
    pool: &[usize],
    slot_count: usize,
    config: &LayoutConfig,
) -> Vec<Center> {
    let horizontal = config.direction.is_horizontal();
    // `along` runs within a rank, `across` from rank to rank.
    let (along, across) = if horizontal {
        (config.node_height, config.node_width)
    } else {
        (config.node_width, config.node_height)
    };
    let along_step = along + config.node_separation;
    let rank_step = across + config.rank_separation;

    let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
    let columns = config.pool_min_columns.max(widest).max(1);
    let rows: Vec<&[usize]> = layers
        .iter()
        .map(Vec::as_slice)
        .chain(pool.chunks(columns))
        .collect();

    let span = |len: usize| {
        if len == 0 {
            0.0
        } else {
            len as f64 * along + (len - 1) as f64 * config.node_separation
        }
    };
    let max_span = rows.iter().map(|row| span(row.len())).fold(0.0, f64::max);

    let mut centers = vec![
        Center {
            x: 0.0,
            y: 0.0,
            layer: 0,
        };
        slot_count
    ];

    for (layer, row) in rows.iter().enumerate() {
        let offset = (max_span - span(row.len())) / 2.0;
        let rank_center = layer as f64 * rank_step + across / 2.0;
        for (i, &slot) in row.iter().enumerate() {
            let along_center = offset + i as f64 * along_step + along / 2.0;
            let (x, y) = if horizontal {
                (rank_center, along_center)
            } else {
                (along_center, rank_center)
            };
            centers[slot] = Center { x, y, layer };
        }
    }

    centers
}

/// Shift a center-anchored point to the top-left corner of its box.
pub(crate) fn to_top_left(center: Center, size: Size) -> Position {
    Position {
        x: center.x - size.width / 2.0,
        y: center.y - size.height / 2.0,
    }
}

/// Smallest box enclosing every node, or `None` for an empty graph.
pub fn diagram_bounds(graph: &Graph) -> Option<Bounds> {
    let first = graph.nodes.first()?;
    let mut min = (first.position.x, first.position.y);
    let mut max = (
        first.position.x + first.size.width,
        first.position.y + first.size.height,
    );
    for node in &graph.nodes[1..] {
        min.0 = min.0.min(node.position.x);
        min.1 = min.1.min(node.position.y);
        max.0 = max.0.max(node.position.x + node.size.width);
        max.1 = max.1.max(node.position.y + node.size.height);
    }
    Some(Bounds {
        x: min.0,
        y: min.1,
        width: max.0 - min.0,
        height: max.1 - min.1,
    })
}
