//! Per-category and per-bucket counts for a built graph

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::model::{Category, EdgeKind, Graph, Placement};

/// Counts describing one graph, for logs and the CLI `summary` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_placement: BTreeMap<Placement, usize>,
    pub by_edge_kind: BTreeMap<EdgeKind, usize>,
    pub by_region: BTreeMap<String, usize>,
    /// One entry per containment root that has descendants, in node order.
    pub hierarchies: Vec<HierarchySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchySummary {
    pub root: String,
    pub descendants: usize,
}

impl GraphSummary {
    pub fn of(graph: &Graph) -> Self {
        let mut by_category = BTreeMap::new();
        let mut by_placement = BTreeMap::new();
        let mut by_region = BTreeMap::new();
        let mut descendants: BTreeMap<usize, usize> = BTreeMap::new();

        for node in &graph.nodes {
            *by_category.entry(node.category).or_insert(0) += 1;
            *by_placement.entry(node.placement).or_insert(0) += 1;
            if !node.resource.region.is_empty() {
                *by_region.entry(node.resource.region.clone()).or_insert(0) += 1;
            }

            let root = hierarchy_root(graph, &node.id);
            if root != node.id {
                if let Some(slot) = graph.nodes.iter().position(|n| n.id == root) {
                    *descendants.entry(slot).or_insert(0) += 1;
                }
            }
        }

        let mut by_edge_kind = BTreeMap::new();
        for edge in &graph.edges {
            *by_edge_kind.entry(edge.kind).or_insert(0) += 1;
        }

        let hierarchies = descendants
            .into_iter()
            .map(|(slot, count)| HierarchySummary {
                root: graph.nodes[slot].id.clone(),
                descendants: count,
            })
            .collect();

        GraphSummary {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            by_category,
            by_placement,
            by_edge_kind,
            by_region,
            hierarchies,
        }
    }

    pub fn placement_count(&self, placement: Placement) -> usize {
        self.by_placement.get(&placement).copied().unwrap_or(0)
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Walk incoming edges of any kind up to the topmost ancestor.
fn hierarchy_root<'a>(graph: &'a Graph, id: &'a str) -> &'a str {
    let mut current = id;
    let mut visited = HashSet::from([id]);
    while let Some(edge) = graph.edges_to(current).next() {
        if !visited.insert(edge.source.as_str()) {
            break;
        }
        current = edge.source.as_str();
    }
    current
}
