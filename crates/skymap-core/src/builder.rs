//! Graph assembly: one node per resource, one edge per resolved parent

use std::collections::{HashMap, HashSet};

use crate::model::{Edge, EdgeKind, Graph, Node, Placement, Position, Resource, Size};
use crate::resolve::{resolve, Resolution, ResourceIndex};

/// Build the unpositioned topology graph for a resource snapshot.
///
/// Unresolvable references never fail the build: the resource becomes an
/// orphan or global node with no incoming edge. Repeated ids follow
/// [`dedup_last_write_wins`].
pub fn build_graph(resources: &[Resource]) -> Graph {
    let snapshot = dedup_last_write_wins(resources);
    let index = ResourceIndex::new(&snapshot);

    let mut nodes = Vec::with_capacity(index.len());
    let mut edges = Vec::new();
    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();

    for (resource, category) in index.iter() {
        let resolution = resolve(resource, category, &index);

        let (placement, edge) = match resolution {
            Resolution::Root => (Placement::Root, None),
            Resolution::Contained(parent) => (
                Placement::Nested,
                Some(Edge::new(&parent.id, &resource.id, EdgeKind::Containment)),
            ),
            Resolution::Attached(parent) => (
                Placement::Attached,
                Some(Edge::new(&parent.id, &resource.id, EdgeKind::Attachment)),
            ),
            Resolution::Orphan => (Placement::Orphan, None),
            Resolution::Global => (Placement::Global, None),
        };

        if let Some(edge) = edge {
            if seen_pairs.insert((edge.source.clone(), edge.target.clone())) {
                edges.push(edge);
            }
        }

        nodes.push(Node {
            id: resource.id.clone(),
            category,
            placement,
            label: resource.label().to_string(),
            resource: resource.clone(),
            position: Position::default(),
            size: Size::default(),
            rank: 0,
        });
    }

    tracing::info!(
        "Built topology graph: {} nodes, {} edges from {} resources",
        nodes.len(),
        edges.len(),
        resources.len()
    );

    Graph { nodes, edges }
}

/// Collapse repeated ids. The last record for an id replaces earlier ones
/// and takes the slot of the first occurrence.
pub fn dedup_last_write_wins(resources: &[Resource]) -> Vec<Resource> {
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(resources.len());
    let mut deduped: Vec<Resource> = Vec::with_capacity(resources.len());

    for resource in resources {
        match slots.get(resource.id.as_str()) {
            Some(&slot) => {
                tracing::warn!(
                    "Duplicate resource id {}: later {} record replaces earlier {}",
                    resource.id,
                    resource.resource_type,
                    deduped[slot].resource_type
                );
                deduped[slot] = resource.clone();
            }
            None => {
                slots.insert(resource.id.as_str(), deduped.len());
                deduped.push(resource.clone());
            }
        }
    }

    deduped
}
