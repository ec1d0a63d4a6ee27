//! Traversal index over a [`Graph`] using petgraph::StableDiGraph
//!
//! Nodes are addressed by their slot in `Graph::nodes`, so callers can keep
//! parallel vectors (ranks, coordinates) without hashing ids.

use std::collections::{HashMap, HashSet};

use petgraph::graph::DiGraph;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::TopologyError;
use crate::model::{EdgeKind, Graph};

/// Adjacency view of a topology graph.
pub struct Topology {
    inner: StableDiGraph<usize, EdgeKind>,
    indices: Vec<NodeIndex>,
    slots: HashMap<String, usize>,
}

impl std::fmt::Debug for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Topology")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl Topology {
    /// Index `graph`. Fails if node ids repeat or an edge names an unknown node.
    pub fn new(graph: &Graph) -> Result<Self, TopologyError> {
        let mut inner = StableDiGraph::with_capacity(graph.nodes.len(), graph.edges.len());
        let mut indices = Vec::with_capacity(graph.nodes.len());
        let mut slots = HashMap::with_capacity(graph.nodes.len());

        for (slot, node) in graph.nodes.iter().enumerate() {
            if slots.insert(node.id.clone(), slot).is_some() {
                return Err(TopologyError::DuplicateNode(node.id.clone()));
            }
            indices.push(inner.add_node(slot));
        }

        for edge in &graph.edges {
            let endpoint = |id: &str| {
                slots.get(id).copied().ok_or_else(|| TopologyError::DanglingEdge {
                    edge: edge.id.clone(),
                    endpoint: id.to_string(),
                })
            };
            let source = endpoint(&edge.source)?;
            let target = endpoint(&edge.target)?;
            inner.add_edge(indices[source], indices[target], edge.kind);
        }

        Ok(Topology { inner, indices, slots })
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Slot of a node id in `Graph::nodes`.
    pub fn slot(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }

    fn neighbors(&self, slot: usize, direction: Direction, kind: Option<EdgeKind>) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .inner
            .edges_directed(self.indices[slot], direction)
            .filter(|edge_ref| kind.is_none_or(|kind| *edge_ref.weight() == kind))
            .map(|edge_ref| match direction {
                Direction::Incoming => edge_ref.source(),
                Direction::Outgoing => edge_ref.target(),
            })
            .filter_map(|idx| self.inner.node_weight(idx).copied())
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Slots with an edge into `slot`, ascending.
    pub fn parents(&self, slot: usize) -> Vec<usize> {
        self.neighbors(slot, Direction::Incoming, None)
    }

    /// Slots `slot` has an edge to, ascending.
    pub fn children(&self, slot: usize) -> Vec<usize> {
        self.neighbors(slot, Direction::Outgoing, None)
    }

    /// Like [`Topology::parents`], following containment edges only.
    pub fn containment_parents(&self, slot: usize) -> Vec<usize> {
        self.neighbors(slot, Direction::Incoming, Some(EdgeKind::Containment))
    }

    /// Like [`Topology::children`], following containment edges only.
    pub fn containment_children(&self, slot: usize) -> Vec<usize> {
        self.neighbors(slot, Direction::Outgoing, Some(EdgeKind::Containment))
    }

    /// Whether the node touches no edge of any kind.
    pub fn is_isolated(&self, slot: usize) -> bool {
        let idx = self.indices[slot];
        self.inner.edges_directed(idx, Direction::Incoming).next().is_none()
            && self.inner.edges_directed(idx, Direction::Outgoing).next().is_none()
    }

    /// Nodes without an incoming containment edge, in slot order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.indices.len())
            .filter(|&slot| {
                !self
                    .inner
                    .edges_directed(self.indices[slot], Direction::Incoming)
                    .any(|e| *e.weight() == EdgeKind::Containment)
            })
            .collect()
    }

    /// All containment ancestors of a node.
    pub fn ancestors(&self, slot: usize) -> HashSet<usize> {
        let mut ancestors = HashSet::new();
        let mut to_visit = vec![slot];

        while let Some(current) = to_visit.pop() {
            for edge_ref in self.inner.edges_directed(self.indices[current], Direction::Incoming) {
                if *edge_ref.weight() != EdgeKind::Containment {
                    continue;
                }
                if let Some(&parent) = self.inner.node_weight(edge_ref.source()) {
                    if ancestors.insert(parent) {
                        to_visit.push(parent);
                    }
                }
            }
        }

        ancestors
    }

    /// Whether the containment edges alone contain a cycle.
    pub fn has_containment_cycle(&self) -> bool {
        let mut containment: DiGraph<(), ()> = DiGraph::with_capacity(self.indices.len(), 0);
        let nodes: Vec<_> = self.indices.iter().map(|_| containment.add_node(())).collect();
        for (source, &idx) in self.indices.iter().enumerate() {
            for edge_ref in self.inner.edges_directed(idx, Direction::Outgoing) {
                if *edge_ref.weight() != EdgeKind::Containment {
                    continue;
                }
                if let Some(&target) = self.inner.node_weight(edge_ref.target()) {
                    containment.add_edge(nodes[source], nodes[target], ());
                }
            }
        }
        petgraph::algo::is_cyclic_directed(&containment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use crate::model::{Edge, Resource};
    use serde_json::json;

    fn chain() -> Graph {
        build_graph(&[
            Resource::new("vpc-1", "vpc"),
            Resource::new("subnet-1", "subnet").with_metadata("vpcId", json!("vpc-1")),
            Resource::new("i-1", "ec2_instance").with_metadata("subnetId", json!("subnet-1")),
            Resource::new("b-1", "s3_bucket"),
        ])
    }

    #[test]
    fn test_adjacency() {
        let topology = Topology::new(&chain()).unwrap();
        assert_eq!(topology.node_count(), 4);
        assert_eq!(topology.edge_count(), 2);
        assert_eq!(topology.children(0), vec![1]);
        assert_eq!(topology.parents(2), vec![1]);
        assert_eq!(topology.roots(), vec![0, 3]);
        assert!(topology.is_isolated(3));
        assert!(!topology.is_isolated(0));
    }

    #[test]
    fn test_containment_neighbours_skip_attachments() {
        let mut graph = chain();
        graph.edges.push(Edge::new("i-1", "b-1", EdgeKind::Attachment));
        let topology = Topology::new(&graph).unwrap();

        assert_eq!(topology.children(2), vec![3]);
        assert!(topology.containment_children(2).is_empty());
        assert_eq!(topology.parents(3), vec![2]);
        assert!(topology.containment_parents(3).is_empty());
        assert_eq!(topology.containment_parents(2), vec![1]);
        assert_eq!(topology.roots(), vec![0, 3]);
    }

    #[test]
    fn test_ancestors() {
        let topology = Topology::new(&chain()).unwrap();
        let ancestors = topology.ancestors(2);
        assert_eq!(ancestors, HashSet::from([0, 1]));
        assert!(topology.ancestors(0).is_empty());
    }

    #[test]
    fn test_dangling_edge_is_rejected() {
        let mut graph = chain();
        graph.edges.push(Edge::new("vpc-1", "ghost", EdgeKind::Containment));
        let err = Topology::new(&graph).unwrap_err();
        assert_eq!(
            err,
            TopologyError::DanglingEdge {
                edge: "contains:vpc-1->ghost".to_string(),
                endpoint: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = chain();
        assert!(!Topology::new(&graph).unwrap().has_containment_cycle());

        graph.edges.push(Edge::new("i-1", "vpc-1", EdgeKind::Attachment));
        assert!(!Topology::new(&graph).unwrap().has_containment_cycle());

        graph.edges.push(Edge::new("i-1", "vpc-1", EdgeKind::Containment));
        assert!(Topology::new(&graph).unwrap().has_containment_cycle());
    }
}
