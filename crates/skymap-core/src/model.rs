//! Core data structures for the resource topology graph

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a discovered resource. Node ids are resource ids.
pub type ResourceId = String;

/// Free-form, provider-specific metadata attached to a resource.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One discovered cloud object, as produced by the inventory scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(alias = "resourceId")]
    pub id: ResourceId,
    pub resource_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Resource {
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Resource {
            id: id.into(),
            resource_type: resource_type.into(),
            name: None,
            region: String::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Display label: the name when present and non-empty, otherwise the id.
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.id,
        }
    }
}

/// Semantic category derived from a resource type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// VPCs and virtual networks.
    NetworkContainer,
    /// Subnets.
    NetworkSegment,
    Compute,
    Storage,
    ManagedService,
    /// Never structurally nested (object storage, identity, DNS).
    Global,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::NetworkContainer,
        Category::NetworkSegment,
        Category::Compute,
        Category::Storage,
        Category::ManagedService,
        Category::Global,
        Category::Unknown,
    ];

    /// Whether resources of this category look for a structural parent at all.
    pub fn participates_in_containment(self) -> bool {
        matches!(
            self,
            Category::NetworkSegment
                | Category::Compute
                | Category::Storage
                | Category::ManagedService
        )
    }

    /// Whether a missing parent means the scan is incomplete rather than
    /// the resource being unaffiliated by nature.
    pub fn expects_parent(self) -> bool {
        matches!(self, Category::NetworkSegment | Category::Compute)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::NetworkContainer => "network-container",
            Category::NetworkSegment => "network-segment",
            Category::Compute => "compute",
            Category::Storage => "storage",
            Category::ManagedService => "managed-service",
            Category::Global => "global",
            Category::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Presentational bucket for a node. Does not affect node or edge identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Placement {
    /// Heads a hierarchy (network containers).
    Root,
    /// Has a containment parent.
    Nested,
    /// Has an attachment parent only.
    Attached,
    /// Its category relates to a container, but none matched.
    Orphan,
    /// Never anchored to a container.
    Global,
}

impl Placement {
    pub const ALL: [Placement; 5] = [
        Placement::Root,
        Placement::Nested,
        Placement::Attached,
        Placement::Orphan,
        Placement::Global,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A single node in the topology graph. One per distinct resource id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: ResourceId,
    pub category: Category,
    pub placement: Placement,
    pub label: String,
    pub resource: Resource,
    /// Top-left corner once laid out.
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub rank: usize,
}

/// What kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Structural parent/child (VPC contains subnet).
    Containment,
    /// Non-structural binding (volume attached to instance).
    Attachment,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Containment => "contains",
            EdgeKind::Attachment => "attaches",
        }
    }
}

/// Routing hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeRouting {
    #[default]
    Straight,
    /// Orthogonal segments with rounded corners, suited to layered diagrams.
    SmoothStep,
}

/// A directed edge in the topology graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: ResourceId,
    pub target: ResourceId,
    pub kind: EdgeKind,
    #[serde(default)]
    pub routing: EdgeRouting,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        let source = source.into();
        let target = target.into();
        Edge {
            id: format!("{}:{}->{}", kind.as_str(), source, target),
            source,
            target,
            kind,
            routing: EdgeRouting::Straight,
        }
    }
}

/// The output artifact: nodes and edges, positioned once laid out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All edges leaving `source`, in edge order.
    pub fn edges_from<'a, 'b>(&'a self, source: &'b str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.source == source)
    }

    /// All edges entering `target`, in edge order.
    pub fn edges_to<'a, 'b>(&'a self, target: &'b str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.target == target)
    }

    pub fn has_edge_between(&self, source: &str, target: &str, kind: EdgeKind) -> bool {
        self.edges_from(source)
            .any(|e| e.target == target && e.kind == kind)
    }

    /// Containment parent of a node, if any.
    pub fn parent_of<'a>(&'a self, id: &str) -> Option<&'a str> {
        self.edges
            .iter()
            .find(|e| e.target == id && e.kind == EdgeKind::Containment)
            .map(|e| e.source.as_str())
    }

    /// Nodes bucketed under `placement`, in node order.
    pub fn nodes_with_placement(&self, placement: Placement) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.placement == placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_deserializes_inventory_shape() {
        let resource: Resource = serde_json::from_value(json!({
            "resourceId": "subnet-1",
            "resourceType": "subnet",
            "name": null,
            "region": "us-east-1",
            "metadata": { "vpcId": "vpc-1" }
        }))
        .unwrap();

        assert_eq!(resource.id, "subnet-1");
        assert_eq!(resource.resource_type, "subnet");
        assert_eq!(resource.name, None);
        assert_eq!(resource.metadata["vpcId"], json!("vpc-1"));
    }

    #[test]
    fn test_resource_optional_fields_default() {
        let resource: Resource =
            serde_json::from_value(json!({ "id": "b-1", "resourceType": "s3_bucket" })).unwrap();
        assert!(resource.metadata.is_empty());
        assert!(resource.region.is_empty());
    }

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(Resource::new("i-1", "ec2_instance").label(), "i-1");
        assert_eq!(Resource::new("i-1", "ec2_instance").with_name("  ").label(), "i-1");
        assert_eq!(Resource::new("i-1", "ec2_instance").with_name("web").label(), "web");
    }

    #[test]
    fn test_edge_id_is_stable() {
        let edge = Edge::new("vpc-1", "subnet-1", EdgeKind::Containment);
        assert_eq!(edge.id, "contains:vpc-1->subnet-1");
        assert_eq!(edge, Edge::new("vpc-1", "subnet-1", EdgeKind::Containment));
        assert_eq!(edge.routing, EdgeRouting::Straight);
    }

    #[test]
    fn test_lookups_outlive_the_id_argument() {
        let mut graph = Graph::new();
        graph.edges.push(Edge::new("vpc-1", "subnet-1", EdgeKind::Containment));
        graph.edges.push(Edge::new("subnet-1", "vol-1", EdgeKind::Attachment));

        let parent = {
            let id = String::from("subnet-1");
            graph.parent_of(&id)
        };
        assert_eq!(parent, Some("vpc-1"));

        let outgoing: Vec<&Edge> = {
            let id = String::from("subnet-1");
            graph.edges_from(&id).collect()
        };
        assert_eq!(outgoing.len(), 1);
        assert_eq!(graph.parent_of("vol-1"), None);
        assert!(graph.has_edge_between("subnet-1", "vol-1", EdgeKind::Attachment));
    }
}
