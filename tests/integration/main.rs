//! Integration tests for skymap
//!
//! These tests drive the snapshot → graph → layout pipeline end to end,
//! through the libraries and through the CLI binary.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{Value, json};
use skymap_core::{Category, EdgeKind, Graph, Placement, ResourceSnapshot, build_graph};
use skymap_layout::{Direction, layout_graph};
use tempfile::TempDir;

fn inventory_snapshot() -> Value {
    json!([
        { "resourceId": "vpc-0a1", "resourceType": "vpc", "name": "prod",
          "region": "us-east-1",
          "metadata": { "cidrBlock": "10.0.0.0/16", "isDefault": false } },
        { "resourceId": "subnet-11", "resourceType": "subnet", "name": "prod-a",
          "region": "us-east-1",
          "metadata": { "vpcId": "vpc-0a1", "availabilityZone": "us-east-1a" } },
        { "resourceId": "subnet-12", "resourceType": "subnet", "name": "prod-b",
          "region": "us-east-1",
          "metadata": { "vpcId": "vpc-0a1", "availabilityZone": "us-east-1b" } },
        { "resourceId": "i-0f3", "resourceType": "ec2_instance", "name": "api",
          "region": "us-east-1",
          "metadata": { "subnetId": "subnet-12", "instanceType": "t3.small" } },
        { "resourceId": "db-orders", "resourceType": "rds_instance", "name": null,
          "region": "us-east-1",
          "metadata": { "engine": "postgres",
                        "dbSubnetGroup": { "subnets": [
                            { "subnetIdentifier": "subnet-12" },
                            { "subnetIdentifier": "subnet-11" } ] } } },
        { "resourceId": "fn-resize", "resourceType": "lambda_function",
          "region": "us-east-1", "metadata": { "runtime": "nodejs20.x" } },
        { "resourceId": "subnet-99", "resourceType": "subnet", "region": "us-west-2",
          "metadata": { "vpcId": "vpc-elsewhere" } },
        { "resourceId": "static-assets", "resourceType": "s3_bucket",
          "region": "us-east-1", "metadata": {} }
    ])
}

fn pipeline(value: Value, direction: Direction) -> Graph {
    let snapshot = ResourceSnapshot::from_value(value).expect("valid snapshot");
    layout_graph(build_graph(&snapshot.resources), direction).expect("layout succeeds")
}

/// Test the full pipeline over a realistic inventory snapshot
#[test]
fn test_inventory_pipeline() {
    let graph = pipeline(inventory_snapshot(), Direction::TopBottom);

    assert_eq!(graph.node_count(), 8);
    let pairs: Vec<(&str, &str)> = graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("vpc-0a1", "subnet-11"),
            ("vpc-0a1", "subnet-12"),
            ("subnet-12", "i-0f3"),
            ("subnet-11", "db-orders"),
        ]
    );
    assert!(graph.edges.iter().all(|e| e.kind == EdgeKind::Containment));

    let lambda = graph.node("fn-resize").unwrap();
    assert_eq!(lambda.category, Category::ManagedService);
    assert_eq!(lambda.placement, Placement::Global);
    assert_eq!(graph.node("subnet-99").unwrap().placement, Placement::Orphan);
    assert_eq!(graph.node("db-orders").unwrap().label, "db-orders");

    // Unconnected resources sit below the three hierarchy rows.
    for id in ["fn-resize", "subnet-99", "static-assets"] {
        assert!(graph.node(id).unwrap().position.y >= 3.0 * 116.0);
    }
}

/// Test that the same snapshot always produces the same bytes
#[test]
fn test_pipeline_is_deterministic() {
    let first = pipeline(inventory_snapshot(), Direction::LeftRight);
    let second = pipeline(inventory_snapshot(), Direction::LeftRight);
    let first = serde_json::to_string(&first).unwrap();
    let second = serde_json::to_string(&second).unwrap();
    assert_eq!(first, second);
}

/// Test that a null snapshot is rejected instead of producing an empty graph
#[test]
fn test_null_snapshot_is_a_contract_violation() {
    assert!(ResourceSnapshot::from_value(Value::Null).is_err());
    assert!(ResourceSnapshot::from_value(json!({ "resources": null })).is_err());
}

/// Test that an empty snapshot is fine
#[test]
fn test_empty_snapshot() {
    let graph = pipeline(json!([]), Direction::TopBottom);
    assert_eq!(graph, Graph::new());
}

fn skymap() -> Command {
    Command::new(env!("CARGO_BIN_EXE_skymap"))
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = skymap().arg("--help").output().expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Cloud resource topology reconstruction and layered layout"));
}

/// Test the layout command reading from a file
#[test]
fn test_cli_layout_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("snapshot.json");
    std::fs::write(&path, inventory_snapshot().to_string()).unwrap();

    let output = skymap()
        .args(["layout", "--direction", "LR"])
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let graph: Graph = serde_json::from_slice(&output.stdout).expect("stdout is a graph");
    assert_eq!(graph, pipeline(inventory_snapshot(), Direction::LeftRight));
}

/// Test the build command reading from stdin
#[test]
fn test_cli_build_from_stdin() {
    let mut child = skymap()
        .args(["build", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(inventory_snapshot().to_string().as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let graph: Graph = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.nodes.iter().all(|n| n.position.x == 0.0 && n.position.y == 0.0));
}

/// Test that a null snapshot makes the CLI fail
#[test]
fn test_cli_rejects_null_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("null.json");
    std::fs::write(&path, "null").unwrap();

    let output = skymap().arg("summary").arg(&path).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be a list"));
}

/// Test the classify command
#[test]
fn test_cli_classify() {
    let output = skymap()
        .args(["classify", "vpc", "aws_instance", "mystery"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["vpc\tnetwork-container", "aws_instance\tcompute", "mystery\tunknown"]
    );
}
