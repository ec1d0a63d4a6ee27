//! Test utilities for skymap: resource fixtures and synthetic estates

use serde_json::json;

use crate::model::Resource;

pub fn vpc(id: &str) -> Resource {
    Resource::new(id, "vpc").with_region("us-east-1")
}

pub fn subnet(id: &str, vpc_id: &str) -> Resource {
    Resource::new(id, "subnet")
        .with_region("us-east-1")
        .with_metadata("vpcId", json!(vpc_id))
}

pub fn instance(id: &str, subnet_id: &str) -> Resource {
    Resource::new(id, "ec2_instance")
        .with_region("us-east-1")
        .with_metadata("subnetId", json!(subnet_id))
}

pub fn volume(id: &str, instance_id: &str) -> Resource {
    Resource::new(id, "ebs_volume")
        .with_region("us-east-1")
        .with_metadata("attachedInstanceId", json!(instance_id))
}

pub fn database(id: &str, subnet_ids: &[&str]) -> Resource {
    let subnets: Vec<_> = subnet_ids
        .iter()
        .map(|s| json!({ "subnetIdentifier": s }))
        .collect();
    Resource::new(id, "rds_instance")
        .with_region("us-east-1")
        .with_metadata("dbSubnetGroup", json!({ "subnets": subnets }))
}

pub fn bucket(id: &str) -> Resource {
    Resource::new(id, "s3_bucket")
}

/// VPC → subnet → instance.
pub fn scenario_a() -> Vec<Resource> {
    vec![
        vpc("vpc-1"),
        subnet("subnet-1", "vpc-1"),
        instance("i-1", "subnet-1"),
    ]
}

/// Two VPCs with a few subnets, instances, a database, a volume, and
/// some unaffiliated resources.
pub fn sample_estate() -> Vec<Resource> {
    vec![
        vpc("vpc-a").with_name("production"),
        vpc("vpc-b").with_name("staging"),
        subnet("subnet-a1", "vpc-a"),
        subnet("subnet-a2", "vpc-a"),
        subnet("subnet-b1", "vpc-b"),
        instance("i-web-1", "subnet-a1").with_name("web-1"),
        instance("i-web-2", "subnet-a2").with_name("web-2"),
        instance("i-stg", "subnet-b1"),
        database("db-main", &["subnet-a2", "subnet-a1"]),
        volume("vol-web-1", "i-web-1"),
        subnet("subnet-lost", "vpc-gone"),
        bucket("assets"),
        Resource::new("role-deploy", "iam_role"),
        Resource::new("thing-1", "quantum_annealer"),
    ]
}

/// Deterministic estate from small integers, for property tests.
///
/// Each entry is `(id_seed, kind, target)`. Ids repeat when seeds collide
/// and references may point at missing or wrongly-typed resources.
pub fn synthetic_estate(entries: &[(u8, u8, u8)]) -> Vec<Resource> {
    entries
        .iter()
        .map(|&(id_seed, kind, target)| {
            let id = format!("r-{}", id_seed % 32);
            let reference = format!("r-{}", target % 40);
            match kind % 7 {
                0 => Resource::new(id, "vpc"),
                1 => Resource::new(id, "subnet").with_metadata("vpcId", json!(reference)),
                2 => Resource::new(id, "ec2_instance").with_metadata("subnetId", json!(reference)),
                3 => Resource::new(id, "ebs_volume")
                    .with_metadata("attachedInstanceId", json!(reference)),
                4 => Resource::new(id, "rds_instance").with_metadata(
                    "subnetIds",
                    json!([reference, format!("r-{}", target.wrapping_add(1) % 40)]),
                ),
                5 => Resource::new(id, "s3_bucket"),
                _ => Resource::new(id, "quantum_annealer")
                    .with_metadata("subnetId", json!(reference)),
            }
        })
        .collect()
}
