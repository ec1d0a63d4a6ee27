//! Resource type tag → semantic category

use crate::model::Category;

/// Provider prefixes stripped before matching (`aws_vpc` → `vpc`).
const PROVIDER_PREFIXES: &[&str] = &["aws_", "azurerm_", "azure_", "google_", "gcp_"];

/// Classify a resource type tag. Total over all strings.
pub fn classify(resource_type: &str) -> Category {
    let normalized = normalize(resource_type);
    let tag = PROVIDER_PREFIXES
        .iter()
        .find_map(|prefix| normalized.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(normalized.as_str());

    match tag {
        "vpc" | "virtual_network" | "vnet" | "network" => Category::NetworkContainer,

        "subnet" | "subnetwork" => Category::NetworkSegment,

        "ec2_instance" | "instance" | "ec2" | "virtual_machine" | "vm" | "ecs_task"
        | "eks_node_group" | "autoscaling_group" => Category::Compute,

        "ebs_volume" | "volume" | "efs_file_system" | "efs" | "disk" => Category::Storage,

        "rds_instance" | "rds_cluster" | "db_instance" | "lambda_function" | "lambda"
        | "elasticache_cluster" | "load_balancer" | "elb" | "alb" | "nlb" | "nat_gateway"
        | "ecs_service" | "eks_cluster" => Category::ManagedService,

        "s3_bucket" | "s3" | "bucket" | "iam_role" | "iam_user" | "iam_policy"
        | "route53_zone" | "cloudfront_distribution" | "sns_topic" | "sqs_queue"
        | "dynamodb_table" => Category::Global,

        _ => Category::Unknown,
    }
}

/// Lowercase and fold `-` / space into `_`.
fn normalize(resource_type: &str) -> String {
    resource_type
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
