//! Typed accessors over free-form resource metadata
//!
//! Every cross-reference lookup the resolver performs goes through this
//! module. A key that is absent, null, or holds the wrong JSON type reads as
//! `None` / empty, so callers never special-case malformed metadata.

use serde_json::Value;

use crate::model::Resource;

pub const VPC_ID: &str = "vpcId";
pub const SUBNET_ID: &str = "subnetId";
pub const SUBNET_IDS: &str = "subnetIds";
pub const DB_SUBNET_GROUP: &str = "dbSubnetGroup";
pub const VPC_CONFIG: &str = "vpcConfig";
pub const ATTACHED_INSTANCE_ID: &str = "attachedInstanceId";
pub const ATTACHMENTS: &str = "attachments";

fn str_at<'a>(resource: &'a Resource, key: &str) -> Option<&'a str> {
    resource.metadata.get(key).and_then(Value::as_str)
}

fn str_list(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Pluck `field` out of every object in an array value.
fn field_list<'a>(value: &'a Value, field: &str) -> Vec<&'a str> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(field).and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

/// The VPC a subnet belongs to.
pub fn subnet_vpc_id(resource: &Resource) -> Option<&str> {
    str_at(resource, VPC_ID)
}

/// The single subnet an instance is launched into.
pub fn instance_subnet_id(resource: &Resource) -> Option<&str> {
    str_at(resource, SUBNET_ID)
}

/// Candidate subnets for resources that reference a group of them.
///
/// Checked in order: `subnetIds`, `dbSubnetGroup.subnets[].subnetIdentifier`,
/// `vpcConfig.subnetIds`. The first key that yields any id wins.
pub fn subnet_group_ids(resource: &Resource) -> Vec<&str> {
    let metadata = &resource.metadata;

    if let Some(ids) = metadata.get(SUBNET_IDS).map(str_list) {
        if !ids.is_empty() {
            return ids;
        }
    }

    if let Some(subnets) = metadata.get(DB_SUBNET_GROUP).and_then(|g| g.get("subnets")) {
        let ids = field_list(subnets, "subnetIdentifier");
        if !ids.is_empty() {
            return ids;
        }
    }

    metadata
        .get(VPC_CONFIG)
        .and_then(|c| c.get("subnetIds"))
        .map(str_list)
        .unwrap_or_default()
}

/// Whether the resource carries any subnet reference, matched or not.
pub fn has_subnet_reference(resource: &Resource) -> bool {
    instance_subnet_id(resource).is_some() || !subnet_group_ids(resource).is_empty()
}

/// Instances a volume is attached to.
pub fn attached_instance_ids(resource: &Resource) -> Vec<&str> {
    if let Some(id) = str_at(resource, ATTACHED_INSTANCE_ID) {
        return vec![id];
    }
    resource
        .metadata
        .get(ATTACHMENTS)
        .map(|a| field_list(a, "instanceId"))
        .unwrap_or_default()
}
