//! Structural parent inference from metadata cross-references

use std::collections::HashMap;

use crate::classify::classify;
use crate::metadata;
use crate::model::{Category, Resource};

/// Lookup table over one resource snapshot, classified once.
pub struct ResourceIndex<'a> {
    entries: Vec<(&'a Resource, Category)>,
    by_id: HashMap<&'a str, usize>,
}

impl<'a> ResourceIndex<'a> {
    /// Index a snapshot. With repeated ids the last occurrence is the one found.
    pub fn new(resources: &'a [Resource]) -> Self {
        let entries: Vec<_> = resources
            .iter()
            .map(|r| (r, classify(&r.resource_type)))
            .collect();
        let by_id = resources
            .iter()
            .enumerate()
            .map(|(slot, r)| (r.id.as_str(), slot))
            .collect();
        ResourceIndex { entries, by_id }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<(&'a Resource, Category)> {
        self.by_id.get(id).map(|&slot| self.entries[slot])
    }

    pub fn category_of(&self, id: &str) -> Option<Category> {
        self.get(id).map(|(_, category)| category)
    }

    /// Entries in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Resource, Category)> + '_ {
        self.entries.iter().copied()
    }

    /// The resource with exactly this id, if it has the expected category.
    fn find(&self, id: &str, expected: Category) -> Option<&'a Resource> {
        self.get(id)
            .filter(|(_, category)| *category == expected)
            .map(|(r, _)| r)
    }

    /// The earliest resource in snapshot order whose id is listed in `ids`.
    fn first_of(&self, ids: &[&str], expected: Category) -> Option<&'a Resource> {
        ids.iter()
            .filter_map(|id| {
                let slot = *self.by_id.get(*id)?;
                let (r, category) = self.entries[slot];
                (category == expected).then_some((slot, r))
            })
            .min_by_key(|(slot, _)| *slot)
            .map(|(_, r)| r)
    }
}

/// Outcome of resolving one resource against the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// Heads its own hierarchy.
    Root,
    /// Structurally nested under this parent.
    Contained(&'a Resource),
    /// Bound to this resource without being nested in it.
    Attached(&'a Resource),
    /// Referenced a parent that is not in the snapshot.
    Orphan,
    /// Never anchored to a container.
    Global,
}

impl<'a> Resolution<'a> {
    pub fn parent(&self) -> Option<&'a Resource> {
        match self {
            Resolution::Contained(parent) => Some(*parent),
            _ => None,
        }
    }
}

/// Containment parent of `resource`, if one is present in `index`.
pub fn resolve_parent<'a>(resource: &Resource, index: &ResourceIndex<'a>) -> Option<&'a str> {
    resolve(resource, classify(&resource.resource_type), index)
        .parent()
        .map(|p| p.id.as_str())
}

/// Full resolution, including the bucket for resources without a parent.
pub fn resolve<'a>(
    resource: &Resource,
    category: Category,
    index: &ResourceIndex<'a>,
) -> Resolution<'a> {
    match category {
        Category::NetworkContainer => Resolution::Root,

        Category::NetworkSegment => match metadata::subnet_vpc_id(resource)
            .and_then(|vpc| index.find(vpc, Category::NetworkContainer))
        {
            Some(vpc) => Resolution::Contained(vpc),
            None => {
                tracing::debug!(
                    "Subnet {} has no matching VPC (vpcId={:?})",
                    resource.id,
                    metadata::subnet_vpc_id(resource)
                );
                Resolution::Orphan
            }
        },

        Category::Compute => match resolve_segment(resource, index) {
            Some(subnet) => Resolution::Contained(subnet),
            None => {
                tracing::debug!("Compute resource {} has no matching subnet", resource.id);
                Resolution::Orphan
            }
        },

        Category::Storage => {
            if let Some(subnet) = resolve_segment(resource, index) {
                return Resolution::Contained(subnet);
            }
            if let Some(instance) = resolve_attachment(resource, index) {
                return Resolution::Attached(instance);
            }
            if metadata::has_subnet_reference(resource)
                || !metadata::attached_instance_ids(resource).is_empty()
            {
                tracing::debug!(
                    "Storage resource {} references resources outside the snapshot",
                    resource.id
                );
                Resolution::Orphan
            } else {
                Resolution::Global
            }
        }

        Category::ManagedService => match resolve_segment(resource, index) {
            Some(subnet) => Resolution::Contained(subnet),
            None if metadata::has_subnet_reference(resource) => {
                tracing::debug!("Managed service {} has no matching subnet", resource.id);
                Resolution::Orphan
            }
            None => Resolution::Global,
        },

        Category::Global | Category::Unknown => Resolution::Global,
    }
}

/// Subnet parent via `subnetId`, then via the earliest snapshot subnet named by a group.
fn resolve_segment<'a>(resource: &Resource, index: &ResourceIndex<'a>) -> Option<&'a Resource> {
    metadata::instance_subnet_id(resource)
        .and_then(|id| index.find(id, Category::NetworkSegment))
        .or_else(|| index.first_of(&metadata::subnet_group_ids(resource), Category::NetworkSegment))
}

/// Instance a storage resource is attached to, first match in snapshot order.
pub fn resolve_attachment<'a>(
    resource: &Resource,
    index: &ResourceIndex<'a>,
) -> Option<&'a Resource> {
    index.first_of(&metadata::attached_instance_ids(resource), Category::Compute)
}
