// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tagging Policy
//!
//! Every object belonging to one logical network carries the same fixed tag
//! set plus exactly one per-object `Name` override. The base [`TagSet`] is
//! built once from the spec and shared read-only across all concurrent
//! creation calls; `with_name` returns a derived copy and never mutates the
//! original, so there is no cross-object tag aliasing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::spec::NetworkSpec;

/// Fixed tag keys applied to every provisioned object
pub mod keys {
    /// Marks the object as managed by this planner
    pub const RESOURCE: &str = "planton.cloud/resource";
    /// Owning organization
    pub const ORGANIZATION: &str = "planton.cloud/organization";
    /// Environment the network belongs to
    pub const ENVIRONMENT: &str = "planton.cloud/environment";
    /// Kind of the managed resource
    pub const RESOURCE_KIND: &str = "planton.cloud/resource-kind";
    /// Identifier of the managed resource
    pub const RESOURCE_ID: &str = "planton.cloud/resource-id";
    /// Per-object display name
    pub const NAME: &str = "Name";
}

/// Resource-kind tag value for networks produced by this planner
pub const RESOURCE_KIND_VPC: &str = "aws-vpc";

/// Immutable tag set
///
/// Backed by a `BTreeMap` so serialization and iteration order are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: BTreeMap<String, String>,
}

impl TagSet {
    /// Build the canonical fixed tag set for a network
    pub fn for_network(spec: &NetworkSpec) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert(keys::RESOURCE.to_string(), "true".to_string());
        tags.insert(keys::ORGANIZATION.to_string(), spec.org_id.clone());
        tags.insert(keys::ENVIRONMENT.to_string(), spec.env_id.clone());
        tags.insert(keys::RESOURCE_KIND.to_string(), RESOURCE_KIND_VPC.to_string());
        tags.insert(keys::RESOURCE_ID.to_string(), spec.resource_id.clone());
        Self { tags }
    }

    /// Derived copy with the `Name` key overridden
    ///
    /// The receiver is left untouched; each object gets its own copy.
    pub fn with_name(&self, name: impl Into<String>) -> TagSet {
        let mut tags = self.tags.clone();
        tags.insert(keys::NAME.to_string(), name.into());
        TagSet { tags }
    }

    /// Look up a tag value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// The `Name` override, if set
    pub fn name(&self) -> Option<&str> {
        self.get(keys::NAME)
    }

    /// Iterate tags in deterministic key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when no tags are present
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
