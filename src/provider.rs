// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning Substrate Seam
//!
//! This module defines the asynchronous interface to the cloud substrate
//! that actually creates remote objects. The planner only talks to this
//! trait; real SDK-backed implementations live outside the crate, and a
//! deterministic in-memory implementation for dry-runs and tests lives in
//! [`crate::adapters::memory`].
//!
//! # Contract
//!
//! Every operation takes a desired-state struct carrying the object's
//! attributes plus the already-realized identifiers of its parents, and
//! resolves to a [`RealizedResource`]: the provider-assigned identifier and
//! attribute map. No call may be issued before all parent identifiers in
//! its request are realized; the executor enforces that ordering by
//! awaiting the parent futures first.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::domain::tags::{keys, TagSet};

/// Errors surfaced by the provisioning substrate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The creation request failed (network, API error)
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Provider-side quota exhausted
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Credentials lack permission for the operation
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A realized resource is missing an expected attribute
    #[error("missing attribute {0}")]
    MissingAttribute(String),
}

/// Provider-assigned identifier for a realized cloud object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wrap a provider-assigned identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-known attribute names on realized resources
pub mod attrs {
    /// NAT gateway public address
    pub const PUBLIC_IP: &str = "public-ip";
    /// NAT gateway private address
    pub const PRIVATE_IP: &str = "private-ip";
    /// Timestamp the provider realized the resource at
    pub const REALIZED_AT: &str = "realized-at";
    /// Prefix under which resolved tags appear in the attribute map
    pub const TAG_PREFIX: &str = "tag:";
}

/// A realized cloud object: identifier plus provider-assigned attributes
///
/// Resolved tags appear in the attribute map under `tag:{key}` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizedResource {
    /// Provider-assigned identifier
    pub id: ResourceId,

    /// Provider-assigned attributes (addresses, resolved tags, timestamps)
    pub attributes: BTreeMap<String, String>,
}

impl RealizedResource {
    /// Look up a provider attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Look up a provider attribute, failing if absent
    pub fn require_attribute(&self, name: &str) -> Result<&str, ProviderError> {
        self.attribute(name)
            .ok_or_else(|| ProviderError::MissingAttribute(name.to_string()))
    }

    /// Read a resolved tag value from the attribute map
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.attribute(&format!("{}{}", attrs::TAG_PREFIX, key))
    }

    /// Read the resolved `Name` tag, failing if absent
    pub fn require_name_tag(&self) -> Result<&str, ProviderError> {
        self.tag(keys::NAME)
            .ok_or_else(|| ProviderError::MissingAttribute(format!("{}Name", attrs::TAG_PREFIX)))
    }
}

/// Desired state for a VPC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcRequest {
    pub name: String,
    pub cidr_block: String,
    pub enable_dns_support: bool,
    pub enable_dns_hostnames: bool,
    pub tags: TagSet,
}

/// Desired state for an internet gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternetGatewayRequest {
    pub name: String,
    pub vpc_id: ResourceId,
    pub tags: TagSet,
}

/// Target of a route rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteTarget {
    /// Route through an internet gateway
    InternetGateway(ResourceId),
    /// Route through a NAT gateway
    NatGateway(ResourceId),
}

/// One route entry in a route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Destination CIDR, e.g. `0.0.0.0/0`
    pub destination: String,
    /// Where matching traffic goes
    pub target: RouteTarget,
}

/// Destination covering all addresses
pub const ALLOW_ALL_CIDR: &str = "0.0.0.0/0";

/// Desired state for a route table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTableRequest {
    pub name: String,
    pub vpc_id: ResourceId,
    pub routes: Vec<RouteRule>,
    pub tags: TagSet,
}

/// Desired state for a subnet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetRequest {
    pub name: String,
    pub vpc_id: ResourceId,
    pub cidr_block: String,
    pub availability_zone: String,
    pub tags: TagSet,
}

/// Desired state for a route-table association
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTableAssociationRequest {
    pub name: String,
    pub route_table_id: ResourceId,
    pub subnet_id: ResourceId,
}

/// Desired state for an elastic address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticAddressRequest {
    pub name: String,
    pub tags: TagSet,
}

/// Desired state for a NAT gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NatGatewayRequest {
    pub name: String,
    pub subnet_id: ResourceId,
    pub allocation_id: ResourceId,
    pub tags: TagSet,
}

/// Asynchronous provisioning substrate
///
/// Implementations create remote objects and resolve each call to the
/// object's identifier and attributes. Calls for independent objects may
/// run concurrently; the caller sequences dependent calls by awaiting
/// parent results first.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Create a VPC
    async fn create_vpc(&self, request: VpcRequest) -> Result<RealizedResource, ProviderError>;

    /// Create an internet gateway attached to a VPC
    async fn create_internet_gateway(
        &self,
        request: InternetGatewayRequest,
    ) -> Result<RealizedResource, ProviderError>;

    /// Create a route table with its route rules
    async fn create_route_table(
        &self,
        request: RouteTableRequest,
    ) -> Result<RealizedResource, ProviderError>;

    /// Create a subnet inside a VPC
    async fn create_subnet(
        &self,
        request: SubnetRequest,
    ) -> Result<RealizedResource, ProviderError>;

    /// Bind a subnet to a route table
    async fn create_route_table_association(
        &self,
        request: RouteTableAssociationRequest,
    ) -> Result<RealizedResource, ProviderError>;

    /// Allocate an elastic address
    async fn create_elastic_address(
        &self,
        request: ElasticAddressRequest,
    ) -> Result<RealizedResource, ProviderError>;

    /// Create a NAT gateway bound to a subnet and elastic address
    async fn create_nat_gateway(
        &self,
        request: NatGatewayRequest,
    ) -> Result<RealizedResource, ProviderError>;
}
