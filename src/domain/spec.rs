// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarative Network Spec
//!
//! The immutable input contract for topology synthesis. A [`NetworkSpec`]
//! describes the desired network in full; everything else the planner
//! produces is derived deterministically from it.
//!
//! # Validation
//!
//! `validate` enforces the configuration invariants before any provisioning
//! call is issued:
//!
//! - the VPC CIDR parses as an IPv4 block
//! - the subnet mask fits the third-octet partition scheme (24..=28)
//! - at most 10 availability zones and 10 subnets per zone, so that the
//!   third-octet formula `z*10 + s` (public) / `100 + z*10 + s` (private)
//!   can never collide

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::cidr::SubnetCidr;
use crate::errors::{PlannerError, PlannerResult};

/// Maximum number of availability zones the partition scheme supports
pub const MAX_AVAILABILITY_ZONES: usize = 10;

/// Maximum number of subnets per availability zone
pub const MAX_SUBNETS_PER_ZONE: u32 = 10;

/// Smallest allowed subnet prefix (one full third-octet block)
pub const MIN_SUBNET_MASK: u8 = 24;

/// Largest allowed subnet prefix (provider minimum subnet size)
pub const MAX_SUBNET_MASK: u8 = 28;

/// An availability zone label
///
/// Opaque to the planner: it is only a key for subnet placement and a
/// component of derived names. Order of declaration in the spec is
/// authoritative; the planner never sorts or re-orders zones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityZone(String);

impl AvailabilityZone {
    /// Create a new zone label
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Get the zone label
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvailabilityZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AvailabilityZone {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

/// Declarative spec for one virtual network
///
/// Immutable after construction. All identifiers and addresses the planner
/// emits are a pure function of this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Unique resource identifier (tag value, not a provider id)
    pub resource_id: String,

    /// Resource name; used as the VPC name and as the name prefix for
    /// network-scoped objects
    pub resource_name: String,

    /// Owning organization identifier
    pub org_id: String,

    /// Environment identifier
    pub env_id: String,

    /// VPC CIDR block, e.g. `10.0.0.0/16`
    pub vpc_cidr: String,

    /// Availability zones, in declaration order
    pub availability_zones: Vec<AvailabilityZone>,

    /// Number of subnets per zone, per visibility class
    pub subnets_per_zone: u32,

    /// Prefix length for every subnet
    pub subnet_mask: u8,

    /// Enable DNS resolution inside the VPC
    #[serde(default = "default_true")]
    pub dns_support_enabled: bool,

    /// Enable DNS hostnames for instances
    #[serde(default = "default_true")]
    pub dns_hostnames_enabled: bool,

    /// Provision NAT egress for private subnets
    #[serde(default)]
    pub nat_gateway_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl NetworkSpec {
    /// Validate the configuration invariants
    ///
    /// Configuration errors are terminal and reported before any resource
    /// is touched.
    pub fn validate(&self) -> PlannerResult<()> {
        if self.resource_name.is_empty() {
            return Err(PlannerError::Configuration(
                "resource name must not be empty".to_string(),
            ));
        }

        SubnetCidr::new(&self.vpc_cidr)
            .map_err(|e| PlannerError::Configuration(format!("invalid vpc cidr: {}", e)))?;

        if self.subnet_mask < MIN_SUBNET_MASK || self.subnet_mask > MAX_SUBNET_MASK {
            return Err(PlannerError::Configuration(format!(
                "subnet mask /{} outside supported range /{}-/{}",
                self.subnet_mask, MIN_SUBNET_MASK, MAX_SUBNET_MASK
            )));
        }

        if self.availability_zones.len() > MAX_AVAILABILITY_ZONES {
            return Err(PlannerError::Configuration(format!(
                "{} availability zones exceeds the supported maximum of {}",
                self.availability_zones.len(),
                MAX_AVAILABILITY_ZONES
            )));
        }

        if self.subnets_per_zone > MAX_SUBNETS_PER_ZONE {
            return Err(PlannerError::Configuration(format!(
                "{} subnets per zone exceeds the supported maximum of {}",
                self.subnets_per_zone, MAX_SUBNETS_PER_ZONE
            )));
        }

        Ok(())
    }

    /// Total subnet count across both visibility classes
    pub fn total_subnet_count(&self) -> usize {
        self.availability_zones.len() * self.subnets_per_zone as usize * 2
    }
}
