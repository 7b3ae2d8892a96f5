// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subnet Value Objects
//!
//! A [`Subnet`] is one allocated address block placed in one availability
//! zone, with a derived name unique across the whole topology. Names follow
//! `{visibility}-subnet-{zone}-{index}`, so public and private names can
//! never collide.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::cidr::SubnetCidr;
use crate::domain::spec::AvailabilityZone;

/// Visibility class of a subnet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetVisibility {
    /// Routed to the internet gateway
    Public,
    /// Egress only through a NAT gateway
    Private,
}

impl SubnetVisibility {
    /// Name prefix for this visibility class
    pub fn prefix(&self) -> &'static str {
        match self {
            SubnetVisibility::Public => "public",
            SubnetVisibility::Private => "private",
        }
    }
}

impl fmt::Display for SubnetVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Derived subnet name, unique within the topology
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubnetName(String);

impl SubnetName {
    /// Derive the canonical name for a (visibility, zone, index) triple
    pub fn derive(visibility: SubnetVisibility, zone: &AvailabilityZone, index: u32) -> Self {
        Self(format!("{}-subnet-{}-{}", visibility.prefix(), zone, index))
    }

    /// Get the name string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubnetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One synthesized subnet
///
/// Created once during topology synthesis and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    /// Derived name, unique across public and private subnets
    pub name: SubnetName,

    /// Allocated address block, disjoint from every other subnet
    pub cidr: SubnetCidr,

    /// Zone the subnet is placed in
    pub zone: AvailabilityZone,

    /// Visibility class
    pub visibility: SubnetVisibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_derivation() {
        let zone = AvailabilityZone::new("us-east-1a");
        let name = SubnetName::derive(SubnetVisibility::Private, &zone, 0);
        assert_eq!(name.as_str(), "private-subnet-us-east-1a-0");

        let name = SubnetName::derive(SubnetVisibility::Public, &zone, 3);
        assert_eq!(name.as_str(), "public-subnet-us-east-1a-3");
    }

    #[test]
    fn test_visibility_prefixes_never_collide() {
        let zone = AvailabilityZone::new("us-east-1a");
        let public = SubnetName::derive(SubnetVisibility::Public, &zone, 0);
        let private = SubnetName::derive(SubnetVisibility::Private, &zone, 0);
        assert_ne!(public, private);
    }
}
