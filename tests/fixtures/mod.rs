// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for vpc-planner
//!
//! Deterministic spec builders shared by the integration suites. Tests use
//! these fixtures instead of constructing specs inline, so the shape of a
//! "typical" network lives in one place.

use vpc_planner::{AvailabilityZone, NetworkSpec};

/// Two zones, one subnet per zone, NAT enabled — the worked example from
/// the planner's addressing scheme.
pub fn two_zone_spec() -> NetworkSpec {
    NetworkSpec {
        resource_id: "vpc-fixture-01".to_string(),
        resource_name: "fixture-vpc".to_string(),
        org_id: "acme".to_string(),
        env_id: "test".to_string(),
        vpc_cidr: "10.0.0.0/16".to_string(),
        availability_zones: vec![
            AvailabilityZone::new("us-east-1a"),
            AvailabilityZone::new("us-east-1b"),
        ],
        subnets_per_zone: 1,
        subnet_mask: 24,
        dns_support_enabled: true,
        dns_hostnames_enabled: true,
        nat_gateway_enabled: true,
    }
}

/// Same shape with NAT egress disabled
pub fn two_zone_spec_without_nat() -> NetworkSpec {
    NetworkSpec {
        nat_gateway_enabled: false,
        ..two_zone_spec()
    }
}

/// A zone list but zero subnets per zone
pub fn empty_subnet_spec() -> NetworkSpec {
    NetworkSpec {
        subnets_per_zone: 0,
        ..two_zone_spec()
    }
}
