// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for CIDR Allocation
//!
//! Verifies the addressing invariants over the whole valid input range:
//! disjointness of all allocated blocks, determinism of allocation, and
//! injectivity of the third-octet formula.

use proptest::prelude::*;

use vpc_planner::allocator;
use vpc_planner::{AvailabilityZone, NetworkSpec, SubnetCidr, SubnetVisibility};

/// Generate a valid spec within the partition scheme's capacity
fn valid_spec() -> impl Strategy<Value = NetworkSpec> {
    (0usize..=10, 0u32..=10, 24u8..=28, any::<bool>()).prop_map(
        |(zone_count, subnets_per_zone, mask, nat)| NetworkSpec {
            resource_id: "vpc-prop".to_string(),
            resource_name: "prop-vpc".to_string(),
            org_id: "acme".to_string(),
            env_id: "test".to_string(),
            vpc_cidr: "10.0.0.0/16".to_string(),
            availability_zones: (0..zone_count)
                .map(|i| AvailabilityZone::new(format!("us-east-1{}", (b'a' + i as u8) as char)))
                .collect(),
            subnets_per_zone,
            subnet_mask: mask,
            dns_support_enabled: true,
            dns_hostnames_enabled: true,
            nat_gateway_enabled: nat,
        },
    )
}

/// All allocated blocks of both visibility classes, in stable order
fn all_cidrs(spec: &NetworkSpec) -> Vec<SubnetCidr> {
    let mut cidrs = Vec::new();
    for visibility in [SubnetVisibility::Public, SubnetVisibility::Private] {
        for zone in allocator::allocate(spec, visibility).expect("valid spec must allocate") {
            for (_, cidr) in zone.subnets {
                cidrs.push(cidr);
            }
        }
    }
    cidrs
}

proptest! {
    /// Property: allocated blocks are pairwise disjoint across the whole
    /// topology, public and private together.
    #[test]
    fn prop_cidrs_pairwise_disjoint(spec in valid_spec()) {
        let cidrs = all_cidrs(&spec);
        for (i, a) in cidrs.iter().enumerate() {
            for b in &cidrs[i + 1..] {
                prop_assert!(!a.overlaps(b), "{} overlaps {}", a, b);
            }
        }
    }

    /// Property: allocation is deterministic — two runs over the same spec
    /// produce identical output.
    #[test]
    fn prop_allocation_deterministic(spec in valid_spec()) {
        for visibility in [SubnetVisibility::Public, SubnetVisibility::Private] {
            let first = allocator::allocate(&spec, visibility).unwrap();
            let second = allocator::allocate(&spec, visibility).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    /// Property: no two distinct (zone, index, visibility) triples share a
    /// third octet within the capacity bounds.
    #[test]
    fn prop_third_octet_injective(spec in valid_spec()) {
        let cidrs = all_cidrs(&spec);
        let mut octets: Vec<u8> = cidrs.iter().map(SubnetCidr::third_octet).collect();
        let total = octets.len();
        octets.sort_unstable();
        octets.dedup();
        prop_assert_eq!(octets.len(), total, "third octet collision");
    }

    /// Property: expected subnet count is zones x subnets_per_zone x 2.
    #[test]
    fn prop_subnet_count(spec in valid_spec()) {
        let cidrs = all_cidrs(&spec);
        prop_assert_eq!(
            cidrs.len(),
            spec.availability_zones.len() * spec.subnets_per_zone as usize * 2
        );
    }

    /// Property: public octets stay below 100, private octets at or above.
    #[test]
    fn prop_visibility_octet_ranges(spec in valid_spec()) {
        for zone in allocator::allocate(&spec, SubnetVisibility::Public).unwrap() {
            for (_, cidr) in zone.subnets {
                prop_assert!(cidr.third_octet() < 100);
            }
        }
        for zone in allocator::allocate(&spec, SubnetVisibility::Private).unwrap() {
            for (_, cidr) in zone.subnets {
                prop_assert!(cidr.third_octet() >= 100);
            }
        }
    }
}
