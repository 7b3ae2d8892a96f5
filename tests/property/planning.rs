// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Plan Construction
//!
//! Verifies the structural invariants of the resource graph over all valid
//! specs: topological ordering, reproducibility, and the per-kind count
//! contracts.

use proptest::prelude::*;

use vpc_planner::{AvailabilityZone, NetworkSpec, ResourceGraph, ResourceKind, TopologyModel};

fn valid_spec() -> impl Strategy<Value = NetworkSpec> {
    (1usize..=6, 0u32..=4, any::<bool>()).prop_map(|(zone_count, subnets_per_zone, nat)| {
        NetworkSpec {
            resource_id: "vpc-prop".to_string(),
            resource_name: "prop-vpc".to_string(),
            org_id: "acme".to_string(),
            env_id: "test".to_string(),
            vpc_cidr: "10.0.0.0/16".to_string(),
            availability_zones: (0..zone_count)
                .map(|i| AvailabilityZone::new(format!("eu-west-1{}", (b'a' + i as u8) as char)))
                .collect(),
            subnets_per_zone,
            subnet_mask: 24,
            dns_support_enabled: true,
            dns_hostnames_enabled: true,
            nat_gateway_enabled: nat,
        }
    })
}

proptest! {
    /// Property: every dependency precedes its dependent in plan order.
    #[test]
    fn prop_plan_topologically_ordered(spec in valid_spec()) {
        let model = TopologyModel::synthesize(&spec).unwrap();
        let graph = ResourceGraph::plan(&model);
        prop_assert!(graph.is_topologically_ordered());
    }

    /// Property: node names are unique within a plan.
    #[test]
    fn prop_node_names_unique(spec in valid_spec()) {
        let model = TopologyModel::synthesize(&spec).unwrap();
        let graph = ResourceGraph::plan(&model);
        let mut names: Vec<&str> = graph.nodes().iter().map(|n| n.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }

    /// Property: association and NAT counts follow the subnet counts.
    /// One association per public subnet, plus one per private subnet iff
    /// NAT egress is enabled; one NAT triple per private subnet iff
    /// enabled, else zero.
    #[test]
    fn prop_plan_counts(spec in valid_spec()) {
        let model = TopologyModel::synthesize(&spec).unwrap();
        let graph = ResourceGraph::plan(&model);

        let public = model.public_subnets().len();
        let private = model.private_subnets().len();
        let nat = model.nat_enabled();

        let expected_assocs = public + if nat { private } else { 0 };
        prop_assert_eq!(
            graph.nodes_of_kind(ResourceKind::RouteTableAssociation).count(),
            expected_assocs
        );

        let expected_nat = if nat { private } else { 0 };
        prop_assert_eq!(graph.nodes_of_kind(ResourceKind::NatGateway).count(), expected_nat);
        prop_assert_eq!(graph.nodes_of_kind(ResourceKind::ElasticAddress).count(), expected_nat);
        prop_assert_eq!(
            graph.nodes_of_kind(ResourceKind::RouteTable).count(),
            1 + expected_nat
        );
        prop_assert_eq!(graph.nodes_of_kind(ResourceKind::Subnet).count(), public + private);
    }

    /// Property: planning is reproducible — the same spec yields the
    /// identical node set on every run.
    #[test]
    fn prop_replanning_identical(spec in valid_spec()) {
        let model = TopologyModel::synthesize(&spec).unwrap();
        prop_assert_eq!(ResourceGraph::plan(&model), ResourceGraph::plan(&model));
    }
}
