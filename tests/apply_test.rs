// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for the full plan-apply-bind flow
//!
//! These tests run the executor against the in-memory provider and verify:
//! 1. Dependency ordering of the issued creation calls
//! 2. Object counts per kind for NAT-enabled, NAT-disabled, and empty specs
//! 3. Fail-fast abort on provider errors
//! 4. Output binding from realized identifiers

mod fixtures;

use pretty_assertions::assert_eq;

use vpc_planner::adapters::memory::{InMemoryProvider, RecordedCall};
use vpc_planner::graph::PlanExecutor;
use vpc_planner::outputs::{self, OutputBinder};
use vpc_planner::{PlannerError, ProviderError, ResourceKind, TopologyModel};

async fn apply(
    spec: &vpc_planner::NetworkSpec,
    provider: &InMemoryProvider,
) -> vpc_planner::RealizedOutputs {
    let model = TopologyModel::synthesize(spec).expect("synthesis failed");
    PlanExecutor::new(provider)
        .apply(&model)
        .await
        .expect("apply failed")
}

/// Position of the first call of a kind in the recorded sequence
fn first_position(calls: &[RecordedCall], kind: ResourceKind) -> usize {
    calls
        .iter()
        .position(|c| c.kind == kind)
        .unwrap_or_else(|| panic!("no {} call recorded", kind))
}

#[tokio::test]
async fn test_apply_issues_calls_in_dependency_order() {
    let provider = InMemoryProvider::new();
    apply(&fixtures::two_zone_spec(), &provider).await;

    let calls = provider.calls();
    assert_eq!(calls[0].kind, ResourceKind::Vpc);
    assert_eq!(calls[1].kind, ResourceKind::InternetGateway);
    assert_eq!(calls[2].kind, ResourceKind::RouteTable);
    assert_eq!(calls[2].name, "fixture-vpc-public");

    // All subnets are requested before any association or NAT object
    let last_subnet = calls
        .iter()
        .rposition(|c| c.kind == ResourceKind::Subnet)
        .unwrap();
    let first_assoc = first_position(&calls, ResourceKind::RouteTableAssociation);
    let first_eip = first_position(&calls, ResourceKind::ElasticAddress);
    assert!(last_subnet < first_assoc);
    assert!(last_subnet < first_eip);

    // Intra-triple ordering per private subnet: eip → nat → route table →
    // association
    for subnet in ["private-subnet-us-east-1a-0", "private-subnet-us-east-1b-0"] {
        let pos = |suffix: &str| {
            calls
                .iter()
                .position(|c| c.name == format!("{}-{}", subnet, suffix))
                .unwrap_or_else(|| panic!("missing {}-{}", subnet, suffix))
        };
        assert!(pos("eip") < pos("nat"));
        assert!(pos("nat") < pos("rtt"));
        assert!(pos("rtt") < pos("rtt-assoc"));
    }
}

#[tokio::test]
async fn test_apply_object_counts_with_nat() {
    let provider = InMemoryProvider::new();
    apply(&fixtures::two_zone_spec(), &provider).await;

    assert_eq!(provider.call_count(ResourceKind::Vpc), 1);
    assert_eq!(provider.call_count(ResourceKind::InternetGateway), 1);
    assert_eq!(provider.call_count(ResourceKind::Subnet), 4);
    // public route table + one private route table per private subnet
    assert_eq!(provider.call_count(ResourceKind::RouteTable), 3);
    // one association per public subnet + one per NAT triple
    assert_eq!(provider.call_count(ResourceKind::RouteTableAssociation), 4);
    assert_eq!(provider.call_count(ResourceKind::ElasticAddress), 2);
    assert_eq!(provider.call_count(ResourceKind::NatGateway), 2);
}

#[tokio::test]
async fn test_apply_without_nat_creates_no_egress_objects() {
    let provider = InMemoryProvider::new();
    let realized = apply(&fixtures::two_zone_spec_without_nat(), &provider).await;

    assert_eq!(provider.call_count(ResourceKind::ElasticAddress), 0);
    assert_eq!(provider.call_count(ResourceKind::NatGateway), 0);
    assert_eq!(provider.call_count(ResourceKind::RouteTable), 1);
    assert_eq!(provider.call_count(ResourceKind::RouteTableAssociation), 2);

    assert!(!realized
        .outputs()
        .keys()
        .any(|k| k.contains("-nat-gw-")));
}

#[tokio::test]
async fn test_apply_with_zero_subnets_still_succeeds() {
    let provider = InMemoryProvider::new();
    let realized = apply(&fixtures::empty_subnet_spec(), &provider).await;

    assert_eq!(provider.call_count(ResourceKind::Vpc), 1);
    assert_eq!(provider.call_count(ResourceKind::InternetGateway), 1);
    assert_eq!(provider.call_count(ResourceKind::RouteTable), 1);
    assert_eq!(provider.call_count(ResourceKind::Subnet), 0);
    assert_eq!(provider.call_count(ResourceKind::RouteTableAssociation), 0);

    assert!(realized.output(outputs::VPC_ID).is_some());
    assert!(realized.output(outputs::INTERNET_GATEWAY_ID).is_some());

    // Binding an empty topology works too
    let outputs = OutputBinder::bind(&fixtures::empty_subnet_spec(), &realized).unwrap();
    assert!(outputs.public_subnets.is_empty());
    assert!(outputs.private_subnets.is_empty());
    assert!(outputs.nat_gateways.is_empty());
}

#[tokio::test]
async fn test_fail_fast_on_subnet_creation() {
    let provider = InMemoryProvider::failing_on(
        ResourceKind::Subnet,
        ProviderError::QuotaExceeded("subnets per vpc".to_string()),
    );
    let model = TopologyModel::synthesize(&fixtures::two_zone_spec()).unwrap();

    let err = PlanExecutor::new(&provider)
        .apply(&model)
        .await
        .unwrap_err();

    match err {
        PlannerError::Provisioning { context, source } => {
            assert!(context.contains("failed to create subnet"));
            assert!(matches!(source, ProviderError::QuotaExceeded(_)));
        }
        other => panic!("expected provisioning error, got {:?}", other),
    }

    // Nothing past the subnet phase was issued
    assert_eq!(provider.call_count(ResourceKind::RouteTableAssociation), 0);
    assert_eq!(provider.call_count(ResourceKind::ElasticAddress), 0);
    assert_eq!(provider.call_count(ResourceKind::NatGateway), 0);
}

#[tokio::test]
async fn test_fail_fast_on_nat_gateway() {
    let provider = InMemoryProvider::failing_on(
        ResourceKind::NatGateway,
        ProviderError::PermissionDenied("ec2:CreateNatGateway".to_string()),
    );
    let model = TopologyModel::synthesize(&fixtures::two_zone_spec()).unwrap();

    let err = PlanExecutor::new(&provider)
        .apply(&model)
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::Provisioning { .. }));

    // The triples never reached their route tables: the only route table
    // is the public one.
    assert_eq!(provider.call_count(ResourceKind::RouteTable), 1);
    assert_eq!(provider.call_count(ResourceKind::RouteTableAssociation), 2);
}

#[tokio::test]
async fn test_outputs_bind_realized_identifiers() {
    let provider = InMemoryProvider::new();
    let spec = fixtures::two_zone_spec();
    let realized = apply(&spec, &provider).await;

    let outputs = OutputBinder::bind(&spec, &realized).unwrap();

    assert!(outputs.vpc_id.starts_with("vpc-"));
    assert!(outputs.internet_gateway_id.starts_with("igw-"));
    assert_eq!(outputs.public_subnets.len(), 2);
    assert_eq!(outputs.private_subnets.len(), 2);
    assert_eq!(outputs.nat_gateways.len(), 2);

    assert_eq!(outputs.public_subnets[0].cidr, "10.0.0.0/24");
    assert_eq!(outputs.private_subnets[0].cidr, "10.0.100.0/24");
    assert_eq!(outputs.private_subnets[1].cidr, "10.0.110.0/24");

    // NAT facts are keyed by the subnet's realized Name tag
    let nat = &outputs.nat_gateways[0];
    assert_eq!(nat.subnet_name.as_str(), "private-subnet-us-east-1a-0");
    assert!(nat.id.starts_with("nat-"));
    assert_eq!(
        realized
            .output(&format!("{}-nat-gw-id", nat.subnet_name))
            .unwrap(),
        nat.id
    );
    assert!(!nat.public_ip.is_empty());
    assert!(!nat.private_ip.is_empty());
}

#[tokio::test]
async fn test_missing_output_key_is_state_mismatch() {
    let provider = InMemoryProvider::new();
    // Apply without NAT, then bind against a spec that expects NAT keys:
    // the realized state and the expected plan diverge.
    let realized = apply(&fixtures::two_zone_spec_without_nat(), &provider).await;

    let err = OutputBinder::bind(&fixtures::two_zone_spec(), &realized).unwrap_err();
    assert!(matches!(err, PlannerError::StateMismatch(_)));
}
