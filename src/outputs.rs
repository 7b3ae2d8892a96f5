// Copyright (c) 2025 - Cowboy AI, Inc.
//! Output Binding
//!
//! Stable output-key schema consumed by downstream stack-output readers,
//! and the binder that maps a plan's realized identifiers back onto the
//! synthesized topology.
//!
//! The binder re-derives the topology from the spec — sound because
//! synthesis is pure and deterministic — and zips each subnet and gateway
//! name to its realized keys. A missing key is a state-mismatch error,
//! never a silent default; it terminates the output phase only and says
//! nothing about the provisioned infrastructure itself.

use serde::{Deserialize, Serialize};

use crate::domain::spec::NetworkSpec;
use crate::domain::subnet::SubnetName;
use crate::errors::{PlannerError, PlannerResult};
use crate::graph::executor::RealizedOutputs;
use crate::topology::TopologyModel;

/// Output key for the VPC identifier
pub const VPC_ID: &str = "vpc-id";

/// Output key for the internet gateway identifier
pub const INTERNET_GATEWAY_ID: &str = "internet-gateway-id";

/// Output key for a subnet's realized identifier
pub fn subnet_id_key(subnet: &SubnetName) -> String {
    format!("{}-id", subnet)
}

/// Output key for a subnet's CIDR block
pub fn subnet_cidr_key(subnet: &SubnetName) -> String {
    format!("{}-cidr", subnet)
}

/// Output key for the NAT gateway identifier serving a subnet
pub fn nat_gateway_id_key(subnet: impl std::fmt::Display) -> String {
    format!("{}-nat-gw-id", subnet)
}

/// Output key for a subnet's NAT gateway private address
pub fn nat_gateway_private_ip_key(subnet: impl std::fmt::Display) -> String {
    format!("{}-nat-gw-private-ip", subnet)
}

/// Output key for a subnet's NAT gateway public address
pub fn nat_gateway_public_ip_key(subnet: impl std::fmt::Display) -> String {
    format!("{}-nat-gw-public-ip", subnet)
}

/// Realized facts for one subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetOutputs {
    pub name: SubnetName,
    pub id: String,
    pub cidr: String,
}

/// Realized facts for one NAT gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatGatewayOutputs {
    pub subnet_name: SubnetName,
    pub id: String,
    pub private_ip: String,
    pub public_ip: String,
}

/// Stack outputs for one applied network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutputs {
    pub vpc_id: String,
    pub internet_gateway_id: String,
    pub public_subnets: Vec<SubnetOutputs>,
    pub private_subnets: Vec<SubnetOutputs>,
    pub nat_gateways: Vec<NatGatewayOutputs>,
}

/// Binds realized plan outputs to the stack-output schema
pub struct OutputBinder;

impl OutputBinder {
    /// Bind the realized outputs of an applied plan
    ///
    /// Re-synthesizes the topology from the spec and resolves every
    /// expected key. NAT keys are expected only when the spec enables NAT
    /// egress.
    pub fn bind(spec: &NetworkSpec, realized: &RealizedOutputs) -> PlannerResult<StackOutputs> {
        let model = TopologyModel::synthesize(spec)?;

        let vpc_id = require(realized, VPC_ID)?;
        let internet_gateway_id = require(realized, INTERNET_GATEWAY_ID)?;

        let mut public_subnets = Vec::with_capacity(model.public_subnets().len());
        for subnet in model.public_subnets() {
            public_subnets.push(SubnetOutputs {
                name: subnet.name.clone(),
                id: require(realized, &subnet_id_key(&subnet.name))?,
                cidr: require(realized, &subnet_cidr_key(&subnet.name))?,
            });
        }

        let mut private_subnets = Vec::with_capacity(model.private_subnets().len());
        let mut nat_gateways = Vec::new();
        for subnet in model.private_subnets() {
            private_subnets.push(SubnetOutputs {
                name: subnet.name.clone(),
                id: require(realized, &subnet_id_key(&subnet.name))?,
                cidr: require(realized, &subnet_cidr_key(&subnet.name))?,
            });

            if model.nat_enabled() {
                nat_gateways.push(NatGatewayOutputs {
                    subnet_name: subnet.name.clone(),
                    id: require(realized, &nat_gateway_id_key(&subnet.name))?,
                    private_ip: require(realized, &nat_gateway_private_ip_key(&subnet.name))?,
                    public_ip: require(realized, &nat_gateway_public_ip_key(&subnet.name))?,
                });
            }
        }

        Ok(StackOutputs {
            vpc_id,
            internet_gateway_id,
            public_subnets,
            private_subnets,
            nat_gateways,
        })
    }
}

/// Resolve an output key, surfacing absence as a state mismatch
fn require(realized: &RealizedOutputs, key: &str) -> PlannerResult<String> {
    realized
        .output(key)
        .map(str::to_string)
        .ok_or_else(|| PlannerError::StateMismatch(format!("expected output key {} is missing", key)))
}
