// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Dependency Graph
//!
//! The ordered plan of cloud-object creation. Every node carries the
//! logical names of the parents whose realized identifiers it needs as
//! input attributes; an edge means "child consumes parent's identifier",
//! not merely "create after".
//!
//! # Ordering
//!
//! ```text
//! vpc
//!  ├── internet gateway
//!  │     └── public route table (default route → igw)
//!  │           └── public associations ──┐
//!  ├── public subnets ───────────────────┘
//!  └── private subnets
//!        └── [nat enabled] eip → nat gateway → private route table → association
//! ```
//!
//! Same-kind siblings with no edge between them (all subnets, distinct NAT
//! triples) carry no ordering; the executor runs them concurrently.
//!
//! # Naming discipline
//!
//! Every node name is reproducible from (network name, kind, subnet name),
//! so re-planning the same spec yields the identical logical object set.
//! Dependent objects are always named from their subnet's derived name,
//! never from a positional index.

pub mod executor;

pub use executor::{PlanExecutor, RealizedOutputs};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::topology::TopologyModel;

/// Kind of a planned cloud object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Vpc,
    InternetGateway,
    RouteTable,
    Subnet,
    RouteTableAssociation,
    ElasticAddress,
    NatGateway,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ResourceKind::Vpc => "vpc",
            ResourceKind::InternetGateway => "internet-gateway",
            ResourceKind::RouteTable => "route-table",
            ResourceKind::Subnet => "subnet",
            ResourceKind::RouteTableAssociation => "route-table-association",
            ResourceKind::ElasticAddress => "elastic-address",
            ResourceKind::NatGateway => "nat-gateway",
        };
        write!(f, "{}", kind)
    }
}

/// One planned cloud object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Object kind
    pub kind: ResourceKind,

    /// Reproducible logical name, unique within the plan
    pub name: String,

    /// Logical names of the parents whose realized identifiers this object
    /// consumes; all must be realized before this object is requested
    pub depends_on: Vec<String>,
}

/// Logical name derivation for planned objects
///
/// Shared by plan construction and the executor so names stay
/// single-sourced.
pub mod names {
    use crate::domain::subnet::SubnetName;

    /// VPC node name (the network name itself)
    pub fn vpc(network: &str) -> String {
        network.to_string()
    }

    /// Internet gateway node name
    pub fn internet_gateway(network: &str) -> String {
        format!("{}-igw", network)
    }

    /// Public route table node name
    pub fn public_route_table(network: &str) -> String {
        format!("{}-public", network)
    }

    /// Route table serving one private subnet
    pub fn private_route_table(subnet: &SubnetName) -> String {
        format!("{}-rtt", subnet)
    }

    /// Route-table association for a subnet (public or private)
    pub fn route_table_association(subnet: &SubnetName) -> String {
        format!("{}-rtt-assoc", subnet)
    }

    /// Elastic address backing a private subnet's NAT gateway
    pub fn elastic_address(subnet: &SubnetName) -> String {
        format!("{}-eip", subnet)
    }

    /// NAT gateway serving one private subnet
    pub fn nat_gateway(subnet: &SubnetName) -> String {
        format!("{}-nat", subnet)
    }
}

/// The dependency-ordered creation plan for one topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGraph {
    nodes: Vec<ResourceNode>,
}

impl ResourceGraph {
    /// Build the plan for a synthesized topology
    ///
    /// Node order is a valid topological order: every dependency appears
    /// before its dependents.
    pub fn plan(model: &TopologyModel) -> Self {
        let network = &model.spec().resource_name;
        let vpc = names::vpc(network);
        let igw = names::internet_gateway(network);
        let public_rtt = names::public_route_table(network);

        let mut nodes = vec![
            ResourceNode {
                kind: ResourceKind::Vpc,
                name: vpc.clone(),
                depends_on: vec![],
            },
            ResourceNode {
                kind: ResourceKind::InternetGateway,
                name: igw.clone(),
                depends_on: vec![vpc.clone()],
            },
            ResourceNode {
                kind: ResourceKind::RouteTable,
                name: public_rtt.clone(),
                depends_on: vec![vpc.clone(), igw.clone()],
            },
        ];

        // All subnets depend on the VPC only; public and private subnets
        // are independent of each other.
        for subnet in model.all_subnets() {
            nodes.push(ResourceNode {
                kind: ResourceKind::Subnet,
                name: subnet.name.to_string(),
                depends_on: vec![vpc.clone()],
            });
        }

        for subnet in model.public_subnets() {
            nodes.push(ResourceNode {
                kind: ResourceKind::RouteTableAssociation,
                name: names::route_table_association(&subnet.name),
                depends_on: vec![public_rtt.clone(), subnet.name.to_string()],
            });
        }

        if model.nat_enabled() {
            for subnet in model.private_subnets() {
                let subnet_name = subnet.name.to_string();
                let eip = names::elastic_address(&subnet.name);
                let nat = names::nat_gateway(&subnet.name);
                let rtt = names::private_route_table(&subnet.name);

                nodes.push(ResourceNode {
                    kind: ResourceKind::ElasticAddress,
                    name: eip.clone(),
                    // The address's Name tag is derived from the subnet's
                    // realized identifier, so the subnet is a data parent.
                    depends_on: vec![subnet_name.clone()],
                });
                nodes.push(ResourceNode {
                    kind: ResourceKind::NatGateway,
                    name: nat.clone(),
                    depends_on: vec![subnet_name.clone(), eip],
                });
                nodes.push(ResourceNode {
                    kind: ResourceKind::RouteTable,
                    name: rtt.clone(),
                    depends_on: vec![vpc.clone(), nat],
                });
                nodes.push(ResourceNode {
                    kind: ResourceKind::RouteTableAssociation,
                    name: names::route_table_association(&subnet.name),
                    depends_on: vec![rtt, subnet_name],
                });
            }
        }

        Self { nodes }
    }

    /// All nodes in topological order
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    /// Nodes of one kind, in plan order
    pub fn nodes_of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Verify that every dependency precedes its dependent
    ///
    /// Holds by construction; exposed for tests and plan inspection.
    pub fn is_topologically_ordered(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        for node in &self.nodes {
            if !node.depends_on.iter().all(|dep| seen.contains(dep.as_str())) {
                return false;
            }
            seen.insert(node.name.as_str());
        }
        true
    }
}
