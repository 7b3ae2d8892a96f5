// Copyright (c) 2025 - Cowboy AI, Inc.
//! Plan Executor
//!
//! Executes a topology's creation plan against a [`CloudProvider`] in
//! dependency order. Independent nodes run concurrently as joined futures;
//! dependent nodes are sequenced by awaiting their parents' results, never
//! by blocking a thread.
//!
//! # Protocol
//!
//! ```text
//! vpc ─► internet gateway ─► public route table
//!                                   │
//!   all subnets (concurrent) ◄──────┘
//!        │                  public associations (concurrent)
//!        └─ [nat enabled] private triples (concurrent)
//! ```
//!
//! Fail-fast: the first provider error aborts the remainder of the plan,
//! wrapped with the failing operation's context. Nothing is rolled back;
//! partially realized objects are substrate-tracked state for the next
//! reconciliation.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::domain::subnet::{Subnet, SubnetVisibility};
use crate::errors::{PlannerError, PlannerResult};
use crate::graph::{names, ResourceGraph};
use crate::nat;
use crate::outputs;
use crate::provider::{
    CloudProvider, InternetGatewayRequest, RealizedResource, ResourceId,
    RouteRule, RouteTableAssociationRequest, RouteTableRequest, RouteTarget, SubnetRequest,
    VpcRequest, ALLOW_ALL_CIDR,
};
use crate::topology::TopologyModel;

/// Realized identifiers and output facts of one applied plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizedOutputs {
    outputs: BTreeMap<String, String>,
    resources: BTreeMap<String, ResourceId>,
}

impl RealizedOutputs {
    /// Record an output fact
    pub fn insert_output(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.outputs.insert(key.into(), value.into());
    }

    /// Record a realized identifier under its logical node name
    pub fn insert_resource(&mut self, name: impl Into<String>, id: ResourceId) {
        self.resources.insert(name.into(), id);
    }

    /// Look up an output fact
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs.get(key).map(String::as_str)
    }

    /// All output facts, key-ordered
    pub fn outputs(&self) -> &BTreeMap<String, String> {
        &self.outputs
    }

    /// Realized identifier of a logical node
    pub fn resource(&self, name: &str) -> Option<&ResourceId> {
        self.resources.get(name)
    }

    /// All realized identifiers, name-ordered
    pub fn resources(&self) -> &BTreeMap<String, ResourceId> {
        &self.resources
    }
}

/// Executes topology plans against a provisioning substrate
pub struct PlanExecutor<'a, P: CloudProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: CloudProvider + ?Sized> PlanExecutor<'a, P> {
    /// Create an executor over a provider
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Apply the topology's plan in dependency order
    pub async fn apply(&self, model: &TopologyModel) -> PlannerResult<RealizedOutputs> {
        let graph = ResourceGraph::plan(model);
        info!(
            network = %model.spec().resource_name,
            nodes = graph.nodes().len(),
            "applying topology plan"
        );

        let spec = model.spec();
        let base_tags = model.tags();
        let mut realized = RealizedOutputs::default();

        // Root: the VPC itself.
        let vpc_name = names::vpc(&spec.resource_name);
        let vpc = self
            .provider
            .create_vpc(VpcRequest {
                name: vpc_name.clone(),
                cidr_block: spec.vpc_cidr.clone(),
                enable_dns_support: spec.dns_support_enabled,
                enable_dns_hostnames: spec.dns_hostnames_enabled,
                tags: base_tags.with_name(&vpc_name),
            })
            .await
            .map_err(|e| PlannerError::provisioning("failed to create vpc", e))?;
        info!(vpc = %vpc.id, "vpc realized");
        realized.insert_output(outputs::VPC_ID, vpc.id.as_str());
        realized.insert_resource(vpc_name, vpc.id.clone());

        // Internet gateway for public egress.
        let igw_name = names::internet_gateway(&spec.resource_name);
        let igw = self
            .provider
            .create_internet_gateway(InternetGatewayRequest {
                name: igw_name.clone(),
                vpc_id: vpc.id.clone(),
                tags: base_tags.with_name(&spec.resource_name),
            })
            .await
            .map_err(|e| PlannerError::provisioning("failed to create internet-gateway", e))?;
        info!(internet_gateway = %igw.id, "internet gateway realized");
        realized.insert_output(outputs::INTERNET_GATEWAY_ID, igw.id.as_str());
        realized.insert_resource(igw_name, igw.id.clone());

        // Public route table with the default route to the gateway.
        let public_rtt_name = names::public_route_table(&spec.resource_name);
        let public_rtt = self
            .provider
            .create_route_table(RouteTableRequest {
                name: public_rtt_name.clone(),
                vpc_id: vpc.id.clone(),
                routes: vec![RouteRule {
                    destination: ALLOW_ALL_CIDR.to_string(),
                    target: RouteTarget::InternetGateway(igw.id.clone()),
                }],
                tags: base_tags.with_name(format!("{}-public", spec.resource_name)),
            })
            .await
            .map_err(|e| {
                PlannerError::provisioning("failed to create route-table for public internet access", e)
            })?;
        realized.insert_resource(public_rtt_name, public_rtt.id.clone());

        // All subnets depend only on the VPC id; create them concurrently.
        let subnet_futures = model.all_subnets().map(|subnet| {
            let request = SubnetRequest {
                name: subnet.name.to_string(),
                vpc_id: vpc.id.clone(),
                cidr_block: subnet.cidr.to_string(),
                availability_zone: subnet.zone.to_string(),
                tags: base_tags.with_name(subnet.name.as_str()),
            };
            async move {
                let resource = self.provider.create_subnet(request).await.map_err(|e| {
                    PlannerError::provisioning(
                        format!("failed to create subnet {}", subnet.name),
                        e,
                    )
                })?;
                debug!(subnet = %subnet.name, id = %resource.id, "subnet realized");
                Ok::<_, PlannerError>((subnet, resource))
            }
        });
        let realized_subnets: Vec<(&Subnet, RealizedResource)> =
            try_join_all(subnet_futures).await?;

        for (subnet, resource) in &realized_subnets {
            realized.insert_output(outputs::subnet_id_key(&subnet.name), resource.id.as_str());
            realized.insert_output(outputs::subnet_cidr_key(&subnet.name), subnet.cidr.as_str());
            realized.insert_resource(subnet.name.to_string(), resource.id.clone());
        }

        // Bind every public subnet to the public route table. Associations
        // are independent of each other.
        let association_futures = realized_subnets
            .iter()
            .filter(|(subnet, _)| subnet.visibility == SubnetVisibility::Public)
            .map(|(subnet, resource)| {
                let name = names::route_table_association(&subnet.name);
                let request = RouteTableAssociationRequest {
                    name: name.clone(),
                    route_table_id: public_rtt.id.clone(),
                    subnet_id: resource.id.clone(),
                };
                async move {
                    let assoc = self
                        .provider
                        .create_route_table_association(request)
                        .await
                        .map_err(|e| {
                            PlannerError::provisioning(
                                format!(
                                    "error associating route table with public subnet {}",
                                    subnet.name
                                ),
                                e,
                            )
                        })?;
                    Ok::<_, PlannerError>((name, assoc.id))
                }
            });
        for (name, id) in try_join_all(association_futures).await? {
            realized.insert_resource(name, id);
        }

        // NAT egress for private subnets. Triples are mutually independent;
        // only intra-triple order is sequenced.
        if model.nat_enabled() {
            let triple_futures = realized_subnets
                .iter()
                .filter(|(subnet, _)| subnet.visibility == SubnetVisibility::Private)
                .map(|(subnet, resource)| {
                    nat::apply_for_subnet(self.provider, base_tags, &vpc.id, subnet, resource)
                });
            for triple in try_join_all(triple_futures).await? {
                for (name, id) in triple.resources {
                    realized.insert_resource(name, id);
                }
                for (key, value) in triple.outputs {
                    realized.insert_output(key, value);
                }
            }
        }

        info!(
            network = %spec.resource_name,
            resources = realized.resources().len(),
            "topology plan applied"
        );
        Ok(realized)
    }
}
