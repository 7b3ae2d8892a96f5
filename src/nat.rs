// Copyright (c) 2025 - Cowboy AI, Inc.
//! NAT Egress Planner
//!
//! For every private subnet (when NAT egress is enabled) this module plans
//! and applies the triple {elastic address, NAT gateway, private route
//! table} plus the association binding the route table back to the subnet.
//!
//! Triples for distinct subnets share no data, so the executor runs them
//! concurrently; only the intra-triple order (address → gateway → route
//! table → association) is fixed.
//!
//! The elastic address's `Name` tag is derived from the subnet's realized
//! identifier, which is why this subsystem cannot run from static planning
//! state alone: it waits for the subnet to be realized first. Output facts
//! for a triple (gateway id, public address, private address) are bound
//! only once both the gateway's identifier and the subnet's realized
//! `Name` tag have resolved — a two-future join.

use tracing::{debug, info};

use crate::domain::subnet::{Subnet, SubnetName};
use crate::domain::tags::TagSet;
use crate::errors::{PlannerError, PlannerResult};
use crate::graph::names;
use crate::outputs;
use crate::provider::{
    attrs, CloudProvider, ElasticAddressRequest, NatGatewayRequest, RealizedResource, ResourceId,
    RouteRule, RouteTableAssociationRequest, RouteTableRequest, RouteTarget, ALLOW_ALL_CIDR,
};
use crate::topology::TopologyModel;

/// The planned NAT triple for one private subnet
///
/// Logical names only; realized identifiers arrive during apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatBinding {
    /// The private subnet this triple serves
    pub subnet: SubnetName,
    /// Elastic address node name
    pub elastic_address: String,
    /// NAT gateway node name
    pub nat_gateway: String,
    /// Private route table node name
    pub route_table: String,
    /// Route-table association node name
    pub association: String,
}

/// Plan the NAT triples for a topology
///
/// One binding per private subnet, in the stable subnet enumeration order.
/// Empty when NAT egress is disabled.
pub fn plan(model: &TopologyModel) -> Vec<NatBinding> {
    if !model.nat_enabled() {
        return Vec::new();
    }

    model
        .private_subnets()
        .iter()
        .map(|subnet| NatBinding {
            subnet: subnet.name.clone(),
            elastic_address: names::elastic_address(&subnet.name),
            nat_gateway: names::nat_gateway(&subnet.name),
            route_table: names::private_route_table(&subnet.name),
            association: names::route_table_association(&subnet.name),
        })
        .collect()
}

/// Realized state of one applied NAT triple
#[derive(Debug, Clone)]
pub(crate) struct RealizedNatTriple {
    /// (logical name, realized id) for each created object
    pub resources: Vec<(String, ResourceId)>,
    /// (output key, value) facts bound for this subnet
    pub outputs: Vec<(String, String)>,
}

/// Apply the NAT triple for one realized private subnet
///
/// Intra-triple order is fixed by data dependencies: the gateway consumes
/// the address's identifier, the route table consumes the gateway's, the
/// association consumes the route table's. Fail-fast: the first provider
/// error aborts the rest of the triple.
pub(crate) async fn apply_for_subnet<P>(
    provider: &P,
    base_tags: &TagSet,
    vpc_id: &ResourceId,
    subnet: &Subnet,
    realized_subnet: &RealizedResource,
) -> PlannerResult<RealizedNatTriple>
where
    P: CloudProvider + ?Sized,
{
    let subnet_id = &realized_subnet.id;
    let mut resources = Vec::with_capacity(4);

    // Elastic address: Name tag derived from the subnet's realized id,
    // so this step waits on subnet realization by construction.
    let eip_name = names::elastic_address(&subnet.name);
    let eip = provider
        .create_elastic_address(ElasticAddressRequest {
            name: eip_name.clone(),
            tags: base_tags.with_name(format!("{}-nat", subnet_id)),
        })
        .await
        .map_err(|e| {
            PlannerError::provisioning(
                format!("error creating elastic address for subnet {}", subnet.name),
                e,
            )
        })?;
    debug!(subnet = %subnet.name, eip = %eip.id, "elastic address realized");
    resources.push((eip_name, eip.id.clone()));

    // NAT gateway, bound to the subnet and the allocated address. Output
    // binding for the triple is a join of the gateway's realized id and
    // the subnet's realized Name tag; neither fires alone.
    let nat_name = names::nat_gateway(&subnet.name);
    let (gateway, name_tag) = tokio::try_join!(
        async {
            provider
                .create_nat_gateway(NatGatewayRequest {
                    name: nat_name.clone(),
                    subnet_id: subnet_id.clone(),
                    allocation_id: eip.id.clone(),
                    tags: base_tags.with_name(subnet_id.as_str()),
                })
                .await
                .map_err(|e| {
                    PlannerError::provisioning(
                        format!("error creating nat gateway for subnet {}", subnet.name),
                        e,
                    )
                })
        },
        async {
            realized_subnet.require_name_tag().map_err(|e| {
                PlannerError::provisioning(
                    format!("subnet {} realized without a Name tag", subnet.name),
                    e,
                )
            })
        },
    )?;
    resources.push((nat_name, gateway.id.clone()));

    let public_ip = gateway.require_attribute(attrs::PUBLIC_IP).map_err(|e| {
        PlannerError::provisioning(
            format!("nat gateway for subnet {} missing public address", subnet.name),
            e,
        )
    })?;
    let private_ip = gateway.require_attribute(attrs::PRIVATE_IP).map_err(|e| {
        PlannerError::provisioning(
            format!("nat gateway for subnet {} missing private address", subnet.name),
            e,
        )
    })?;

    let triple_outputs = vec![
        (
            outputs::nat_gateway_id_key(name_tag),
            gateway.id.to_string(),
        ),
        (
            outputs::nat_gateway_public_ip_key(name_tag),
            public_ip.to_string(),
        ),
        (
            outputs::nat_gateway_private_ip_key(name_tag),
            private_ip.to_string(),
        ),
    ];

    // Private route table: default route through the NAT gateway.
    let rtt_name = names::private_route_table(&subnet.name);
    let route_table = provider
        .create_route_table(RouteTableRequest {
            name: rtt_name.clone(),
            vpc_id: vpc_id.clone(),
            routes: vec![RouteRule {
                destination: ALLOW_ALL_CIDR.to_string(),
                target: RouteTarget::NatGateway(gateway.id.clone()),
            }],
            tags: base_tags.with_name(format!("{}-private", subnet_id)),
        })
        .await
        .map_err(|e| {
            PlannerError::provisioning(
                format!("error creating private route table for subnet {}", subnet.name),
                e,
            )
        })?;
    resources.push((rtt_name, route_table.id.clone()));

    let assoc_name = names::route_table_association(&subnet.name);
    let association = provider
        .create_route_table_association(RouteTableAssociationRequest {
            name: assoc_name.clone(),
            route_table_id: route_table.id.clone(),
            subnet_id: subnet_id.clone(),
        })
        .await
        .map_err(|e| {
            PlannerError::provisioning(
                format!("error associating private route table for subnet {}", subnet.name),
                e,
            )
        })?;
    resources.push((assoc_name, association.id));

    info!(subnet = %subnet.name, gateway = %gateway.id, "nat egress realized");

    Ok(RealizedNatTriple {
        resources,
        outputs: triple_outputs,
    })
}
