// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Model
//!
//! The in-memory model of one synthesized network: the base tag set and the
//! ordered public and private subnet lists. Built once, before any
//! asynchronous work starts, and never mutated afterwards; all concurrent
//! provisioning calls only read it.
//!
//! Subnet order is zone-major then index-minor, matching the allocator's
//! enumeration. That order is the stable order NAT triples and output
//! binding rely on.

use crate::allocator;
use crate::domain::spec::NetworkSpec;
use crate::domain::subnet::{Subnet, SubnetVisibility};
use crate::domain::tags::TagSet;
use crate::errors::PlannerResult;

/// Synthesized topology for one network spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyModel {
    spec: NetworkSpec,
    tags: TagSet,
    public_subnets: Vec<Subnet>,
    private_subnets: Vec<Subnet>,
}

impl TopologyModel {
    /// Synthesize the topology for a spec
    ///
    /// Deterministic: the same spec always produces the same model. Fails
    /// only on configuration errors surfaced by validation.
    pub fn synthesize(spec: &NetworkSpec) -> PlannerResult<Self> {
        let tags = TagSet::for_network(spec);
        let public_subnets = flatten(spec, SubnetVisibility::Public)?;
        let private_subnets = flatten(spec, SubnetVisibility::Private)?;

        Ok(Self {
            spec: spec.clone(),
            tags,
            public_subnets,
            private_subnets,
        })
    }

    /// The spec this model was synthesized from
    pub fn spec(&self) -> &NetworkSpec {
        &self.spec
    }

    /// Base tag set shared by every object of this network
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Public subnets, zone-major then index-minor
    pub fn public_subnets(&self) -> &[Subnet] {
        &self.public_subnets
    }

    /// Private subnets, zone-major then index-minor
    pub fn private_subnets(&self) -> &[Subnet] {
        &self.private_subnets
    }

    /// All subnets, public first, in stable order
    pub fn all_subnets(&self) -> impl Iterator<Item = &Subnet> {
        self.public_subnets.iter().chain(self.private_subnets.iter())
    }

    /// Total subnet count across both visibility classes
    pub fn subnet_count(&self) -> usize {
        self.public_subnets.len() + self.private_subnets.len()
    }

    /// Whether NAT egress is planned for private subnets
    pub fn nat_enabled(&self) -> bool {
        self.spec.nat_gateway_enabled
    }
}

/// Flatten per-zone allocation into the stable zone-major subnet order
fn flatten(spec: &NetworkSpec, visibility: SubnetVisibility) -> PlannerResult<Vec<Subnet>> {
    let zones = allocator::allocate(spec, visibility)?;
    let mut subnets = Vec::new();
    for zone_subnets in zones {
        for (name, cidr) in zone_subnets.subnets {
            subnets.push(Subnet {
                name,
                cidr,
                zone: zone_subnets.zone.clone(),
                visibility,
            });
        }
    }
    Ok(subnets)
}
