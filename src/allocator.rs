// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deterministic CIDR Allocation
//!
//! Pure function from a [`NetworkSpec`] to the non-overlapping subnet
//! address blocks of one visibility class. For zone index `z` (0-based, in
//! declaration order) and subnet index `s` (0..subnets_per_zone):
//!
//! ```text
//! public  block = 10.0.(z*10 + s).0/{mask}
//! private block = 10.0.(100 + z*10 + s).0/{mask}
//! ```
//!
//! The offset-by-100 keeps public and private third octets apart for up to
//! 10 zones x 10 subnets per zone; `NetworkSpec::validate` hard-fails
//! anything beyond that, so the formula can never emit a colliding octet.
//!
//! Allocation depends only on the declared zone order and a monotonic
//! subnet index. No unordered container is ever iterated, so re-running
//! with the same spec yields byte-identical output.

use crate::domain::cidr::SubnetCidr;
use crate::domain::spec::{AvailabilityZone, NetworkSpec};
use crate::domain::subnet::{SubnetName, SubnetVisibility};
use crate::errors::{PlannerError, PlannerResult};

/// Third-octet offset separating private blocks from public ones
const PRIVATE_OCTET_OFFSET: u32 = 100;

/// Third-octet stride between consecutive zones
const ZONE_OCTET_STRIDE: u32 = 10;

/// Allocated subnets of one zone, in subnet-index order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSubnets {
    /// The zone these subnets are placed in
    pub zone: AvailabilityZone,
    /// (name, cidr) pairs, index-ordered
    pub subnets: Vec<(SubnetName, SubnetCidr)>,
}

/// Allocate the subnet blocks of one visibility class
///
/// Pure and deterministic: the only failure mode is a configuration error,
/// reported before anything is allocated. `subnets_per_zone == 0` yields
/// zones with empty subnet lists, not an error.
pub fn allocate(
    spec: &NetworkSpec,
    visibility: SubnetVisibility,
) -> PlannerResult<Vec<ZoneSubnets>> {
    spec.validate()?;

    let mut zones = Vec::with_capacity(spec.availability_zones.len());

    for (zone_index, zone) in spec.availability_zones.iter().enumerate() {
        let mut subnets = Vec::with_capacity(spec.subnets_per_zone as usize);

        for subnet_index in 0..spec.subnets_per_zone {
            let name = SubnetName::derive(visibility, zone, subnet_index);
            let octet = third_octet(visibility, zone_index as u32, subnet_index);
            let cidr = SubnetCidr::new(format!("10.0.{}.0/{}", octet, spec.subnet_mask))
                .map_err(|e| PlannerError::Configuration(e.to_string()))?;
            subnets.push((name, cidr));
        }

        zones.push(ZoneSubnets {
            zone: zone.clone(),
            subnets,
        });
    }

    Ok(zones)
}

/// Third octet for a (visibility, zone index, subnet index) triple
///
/// Injective over the validated input range: public octets stay below 100,
/// private octets start at 100.
fn third_octet(visibility: SubnetVisibility, zone_index: u32, subnet_index: u32) -> u32 {
    let base = zone_index * ZONE_OCTET_STRIDE + subnet_index;
    match visibility {
        SubnetVisibility::Public => base,
        SubnetVisibility::Private => PRIVATE_OCTET_OFFSET + base,
    }
}
