// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Value Objects for Network Topology
//!
//! This module provides the validated value objects the planner is built
//! from: the declarative [`NetworkSpec`] input, CIDR blocks, subnets, and
//! the immutable tag set shared by every object in one logical network.
//!
//! All types here are immutable after construction and enforce their
//! invariants at the boundary, so the rest of the crate can rely on them
//! without re-validating.

pub mod cidr;
pub mod spec;
pub mod subnet;
pub mod tags;

pub use cidr::SubnetCidr;
pub use spec::{AvailabilityZone, NetworkSpec};
pub use subnet::{Subnet, SubnetName, SubnetVisibility};
pub use tags::TagSet;
