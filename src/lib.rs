// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deterministic VPC topology synthesis and dependency-ordered provisioning
//!
//! This crate derives a complete virtual-network topology (VPC, subnets,
//! routing, NAT egress) from a compact declarative [`NetworkSpec`] and
//! executes the resulting creation plan against an asynchronous
//! provisioning substrate.
//!
//! # Pipeline
//!
//! ```text
//! NetworkSpec ──► TopologyModel ──► ResourceGraph ──► PlanExecutor
//!   (input)       (CIDR + tags)      (dependency        (async apply
//!                                      ordered plan)     via CloudProvider)
//!                                                            │
//!                                    StackOutputs ◄── OutputBinder
//! ```
//!
//! Synthesis is pure and deterministic: the same spec always yields the
//! same addresses, names, and plan, so re-applying is idempotent at the
//! planning level. The substrate owns create-vs-update reconciliation.
//!
//! # Example
//!
//! ```rust,no_run
//! use vpc_planner::{
//!     adapters::InMemoryProvider, graph::PlanExecutor, outputs::OutputBinder,
//!     NetworkSpec, TopologyModel,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let spec: NetworkSpec = serde_json::from_str(r#"{
//!         "resource_id": "vpc-demo",
//!         "resource_name": "demo-vpc",
//!         "org_id": "acme",
//!         "env_id": "dev",
//!         "vpc_cidr": "10.0.0.0/16",
//!         "availability_zones": ["us-east-1a", "us-east-1b"],
//!         "subnets_per_zone": 1,
//!         "subnet_mask": 24,
//!         "nat_gateway_enabled": true
//!     }"#)?;
//!
//!     let model = TopologyModel::synthesize(&spec)?;
//!     let provider = InMemoryProvider::new();
//!     let realized = PlanExecutor::new(&provider).apply(&model).await?;
//!     let outputs = OutputBinder::bind(&spec, &realized)?;
//!
//!     println!("{}", serde_json::to_string_pretty(&outputs)?);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod allocator;
pub mod domain;
pub mod errors;
pub mod graph;
pub mod nat;
pub mod outputs;
pub mod provider;
pub mod topology;

// Re-export commonly used types
pub use domain::{AvailabilityZone, NetworkSpec, Subnet, SubnetCidr, SubnetName, SubnetVisibility, TagSet};
pub use errors::{PlannerError, PlannerResult};
pub use graph::{PlanExecutor, RealizedOutputs, ResourceGraph, ResourceKind, ResourceNode};
pub use outputs::{OutputBinder, StackOutputs};
pub use provider::{CloudProvider, ProviderError, RealizedResource, ResourceId};
pub use topology::TopologyModel;
