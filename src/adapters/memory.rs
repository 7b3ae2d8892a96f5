// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Provider Adapter
//!
//! Simulates the provisioning substrate without touching any cloud API.
//! Useful for plan previews and for tests that need to observe call
//! ordering, realized attributes, and fail-fast behavior.
//!
//! Identifiers are freshly generated per resource (kind prefix + uuid v7),
//! NAT addresses are synthesized from a monotonic counter, and every call
//! is recorded in arrival order. A single operation kind can be rigged to
//! fail, which exercises the executor's abort path.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::domain::tags::TagSet;
use crate::graph::ResourceKind;
use crate::provider::{
    attrs, CloudProvider, ElasticAddressRequest, InternetGatewayRequest, NatGatewayRequest,
    ProviderError, RealizedResource, ResourceId, RouteTableAssociationRequest, RouteTableRequest,
    SubnetRequest, VpcRequest,
};

/// One recorded provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Kind of object requested
    pub kind: ResourceKind,
    /// Logical name from the request
    pub name: String,
}

/// In-memory simulation of the provisioning substrate
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    calls: Mutex<Vec<RecordedCall>>,
    address_counter: AtomicU32,
    fail_on: Option<(ResourceKind, ProviderError)>,
}

impl InMemoryProvider {
    /// Create a provider that fulfills every request
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that fails every request of one kind
    pub fn failing_on(kind: ResourceKind, error: ProviderError) -> Self {
        Self {
            fail_on: Some((kind, error)),
            ..Self::default()
        }
    }

    /// Calls received so far, in arrival order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    /// Number of calls of one kind
    pub fn call_count(&self, kind: ResourceKind) -> usize {
        self.calls().iter().filter(|c| c.kind == kind).count()
    }

    fn record(&self, kind: ResourceKind, name: &str) -> Result<(), ProviderError> {
        if let Some((failing_kind, error)) = &self.fail_on {
            if *failing_kind == kind {
                return Err(error.clone());
            }
        }
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(RecordedCall {
                kind,
                name: name.to_string(),
            });
        debug!(%kind, name, "simulated create");
        Ok(())
    }

    fn realize(kind_prefix: &str, tags: Option<&TagSet>) -> RealizedResource {
        let id = ResourceId::new(format!("{}-{}", kind_prefix, Uuid::now_v7().simple()));
        let mut attributes = BTreeMap::new();
        attributes.insert(attrs::REALIZED_AT.to_string(), Utc::now().to_rfc3339());
        if let Some(tags) = tags {
            for (key, value) in tags.iter() {
                attributes.insert(format!("{}{}", attrs::TAG_PREFIX, key), value.to_string());
            }
        }
        RealizedResource { id, attributes }
    }

    fn next_addresses(&self) -> (String, String) {
        let n = self.address_counter.fetch_add(1, Ordering::SeqCst) + 1;
        // Synthesized but plausible: public from a provider pool, private
        // from the VPC side.
        (format!("54.200.0.{}", n), format!("10.64.0.{}", n))
    }
}

#[async_trait]
impl CloudProvider for InMemoryProvider {
    async fn create_vpc(&self, request: VpcRequest) -> Result<RealizedResource, ProviderError> {
        self.record(ResourceKind::Vpc, &request.name)?;
        let mut resource = Self::realize("vpc", Some(&request.tags));
        resource
            .attributes
            .insert("cidr-block".to_string(), request.cidr_block);
        Ok(resource)
    }

    async fn create_internet_gateway(
        &self,
        request: InternetGatewayRequest,
    ) -> Result<RealizedResource, ProviderError> {
        self.record(ResourceKind::InternetGateway, &request.name)?;
        Ok(Self::realize("igw", Some(&request.tags)))
    }

    async fn create_route_table(
        &self,
        request: RouteTableRequest,
    ) -> Result<RealizedResource, ProviderError> {
        self.record(ResourceKind::RouteTable, &request.name)?;
        let mut resource = Self::realize("rtb", Some(&request.tags));
        resource
            .attributes
            .insert("route-count".to_string(), request.routes.len().to_string());
        Ok(resource)
    }

    async fn create_subnet(
        &self,
        request: SubnetRequest,
    ) -> Result<RealizedResource, ProviderError> {
        self.record(ResourceKind::Subnet, &request.name)?;
        let mut resource = Self::realize("subnet", Some(&request.tags));
        resource
            .attributes
            .insert("cidr-block".to_string(), request.cidr_block);
        resource
            .attributes
            .insert("availability-zone".to_string(), request.availability_zone);
        Ok(resource)
    }

    async fn create_route_table_association(
        &self,
        request: RouteTableAssociationRequest,
    ) -> Result<RealizedResource, ProviderError> {
        self.record(ResourceKind::RouteTableAssociation, &request.name)?;
        Ok(Self::realize("rtbassoc", None))
    }

    async fn create_elastic_address(
        &self,
        request: ElasticAddressRequest,
    ) -> Result<RealizedResource, ProviderError> {
        self.record(ResourceKind::ElasticAddress, &request.name)?;
        let (public_ip, _) = self.next_addresses();
        let mut resource = Self::realize("eipalloc", Some(&request.tags));
        resource
            .attributes
            .insert(attrs::PUBLIC_IP.to_string(), public_ip);
        Ok(resource)
    }

    async fn create_nat_gateway(
        &self,
        request: NatGatewayRequest,
    ) -> Result<RealizedResource, ProviderError> {
        self.record(ResourceKind::NatGateway, &request.name)?;
        let (public_ip, private_ip) = self.next_addresses();
        let mut resource = Self::realize("nat", Some(&request.tags));
        resource
            .attributes
            .insert(attrs::PUBLIC_IP.to_string(), public_ip);
        resource
            .attributes
            .insert(attrs::PRIVATE_IP.to_string(), private_ip);
        resource
            .attributes
            .insert("subnet-id".to_string(), request.subnet_id.to_string());
        resource
            .attributes
            .insert("allocation-id".to_string(), request.allocation_id.to_string());
        Ok(resource)
    }
}
