// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subnet CIDR Value Object
//!
//! Represents a validated IPv4 CIDR block and provides the address-range
//! math the allocator's disjointness guarantees rest on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// CIDR validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CidrError {
    #[error("Invalid CIDR notation: {0}")]
    InvalidNotation(String),

    #[error("Invalid IPv4 address in CIDR: {0}")]
    InvalidAddress(String),

    #[error("Invalid prefix length: {0} (must be 0-32)")]
    InvalidPrefixLength(u8),
}

/// An IPv4 CIDR block
///
/// Invariants:
/// - Valid dotted-quad base address
/// - Prefix length 0-32
///
/// # Examples
///
/// ```rust
/// use vpc_planner::domain::SubnetCidr;
///
/// let cidr = SubnetCidr::new("10.0.100.0/24").unwrap();
/// assert_eq!(cidr.third_octet(), 100);
/// assert_eq!(cidr.prefix_len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubnetCidr {
    cidr: String,
}

impl SubnetCidr {
    /// Create a new CIDR block with validation
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, CidrError> {
        let cidr = cidr.as_ref();

        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| CidrError::InvalidNotation(cidr.to_string()))?;

        let address = Ipv4Addr::from_str(addr_str)
            .map_err(|_| CidrError::InvalidAddress(addr_str.to_string()))?;

        let prefix_len = prefix_str
            .parse::<u8>()
            .map_err(|_| CidrError::InvalidNotation(cidr.to_string()))?;

        if prefix_len > 32 {
            return Err(CidrError::InvalidPrefixLength(prefix_len));
        }

        // Canonical form: re-render from the parsed parts
        Ok(Self {
            cidr: format!("{}/{}", address, prefix_len),
        })
    }

    /// Get the base address
    pub fn address(&self) -> Ipv4Addr {
        // Invariant: constructor only stores valid notation
        let addr = self.cidr.split('/').next().unwrap_or_default();
        Ipv4Addr::from_str(addr).unwrap_or(Ipv4Addr::UNSPECIFIED)
    }

    /// Get the prefix length
    pub fn prefix_len(&self) -> u8 {
        self.cidr
            .split('/')
            .nth(1)
            .and_then(|p| p.parse().ok())
            .unwrap_or(32)
    }

    /// Get the third octet of the base address
    ///
    /// The allocator partitions the address space by third octet, so this
    /// is the discriminant its injectivity property is stated over.
    pub fn third_octet(&self) -> u8 {
        self.address().octets()[2]
    }

    /// First address of the block as a u32
    fn range_start(&self) -> u32 {
        let mask = Self::mask(self.prefix_len());
        u32::from(self.address()) & mask
    }

    /// Last address of the block as a u32
    fn range_end(&self) -> u32 {
        let mask = Self::mask(self.prefix_len());
        self.range_start() | !mask
    }

    fn mask(prefix_len: u8) -> u32 {
        if prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix_len))
        }
    }

    /// Check whether two blocks share any address
    pub fn overlaps(&self, other: &SubnetCidr) -> bool {
        self.range_start() <= other.range_end() && other.range_start() <= self.range_end()
    }

    /// Get as CIDR notation string
    pub fn as_str(&self) -> &str {
        &self.cidr
    }
}

impl fmt::Display for SubnetCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cidr)
    }
}

impl FromStr for SubnetCidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
