// Copyright (c) 2025 - Cowboy AI, Inc.

//! Provider adapter implementations
//!
//! Concrete implementations of the [`CloudProvider`](crate::provider::CloudProvider)
//! seam. SDK-backed adapters live outside this crate; the in-memory adapter
//! here supports dry-runs and tests.

pub mod memory;

pub use memory::InMemoryProvider;
