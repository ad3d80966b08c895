// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # nerva kernel
//!
//! Kernel-side data structures for a partitioned, discrete-event spiking
//! network simulator. The centrepiece is [`DeviceConnectionIndex`], the
//! per-partition sparse table that records every connection touching an I/O
//! device. The remaining modules are the seams the index consumes: partition
//! topology, global/local identifier translation, the node census, and the
//! synapse model registry, each with an in-memory implementation.
//!
//! All tables are sharded by partition. A partition's tables are touched only
//! by that partition's worker; there is no cross-partition aggregation and no
//! locking discipline beyond that rule.

pub mod config;
pub mod container;
pub mod device_index;
pub mod error;
pub mod models;
pub mod nodes;
pub mod partition;
pub mod translation;

pub use config::{ConfigError, KernelConfig};
pub use container::{ConnectionContainer, ConnectionSlot, DeviceConnectionList};
pub use device_index::DeviceConnectionIndex;
pub use error::{KernelError, KernelResult};
pub use models::{SynapseModelRegistry, SynapseTypeRegistry};
pub use nodes::{NodeDirectory, NodeInfo, NodeRegistry};
pub use partition::{FixedPartitions, PartitionTopology};
pub use translation::{IdTranslation, RoundRobinTranslation};
