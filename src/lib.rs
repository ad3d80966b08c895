// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # nerva: kernel structures for partitioned spiking network simulation
//!
//! This umbrella crate re-exports the workspace members:
//!
//! - [`structures`]: identity and descriptor types
//! - [`kernel`]: the device connection index and the kernel seams it
//!   consumes (partition topology, id translation, node census, synapse
//!   model registry)
//!
//! ## Quick start
//!
//! ```rust
//! use nerva::prelude::*;
//!
//! let topology = FixedPartitions::new(2);
//! let translation = RoundRobinTranslation::from_topology(&topology);
//! let mut nodes = NodeDirectory::new(2);
//! let mut models = SynapseModelRegistry::new();
//!
//! // build the network
//! nodes.register_neuron(NodeGid(1), PartitionId(0), LocalNodeId(1)).unwrap();
//! let ldid = nodes.register_device(NodeGid(2), PartitionId(1)).unwrap();
//! let static_syn = models.register("static").unwrap();
//!
//! // grow the device tables along both axes
//! let mut index = DeviceConnectionIndex::new();
//! index.initialize(&topology);
//! index.resize_to_node_counts(&nodes);
//! index.resize_to_synapse_types(&models);
//!
//! // the connection layer installs containers into the owned slots
//! let mut list = DeviceConnectionList::new();
//! list.push(NodeGid(1), None);
//! *index.from_device_slot_mut(PartitionId(1), ldid, static_syn) = Some(Box::new(list));
//! index.register_sending_device(PartitionId(1), NodeGid(2), &nodes);
//!
//! let found = index.connections(
//!     None, None, PartitionId(1), static_syn, None, &translation, &nodes,
//! );
//! assert_eq!(found.len(), 1);
//! ```

pub use nerva_kernel as kernel;
pub use nerva_structures as structures;

/// Everything needed to build and query the kernel tables
pub mod prelude {
    pub use nerva_kernel::{
        ConfigError, ConnectionContainer, ConnectionSlot, DeviceConnectionIndex,
        DeviceConnectionList, FixedPartitions, IdTranslation, KernelConfig, KernelError,
        KernelResult, NodeDirectory, NodeInfo, NodeRegistry, PartitionTopology,
        RoundRobinTranslation, SynapseModelRegistry, SynapseTypeRegistry,
    };
    pub use nerva_structures::{
        ConnectionDescriptor, LocalDeviceId, LocalNodeId, NodeGid, PartitionId, SynapseLabel,
        SynapseTypeId,
    };
}
