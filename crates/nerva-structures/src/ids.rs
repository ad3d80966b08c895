// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for partitions, nodes, devices and synapse models
//!
//! Global identifiers are network-wide; local identifiers are dense,
//! partition-scoped indices. Local id 0 is reserved on every partition and
//! never names a real node or device.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Partition ID (one concurrent worker owning a disjoint shard of the network)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionId(pub usize);

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Partition({})", self.0)
    }
}

/// Node GID (globally unique across the entire network, neurons and devices alike)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeGid(pub u64);

impl fmt::Display for NodeGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gid({})", self.0)
    }
}

/// Local node ID (dense per-partition index of a node; 0 is reserved)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalNodeId(pub usize);

impl fmt::Display for LocalNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lid({})", self.0)
    }
}

/// Local device ID (dense per-partition index of a device instance; 0 is reserved)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalDeviceId(pub usize);

impl fmt::Display for LocalDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ldid({})", self.0)
    }
}

/// Synapse type ID (dense index of a registered synapse model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SynapseTypeId(pub usize);

impl fmt::Display for SynapseTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SynType({})", self.0)
    }
}

/// User-assigned label carried by an individual connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SynapseLabel(pub i64);

impl fmt::Display for SynapseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.0)
    }
}
