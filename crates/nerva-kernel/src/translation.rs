// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Global/local identifier translation
//!
//! Regular nodes are dealt out to partitions at creation time; the mapping
//! between a node's global id and its partition-local id is pure arithmetic
//! and is recovered on demand instead of being stored. Local id 0 is the
//! reserved placeholder row on every partition: reverse translation of it
//! yields `None`, never a gid.

use crate::partition::PartitionTopology;
use nerva_structures::{LocalNodeId, NodeGid, PartitionId};

/// Translates between global node ids and partition-local ids
pub trait IdTranslation {
    /// Local id of `gid` on the partition that owns it
    fn global_to_local(&self, gid: NodeGid) -> LocalNodeId;

    /// Global id of the node at local id `lid` on `partition`, or `None`
    /// for the reserved placeholder row
    fn local_to_global(&self, lid: LocalNodeId, partition: PartitionId) -> Option<NodeGid>;
}

/// Round-robin node distribution: gid `g` (counting from 1) lives on
/// partition `(g - 1) % P` with local id `(g - 1) / P + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinTranslation {
    partitions: usize,
}

impl RoundRobinTranslation {
    /// Create a translation over `partitions` workers.
    pub fn new(partitions: usize) -> Self {
        assert!(partitions > 0, "a simulation needs at least one partition");
        Self { partitions }
    }

    /// Build the translation matching a topology.
    pub fn from_topology(topology: &dyn PartitionTopology) -> Self {
        Self::new(topology.num_partitions())
    }

    /// The partition that owns `gid`.
    pub fn partition_of(&self, gid: NodeGid) -> PartitionId {
        assert!(gid.0 > 0, "gid 0 is never assigned to a node");
        PartitionId(((gid.0 - 1) % self.partitions as u64) as usize)
    }
}

impl IdTranslation for RoundRobinTranslation {
    fn global_to_local(&self, gid: NodeGid) -> LocalNodeId {
        assert!(gid.0 > 0, "gid 0 is never assigned to a node");
        LocalNodeId(((gid.0 - 1) / self.partitions as u64) as usize + 1)
    }

    fn local_to_global(&self, lid: LocalNodeId, partition: PartitionId) -> Option<NodeGid> {
        if lid.0 == 0 {
            return None;
        }
        let gid = (lid.0 as u64 - 1) * self.partitions as u64 + partition.0 as u64 + 1;
        Some(NodeGid(gid))
    }
}
