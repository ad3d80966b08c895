// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Node census and lookup
//!
//! The connection tables never store which gid occupies a row; they recover
//! it on demand through this seam. [`NodeRegistry`] reports the census used
//! to size tables (highest local node id, device count) and resolves a gid
//! to the node instance (or its lightweight proxy) visible on a given
//! partition. Devices are instantiated per partition and carry a dense
//! local device id there; regular nodes do not.

use crate::error::{KernelError, KernelResult};
use ahash::AHashMap;
use nerva_structures::{LocalDeviceId, LocalNodeId, NodeGid, PartitionId};

/// A node or its proxy as seen by one partition
pub trait NodeInfo {
    /// Global id of the node
    fn gid(&self) -> NodeGid;

    /// Dense per-partition device index; `None` for regular nodes
    fn local_device_id(&self) -> Option<LocalDeviceId>;
}

/// Read-only census of the nodes and devices built so far
pub trait NodeRegistry {
    /// Highest local node id in use on any partition
    fn max_local_node_id(&self) -> usize;

    /// Highest local device count on any single partition
    fn num_local_devices(&self) -> usize;

    /// The node (or its proxy) for `gid` as `partition` sees it.
    ///
    /// Asking for a gid that was never registered is a contract violation
    /// and fails fast.
    fn node_or_proxy(&self, gid: NodeGid, partition: PartitionId) -> &dyn NodeInfo;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeEntry {
    gid: NodeGid,
    local_device_id: Option<LocalDeviceId>,
}

impl NodeInfo for NodeEntry {
    fn gid(&self) -> NodeGid {
        self.gid
    }

    fn local_device_id(&self) -> Option<LocalDeviceId> {
        self.local_device_id
    }
}

/// In-memory node directory, sharded by partition
#[derive(Debug)]
pub struct NodeDirectory {
    /// Per-partition entries keyed by gid
    entries: Vec<AHashMap<NodeGid, NodeEntry>>,
    /// Devices instantiated so far on each partition (ldid 0 stays reserved)
    device_counts: Vec<usize>,
    max_local_node_id: usize,
}

impl NodeDirectory {
    /// Create an empty directory over `partitions` workers.
    pub fn new(partitions: usize) -> Self {
        assert!(partitions > 0, "a simulation needs at least one partition");
        Self {
            entries: vec![AHashMap::new(); partitions],
            device_counts: vec![0; partitions],
            max_local_node_id: 0,
        }
    }

    /// Number of partitions the directory is sharded over.
    pub fn num_partitions(&self) -> usize {
        self.entries.len()
    }

    /// Record a regular node living at `lid` on `partition`.
    pub fn register_neuron(
        &mut self,
        gid: NodeGid,
        partition: PartitionId,
        lid: LocalNodeId,
    ) -> KernelResult<()> {
        self.check_new(gid, partition)?;
        self.entries[partition.0].insert(
            gid,
            NodeEntry {
                gid,
                local_device_id: None,
            },
        );
        self.max_local_node_id = self.max_local_node_id.max(lid.0);
        Ok(())
    }

    /// Instantiate a device on `partition` and return its dense local
    /// device id there.
    pub fn register_device(
        &mut self,
        gid: NodeGid,
        partition: PartitionId,
    ) -> KernelResult<LocalDeviceId> {
        self.check_new(gid, partition)?;
        let ldid = LocalDeviceId(self.device_counts[partition.0] + 1);
        self.entries[partition.0].insert(
            gid,
            NodeEntry {
                gid,
                local_device_id: Some(ldid),
            },
        );
        self.device_counts[partition.0] = ldid.0;
        Ok(ldid)
    }

    fn check_new(&self, gid: NodeGid, partition: PartitionId) -> KernelResult<()> {
        let shard = self
            .entries
            .get(partition.0)
            .ok_or(KernelError::UnknownPartition {
                partition,
                partitions: self.entries.len(),
            })?;
        if shard.contains_key(&gid) {
            return Err(KernelError::DuplicateNode { gid, partition });
        }
        Ok(())
    }
}

impl NodeRegistry for NodeDirectory {
    fn max_local_node_id(&self) -> usize {
        self.max_local_node_id
    }

    fn num_local_devices(&self) -> usize {
        self.device_counts.iter().copied().max().unwrap_or(0)
    }

    fn node_or_proxy(&self, gid: NodeGid, partition: PartitionId) -> &dyn NodeInfo {
        assert!(
            partition.0 < self.entries.len(),
            "{partition} is outside the configured range 0..{}",
            self.entries.len()
        );
        match self.entries[partition.0].get(&gid) {
            Some(entry) => entry,
            None => panic!("no node or proxy for {gid} on {partition}"),
        }
    }
}
