// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Partition-sharded index of device-coupled connections
//!
//! Ordinary nodes exchange spikes through the event-delivery tables; the
//! connections that start or end at an I/O device (stimulators, recorders)
//! are tracked here instead. The index keeps one [`PartitionShard`] per
//! worker holding two sparse tables (neuron→device connections rowed by
//! local node id, device→neuron connections rowed by local device id, both
//! columned by synapse type) plus the list of devices known to originate
//! connections. It answers administrative enumeration queries only; the
//! spike path never reads it.
//!
//! The tables grow along two independent axes: rows whenever the node or
//! device census grows ([`DeviceConnectionIndex::resize_to_node_counts`])
//! and columns whenever a synapse model is registered
//! ([`DeviceConnectionIndex::resize_to_synapse_types`]). Neither axis ever
//! shrinks. Row 0 of both tables is reserved; local ids count from 1.
//!
//! A partition's shard is touched only by that partition's worker, and
//! queries must not run against a shard while it is being resized. The
//! index takes no locks.

use crate::container::ConnectionSlot;
use crate::models::SynapseTypeRegistry;
use crate::nodes::NodeRegistry;
use crate::partition::PartitionTopology;
use crate::translation::IdTranslation;
use nerva_structures::{
    ConnectionDescriptor, LocalDeviceId, LocalNodeId, NodeGid, PartitionId, SynapseLabel,
    SynapseTypeId,
};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Lifecycle of the index.
///
/// `Created` and `Finalized` both hold zero shards but are handled
/// differently: mutating a never-initialized index is a programming error,
/// while operations on a finalized index are defined no-ops until the next
/// `initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Live,
    Finalized,
}

/// Per-partition tables. A worker touches only its own shard.
#[derive(Debug, Default)]
struct PartitionShard {
    /// Neuron→device containers; rows by local node id, columns by synapse type
    to_device: Vec<Vec<ConnectionSlot>>,
    /// Device→neuron containers; rows by local device id, columns by synapse type
    from_device: Vec<Vec<ConnectionSlot>>,
    /// Devices known to originate connections, by local device id
    sending_devices: Vec<Option<NodeGid>>,
}

impl PartitionShard {
    /// First query pass: connections where a regular node is the source and
    /// a device is the target.
    #[allow(clippy::too_many_arguments)]
    fn collect_to_device(
        &self,
        source: Option<NodeGid>,
        target: Option<NodeGid>,
        partition: PartitionId,
        syn_type: SynapseTypeId,
        label: Option<SynapseLabel>,
        translation: &dyn IdTranslation,
        out: &mut Vec<ConnectionDescriptor>,
    ) {
        match source {
            Some(gid) => {
                let lid = translation.global_to_local(gid);
                assert!(
                    lid.0 < self.to_device.len(),
                    "{lid} (translated from {gid}) is outside the {} rows of {partition}'s table; \
                     stale mapping?",
                    self.to_device.len()
                );
                self.collect_to_device_row(lid, target, partition, syn_type, label, translation, out);
            }
            None => {
                for lid in 0..self.to_device.len() {
                    self.collect_to_device_row(
                        LocalNodeId(lid),
                        target,
                        partition,
                        syn_type,
                        label,
                        translation,
                        out,
                    );
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn collect_to_device_row(
        &self,
        lid: LocalNodeId,
        target: Option<NodeGid>,
        partition: PartitionId,
        syn_type: SynapseTypeId,
        label: Option<SynapseLabel>,
        translation: &dyn IdTranslation,
        out: &mut Vec<ConnectionDescriptor>,
    ) {
        let row = &self.to_device[lid.0];
        if row.is_empty() {
            return;
        }
        // the reserved row never yields a source
        let Some(source_gid) = translation.local_to_global(lid, partition) else {
            return;
        };
        if let Some(container) = row[syn_type.0].as_deref() {
            container.collect_matching(source_gid, target, partition, syn_type, label, out);
        }
    }

    /// Second query pass: connections where a device is the source and a
    /// regular node is the target. Driven by the sending-device list so
    /// that devices without outgoing connections are never visited.
    #[allow(clippy::too_many_arguments)]
    fn collect_from_device(
        &self,
        source: Option<NodeGid>,
        target: Option<NodeGid>,
        partition: PartitionId,
        syn_type: SynapseTypeId,
        label: Option<SynapseLabel>,
        nodes: &dyn NodeRegistry,
        out: &mut Vec<ConnectionDescriptor>,
    ) {
        for &device_gid in self.sending_devices.iter().flatten() {
            if source.is_some_and(|want| want != device_gid) {
                continue;
            }
            let node = nodes.node_or_proxy(device_gid, partition);
            let ldid = node
                .local_device_id()
                .unwrap_or_else(|| panic!("sending node {device_gid} has no local device id"));
            let row = &self.from_device[ldid.0];
            if row.is_empty() {
                continue;
            }
            if let Some(container) = row[syn_type.0].as_deref() {
                container.collect_matching(device_gid, target, partition, syn_type, label, out);
            }
        }
    }
}

fn grow_rows(table: &mut Vec<Vec<ConnectionSlot>>, rows: usize) {
    if table.len() < rows {
        table.resize_with(rows, Vec::new);
    }
}

fn grow_columns(row: &mut Vec<ConnectionSlot>, columns: usize) {
    if row.len() < columns {
        row.resize_with(columns, || None);
    }
}

/// Partition-sharded sparse table of all connections touching a device.
///
/// Lifecycle: [`initialize`](Self::initialize) builds one empty shard per
/// partition; the two resize operations grow the shards as the network is
/// built; [`finalize`](Self::finalize) releases every owned container and
/// returns the index to an empty state. Dropping the index releases any
/// residual state the same way.
#[derive(Debug)]
pub struct DeviceConnectionIndex {
    shards: Vec<PartitionShard>,
    state: Lifecycle,
}

impl Default for DeviceConnectionIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceConnectionIndex {
    /// Create an index with no shards. Call
    /// [`initialize`](Self::initialize) before any other operation.
    pub fn new() -> Self {
        Self {
            shards: Vec::new(),
            state: Lifecycle::Created,
        }
    }

    /// Allocate one empty shard per partition.
    ///
    /// The shards are built as independent per-partition tasks on the rayon
    /// pool; each task constructs exactly one shard and touches nothing
    /// else, so the fan-out needs no synchronization.
    pub fn initialize(&mut self, topology: &dyn PartitionTopology) {
        assert!(
            self.state != Lifecycle::Live,
            "initialize called on a live index; finalize it first"
        );
        let partitions = topology.num_partitions();
        self.shards = (0..partitions)
            .into_par_iter()
            .map(|_| PartitionShard::default())
            .collect();
        self.state = Lifecycle::Live;
        debug!(partitions, "device connection index initialized");
    }

    /// Release every owned container and drop all shards.
    ///
    /// Idempotent: calling it on an already-finalized (or never-initialized)
    /// index is a no-op. After it returns the index holds zero partitions
    /// and needs another `initialize` before reuse.
    pub fn finalize(&mut self) {
        if self.state != Lifecycle::Live {
            return;
        }
        // dropping the shards releases every container through its slot
        self.shards = Vec::new();
        self.state = Lifecycle::Finalized;
        debug!("device connection index finalized");
    }

    /// True between `initialize` and `finalize`.
    pub fn is_live(&self) -> bool {
        self.state == Lifecycle::Live
    }

    /// Number of partitions currently sharded (zero unless live).
    pub fn num_partitions(&self) -> usize {
        self.shards.len()
    }

    /// Grow every shard's row counts to the current node census: the
    /// to-device table covers local node ids, the from-device table and the
    /// sending-device list cover local device ids. The two row spaces are
    /// unrelated and must not be collapsed. Never shrinks; safe to call
    /// after every construction step.
    pub fn resize_to_node_counts(&mut self, nodes: &dyn NodeRegistry) {
        if !self.mutation_allowed("resize_to_node_counts") {
            return;
        }
        let node_rows = nodes.max_local_node_id() + 1;
        let device_rows = nodes.num_local_devices() + 1;
        for shard in &mut self.shards {
            grow_rows(&mut shard.to_device, node_rows);
            grow_rows(&mut shard.from_device, device_rows);
            if shard.sending_devices.len() < device_rows {
                shard.sending_devices.resize(device_rows, None);
            }
        }
        debug!(node_rows, device_rows, "device tables resized to node census");
    }

    /// Grow every existing row of both tables to the registered synapse
    /// model count, padding with empty slots. Must run after each model
    /// registration, before any connection of the new type is installed.
    pub fn resize_to_synapse_types(&mut self, models: &dyn SynapseTypeRegistry) {
        if !self.mutation_allowed("resize_to_synapse_types") {
            return;
        }
        let columns = models.num_synapse_types();
        for shard in &mut self.shards {
            for row in &mut shard.to_device {
                grow_columns(row, columns);
            }
            for row in &mut shard.from_device {
                grow_columns(row, columns);
            }
        }
        debug!(columns, "device tables resized to synapse model count");
    }

    /// Record that the device `gid` on `partition` originates at least one
    /// connection, so the from-device query pass will visit it.
    pub fn register_sending_device(
        &mut self,
        partition: PartitionId,
        gid: NodeGid,
        nodes: &dyn NodeRegistry,
    ) {
        if !self.mutation_allowed("register_sending_device") {
            return;
        }
        let ldid = nodes
            .node_or_proxy(gid, partition)
            .local_device_id()
            .unwrap_or_else(|| panic!("{gid} is not a device on {partition}"));
        let shard = self.shard_mut(partition);
        shard.sending_devices[ldid.0] = Some(gid);
    }

    /// Devices on `partition` known to originate connections, in ascending
    /// local-device-id order.
    pub fn sending_devices(&self, partition: PartitionId) -> impl Iterator<Item = NodeGid> + '_ {
        self.shard(partition).sending_devices.iter().flatten().copied()
    }

    /// Owned slot for neuron→device connections of type `syn_type`
    /// originating at local node `lid`. The connection-management layer
    /// installs containers here; the index only owns them.
    pub fn to_device_slot_mut(
        &mut self,
        partition: PartitionId,
        lid: LocalNodeId,
        syn_type: SynapseTypeId,
    ) -> &mut ConnectionSlot {
        &mut self.shard_mut(partition).to_device[lid.0][syn_type.0]
    }

    /// Owned slot for device→neuron connections of type `syn_type`
    /// originating at local device `ldid`.
    pub fn from_device_slot_mut(
        &mut self,
        partition: PartitionId,
        ldid: LocalDeviceId,
        syn_type: SynapseTypeId,
    ) -> &mut ConnectionSlot {
        &mut self.shard_mut(partition).from_device[ldid.0][syn_type.0]
    }

    /// Append every connection on `partition` of type `syn_type` matching
    /// the filters to `out` (`None` filters match anything).
    ///
    /// Two passes in fixed order: neuron→device first, then device→neuron,
    /// each in ascending local-id order. The passes cover disjoint
    /// connection categories, so nothing is reported twice. Callers must
    /// guarantee that a specific `source` is consistent with `partition`;
    /// a stale mapping fails fast. On a finalized (or never-initialized)
    /// index the query is a defined no-op.
    #[allow(clippy::too_many_arguments)]
    pub fn get_connections(
        &self,
        source: Option<NodeGid>,
        target: Option<NodeGid>,
        partition: PartitionId,
        syn_type: SynapseTypeId,
        label: Option<SynapseLabel>,
        translation: &dyn IdTranslation,
        nodes: &dyn NodeRegistry,
        out: &mut Vec<ConnectionDescriptor>,
    ) {
        if self.state != Lifecycle::Live {
            trace!("connection query on a non-live index; empty result");
            return;
        }
        let shard = self.shard(partition);
        shard.collect_to_device(source, target, partition, syn_type, label, translation, out);
        shard.collect_from_device(source, target, partition, syn_type, label, nodes, out);
        trace!(
            partition = partition.0,
            syn_type = syn_type.0,
            matches = out.len(),
            "connection query finished"
        );
    }

    /// [`get_connections`](Self::get_connections) into a fresh vector.
    #[allow(clippy::too_many_arguments)]
    pub fn connections(
        &self,
        source: Option<NodeGid>,
        target: Option<NodeGid>,
        partition: PartitionId,
        syn_type: SynapseTypeId,
        label: Option<SynapseLabel>,
        translation: &dyn IdTranslation,
        nodes: &dyn NodeRegistry,
    ) -> Vec<ConnectionDescriptor> {
        let mut out = Vec::new();
        self.get_connections(
            source,
            target,
            partition,
            syn_type,
            label,
            translation,
            nodes,
            &mut out,
        );
        out
    }

    /// Whether a mutating operation may proceed. Mutating a finalized index
    /// is a defined no-op; mutating a never-initialized one is a
    /// programming error.
    fn mutation_allowed(&self, operation: &str) -> bool {
        match self.state {
            Lifecycle::Live => true,
            Lifecycle::Finalized => {
                debug!(operation, "ignored on a finalized index");
                false
            }
            Lifecycle::Created => panic!("{operation} called before initialize"),
        }
    }

    fn shard(&self, partition: PartitionId) -> &PartitionShard {
        assert!(
            partition.0 < self.shards.len(),
            "{partition} is outside the initialized range 0..{}",
            self.shards.len()
        );
        &self.shards[partition.0]
    }

    fn shard_mut(&mut self, partition: PartitionId) -> &mut PartitionShard {
        assert!(
            partition.0 < self.shards.len(),
            "{partition} is outside the initialized range 0..{}",
            self.shards.len()
        );
        &mut self.shards[partition.0]
    }

    #[cfg(test)]
    fn table_shape(&self, partition: PartitionId) -> (usize, usize, usize) {
        let shard = self.shard(partition);
        (
            shard.to_device.len(),
            shard.from_device.len(),
            shard.sending_devices.len(),
        )
    }
}
