// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Connection containers
//!
//! A container aggregates every connection of one synapse type originating
//! at one node or device. The connection index treats containers through
//! two contracts only: enumeration ([`ConnectionContainer`]) and exclusive
//! ownership (each container lives in exactly one [`ConnectionSlot`] and is
//! released when its slot is).

use core::fmt;
use nerva_structures::{ConnectionDescriptor, NodeGid, PartitionId, SynapseLabel, SynapseTypeId};

/// Enumeration contract every connection container fulfils
pub trait ConnectionContainer: fmt::Debug + Send {
    /// Number of connections held
    fn num_connections(&self) -> usize;

    /// Append a descriptor for every held connection matching the target and
    /// label filters (`None` matches anything). `source` is the recovered
    /// global id of the node owning this container; the container itself
    /// does not store it.
    fn collect_matching(
        &self,
        source: NodeGid,
        target: Option<NodeGid>,
        partition: PartitionId,
        syn_type: SynapseTypeId,
        label: Option<SynapseLabel>,
        out: &mut Vec<ConnectionDescriptor>,
    );
}

/// An owned, possibly empty container slot
pub type ConnectionSlot = Option<Box<dyn ConnectionContainer>>;

/// Vector-backed container for device-coupled connections of one synapse type
#[derive(Debug, Default)]
pub struct DeviceConnectionList {
    /// Target gid per connection
    targets: Vec<NodeGid>,
    /// Optional user label per connection
    labels: Vec<Option<SynapseLabel>>,
}

impl DeviceConnectionList {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a connection and return its port (position in this container).
    pub fn push(&mut self, target: NodeGid, label: Option<SynapseLabel>) -> usize {
        let port = self.targets.len();
        self.targets.push(target);
        self.labels.push(label);
        port
    }
}

impl ConnectionContainer for DeviceConnectionList {
    fn num_connections(&self) -> usize {
        self.targets.len()
    }

    fn collect_matching(
        &self,
        source: NodeGid,
        target: Option<NodeGid>,
        partition: PartitionId,
        syn_type: SynapseTypeId,
        label: Option<SynapseLabel>,
        out: &mut Vec<ConnectionDescriptor>,
    ) {
        for (port, (&conn_target, &conn_label)) in
            self.targets.iter().zip(&self.labels).enumerate()
        {
            if target.is_some_and(|want| want != conn_target) {
                continue;
            }
            // a labelled filter only matches connections carrying that label
            if label.is_some_and(|want| conn_label != Some(want)) {
                continue;
            }
            out.push(ConnectionDescriptor {
                source,
                target: conn_target,
                partition,
                syn_type,
                port,
            });
        }
    }
}
