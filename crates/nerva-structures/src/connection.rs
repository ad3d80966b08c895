// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Connection descriptor returned by enumeration queries

use crate::ids::{NodeGid, PartitionId, SynapseTypeId};
use core::fmt;
use serde::{Deserialize, Serialize};

/// One enumerated connection between a node and a device.
///
/// Descriptors are produced by read-side queries only; they identify a
/// connection but do not grant access to its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Global id of the source node
    pub source: NodeGid,

    /// Global id of the target node
    pub target: NodeGid,

    /// Partition whose tables hold the connection
    pub partition: PartitionId,

    /// Synapse model of the connection
    pub syn_type: SynapseTypeId,

    /// Position of the connection within its container
    pub port: usize,
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}, {}, port {})",
            self.source, self.target, self.partition, self.syn_type, self.port
        )
    }
}
