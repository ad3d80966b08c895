// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Kernel error types
//!
//! These cover the fallible bookkeeping surfaces (registries, directories).
//! Structural contract violations inside the connection tables fail fast
//! instead of surfacing here; see [`crate::device_index`].

use nerva_structures::{NodeGid, PartitionId};
use thiserror::Error;

/// Errors raised by kernel registries and directories
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// A gid was registered twice on the same partition
    #[error("node {gid} is already registered on {partition}")]
    DuplicateNode { gid: NodeGid, partition: PartitionId },

    /// A synapse model name was registered twice
    #[error("synapse model '{0}' is already registered")]
    DuplicateSynapseModel(String),

    /// A partition id outside the configured topology
    #[error("{partition} is outside the configured range 0..{partitions}")]
    UnknownPartition { partition: PartitionId, partitions: usize },
}

/// Result type for kernel bookkeeping operations
pub type KernelResult<T> = Result<T, KernelError>;
