// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The foundation crate for nerva. Defines the identity and descriptor types
//! shared by every kernel component.

mod connection;
mod ids;

pub use connection::ConnectionDescriptor;
pub use ids::{LocalDeviceId, LocalNodeId, NodeGid, PartitionId, SynapseLabel, SynapseTypeId};
