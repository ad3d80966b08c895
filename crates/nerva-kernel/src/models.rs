// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synapse model registry
//!
//! Models are registered once during network construction and identified by
//! a dense [`SynapseTypeId`]. The registry only ever grows; connection
//! tables are re-columned after each registration via
//! [`crate::DeviceConnectionIndex::resize_to_synapse_types`].

use crate::error::{KernelError, KernelResult};
use ahash::AHashMap;
use nerva_structures::SynapseTypeId;

/// Reports how many synapse models are registered
pub trait SynapseTypeRegistry {
    /// Number of registered synapse models
    fn num_synapse_types(&self) -> usize;
}

/// Name-keyed registry of synapse models
#[derive(Debug, Default)]
pub struct SynapseModelRegistry {
    names: Vec<String>,
    by_name: AHashMap<String, SynapseTypeId>,
}

impl SynapseModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry sized for `models` registrations, e.g. from
    /// [`KernelConfig::initial_synapse_models`](crate::KernelConfig).
    pub fn with_capacity(models: usize) -> Self {
        Self {
            names: Vec::with_capacity(models),
            by_name: AHashMap::with_capacity(models),
        }
    }

    /// Register a model and return its dense id.
    pub fn register(&mut self, name: &str) -> KernelResult<SynapseTypeId> {
        if self.by_name.contains_key(name) {
            return Err(KernelError::DuplicateSynapseModel(name.to_string()));
        }
        let id = SynapseTypeId(self.names.len());
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Id of a registered model, if any.
    pub fn id_of(&self, name: &str) -> Option<SynapseTypeId> {
        self.by_name.get(name).copied()
    }

    /// Name of a registered model, if any.
    pub fn name_of(&self, id: SynapseTypeId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }
}

impl SynapseTypeRegistry for SynapseModelRegistry {
    fn num_synapse_types(&self) -> usize {
        self.names.len()
    }
}
