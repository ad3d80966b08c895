// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Enumeration tests for the device connection index.
//!
//! These tests drive the read side through the in-memory kernel seams:
//! round-robin id translation and the node directory.

use nerva::prelude::*;
use std::collections::HashSet;

struct Fixture {
    translation: RoundRobinTranslation,
    nodes: NodeDirectory,
    models: SynapseModelRegistry,
    index: DeviceConnectionIndex,
}

/// Two partitions, three synapse models, empty tables.
fn two_partition_fixture() -> Fixture {
    let topology = FixedPartitions::new(2);
    let translation = RoundRobinTranslation::from_topology(&topology);
    let nodes = NodeDirectory::new(2);
    let mut models = SynapseModelRegistry::new();
    for name in ["static", "stdp", "gap"] {
        models.register(name).unwrap();
    }
    let mut index = DeviceConnectionIndex::new();
    index.initialize(&topology);
    Fixture {
        translation,
        nodes,
        models,
        index,
    }
}

fn single_connection_list(target: NodeGid, label: Option<SynapseLabel>) -> DeviceConnectionList {
    let mut list = DeviceConnectionList::new();
    list.push(target, label);
    list
}

#[test]
fn test_neuron_to_device_connection_is_enumerated() {
    let mut fx = two_partition_fixture();

    // neuron gid 1 lives on partition 0 at local id 1; device gid 2 beside it
    fx.nodes
        .register_neuron(NodeGid(1), PartitionId(0), LocalNodeId(1))
        .unwrap();
    fx.nodes.register_device(NodeGid(2), PartitionId(0)).unwrap();
    fx.index.resize_to_node_counts(&fx.nodes);
    fx.index.resize_to_synapse_types(&fx.models);

    *fx.index
        .to_device_slot_mut(PartitionId(0), LocalNodeId(1), SynapseTypeId(1)) =
        Some(Box::new(single_connection_list(NodeGid(2), None)));

    let found = fx.index.connections(
        None,
        None,
        PartitionId(0),
        SynapseTypeId(1),
        None,
        &fx.translation,
        &fx.nodes,
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].source, NodeGid(1));
    assert_eq!(found[0].target, NodeGid(2));
    assert_eq!(found[0].partition, PartitionId(0));
    assert_eq!(found[0].syn_type, SynapseTypeId(1));

    // the other synapse types hold nothing
    for syn in [SynapseTypeId(0), SynapseTypeId(2)] {
        let empty = fx.index.connections(
            None,
            None,
            PartitionId(0),
            syn,
            None,
            &fx.translation,
            &fx.nodes,
        );
        assert!(empty.is_empty());
    }
}

#[test]
fn test_device_to_neuron_connection_respects_source_filter() {
    let mut fx = two_partition_fixture();

    // two devices on partition 1; gid 7 gets local device id 2
    fx.nodes.register_device(NodeGid(5), PartitionId(1)).unwrap();
    let ldid = fx.nodes.register_device(NodeGid(7), PartitionId(1)).unwrap();
    assert_eq!(ldid, LocalDeviceId(2));
    // target neuron gid 9 (partition 0, local id 5)
    fx.nodes
        .register_neuron(NodeGid(9), PartitionId(0), LocalNodeId(5))
        .unwrap();
    fx.index.resize_to_node_counts(&fx.nodes);
    fx.index.resize_to_synapse_types(&fx.models);

    *fx.index.from_device_slot_mut(PartitionId(1), ldid, SynapseTypeId(0)) =
        Some(Box::new(single_connection_list(NodeGid(9), None)));
    fx.index
        .register_sending_device(PartitionId(1), NodeGid(7), &fx.nodes);

    let found = fx.index.connections(
        Some(NodeGid(7)),
        Some(NodeGid(9)),
        PartitionId(1),
        SynapseTypeId(0),
        None,
        &fx.translation,
        &fx.nodes,
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].source, NodeGid(7));
    assert_eq!(found[0].target, NodeGid(9));

    // wrong source gid matches nothing
    let missed = fx.index.connections(
        Some(NodeGid(8)),
        Some(NodeGid(9)),
        PartitionId(1),
        SynapseTypeId(0),
        None,
        &fx.translation,
        &fx.nodes,
    );
    assert!(missed.is_empty());
}

#[test]
fn test_reserved_row_never_yields_connections() {
    let mut fx = two_partition_fixture();
    fx.nodes
        .register_neuron(NodeGid(1), PartitionId(0), LocalNodeId(1))
        .unwrap();
    fx.index.resize_to_node_counts(&fx.nodes);
    fx.index.resize_to_synapse_types(&fx.models);

    // even a container wrongly installed in the reserved row stays invisible
    *fx.index
        .to_device_slot_mut(PartitionId(0), LocalNodeId(0), SynapseTypeId(0)) =
        Some(Box::new(single_connection_list(NodeGid(2), None)));

    let found = fx.index.connections(
        None,
        None,
        PartitionId(0),
        SynapseTypeId(0),
        None,
        &fx.translation,
        &fx.nodes,
    );
    assert!(found.is_empty());
}

#[test]
fn test_passes_cover_disjoint_categories() {
    let mut fx = two_partition_fixture();

    fx.nodes
        .register_neuron(NodeGid(1), PartitionId(0), LocalNodeId(1))
        .unwrap();
    let ldid = fx.nodes.register_device(NodeGid(2), PartitionId(0)).unwrap();
    fx.index.resize_to_node_counts(&fx.nodes);
    fx.index.resize_to_synapse_types(&fx.models);

    // neuron 1 → device 2 and device 2 → neuron 1, same synapse type
    *fx.index
        .to_device_slot_mut(PartitionId(0), LocalNodeId(1), SynapseTypeId(0)) =
        Some(Box::new(single_connection_list(NodeGid(2), None)));
    *fx.index.from_device_slot_mut(PartitionId(0), ldid, SynapseTypeId(0)) =
        Some(Box::new(single_connection_list(NodeGid(1), None)));
    fx.index
        .register_sending_device(PartitionId(0), NodeGid(2), &fx.nodes);

    let found = fx.index.connections(
        None,
        None,
        PartitionId(0),
        SynapseTypeId(0),
        None,
        &fx.translation,
        &fx.nodes,
    );
    assert_eq!(found.len(), 2);

    // to-device pass reports first, and no (source, target, syn) repeats
    assert_eq!(found[0].source, NodeGid(1));
    assert_eq!(found[1].source, NodeGid(2));
    let keys: HashSet<_> = found
        .iter()
        .map(|c| (c.source, c.target, c.syn_type))
        .collect();
    assert_eq!(keys.len(), found.len());
}

#[test]
fn test_label_filter_selects_labelled_connections() {
    let mut fx = two_partition_fixture();
    fx.nodes
        .register_neuron(NodeGid(1), PartitionId(0), LocalNodeId(1))
        .unwrap();
    fx.nodes.register_device(NodeGid(2), PartitionId(0)).unwrap();
    fx.index.resize_to_node_counts(&fx.nodes);
    fx.index.resize_to_synapse_types(&fx.models);

    let mut list = DeviceConnectionList::new();
    list.push(NodeGid(2), Some(SynapseLabel(4)));
    list.push(NodeGid(2), None);
    *fx.index
        .to_device_slot_mut(PartitionId(0), LocalNodeId(1), SynapseTypeId(0)) =
        Some(Box::new(list));

    let labelled = fx.index.connections(
        None,
        None,
        PartitionId(0),
        SynapseTypeId(0),
        Some(SynapseLabel(4)),
        &fx.translation,
        &fx.nodes,
    );
    assert_eq!(labelled.len(), 1);
    assert_eq!(labelled[0].port, 0);

    let all = fx.index.connections(
        None,
        None,
        PartitionId(0),
        SynapseTypeId(0),
        None,
        &fx.translation,
        &fx.nodes,
    );
    assert_eq!(all.len(), 2);
}

#[test]
fn test_specific_source_queries_only_its_row() {
    let mut fx = two_partition_fixture();
    // neurons gid 1 and gid 3 both live on partition 0 (local ids 1 and 2)
    fx.nodes
        .register_neuron(NodeGid(1), PartitionId(0), LocalNodeId(1))
        .unwrap();
    fx.nodes
        .register_neuron(NodeGid(3), PartitionId(0), LocalNodeId(2))
        .unwrap();
    fx.nodes.register_device(NodeGid(2), PartitionId(0)).unwrap();
    fx.index.resize_to_node_counts(&fx.nodes);
    fx.index.resize_to_synapse_types(&fx.models);

    for lid in [LocalNodeId(1), LocalNodeId(2)] {
        *fx.index.to_device_slot_mut(PartitionId(0), lid, SynapseTypeId(0)) =
            Some(Box::new(single_connection_list(NodeGid(2), None)));
    }

    let found = fx.index.connections(
        Some(NodeGid(3)),
        None,
        PartitionId(0),
        SynapseTypeId(0),
        None,
        &fx.translation,
        &fx.nodes,
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].source, NodeGid(3));
}
