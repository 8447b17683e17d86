//! Property tests for traversal determinism and constant interning.

use proptest::prelude::*;

use arkedit_graph::{Graph, IsaKind};

/// Build a graph whose shape is driven by a random edge list over a small
/// block universe. Edges into/out of the universe bounds are wired to the
/// start and end blocks so the graph stays well formed.
fn graph_from_edges(block_count: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let blocks: Vec<_> = (0..block_count)
        .map(|_| graph.create_empty_block())
        .collect();
    if let Some(&first) = blocks.first() {
        graph
            .append_succ(graph.start_block(), first)
            .unwrap_or_else(|e| panic!("{e}"));
    }
    for &(from, to) in edges {
        let from = blocks[from % block_count];
        let to = blocks[to % block_count];
        graph.append_succ(from, to).unwrap_or_else(|e| panic!("{e}"));
    }
    if let Some(&last) = blocks.last() {
        graph
            .append_succ(last, graph.end_block())
            .unwrap_or_else(|e| panic!("{e}"));
    }
    graph
}

proptest! {
    /// Two consecutive RPO enumerations of an unchanged graph are equal
    /// element for element.
    #[test]
    fn rpo_is_deterministic(
        block_count in 1usize..12,
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..24),
    ) {
        let graph = graph_from_edges(block_count, &edges);
        let first = graph.blocks_rpo().unwrap_or_else(|e| panic!("{e}"));
        let second = graph.blocks_rpo().unwrap_or_else(|e| panic!("{e}"));
        prop_assert_eq!(first, second);
    }

    /// Every block an RPO enumeration yields is live and reachable; the
    /// start block always leads.
    #[test]
    fn rpo_yields_only_reachable_blocks(
        block_count in 1usize..12,
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..24),
    ) {
        let graph = graph_from_edges(block_count, &edges);
        let rpo = graph.blocks_rpo().unwrap_or_else(|e| panic!("{e}"));
        prop_assert_eq!(rpo[0], graph.start_block());
        for bb in rpo {
            prop_assert!(graph.succs(bb).is_ok());
        }
    }

    /// Interning the same i32 repeatedly always yields the first handle.
    #[test]
    fn constant_interning_is_idempotent(values in proptest::collection::vec(any::<i32>(), 1..64)) {
        let mut graph = Graph::new(IsaKind::Dynamic);
        let mut first_seen = std::collections::HashMap::new();
        for &value in &values {
            let inst = graph.find_or_create_constant_i32(value);
            let entry = first_seen.entry(value).or_insert(inst);
            prop_assert_eq!(*entry, inst);
            prop_assert_eq!(
                graph.constant_i32(inst).unwrap_or_else(|e| panic!("{e}")),
                value
            );
        }
    }

    /// A predecessor visitor that refuses after k callbacks is called
    /// exactly k times, regardless of how many predecessors exist.
    #[test]
    fn pred_visitor_short_circuits(pred_count in 1usize..10, stop_after in 1usize..10) {
        let stop_after = stop_after.min(pred_count);
        let mut graph = Graph::new(IsaKind::Dynamic);
        let target = graph.create_empty_block();
        for _ in 0..pred_count {
            let pred = graph.create_empty_block();
            graph.append_succ(pred, target).unwrap_or_else(|e| panic!("{e}"));
        }
        let mut calls = 0usize;
        let completed = graph
            .visit_preds(target, |_| {
                calls += 1;
                calls < stop_after
            })
            .unwrap_or_else(|e| panic!("{e}"));
        prop_assert_eq!(calls, stop_after);
        prop_assert!(!completed, "a refusing callback must report early termination");
    }
}
