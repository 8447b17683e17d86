//! Shared fixtures for graph tests.

use arkedit_core::{BlockId, Result};

use crate::graph::Graph;
use crate::opcode::IsaKind;

/// Unwrap a toolkit result inside a test, with the error in the message.
pub(crate) fn ok<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {e}"))
}

/// start → b0 → b1 → … → b(n-1) → end, returning the intermediates.
pub(crate) fn linear(n: usize) -> (Graph, Vec<BlockId>) {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let mut chain = Vec::with_capacity(n);
    let mut tail = graph.start_block();
    for _ in 0..n {
        let bb = graph.create_empty_block();
        ok(graph.append_succ(tail, bb));
        chain.push(bb);
        tail = bb;
    }
    ok(graph.append_succ(tail, graph.end_block()));
    (graph, chain)
}

/// Diamond: start → a; a → b, a → c; b → d, c → d; d → end.
pub(crate) fn diamond() -> (Graph, BlockId, BlockId, BlockId, BlockId) {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let a = graph.create_empty_block();
    let b = graph.create_empty_block();
    let c = graph.create_empty_block();
    let d = graph.create_empty_block();
    ok(graph.append_succ(graph.start_block(), a));
    ok(graph.append_succ(a, b));
    ok(graph.append_succ(a, c));
    ok(graph.append_succ(b, d));
    ok(graph.append_succ(c, d));
    ok(graph.append_succ(d, graph.end_block()));
    (graph, a, b, c, d)
}
