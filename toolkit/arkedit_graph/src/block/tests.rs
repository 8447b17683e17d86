use pretty_assertions::assert_eq;

use arkedit_core::Status;

use crate::graph::Graph;
use crate::opcode::{DynOpcode, IsaKind, Opcode};
use crate::test_helpers::{diamond, linear, ok};

// ── Edge queries ────────────────────────────────────────────────────

#[test]
fn succs_and_preds_are_symmetric() {
    let (graph, a, b, c, _) = diamond();
    assert_eq!(ok(graph.succs(a)), vec![b, c]);
    assert_eq!(ok(graph.preds(b)), vec![a]);
    assert_eq!(ok(graph.preds(c)), vec![a]);
}

#[test]
fn succ_order_is_insertion_order() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let target = graph.create_empty_block();
    let first = graph.create_empty_block();
    let second = graph.create_empty_block();
    let third = graph.create_empty_block();
    ok(graph.append_succ(target, first));
    ok(graph.append_succ(target, second));
    ok(graph.append_succ(target, third));
    assert_eq!(ok(graph.succs(target)), vec![first, second, third]);
}

#[test]
fn indexed_succ_out_of_range_is_an_error_not_a_value() {
    let (graph, a, _, _, _) = diamond();
    let err = match graph.succ(a, 99) {
        Ok(_) => panic!("succ(99) should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::OutOfRange);
    assert!(err.to_string().contains("99"));
}

#[test]
fn indexed_pred_out_of_range() {
    let (graph, _, b, _, _) = diamond();
    assert!(graph.pred(b, 0).is_ok());
    let err = match graph.pred(b, 1) {
        Ok(_) => panic!("pred(1) should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::OutOfRange);
}

// ── Edge mutation ───────────────────────────────────────────────────

#[test]
fn append_succ_updates_both_sides() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let new_bb = graph.create_empty_block();
    let start = graph.start_block();
    ok(graph.append_succ(start, new_bb));
    assert!(ok(graph.succs(start)).contains(&new_bb));
    assert_eq!(ok(graph.pred_count(new_bb)), 1);
    assert_eq!(ok(graph.pred(new_bb, 0)), start);
}

#[test]
fn insert_succ_at_position() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let target = graph.create_empty_block();
    let first = graph.create_empty_block();
    let second = graph.create_empty_block();
    let inserted = graph.create_empty_block();
    ok(graph.append_succ(target, first));
    ok(graph.append_succ(target, second));
    ok(graph.insert_succ(target, inserted, 1));
    assert_eq!(ok(graph.succs(target)), vec![first, inserted, second]);
}

#[test]
fn erase_succ_removes_the_back_edge_too() {
    let (mut graph, a, b, c, _) = diamond();
    ok(graph.erase_succ(a, 0)); // a → b
    assert_eq!(ok(graph.succs(a)), vec![c]);
    assert_eq!(ok(graph.pred_count(b)), 0);
}

#[test]
fn erase_succ_out_of_range() {
    let (mut graph, a, _, _, _) = diamond();
    let err = match graph.erase_succ(a, 5) {
        Ok(()) => panic!("erase(5) should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::OutOfRange);
}

#[test]
fn set_succ_rewires_predecessors() {
    let (mut graph, a, b, _, d) = diamond();
    let replacement = graph.create_empty_block();
    ok(graph.set_succ(a, 0, replacement)); // a → b becomes a → replacement
    assert_eq!(ok(graph.succ(a, 0)), replacement);
    assert_eq!(ok(graph.pred_count(b)), 0);
    assert_eq!(ok(graph.preds(replacement)), vec![a]);
    // d keeps its other predecessor.
    assert!(ok(graph.preds(d)).contains(&b));
}

// ── Visitors ────────────────────────────────────────────────────────

#[test]
fn visit_succs_sees_every_edge_in_order() {
    let (graph, a, b, c, _) = diamond();
    let mut seen = Vec::new();
    ok(graph.visit_succs(a, |bb| seen.push(bb)));
    assert_eq!(seen, vec![b, c]);
}

#[test]
fn visit_preds_short_circuits_on_false() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let target = graph.create_empty_block();
    for _ in 0..4 {
        let pred = graph.create_empty_block();
        ok(graph.append_succ(pred, target));
    }

    let mut visited = 0;
    let completed = ok(graph.visit_preds(target, |_| {
        visited += 1;
        visited < 2
    }));
    assert!(!completed);
    assert_eq!(visited, 2, "visitation must stop at the refusing callback");
}

#[test]
fn visit_preds_completes_when_callbacks_accept() {
    let (graph, _, b, c, d) = diamond();
    let mut seen = Vec::new();
    let completed = ok(graph.visit_preds(d, |bb| {
        seen.push(bb);
        true
    }));
    assert!(completed);
    assert_eq!(seen, vec![b, c]);
}

// ── Instruction chains ──────────────────────────────────────────────

#[test]
fn add_inst_front_becomes_first() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let bb = graph.create_empty_block();
    let first = ok(graph.dyn_isa().create_ldtrue());
    let second = ok(graph.dyn_isa().create_ldfalse());
    ok(graph.add_inst_back(bb, first));
    ok(graph.add_inst_front(bb, second));

    assert_eq!(ok(graph.first_inst(bb)), Some(second));
    assert_eq!(ok(graph.last_inst(bb)), Some(first));
    assert_eq!(ok(graph.instructions(bb)), vec![second, first]);
}

#[test]
fn instruction_chain_links_are_consistent() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let bb = graph.create_empty_block();
    let a = ok(graph.dyn_isa().create_ldtrue());
    let b = ok(graph.dyn_isa().create_ldfalse());
    let c = ok(graph.dyn_isa().create_ldnull());
    ok(graph.add_inst_back(bb, a));
    ok(graph.add_inst_back(bb, b));
    ok(graph.add_inst_back(bb, c));

    assert_eq!(ok(graph.next_inst(a)), Some(b));
    assert_eq!(ok(graph.prev_inst(c)), Some(b));
    assert_eq!(ok(graph.next_inst(c)), None);
    assert_eq!(ok(graph.number_of_insts(bb)), 3);
}

#[test]
fn attaching_twice_is_inconsistent_state() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let bb = graph.create_empty_block();
    let other = graph.create_empty_block();
    let inst = ok(graph.dyn_isa().create_ldtrue());
    ok(graph.add_inst_back(bb, inst));
    let err = match graph.add_inst_front(other, inst) {
        Ok(()) => panic!("second attach should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::InconsistentState);
}

#[test]
fn insert_after_and_before_anchor() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let bb = graph.create_empty_block();
    let anchor = ok(graph.dyn_isa().create_ldtrue());
    ok(graph.add_inst_back(bb, anchor));

    let after = ok(graph.dyn_isa().create_ldfalse());
    ok(graph.insert_after(after, anchor));
    let before = ok(graph.dyn_isa().create_ldnull());
    ok(graph.insert_before(before, anchor));

    assert_eq!(ok(graph.instructions(bb)), vec![before, anchor, after]);
    assert_eq!(ok(graph.last_inst(bb)), Some(after));
}

#[test]
fn remove_all_insts_empties_the_block() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let bb = graph.create_empty_block();
    let a = ok(graph.dyn_isa().create_ldtrue());
    let b = ok(graph.dyn_isa().create_not(a));
    ok(graph.add_inst_back(bb, a));
    ok(graph.add_inst_back(bb, b));

    ok(graph.remove_all_insts(bb));
    assert_eq!(ok(graph.number_of_insts(bb)), 0);
    assert_eq!(ok(graph.first_inst(bb)), None);
    // Removed instructions are stale now.
    assert!(graph.opcode(a).is_err());
}

// ── Splitting ───────────────────────────────────────────────────────

#[test]
fn split_moves_tail_instructions_and_successors() {
    let (mut graph, chain) = linear(1);
    let bb = chain[0];
    let a = ok(graph.dyn_isa().create_ldtrue());
    let b = ok(graph.dyn_isa().create_ldfalse());
    let c = ok(graph.dyn_isa().create_ldnull());
    ok(graph.add_inst_back(bb, a));
    ok(graph.add_inst_back(bb, b));
    ok(graph.add_inst_back(bb, c));

    let end = graph.end_block();
    let new_bb = ok(graph.split_block_after(a));

    assert_eq!(ok(graph.instructions(bb)), vec![a]);
    assert_eq!(ok(graph.instructions(new_bb)), vec![b, c]);
    assert_eq!(ok(graph.inst_block(b)), Some(new_bb));

    // Old successors now hang off the new block; the old block jumps to it.
    assert_eq!(ok(graph.succs(bb)), vec![new_bb]);
    assert_eq!(ok(graph.succs(new_bb)), vec![end]);
    assert_eq!(ok(graph.preds(end)), vec![new_bb]);
}

#[test]
fn split_after_last_instruction_leaves_empty_tail() {
    let (mut graph, chain) = linear(1);
    let bb = chain[0];
    let only = ok(graph.dyn_isa().create_ldtrue());
    ok(graph.add_inst_back(bb, only));

    let new_bb = ok(graph.split_block_after(only));
    assert_eq!(ok(graph.number_of_insts(new_bb)), 0);
    assert_eq!(ok(graph.last_inst(bb)), Some(only));
}

#[test]
fn split_after_unattached_instruction_fails() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let dangling = ok(graph.dyn_isa().create_ldtrue());
    let err = match graph.split_block_after(dangling) {
        Ok(_) => panic!("split should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);
}

// ── Phis ────────────────────────────────────────────────────────────

#[test]
fn create_phi_pins_to_block_head_with_inputs() {
    let (mut graph, _, b, c, d) = diamond();
    let from_b = ok(graph.dyn_isa().create_ldtrue());
    ok(graph.add_inst_back(b, from_b));
    let from_c = ok(graph.dyn_isa().create_ldfalse());
    ok(graph.add_inst_back(c, from_c));

    let phi = ok(graph.create_phi(d, &[from_b, from_c]));
    assert_eq!(ok(graph.first_inst(d)), Some(phi));
    assert_eq!(ok(graph.opcode(phi)), Opcode::Dynamic(DynOpcode::Phi));
    assert_eq!(ok(graph.inputs(phi)), vec![from_b, from_c]);
    assert_eq!(ok(graph.users(from_b)), vec![phi]);
}

#[test]
fn create_catch_phi_uses_catch_phi_opcode() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let bb = graph.create_empty_block();
    let phi = ok(graph.create_catch_phi(bb, &[]));
    assert_eq!(ok(graph.opcode(phi)), Opcode::Dynamic(DynOpcode::CatchPhi));
}
