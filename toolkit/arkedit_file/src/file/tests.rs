use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;

use arkedit_core::{Error, ErrorHandler, FunctionId, Result, Status};
use arkedit_graph::{Graph, IsaKind};

use super::*;

fn ok<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {e}"))
}

/// Handler that records the status of every surfaced error.
#[derive(Default)]
struct CollectingHandler {
    seen: Mutex<Vec<Status>>,
}

impl ErrorHandler for CollectingHandler {
    fn on_error(&self, error: &Error) {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(error.status());
    }
}

#[test]
fn fresh_file_is_empty() {
    let file = File::new("app.abc", IsaKind::Dynamic);
    assert_eq!(file.name(), "app.abc");
    assert_eq!(file.target(), IsaKind::Dynamic);
    assert!(file.modules().is_empty());
    assert!(file.all_functions().is_empty());
}

#[test]
fn modules_enumerate_in_creation_order() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let entry = file.add_module("entry");
    let util = file.add_module("util");
    assert_eq!(file.modules(), vec![entry, util]);
    assert_eq!(ok(file.module_name(entry)).as_ref(), "entry");
    assert_eq!(ok(file.module_name(util)).as_ref(), "util");
}

#[test]
fn enumerate_modules_short_circuits() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    file.add_module("a");
    file.add_module("b");
    file.add_module("c");

    let mut visited = 0;
    let completed = file.enumerate_modules(|_| {
        visited += 1;
        false
    });
    assert!(!completed);
    assert_eq!(visited, 1);
}

#[test]
fn all_functions_walks_modules_and_classes() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let top_level = ok(file.add_function(module, "main"));
    let class = ok(file.add_class(module, "Widget"));
    let method = ok(file.add_method(class, "render"));
    let ctor = ok(file.add_method(class, "constructor"));

    let all: Vec<FunctionId> = file.all_functions();
    assert_eq!(all.len(), 3);
    assert!(all.contains(&top_level));
    assert!(all.contains(&method));
    assert!(all.contains(&ctor));
}

#[test]
fn method_named_constructor_is_a_ctor() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let class = ok(file.add_class(module, "Widget"));
    let ctor = ok(file.add_method(class, "constructor"));
    let plain = ok(file.add_method(class, "render"));
    assert!(ok(file.function_is_ctor(ctor)));
    assert!(!ok(file.function_is_ctor(plain)));
}

#[test]
fn empty_name_marks_function_anonymous() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let anonymous = ok(file.add_function(module, ""));
    let named = ok(file.add_function(module, "main"));
    assert!(ok(file.function_is_anonymous(anonymous)));
    assert!(!ok(file.function_is_anonymous(named)));
}

#[test]
fn string_interning_is_file_wide() {
    let file = File::new("app.abc", IsaKind::Dynamic);
    let first = file.create_string("console");
    let second = file.create_string("console");
    assert_eq!(first, second);
    assert_eq!(ok(file.string(first)).as_ref(), "console");
}

#[test]
fn stale_module_handle_is_bad_argument() {
    let file = File::new("app.abc", IsaKind::Dynamic);
    let err = match file.module_name(arkedit_core::ModuleId::new(9)) {
        Ok(_) => panic!("lookup should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);
}

// ── Graph checkout / commit ─────────────────────────────────────────

#[test]
fn take_graph_materializes_lazily() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let function = ok(file.add_function(module, "main"));

    assert!(ok(file.function_graph(function)).is_none());
    let graph = ok(file.take_graph(function));
    assert_eq!(graph.isa(), IsaKind::Dynamic);
    assert_eq!(graph.number_of_blocks(), 2);
}

#[test]
fn double_checkout_is_inconsistent_state() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let function = ok(file.add_function(module, "main"));

    let _graph = ok(file.take_graph(function));
    let err = match file.take_graph(function) {
        Ok(_) => panic!("second checkout should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::InconsistentState);
}

#[test]
fn commit_round_trips_edits() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let function = ok(file.add_function(module, "main"));

    let mut graph = ok(file.take_graph(function));
    let new_bb = graph.create_empty_block();
    ok(graph.append_succ(graph.start_block(), new_bb));
    ok(file.set_graph(function, graph));

    let committed = ok(file.function_graph(function)).unwrap_or_else(|| panic!("graph missing"));
    assert_eq!(committed.number_of_blocks(), 3);

    // Check out again: the edit survives the next cycle.
    let again = ok(file.take_graph(function));
    assert_eq!(again.number_of_blocks(), 3);
}

#[test]
fn foreign_graph_cannot_be_committed() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let function = ok(file.add_function(module, "main"));

    let foreign = Graph::new(IsaKind::Dynamic);
    let err = match file.set_graph(function, foreign) {
        Ok(()) => panic!("commit should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);
}

#[test]
fn checked_out_graph_shares_the_file_string_table() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let function = ok(file.add_function(module, "main"));

    let mut graph = ok(file.take_graph(function));
    let inst = ok(graph.dyn_isa().create_load_string("shared-text"));
    let id = ok(graph.inst_string(inst));
    ok(file.set_graph(function, graph));

    // The operand is resolvable through the file's own table.
    assert_eq!(ok(file.string(id)).as_ref(), "shared-text");
}

// ── Error handler plumbing ──────────────────────────────────────────

#[test]
fn handler_sees_each_error_exactly_once() {
    let handler = Arc::new(CollectingHandler::default());
    let file = File::with_handler(
        "app.abc",
        IsaKind::Dynamic,
        Arc::clone(&handler) as Arc<dyn ErrorHandler>,
    );

    let _ = file.module_name(arkedit_core::ModuleId::new(5));
    let seen = handler
        .seen
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    assert_eq!(seen.as_slice(), &[Status::BadArgument]);
}

#[test]
fn graphs_checked_out_report_through_the_file_handler() {
    let handler = Arc::new(CollectingHandler::default());
    let mut file = File::with_handler(
        "app.abc",
        IsaKind::Dynamic,
        Arc::clone(&handler) as Arc<dyn ErrorHandler>,
    );
    let module = file.add_module("entry");
    let function = ok(file.add_function(module, "main"));

    let graph = ok(file.take_graph(function));
    let _ = graph.succs(arkedit_core::BlockId::new(42));

    let seen = handler
        .seen
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    assert_eq!(seen.as_slice(), &[Status::BadArgument]);
}

// ── Close hook ──────────────────────────────────────────────────────

#[test]
fn close_hook_fires_exactly_once_on_drop() {
    let fired = Arc::new(AtomicUsize::new(0));
    {
        let mut file = File::new("app.abc", IsaKind::Dynamic);
        let counter = Arc::clone(&fired);
        file.set_close_hook(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        // Moving the file must not fire the hook early.
        let moved = file;
        drop(moved);
    }
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn release_suppresses_the_close_hook() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let counter = Arc::clone(&fired);
    file.set_close_hook(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    file.release();
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn close_hook_sees_the_file_name() {
    let observed = Arc::new(Mutex::new(String::new()));
    {
        let mut file = File::new("observed.abc", IsaKind::Dynamic);
        let slot = Arc::clone(&observed);
        file.set_close_hook(move |guard| {
            let mut slot = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            *slot = guard.name().to_string();
        });
        file.close();
    }
    let name = observed
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    assert_eq!(name.as_str(), "observed.abc");
}
