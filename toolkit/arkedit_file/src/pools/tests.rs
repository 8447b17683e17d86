use pretty_assertions::assert_eq;

use arkedit_core::{LiteralId, LiteralTag, Result, Status, Value};
use arkedit_graph::IsaKind;

use crate::file::File;

fn ok<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {e}"))
}

#[test]
fn values_round_trip_through_the_pool() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let flag = file.create_value_u1(true);
    let number = file.create_value_double(2.5);
    let text = file.create_value_string("answer");

    assert!(ok(ok(file.value(flag)).as_u1()));
    assert_eq!(ok(ok(file.value(number)).as_double()), 2.5);
    let string_id = ok(ok(file.value(text)).as_string());
    assert_eq!(ok(file.string(string_id)).as_ref(), "answer");
}

#[test]
fn value_accessor_on_wrong_kind_fails() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let flag = file.create_value_u1(false);
    let err = match ok(file.value(flag)).as_double() {
        Ok(_) => panic!("accessor should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::UnsupportedOperation);
}

#[test]
fn literal_tags_follow_constructors() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let cases = [
        (file.create_literal_bool(true), LiteralTag::Bool),
        (file.create_literal_u8(8), LiteralTag::U8),
        (file.create_literal_u16(16), LiteralTag::U16),
        (file.create_literal_u32(32), LiteralTag::U32),
        (file.create_literal_u64(64), LiteralTag::U64),
        (file.create_literal_float(0.5), LiteralTag::Float),
        (file.create_literal_double(0.25), LiteralTag::Double),
        (file.create_literal_string("s"), LiteralTag::String),
    ];
    for (literal, expected) in cases {
        assert_eq!(ok(file.literal_tag(literal)), expected);
    }
}

#[test]
fn method_literal_carries_the_function_name() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let module = file.add_module("entry");
    let function = ok(file.add_function(module, "handler"));
    let literal = ok(file.create_literal_method(function));

    assert_eq!(ok(file.literal_tag(literal)), LiteralTag::Method);
    let name = ok(ok(file.literal(literal)).as_method());
    assert_eq!(ok(file.string(name)).as_ref(), "handler");
}

#[test]
fn literal_string_resolves_text() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let literal = file.create_literal_string("hello");
    assert_eq!(ok(file.literal_string(literal)).as_ref(), "hello");
}

#[test]
fn wrong_literal_accessor_is_unsupported() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let literal = file.create_literal_u32(7);
    let err = match ok(file.literal(literal)).as_bool() {
        Ok(_) => panic!("accessor should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::UnsupportedOperation);
}

// ── Literal arrays ──────────────────────────────────────────────────

#[test]
fn literal_array_preserves_insertion_order() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let elements: Vec<LiteralId> = (0..4).map(|v| file.create_literal_u32(v)).collect();
    let array = ok(file.create_literal_array(&elements));
    assert_eq!(ok(file.literal_array_elements(array)), elements);

    let mut visited = Vec::new();
    let completed = ok(file.enumerate_literal_array(array, |element| {
        visited.push(element);
        true
    }));
    assert!(completed);
    assert_eq!(visited, elements);
}

#[test]
fn literal_array_enumeration_short_circuits() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let elements: Vec<LiteralId> = (0..5).map(|v| file.create_literal_u32(v)).collect();
    let array = ok(file.create_literal_array(&elements));

    let mut visited = 0;
    let completed = ok(file.enumerate_literal_array(array, |_| {
        visited += 1;
        visited < 3
    }));
    assert!(!completed);
    assert_eq!(visited, 3);
}

#[test]
fn nested_literal_arrays() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let inner_el = file.create_literal_bool(true);
    let inner = ok(file.create_literal_array(&[inner_el]));
    let nested = ok(file.create_literal_literal_array(inner));
    let outer = ok(file.create_literal_array(&[nested]));

    let elements = ok(file.literal_array_elements(outer));
    assert_eq!(elements.len(), 1);
    let resolved = ok(ok(file.literal(elements[0])).as_literal_array());
    assert_eq!(resolved, inner);
}

#[test]
fn literal_array_rejects_stale_elements() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let err = match file.create_literal_array(&[LiteralId::new(9)]) {
        Ok(_) => panic!("creation should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);
}

#[test]
fn value_referencing_literal_array_is_validated() {
    let mut file = File::new("app.abc", IsaKind::Dynamic);
    let err = match file.create_value_literal_array(arkedit_core::LiteralArrayId::new(3)) {
        Ok(_) => panic!("creation should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);

    let element = file.create_literal_u8(1);
    let array = ok(file.create_literal_array(&[element]));
    let value = ok(file.create_value_literal_array(array));
    assert_eq!(ok(file.value(value)), Value::LiteralArray(array));
}
