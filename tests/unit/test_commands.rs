//! Unit tests for the command boundary
//!
//! Tests cover:
//! - Parsing `/api/list` parameters into commands
//! - JSON bodies produced for each command
//! - Error bodies for contract violations

use serde_json::{json, Value};
use tickring::commands::{error_body, execute, Command, QueryParams};
use tickring::errors::CommandError;
use tickring::ring::RingList;

fn send(history: &mut RingList<Value>, query: &str) -> Result<Value, CommandError> {
    let command = Command::from_query(&QueryParams::parse(query))?;
    execute(history, command)
}

#[test]
fn test_full_session() {
    let mut history = RingList::new(Some(4)).unwrap();
    for v in ["a", "b", "c"] {
        send(&mut history, &format!("op=append&value={v}")).unwrap();
    }
    send(&mut history, "op=prepend&value=z").unwrap();
    assert_eq!(
        send(&mut history, "op=state").unwrap(),
        json!({ "len": 4, "capacity": 4, "items": ["z", "a", "b", "c"] })
    );

    assert_eq!(
        send(&mut history, "op=rotate&steps=-1").unwrap()["items"],
        json!(["a", "b", "c", "z"])
    );
    assert_eq!(
        send(&mut history, "op=popleft").unwrap(),
        json!({ "popleft": "a", "len": 3 })
    );
    assert_eq!(
        send(&mut history, "op=remove&value=z").unwrap(),
        json!({ "removed": 1, "len": 2 })
    );
}

#[test]
fn test_uppercase_op_accepted() {
    let mut history = RingList::unbounded();
    assert_eq!(
        send(&mut history, "op=CLEAR").unwrap(),
        json!({ "ok": true, "len": 0 })
    );
}

#[test]
fn test_missing_value_error_body() {
    let err = Command::from_query(&QueryParams::parse("op=prepend")).unwrap_err();
    assert_eq!(err.status(), 400);
    assert_eq!(error_body(&err), json!({ "error": "Missing parameter 'value'" }));
}

#[test]
fn test_rotate_on_empty_history_succeeds() {
    let mut history = RingList::unbounded();
    assert_eq!(
        send(&mut history, "op=rotate&steps=3").unwrap(),
        json!({ "ok": true, "len": 0, "items": [] })
    );
}

#[test]
fn test_popleft_on_empty_history_fails() {
    let mut history = RingList::unbounded();
    let err = send(&mut history, "op=popleft").unwrap_err();
    assert_eq!(error_body(&err)["error"], "popleft from empty history");
}
