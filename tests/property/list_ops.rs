//! Property-based tests for task list operations.
//!
//! Uses proptest to verify:
//! 1. Toggling a task twice returns the list to its prior state.
//! 2. Deletion removes exactly the targeted task and preserves order.
//! 3. After any sequence of operations, the persisted entry decodes
//!    to exactly the in-memory collection.

use proptest::prelude::*;
use termtodo::list::TaskList;
use termtodo_core::codec::{self, TASKS_KEY};
use termtodo_core::store::{KeyValueStore, MemoryStore};

// --- Arbitrary implementations ---

/// Strategy for generating valid task text.
fn arb_task_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9][a-zA-Z0-9 ]{0,48}[a-zA-Z0-9]")
        .expect("valid regex")
}

/// An operation against a populated list, indexed rather than by id so
/// sequences stay valid as the list shrinks and grows.
#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Edit(usize, String),
    Delete(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_task_text().prop_map(Op::Add),
        any::<usize>().prop_map(Op::Toggle),
        (any::<usize>(), arb_task_text()).prop_map(|(i, t)| Op::Edit(i, t)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

fn make_list() -> (TaskList, MemoryStore) {
    let store = MemoryStore::new();
    (TaskList::new(Box::new(store.clone())), store)
}

/// Applies an operation, mapping its index onto a live task (no-op on
/// an empty list).
fn apply(list: &mut TaskList, op: &Op) {
    match op {
        Op::Add(text) => {
            list.add(text).expect("valid text should be accepted");
        }
        Op::Toggle(i) => {
            if let Some(id) = list.tasks().get(i % list.len().max(1)).map(|t| t.id) {
                list.toggle_done(id).expect("live id should toggle");
            }
        }
        Op::Edit(i, text) => {
            if let Some(id) = list.tasks().get(i % list.len().max(1)).map(|t| t.id) {
                list.edit(id, text).expect("valid edit should succeed");
            }
        }
        Op::Delete(i) => {
            if let Some(id) = list.tasks().get(i % list.len().max(1)).map(|t| t.id) {
                list.delete(id).expect("live id should delete");
            }
        }
    }
}

// --- Property tests ---

proptest! {
    /// Toggling the same task twice restores the whole collection.
    #[test]
    fn toggle_twice_is_identity(
        texts in prop::collection::vec(arb_task_text(), 1..8),
        pick in any::<usize>(),
    ) {
        let (mut list, _) = make_list();
        for text in &texts {
            list.add(text).expect("valid text should be accepted");
        }
        let before = list.tasks().to_vec();
        let id = list.tasks()[pick % list.len()].id;

        list.toggle_done(id).expect("toggle should succeed");
        list.toggle_done(id).expect("toggle should succeed");
        prop_assert_eq!(list.tasks(), before.as_slice());
    }

    /// Deletion removes exactly the targeted task, preserving the
    /// relative order of the rest.
    #[test]
    fn delete_removes_exactly_one(
        texts in prop::collection::vec(arb_task_text(), 1..8),
        pick in any::<usize>(),
    ) {
        let (mut list, _) = make_list();
        for text in &texts {
            list.add(text).expect("valid text should be accepted");
        }
        let idx = pick % list.len();
        let before = list.tasks().to_vec();
        let id = before[idx].id;

        list.delete(id).expect("delete should succeed");
        let expected: Vec<_> = before
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        prop_assert_eq!(list.tasks(), expected.as_slice());
    }

    /// After any operation sequence, the persisted entry decodes to
    /// the in-memory collection (or is absent only while still empty).
    #[test]
    fn persisted_state_mirrors_memory(ops in prop::collection::vec(arb_op(), 0..24)) {
        let (mut list, store) = make_list();
        for op in &ops {
            apply(&mut list, op);

            match store.get(TASKS_KEY).expect("store read should succeed") {
                Some(raw) => {
                    let decoded = codec::decode_tasks(&raw).expect("entry should decode");
                    prop_assert_eq!(list.tasks(), decoded.as_slice());
                }
                None => prop_assert!(list.is_empty()),
            }
        }
    }

    /// Added tasks keep distinct ids.
    #[test]
    fn ids_stay_unique(texts in prop::collection::vec(arb_task_text(), 0..16)) {
        let (mut list, _) = make_list();
        for text in &texts {
            list.add(text).expect("valid text should be accepted");
        }
        let mut ids: Vec<_> = list.tasks().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), list.len());
    }
}
