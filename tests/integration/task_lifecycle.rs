//! Integration tests for the task list lifecycle: add, toggle, edit,
//! delete, and clear-all, observed end to end through the store.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use termtodo::list::{ListError, Notice, TaskList};
use termtodo_core::codec::{TASKS_KEY, decode_tasks};
use termtodo_core::store::{KeyValueStore, MemoryStore};
use termtodo_core::task::TaskId;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Creates a task list over a shared in-memory store; the returned
/// handle observes everything the list persists.
fn make_list() -> (TaskList, MemoryStore) {
    let store = MemoryStore::new();
    (TaskList::new(Box::new(store.clone())), store)
}

/// Reads the persisted collection back through the store handle.
fn persisted_texts(store: &MemoryStore) -> Vec<String> {
    let raw = store.get(TASKS_KEY).unwrap().expect("entry should exist");
    decode_tasks(&raw)
        .unwrap()
        .into_iter()
        .map(|t| t.text)
        .collect()
}

// ---------------------------------------------------------------------------
// The full scenario from the product description
// ---------------------------------------------------------------------------

#[test]
fn buy_milk_scenario() {
    let (mut list, store) = make_list();

    // Start empty.
    assert!(list.is_empty());

    // Add("Buy milk")
    assert_eq!(list.add("Buy milk").unwrap(), Notice::Added);
    assert_eq!(list.len(), 1);
    let id = list.tasks()[0].id;
    assert_eq!(list.tasks()[0].text, "Buy milk");
    assert!(!list.tasks()[0].done);

    // ToggleDone(id)
    assert_eq!(list.toggle_done(id).unwrap(), Notice::Completed);
    assert!(list.tasks()[0].done);

    // Edit(id, "Buy oat milk"): same id, done reset, moved to end
    // (trivially the same position with a single task).
    assert_eq!(list.edit(id, "Buy oat milk").unwrap(), Notice::Updated);
    assert_eq!(list.len(), 1);
    assert_eq!(list.tasks()[0].id, id);
    assert_eq!(list.tasks()[0].text, "Buy oat milk");
    assert!(!list.tasks()[0].done);

    // Delete(id)
    assert_eq!(list.delete(id).unwrap(), Notice::Deleted);
    assert!(list.is_empty());
    let raw = store.get(TASKS_KEY).unwrap().unwrap();
    assert_eq!(raw, "[]");
}

// ---------------------------------------------------------------------------
// Ordering and persistence visibility
// ---------------------------------------------------------------------------

#[test]
fn collection_order_is_insertion_order() {
    let (mut list, store) = make_list();
    list.add("one").unwrap();
    list.add("two").unwrap();
    list.add("three").unwrap();
    assert_eq!(persisted_texts(&store), vec!["one", "two", "three"]);
}

#[test]
fn every_mutation_is_persisted() {
    let (mut list, store) = make_list();
    list.add("watch persistence").unwrap();
    let id = list.tasks()[0].id;

    list.toggle_done(id).unwrap();
    let raw = store.get(TASKS_KEY).unwrap().unwrap();
    assert!(raw.contains(r#""isDone":true"#));

    list.edit(id, "watch persistence, edited").unwrap();
    assert_eq!(persisted_texts(&store), vec!["watch persistence, edited"]);

    list.delete(id).unwrap();
    assert_eq!(store.get(TASKS_KEY).unwrap().unwrap(), "[]");
}

#[test]
fn edit_relocates_to_end_among_other_tasks() {
    let (mut list, store) = make_list();
    list.add("alpha").unwrap();
    list.add("beta").unwrap();
    list.add("gamma").unwrap();
    let alpha_id = list.tasks()[0].id;

    list.edit(alpha_id, "alpha, revised").unwrap();
    assert_eq!(
        persisted_texts(&store),
        vec!["beta", "gamma", "alpha, revised"]
    );
    assert_eq!(list.tasks()[2].id, alpha_id);
}

#[test]
fn delete_preserves_relative_order_of_the_rest() {
    let (mut list, _) = make_list();
    for text in ["a1", "b2", "c3", "d4"] {
        list.add(text).unwrap();
    }
    let id = list.tasks()[1].id;
    list.delete(id).unwrap();
    let texts: Vec<_> = list.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["a1", "c3", "d4"]);
}

#[test]
fn clear_all_removes_the_store_entry_entirely() {
    let (mut list, store) = make_list();
    list.add("doomed").unwrap();
    assert!(store.contains(TASKS_KEY));
    list.clear_all().unwrap();
    // Removed, not rewritten as "[]".
    assert!(!store.contains(TASKS_KEY));
    assert!(list.is_empty());
}

// ---------------------------------------------------------------------------
// Failure atomicity
// ---------------------------------------------------------------------------

#[test]
fn rejected_add_leaves_no_trace() {
    let (mut list, store) = make_list();
    list.add("kept task").unwrap();
    let before = store.get(TASKS_KEY).unwrap();

    assert!(matches!(
        list.add(" "),
        Err(ListError::Validation(_))
    ));
    assert_eq!(list.len(), 1);
    assert_eq!(store.get(TASKS_KEY).unwrap(), before);
}

#[test]
fn operations_on_unknown_ids_change_nothing() {
    let (mut list, store) = make_list();
    list.add("kept task").unwrap();
    let before = store.get(TASKS_KEY).unwrap();
    let ghost = TaskId::from_millis(1);

    assert!(matches!(
        list.toggle_done(ghost),
        Err(ListError::TaskNotFound(_))
    ));
    assert!(matches!(
        list.delete(ghost),
        Err(ListError::TaskNotFound(_))
    ));
    assert!(matches!(
        list.edit(ghost, "new text"),
        Err(ListError::TaskNotFound(_))
    ));
    assert_eq!(list.len(), 1);
    assert_eq!(store.get(TASKS_KEY).unwrap(), before);
}

// ---------------------------------------------------------------------------
// Edit target bookkeeping
// ---------------------------------------------------------------------------

#[test]
fn begin_edit_then_submit_round_trip() {
    let (mut list, _) = make_list();
    list.add("draft text").unwrap();
    let id = list.tasks()[0].id;

    let (notice, prefill) = list.begin_edit(id).unwrap();
    assert_eq!(notice, Notice::EditMode);
    assert_eq!(prefill, "draft text");
    assert_eq!(list.edit_target(), Some(id));

    list.edit(id, "final text").unwrap();
    assert_eq!(list.edit_target(), None);
    assert_eq!(list.tasks()[0].text, "final text");
}
