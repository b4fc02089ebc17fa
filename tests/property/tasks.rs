//! Property-based tests for task validation and the JSON codec.
//!
//! Uses proptest to verify:
//! 1. Any valid task collection survives an encode → decode round-trip.
//! 2. `validate_text` accepts exactly the inputs whose trimmed length
//!    falls inside the 2..=100 character bounds.
//! 3. Malformed input never causes a panic in `decode_tasks`.

use proptest::prelude::*;
use termtodo_core::codec;
use termtodo_core::task::{
    MAX_TASK_TEXT_LENGTH, MIN_TASK_TEXT_LENGTH, Task, TaskId, validate_text,
};

// --- Arbitrary implementations for task types ---

/// Strategy for generating arbitrary `TaskId` values.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    any::<u64>().prop_map(TaskId::from_millis)
}

/// Strategy for generating task text that passes validation: no
/// leading or trailing whitespace, within the length bounds.
fn arb_task_text() -> impl Strategy<Value = String> {
    "[^\\s][^\x00]{0,98}[^\\s]|[^\\s]{2}".prop_filter("within length bounds", |s| {
        let n = s.chars().count();
        (MIN_TASK_TEXT_LENGTH..=MAX_TASK_TEXT_LENGTH).contains(&n)
    })
}

/// Strategy for generating arbitrary `Task` values.
fn arb_task() -> impl Strategy<Value = Task> {
    (arb_task_id(), arb_task_text(), any::<bool>()).prop_map(|(id, text, done)| Task {
        id,
        text,
        done,
    })
}

// --- Property tests ---

proptest! {
    /// Any task collection survives an encode → decode round-trip.
    #[test]
    fn task_collection_round_trip(tasks in prop::collection::vec(arb_task(), 0..32)) {
        let encoded = codec::encode_tasks(&tasks).expect("encode should succeed");
        let decoded = codec::decode_tasks(&encoded).expect("decode should succeed");
        prop_assert_eq!(tasks, decoded);
    }

    /// `validate_text` accepts an input exactly when its trimmed
    /// character count is within bounds, and returns the trimmed text.
    #[test]
    fn validation_matches_trimmed_length(raw in "\\PC{0,120}") {
        let trimmed_len = raw.trim().chars().count();
        let in_bounds = (MIN_TASK_TEXT_LENGTH..=MAX_TASK_TEXT_LENGTH).contains(&trimmed_len);
        match validate_text(&raw) {
            Ok(text) => {
                prop_assert!(in_bounds);
                prop_assert_eq!(text, raw.trim());
            }
            Err(_) => prop_assert!(!in_bounds),
        }
    }

    /// Validated text never carries surrounding whitespace.
    #[test]
    fn validated_text_is_trimmed(raw in "\\s{0,4}\\PC{2,50}\\s{0,4}") {
        if let Ok(text) = validate_text(&raw) {
            prop_assert_eq!(text.trim(), text.as_str());
        }
    }

    /// Arbitrary strings never cause a panic when decoded — malformed
    /// input returns Err gracefully.
    #[test]
    fn arbitrary_input_decode_no_panic(raw in "\\PC{0,256}") {
        // Ok or Err are both fine, just no panic.
        let _ = codec::decode_tasks(&raw);
    }

    /// `TaskId` survives a round-trip through its millisecond value.
    #[test]
    fn task_id_millis_round_trip(millis in any::<u64>()) {
        let id = TaskId::from_millis(millis);
        prop_assert_eq!(id.as_millis(), millis);
    }
}
