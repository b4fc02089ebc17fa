//! Storage-agnostic core for `TermTodo`: the task model, form
//! validation, the JSON persistence codec, and the key-value store
//! abstraction.

pub mod codec;
pub mod store;
pub mod task;
