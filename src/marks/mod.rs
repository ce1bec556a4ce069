//! Mark engine: slot bindings, their persistence, window re-identification and cycling.

pub mod binding;
pub mod cycle;
pub mod pattern;
pub mod resolver;
pub mod slot;
pub mod storage;
pub mod store;

pub use binding::Binding;
pub use cycle::{CycleCursor, Direction};
pub use pattern::derive_pattern;
pub use resolver::Resolver;
pub use slot::Slot;
pub use storage::{default_marks_path, MarkStorage};
pub use store::MarkStore;
