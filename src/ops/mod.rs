//! High-level journal operations.
//!
//! Each submodule implements one user-facing operation, composing the
//! database, the analyzer and the chat model:
//!
//! - `turn`: a single journal exchange (analyze, reply, persist, render)
//! - `chat`: the interactive stdin loop built on `turn`
//! - `render`: markdown views of entries, analyses and statistics
//! - `mood`: the daily mood color palette
//! - `weekly`: the weekly wrap summary

pub mod chat;
pub mod mood;
pub mod render;
pub mod turn;
pub mod weekly;

pub use chat::start_chat;
pub use turn::{journal_turn, TurnOutcome};
pub use weekly::weekly_wrap;
