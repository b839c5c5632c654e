//! Domain model for the note list.
//!
//! # Responsibility
//! - Define the note entity and the read-only values handed to callers.
//!
//! # Invariants
//! - A note title is never empty or whitespace-only.
//! - Completion is one-way: `incomplete -> completed`.

pub mod note;
