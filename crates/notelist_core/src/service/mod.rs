//! Core use-case services.
//!
//! # Responsibility
//! - Own note storage and expose the caller-facing note list API.
//! - Keep drivers decoupled from the note entity itself.

pub mod note_collection;
