//! Core domain logic for the notelist note manager.
//! This crate is the single source of truth for note invariants.

pub mod clock;
pub mod command;
pub mod logging;
pub mod model;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{
    is_skippable, run_line, run_script, Command, CommandError, CommandOutput, ListOrder,
};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::note::{Note, NoteSnapshot, NoteValidationError};
pub use service::note_collection::{
    CollectionError, CollectionResult, NoteCollection, NoteEntry, NoteStats,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
