//! Ordered note container.
//!
//! # Responsibility
//! - Own every `Note` exclusively and expose CRUD, search, sort and stats.
//! - Hand out `NoteSnapshot` values only; raw notes never leave this type.
//!
//! # Invariants
//! - Insertion order is the storage order; sort views never reorder storage.
//! - Index-taking operations reject `index >= len` before touching state.
//! - Index checks run before title validation.
//! - `NoteStats::total == completed + remaining`.
//!
//! # Concurrency
//! - No internal locking. Hosts sharing a collection across threads must
//!   guard the whole value with a mutex.

use crate::clock::{Clock, SystemClock};
use crate::model::note::{Note, NoteSnapshot, NoteValidationError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Error for collection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Title failed note validation.
    Validation(NoteValidationError),
    /// Index is outside `[0, len)` at call time.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "note index {index} is out of range (len {len})")
            }
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<NoteValidationError> for CollectionError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Aggregate completion counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl Display for NoteStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total={} completed={} remaining={}",
            self.total, self.completed, self.remaining
        )
    }
}

/// Snapshot paired with the storage index that index-taking calls accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub index: usize,
    pub snapshot: NoteSnapshot,
}

/// Ordered collection of notes stamped by an injectable clock.
pub struct NoteCollection<C: Clock = SystemClock> {
    notes: Vec<Note>,
    clock: C,
}

impl NoteCollection<SystemClock> {
    /// Creates an empty collection using wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for NoteCollection<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NoteCollection<C> {
    /// Creates an empty collection using the provided time source.
    pub fn with_clock(clock: C) -> Self {
        Self {
            notes: Vec::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Appends a new incomplete note.
    ///
    /// # Errors
    /// - `CollectionError::Validation` when `title` is blank.
    pub fn add(&mut self, title: impl Into<String>) -> CollectionResult<()> {
        let note = Note::new(title, self.clock.now_epoch_ms())?;
        self.notes.push(note);
        debug!(
            "event=note_add module=collection status=ok len={}",
            self.notes.len()
        );
        Ok(())
    }

    /// Removes the note at `index`; later notes shift down by one.
    ///
    /// Returns a snapshot of the removed note.
    pub fn remove(&mut self, index: usize) -> CollectionResult<NoteSnapshot> {
        self.check_index(index)?;
        let removed = self.notes.remove(index);
        debug!(
            "event=note_remove module=collection status=ok index={index} len={}",
            self.notes.len()
        );
        Ok(removed.info())
    }

    /// Replaces the title of the note at `index`.
    pub fn edit(&mut self, index: usize, title: impl Into<String>) -> CollectionResult<()> {
        self.check_index(index)?;
        let now = self.clock.now_epoch_ms();
        self.notes[index].edit(title, now)?;
        debug!("event=note_edit module=collection status=ok index={index}");
        Ok(())
    }

    /// Marks the note at `index` completed, re-stamping it every call.
    pub fn mark_as_completed(&mut self, index: usize) -> CollectionResult<()> {
        self.check_index(index)?;
        let now = self.clock.now_epoch_ms();
        self.notes[index].mark_as_completed(now);
        debug!("event=note_complete module=collection status=ok index={index}");
        Ok(())
    }

    /// Returns the snapshot at `index`, if any.
    pub fn get(&self, index: usize) -> Option<NoteSnapshot> {
        self.notes.get(index).map(Note::info)
    }

    /// Returns snapshots of every note in storage order.
    pub fn get_all(&self) -> Vec<NoteSnapshot> {
        self.notes.iter().map(Note::info).collect()
    }

    /// Case-insensitive substring search over titles, in storage order.
    ///
    /// An empty query matches every note.
    pub fn find_by_name(&self, query: &str) -> Vec<NoteSnapshot> {
        into_snapshots(self.find_entries(query))
    }

    /// Returns incomplete notes first, then completed ones.
    ///
    /// Relative order inside each group follows storage order.
    pub fn sort_by_status(&self) -> Vec<NoteSnapshot> {
        into_snapshots(self.entries_by_status())
    }

    /// Returns notes ordered by ascending `created_at`, stable for ties.
    pub fn sort_by_date(&self) -> Vec<NoteSnapshot> {
        into_snapshots(self.entries_by_date())
    }

    /// Returns every note paired with its storage index.
    pub fn entries(&self) -> Vec<NoteEntry> {
        self.notes
            .iter()
            .enumerate()
            .map(|(index, note)| NoteEntry {
                index,
                snapshot: note.info(),
            })
            .collect()
    }

    /// Same matches as `find_by_name`, keeping storage indices.
    pub fn find_entries(&self, query: &str) -> Vec<NoteEntry> {
        let needle = query.to_lowercase();
        let mut view = self.entries();
        view.retain(|entry| {
            entry
                .snapshot
                .title
                .to_lowercase()
                .contains(needle.as_str())
        });
        view
    }

    /// Same order as `sort_by_status`, keeping storage indices.
    pub fn entries_by_status(&self) -> Vec<NoteEntry> {
        let mut view = self.entries();
        // `sort_by_key` is stable; `false` orders before `true`.
        view.sort_by_key(|entry| entry.snapshot.is_completed);
        view
    }

    /// Same order as `sort_by_date`, keeping storage indices.
    pub fn entries_by_date(&self) -> Vec<NoteEntry> {
        let mut view = self.entries();
        view.sort_by_key(|entry| entry.snapshot.created_at);
        view
    }

    /// Counts total, completed and remaining notes.
    pub fn get_stats(&self) -> NoteStats {
        let total = self.notes.len();
        let completed = self.notes.iter().filter(|note| note.is_completed()).count();
        NoteStats {
            total,
            completed,
            remaining: total - completed,
        }
    }

    fn check_index(&self, index: usize) -> CollectionResult<()> {
        let len = self.notes.len();
        if index >= len {
            debug!(
                "event=note_index_check module=collection status=error index={index} len={len}"
            );
            return Err(CollectionError::IndexOutOfRange { index, len });
        }
        Ok(())
    }
}

fn into_snapshots(entries: Vec<NoteEntry>) -> Vec<NoteSnapshot> {
    entries.into_iter().map(|entry| entry.snapshot).collect()
}
