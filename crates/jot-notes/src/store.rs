// SPDX-License-Identifier: MIT
//
// The note store: every note lives in memory and in one JSON array on disk.
// Each change is written through before it returns; if the write fails the
// in-memory change is undone, so memory and disk never disagree.
//
// Writes go to a sibling temp file that is then renamed over the store, so a
// crash mid-write leaves the previous file intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::NoteError;
use crate::note::Note;

/// File name of the store inside the home directory.
pub const FILE_NAME: &str = "noteData.json";

/// `~/noteData.json`, or `None` if there is no home directory.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(FILE_NAME))
}

/// Titled notes backed by a JSON file.
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Load the store at `path`, creating an empty one if the file does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or created, or does not hold a JSON
    /// array of notes. A malformed file is never overwritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, NoteError> {
        let path = path.into();
        let store = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(notes) => Self { path, notes },
                Err(source) => return Err(NoteError::Parse { path, source }),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let store = Self {
                    path,
                    notes: Vec::new(),
                };
                store.save()?;
                store
            }
            Err(source) => return Err(NoteError::Read { path, source }),
        };
        tracing::debug!(
            path = %store.path.display(),
            notes = store.notes.len(),
            "opened note store"
        );
        Ok(store)
    }

    /// Where the store is saved.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All notes, in creation order.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Whether a note with `title` exists.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    /// The note with `title`.
    #[must_use]
    pub fn query(&self, title: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.title == title)
    }

    /// Add a note and save.
    ///
    /// # Errors
    ///
    /// [`NoteError::Duplicate`] if the title is taken, or a write error.
    pub fn create(&mut self, note: Note) -> Result<(), NoteError> {
        if self.contains(&note.title) {
            return Err(NoteError::Duplicate(note.title));
        }
        self.notes.push(note);
        if let Err(err) = self.save() {
            self.notes.pop();
            return Err(err);
        }
        tracing::info!(notes = self.notes.len(), "note created");
        Ok(())
    }

    /// Replace the note with the same title and save.
    ///
    /// # Errors
    ///
    /// [`NoteError::NotFound`] if no note has that title, or a write error.
    pub fn edit(&mut self, note: Note) -> Result<(), NoteError> {
        let Some(index) = self.position(&note.title) else {
            return Err(NoteError::NotFound(note.title));
        };
        let old = std::mem::replace(&mut self.notes[index], note);
        if let Err(err) = self.save() {
            self.notes[index] = old;
            return Err(err);
        }
        tracing::info!("note edited");
        Ok(())
    }

    /// Remove the note with `title`, save, and return it.
    ///
    /// # Errors
    ///
    /// [`NoteError::NotFound`] if no note has that title, or a write error.
    pub fn delete(&mut self, title: &str) -> Result<Note, NoteError> {
        let Some(index) = self.position(title) else {
            return Err(NoteError::NotFound(title.to_owned()));
        };
        let note = self.notes.remove(index);
        if let Err(err) = self.save() {
            self.notes.insert(index, note);
            return Err(err);
        }
        tracing::info!(notes = self.notes.len(), "note deleted");
        Ok(note)
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.title == title)
    }

    fn save(&self) -> Result<(), NoteError> {
        let json = serde_json::to_string(&self.notes)?;
        let tmp = self.path.with_extension("json.tmp");
        let write_err = |source| NoteError::Write {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
