use std::collections::{hash_map::Entry, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::{new_id, NoteStore, StoreError};
use crate::models::note::{NoteFields, StoredNote};

/// Keeps notes in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<HashMap<String, StoredNote>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn note_count(&self) -> usize {
        self.notes.lock().map(|notes| notes.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, StoredNote>>, StoreError> {
        self.notes.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl NoteStore for MemoryNoteStore {
    fn create(&self, fields: NoteFields) -> Result<StoredNote, StoreError> {
        let mut notes = self.lock()?;
        loop {
            if let Entry::Vacant(slot) = notes.entry(new_id()) {
                let note = StoredNote {
                    id: slot.key().clone(),
                    title: fields.title,
                    note_type: fields.note_type,
                    content: fields.content,
                    password_digest: fields.password_digest,
                    views: 0,
                    created_at: Utc::now(),
                };
                return Ok(slot.insert(note).clone());
            }
        }
    }

    fn fetch(&self, id: &str) -> Result<StoredNote, StoreError> {
        self.lock()?.get(id).cloned().ok_or(StoreError::NotFound)
    }

    fn increment_views(&self, id: &str, delta: i64) -> Result<i64, StoreError> {
        let mut notes = self.lock()?;
        let note = notes.get_mut(id).ok_or(StoreError::NotFound)?;
        note.views += delta;
        Ok(note.views)
    }

    fn replace(&self, id: &str, fields: NoteFields) -> Result<(), StoreError> {
        let mut notes = self.lock()?;
        let note = notes.get_mut(id).ok_or(StoreError::NotFound)?;
        note.title = fields.title;
        note.note_type = fields.note_type;
        note.content = fields.content;
        note.password_digest = fields.password_digest;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.lock()?
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
