//! Create, read, update and delete for password-gated notes.
//!
//! Every operation except create first fetches the note, decodes its content
//! and checks the caller's password against that content. Nothing is written
//! unless the check passes.

use std::sync::Arc;

use crate::credential::{derive_digest, verify};
use crate::errors::ServerError;
use crate::models::note::{CreateNote, NoteAccess, NoteFields, NoteView, StoredNote, UpdateNote};
use crate::store::{NoteStore, StoreError};
use crate::utils::{decode_content, encode_content};

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

/// Store faults after the note was looked up are reported the same way as a
/// missing note; only the log tells them apart.
fn not_found(note_id: &str, err: StoreError) -> ServerError {
    match err {
        StoreError::NotFound => log::debug!("note {note_id} does not exist"),
        other => log::error!("store failure on note {note_id}: {other}"),
    }
    ServerError::NotFound(note_id.to_string())
}

fn seal(title: String, note_type: String, password: &str, content: &str) -> NoteFields {
    NoteFields {
        title,
        note_type,
        content: encode_content(content),
        password_digest: derive_digest(password, content).into_string(),
    }
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        NoteService { store }
    }

    pub fn create(&self, note: CreateNote) -> Result<String, ServerError> {
        let fields = seal(note.title, note.note_type, &note.password, &note.content);
        let stored = self.store.create(fields).map_err(|e| {
            log::error!("failed to create note: {e}");
            ServerError::from(e)
        })?;

        log::info!("created note {}", stored.id);
        Ok(stored.id)
    }

    /// Fetches a note and returns it with its decoded content, provided the
    /// password matches.
    fn unlock(&self, note_id: &str, password: &str) -> Result<(StoredNote, String), ServerError> {
        let note = self
            .store
            .fetch(note_id)
            .map_err(|e| not_found(note_id, e))?;
        let content = decode_content(&note.content).map_err(|e| {
            log::error!("note {note_id} has undecodable content: {e}");
            ServerError::NotFound(note_id.to_string())
        })?;

        if !verify(password, &content, &note.password_digest) {
            log::info!("wrong password for note {note_id}");
            return Err(ServerError::InvalidCredentials);
        }

        Ok((note, content))
    }

    pub fn read(&self, access: NoteAccess) -> Result<NoteView, ServerError> {
        let (note, content) = self.unlock(&access.id, &access.password)?;
        let views = self
            .store
            .increment_views(&note.id, 1)
            .map_err(|e| not_found(&note.id, e))?;

        Ok(NoteView {
            id: note.id,
            title: note.title,
            content,
            note_type: note.note_type,
            views,
            created_at: note.created_at,
        })
    }

    pub fn update(&self, update: UpdateNote) -> Result<String, ServerError> {
        self.unlock(&update.id, &update.current_password)?;

        let fields = seal(
            update.title.clone(),
            update.note_type.clone(),
            update.effective_password(),
            &update.content,
        );
        self.store
            .replace(&update.id, fields)
            .map_err(|e| not_found(&update.id, e))?;

        if update.new_password.is_some() {
            log::info!("updated note {} with a new password", update.id);
        } else {
            log::info!("updated note {}", update.id);
        }
        Ok(update.id)
    }

    pub fn delete(&self, access: NoteAccess) -> Result<(), ServerError> {
        self.unlock(&access.id, &access.password)?;
        self.store
            .delete(&access.id)
            .map_err(|e| not_found(&access.id, e))?;

        log::info!("deleted note {}", access.id);
        Ok(())
    }
}
