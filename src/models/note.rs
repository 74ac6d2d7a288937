use chrono::{DateTime, Utc};
use diesel::Queryable;
use serde_derive::{Deserialize, Serialize};

use crate::errors::ServerError;

pub const DEFAULT_NOTE_TYPE: &str = "text";

/// A note row as the store hands it back. `content` is still encoded.
#[derive(Clone, Debug, PartialEq, Queryable)]
pub struct StoredNote {
    pub id: String,
    pub title: String,
    pub note_type: String,
    pub content: String,
    pub password_digest: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

/// Everything the core decides about a note; the store owns the rest.
/// Written whole on create and replaced whole on update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub note_type: String,
    pub content: String,
    pub password_digest: String,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

fn required(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

fn check(missing: Vec<&'static str>) -> Result<(), ServerError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServerError::Validation(missing))
    }
}

fn note_type_or_default(note_type: Option<String>) -> String {
    note_type
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_NOTE_TYPE.to_string())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub note_type: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
    pub note_type: String,
    pub password: String,
}

impl CreateNoteRequest {
    pub fn validate(self) -> Result<CreateNote, ServerError> {
        let mut missing = vec![];
        let title = required(self.title, "title", &mut missing);
        let content = required(self.content, "content", &mut missing);
        let password = required(self.password, "password", &mut missing);
        check(missing)?;

        Ok(CreateNote {
            title,
            content,
            note_type: note_type_or_default(self.note_type),
            password,
        })
    }
}

/// Body shared by read and delete: both only need the id and its password.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NoteAccessRequest {
    pub id: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteAccess {
    pub id: String,
    pub password: String,
}

impl NoteAccessRequest {
    pub fn validate(self) -> Result<NoteAccess, ServerError> {
        let mut missing = vec![];
        let id = required(self.id, "id", &mut missing);
        let password = required(self.password, "password", &mut missing);
        check(missing)?;

        Ok(NoteAccess { id, password })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateNoteRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub note_type: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub note_type: String,
    pub current_password: String,
    pub new_password: Option<String>,
}

impl UpdateNoteRequest {
    pub fn validate(self) -> Result<UpdateNote, ServerError> {
        let mut missing = vec![];
        let id = required(self.id, "id", &mut missing);
        let title = required(self.title, "title", &mut missing);
        let content = required(self.content, "content", &mut missing);
        let current_password = required(self.current_password, "currentPassword", &mut missing);
        check(missing)?;

        Ok(UpdateNote {
            id,
            title,
            content,
            note_type: note_type_or_default(self.note_type),
            current_password,
            new_password: self.new_password.filter(|p| !p.is_empty()),
        })
    }
}

impl UpdateNote {
    /// The password the new digest is bound to.
    pub fn effective_password(&self) -> &str {
        self.new_password
            .as_deref()
            .unwrap_or(&self.current_password)
    }
}
