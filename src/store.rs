//! The backing store the lifecycle manager talks to.
//!
//! Notes are keyed by an opaque id the store picks on create. The store is
//! also the only place concurrency is handled: `increment_views` must be a
//! single atomic step, everything else is last-write-wins.

use derive_more::Display;

use crate::models::note::{NoteFields, StoredNote};

pub mod memory;
pub mod pg;

pub use memory::MemoryNoteStore;
pub use pg::PgNoteStore;

pub const ID_LENGTH: usize = 10;

#[derive(Debug, Display)]
pub enum StoreError {
    NotFound,
    #[display(fmt = "connection pool: {}", _0)]
    Pool(String),
    #[display(fmt = "query failed: {}", _0)]
    Query(String),
    #[display(fmt = "migration failed: {}", _0)]
    Migration(String),
    #[display(fmt = "store lock poisoned")]
    Poisoned,
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> StoreError {
        StoreError::Pool(err.to_string())
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> StoreError {
        match err {
            diesel::result::Error::NotFound => StoreError::NotFound,
            other => StoreError::Query(other.to_string()),
        }
    }
}

pub trait NoteStore: Send + Sync {
    /// Persists a new note with zero views, assigning its id and creation time.
    fn create(&self, fields: NoteFields) -> Result<StoredNote, StoreError>;

    fn fetch(&self, id: &str) -> Result<StoredNote, StoreError>;

    /// Adds `delta` to the view counter and returns the new value.
    fn increment_views(&self, id: &str, delta: i64) -> Result<i64, StoreError>;

    fn replace(&self, id: &str, fields: NoteFields) -> Result<(), StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

pub fn new_id() -> String {
    nanoid::nanoid!(ID_LENGTH)
}
