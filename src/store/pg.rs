use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::{new_id, NoteStore, StoreError};
use crate::models::note::{NoteFields, StoredNote};
use crate::schema::notes::dsl::{
    content, id, note_type, notes, password_digest, title, views,
};

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub struct PgNoteStore {
    pool: Pool,
}

impl PgNoteStore {
    /// Builds the pool and brings the schema up to date.
    pub fn connect(database_url: &str, pool_size: u32) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = r2d2::Pool::builder().max_size(pool_size).build(manager)?;

        let mut connection = pool.get()?;
        let applied = connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        if !applied.is_empty() {
            log::info!("applied {} migration(s)", applied.len());
        }

        Ok(PgNoteStore { pool })
    }
}

impl NoteStore for PgNoteStore {
    fn create(&self, fields: NoteFields) -> Result<StoredNote, StoreError> {
        let mut connection = self.pool.get()?;

        // ids are random, so a collision just means drawing another one
        loop {
            let res = diesel::insert_into(notes)
                .values((
                    id.eq(new_id()),
                    title.eq(&fields.title),
                    note_type.eq(&fields.note_type),
                    content.eq(&fields.content),
                    password_digest.eq(&fields.password_digest),
                    views.eq(0_i64),
                ))
                .get_result::<StoredNote>(&mut connection);

            match res {
                Ok(note) => break Ok(note),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    log::debug!("note id collision, retrying");
                    continue;
                }
                Err(e) => break Err(e.into()),
            }
        }
    }

    fn fetch(&self, note_id: &str) -> Result<StoredNote, StoreError> {
        let mut connection = self.pool.get()?;
        Ok(notes.find(note_id).first::<StoredNote>(&mut connection)?)
    }

    fn increment_views(&self, note_id: &str, delta: i64) -> Result<i64, StoreError> {
        let mut connection = self.pool.get()?;
        Ok(diesel::update(notes.find(note_id))
            .set(views.eq(views + delta))
            .returning(views)
            .get_result::<i64>(&mut connection)?)
    }

    fn replace(&self, note_id: &str, fields: NoteFields) -> Result<(), StoreError> {
        let mut connection = self.pool.get()?;
        let updated = diesel::update(notes.find(note_id))
            .set((
                title.eq(fields.title),
                note_type.eq(fields.note_type),
                content.eq(fields.content),
                password_digest.eq(fields.password_digest),
            ))
            .execute(&mut connection)?;

        match updated {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }

    fn delete(&self, note_id: &str) -> Result<(), StoreError> {
        let mut connection = self.pool.get()?;
        match diesel::delete(notes.find(note_id)).execute(&mut connection)? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }
}
