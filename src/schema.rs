diesel::table! {
    notes (id) {
        id -> Varchar,
        title -> Varchar,
        note_type -> Varchar,
        content -> Text,
        password_digest -> Varchar,
        views -> Int8,
        created_at -> Timestamptz,
    }
}
