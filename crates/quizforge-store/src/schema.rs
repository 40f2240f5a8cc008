//! Table definitions.
//!
//! Ids and timestamps are stored as TEXT (UUID and RFC 3339 strings) so the
//! same statements run unchanged on SQLite and Postgres.

pub(crate) const CREATE_FORMS: &str = r"CREATE TABLE IF NOT EXISTS quiz_forms (
    id TEXT PRIMARY KEY,
    subject TEXT NOT NULL,
    amount_of_questions BIGINT NOT NULL,
    language TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

pub(crate) const CREATE_RESULTS: &str = r"CREATE TABLE IF NOT EXISTS quiz_results (
    id TEXT PRIMARY KEY,
    form_id TEXT NOT NULL REFERENCES quiz_forms(id),
    questions TEXT NOT NULL,
    request_message TEXT NOT NULL,
    response_message TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

pub(crate) const INSERT_FORM: &str = r"INSERT INTO quiz_forms (id, subject, amount_of_questions, language, created_at) VALUES ($1, $2, $3, $4, $5)";

pub(crate) const INSERT_RESULT: &str = r"INSERT INTO quiz_results (id, form_id, questions, request_message, response_message, created_at) VALUES ($1, $2, $3, $4, $5, $6)";

pub(crate) const SELECT_RESULT: &str = r"SELECT id, form_id, questions, request_message, response_message, created_at FROM quiz_results WHERE id = $1";
