use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use crate::core::library::{LibraryError, LibraryResult};

const SCHEMA: [&str; 6] = [
    "CREATE TABLE IF NOT EXISTS books (
        id BIGSERIAL PRIMARY KEY,
        isbn VARCHAR(32) NOT NULL UNIQUE,
        title VARCHAR(255) NOT NULL,
        author VARCHAR(255) NOT NULL,
        category VARCHAR(100),
        status VARCHAR(16) NOT NULL DEFAULT 'available'
            CHECK (status IN ('available', 'borrowed', 'reserved', 'maintenance')),
        total_copies INTEGER NOT NULL DEFAULT 1 CHECK (total_copies >= 0),
        available_copies INTEGER NOT NULL DEFAULT 1
            CHECK (available_copies >= 0 AND available_copies <= total_copies),
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS members (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        membership_number VARCHAR(64) NOT NULL UNIQUE,
        status VARCHAR(16) NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'suspended')),
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS transactions (
        id BIGSERIAL PRIMARY KEY,
        book_id BIGINT NOT NULL REFERENCES books(id) ON DELETE RESTRICT,
        member_id BIGINT NOT NULL REFERENCES members(id) ON DELETE RESTRICT,
        borrowed_at TIMESTAMP NOT NULL,
        due_date TIMESTAMP NOT NULL,
        returned_at TIMESTAMP,
        status VARCHAR(16) NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'returned', 'overdue')),
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS fines (
        id BIGSERIAL PRIMARY KEY,
        member_id BIGINT NOT NULL REFERENCES members(id) ON DELETE RESTRICT,
        transaction_id BIGINT NOT NULL REFERENCES transactions(id) ON DELETE RESTRICT,
        amount NUMERIC(8, 2) NOT NULL CHECK (amount >= 0),
        paid_at TIMESTAMP,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS transactions_member_status_ndx ON transactions (member_id, status)",
    "CREATE INDEX IF NOT EXISTS fines_member_ndx ON fines (member_id)",
];

pub(crate) async fn build_pool(database_url: &str) -> LibraryResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    Ok(pool)
}

// idempotent, safe to run on every start
pub(crate) async fn create_schema(pool: &PgPool) -> LibraryResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

impl From<sqlx::Error> for LibraryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => {
                LibraryError::not_found("record not found")
            }
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                match code.as_deref() {
                    Some("23505") => {
                        LibraryError::duplicate_key(db_err.message())
                    }
                    Some("23503") => {
                        LibraryError::rejected(
                            format!("record is still referenced or refers to a missing record: {}",
                                    db_err.message()).as_str(), code.clone())
                    }
                    Some("23514") => {
                        LibraryError::validation(db_err.message(), code.clone())
                    }
                    _ => {
                        LibraryError::database(db_err.message(), code.clone(), false)
                    }
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                LibraryError::database(format!("{:?}", err).as_str(), None, true)
            }
            _ => {
                LibraryError::database(format!("{:?}", err).as_str(), None, false)
            }
        }
    }
}
