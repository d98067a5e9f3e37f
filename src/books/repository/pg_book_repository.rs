use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{BookStatus, LibraryError, LibraryResult};
use crate::core::repository::Repository;

pub(crate) const BOOK_COLUMNS: &str =
    "id, isbn, title, author, category, status, total_copies, available_copies, created_at, updated_at";

#[derive(Debug)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self {
            pool,
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for PgBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let sql = format!("INSERT INTO books (isbn, title, author, category, status, total_copies, available_copies, \
                           created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}", BOOK_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(&entity.isbn)
            .bind(&entity.title)
            .bind(&entity.author)
            .bind(&entity.category)
            .bind(entity.status.to_string())
            .bind(entity.total_copies)
            .bind(entity.available_copies)
            .bind(entity.created_at)
            .bind(entity.updated_at)
            .fetch_one(&self.pool)
            .await?;
        map_to_book(&row)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let res = sqlx::query("UPDATE books SET isbn = $2, title = $3, author = $4, category = $5, status = $6, \
                               total_copies = $7, available_copies = $8, updated_at = $9 WHERE id = $1")
            .bind(entity.id)
            .bind(&entity.isbn)
            .bind(&entity.title)
            .bind(&entity.author)
            .bind(&entity.category)
            .bind(entity.status.to_string())
            .bind(entity.total_copies)
            .bind(entity.available_copies)
            .bind(entity.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() as usize)
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => map_to_book(&row),
            None => Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
        }
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let res = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() as usize)
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let sql = format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS);
        let rows = sqlx::query(sql.as_str()).fetch_all(&self.pool).await?;
        rows.iter().map(map_to_book).collect()
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn find_available(&self) -> LibraryResult<Vec<BookEntity>> {
        let sql = format!("SELECT {} FROM books WHERE status = $1 AND available_copies > 0 ORDER BY id", BOOK_COLUMNS);
        let rows = sqlx::query(sql.as_str())
            .bind(BookStatus::Available.to_string())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_to_book).collect()
    }
}

pub(crate) fn map_to_book(row: &PgRow) -> LibraryResult<BookEntity> {
    let status: String = row.try_get("status")?;
    Ok(BookEntity {
        id: row.try_get("id")?,
        isbn: row.try_get("isbn")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        category: row.try_get("category")?,
        status: BookStatus::try_from(status.as_str())?,
        total_copies: row.try_get("total_copies")?,
        available_copies: row.try_get("available_copies")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
