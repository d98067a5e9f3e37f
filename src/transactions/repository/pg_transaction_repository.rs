use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::books::dto::BookSummaryDto;
use crate::core::library::{LibraryError, LibraryResult, TransactionStatus};
use crate::members::dto::MemberSummaryDto;
use crate::transactions::domain::model::TransactionEntity;
use crate::transactions::repository::{TransactionDetails, TransactionRepository};

pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, book_id, member_id, borrowed_at, due_date, returned_at, status, created_at, updated_at";

const DETAILS_SELECT: &str =
    "SELECT t.id, t.book_id, t.member_id, t.borrowed_at, t.due_date, t.returned_at, t.status, \
     t.created_at, t.updated_at, \
     b.title AS book_title, b.author AS book_author, b.isbn AS book_isbn, b.category AS book_category, \
     m.name AS member_name, m.email AS member_email, m.membership_number AS member_membership_number \
     FROM transactions t \
     JOIN books b ON b.id = t.book_id \
     JOIN members m ON m.id = t.member_id";

#[derive(Debug)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self {
            pool,
        }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn get(&self, id: i64) -> LibraryResult<TransactionEntity> {
        let sql = format!("SELECT {} FROM transactions WHERE id = $1", TRANSACTION_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => map_to_transaction(&row),
            None => Err(LibraryError::not_found(format!("transaction not found for {}", id).as_str())),
        }
    }

    async fn find_overdue(&self, now: NaiveDateTime) -> LibraryResult<Vec<TransactionDetails>> {
        let sql = format!("{} WHERE t.status = $1 AND t.due_date < $2 \
                           ORDER BY t.due_date ASC, t.id ASC", DETAILS_SELECT);
        let rows = sqlx::query(sql.as_str())
            .bind(TransactionStatus::Active.to_string())
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_to_details).collect()
    }

    async fn find_outstanding_by_member(&self, member_id: i64) -> LibraryResult<Vec<TransactionDetails>> {
        let statuses: Vec<String> = TransactionStatus::outstanding().iter().map(|s| s.to_string()).collect();
        let sql = format!("{} WHERE t.member_id = $1 AND t.status = ANY($2) \
                           ORDER BY t.borrowed_at DESC, t.id DESC", DETAILS_SELECT);
        let rows = sqlx::query(sql.as_str())
            .bind(member_id)
            .bind(statuses)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_to_details).collect()
    }
}

fn map_to_details(row: &PgRow) -> LibraryResult<TransactionDetails> {
    let transaction = map_to_transaction(row)?;
    Ok(TransactionDetails {
        book: BookSummaryDto {
            id: transaction.book_id,
            title: row.try_get("book_title")?,
            author: row.try_get("book_author")?,
            isbn: row.try_get("book_isbn")?,
            category: row.try_get("book_category")?,
        },
        member: MemberSummaryDto {
            id: transaction.member_id,
            name: row.try_get("member_name")?,
            email: row.try_get("member_email")?,
            membership_number: row.try_get("member_membership_number")?,
        },
        transaction,
    })
}

pub(crate) fn map_to_transaction(row: &PgRow) -> LibraryResult<TransactionEntity> {
    let status: String = row.try_get("status")?;
    Ok(TransactionEntity {
        id: row.try_get("id")?,
        book_id: row.try_get("book_id")?,
        member_id: row.try_get("member_id")?,
        borrowed_at: row.try_get("borrowed_at")?,
        due_date: row.try_get("due_date")?,
        returned_at: row.try_get("returned_at")?,
        status: TransactionStatus::try_from(status.as_str())?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
