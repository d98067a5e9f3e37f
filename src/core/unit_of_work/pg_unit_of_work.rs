use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, Transaction};
use crate::books::domain::model::BookEntity;
use crate::books::repository::pg_book_repository::{BOOK_COLUMNS, map_to_book};
use crate::core::library::{LibraryResult, TransactionStatus};
use crate::core::unit_of_work::{UnitOfWork, UnitOfWorkFactory};
use crate::fines::domain::model::FineEntity;
use crate::fines::repository::pg_fine_repository::{FINE_COLUMNS, map_to_fine};
use crate::members::domain::model::MemberEntity;
use crate::members::repository::pg_member_repository::{MEMBER_COLUMNS, map_to_member};
use crate::transactions::domain::model::TransactionEntity;
use crate::transactions::repository::pg_transaction_repository::{TRANSACTION_COLUMNS, map_to_transaction};

pub(crate) struct PgUnitOfWorkFactory {
    pool: PgPool,
}

impl PgUnitOfWorkFactory {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self {
            pool,
        }
    }
}

#[async_trait]
impl UnitOfWorkFactory for PgUnitOfWorkFactory {
    async fn begin(&self) -> LibraryResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

// PgUnitOfWork wraps a database transaction; sqlx rolls it back when it is
// dropped before commit.
pub(crate) struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn lock_member(&mut self, member_id: i64) -> LibraryResult<Option<MemberEntity>> {
        let sql = format!("SELECT {} FROM members WHERE id = $1 FOR UPDATE", MEMBER_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(member_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        row.as_ref().map(map_to_member).transpose()
    }

    async fn lock_book(&mut self, book_id: i64) -> LibraryResult<Option<BookEntity>> {
        let sql = format!("SELECT {} FROM books WHERE id = $1 FOR UPDATE", BOOK_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(book_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        row.as_ref().map(map_to_book).transpose()
    }

    async fn lock_transaction(&mut self, transaction_id: i64) -> LibraryResult<Option<TransactionEntity>> {
        let sql = format!("SELECT {} FROM transactions WHERE id = $1 FOR UPDATE", TRANSACTION_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(transaction_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        row.as_ref().map(map_to_transaction).transpose()
    }

    async fn lock_fine(&mut self, fine_id: i64) -> LibraryResult<Option<FineEntity>> {
        let sql = format!("SELECT {} FROM fines WHERE id = $1 FOR UPDATE", FINE_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(fine_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        row.as_ref().map(map_to_fine).transpose()
    }

    async fn count_unpaid_fines(&mut self, member_id: i64) -> LibraryResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fines WHERE member_id = $1 AND paid_at IS NULL")
            .bind(member_id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    async fn count_transactions(&mut self, member_id: i64, statuses: &[TransactionStatus]) -> LibraryResult<i64> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE member_id = $1 AND status = ANY($2)")
            .bind(member_id)
            .bind(statuses)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    async fn mark_overdue(&mut self, member_id: Option<i64>, now: NaiveDateTime) -> LibraryResult<Vec<i64>> {
        let member_ids: Vec<i64> = sqlx::query_scalar(
            "UPDATE transactions SET status = $1, updated_at = $2 \
             WHERE status = $3 AND due_date < $2 AND ($4::BIGINT IS NULL OR member_id = $4) \
             RETURNING member_id")
            .bind(TransactionStatus::Overdue.to_string())
            .bind(now)
            .bind(TransactionStatus::Active.to_string())
            .bind(member_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(member_ids)
    }

    async fn insert_transaction(&mut self, transaction: &TransactionEntity) -> LibraryResult<TransactionEntity> {
        let sql = format!("INSERT INTO transactions (book_id, member_id, borrowed_at, due_date, returned_at, status, \
                           created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}", TRANSACTION_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(transaction.book_id)
            .bind(transaction.member_id)
            .bind(transaction.borrowed_at)
            .bind(transaction.due_date)
            .bind(transaction.returned_at)
            .bind(transaction.status.to_string())
            .bind(transaction.created_at)
            .bind(transaction.updated_at)
            .fetch_one(&mut *self.tx)
            .await?;
        map_to_transaction(&row)
    }

    async fn update_transaction(&mut self, transaction: &TransactionEntity) -> LibraryResult<()> {
        sqlx::query("UPDATE transactions SET returned_at = $2, status = $3, updated_at = $4 WHERE id = $1")
            .bind(transaction.id)
            .bind(transaction.returned_at)
            .bind(transaction.status.to_string())
            .bind(transaction.updated_at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn update_book(&mut self, book: &BookEntity) -> LibraryResult<()> {
        sqlx::query("UPDATE books SET isbn = $2, title = $3, author = $4, category = $5, status = $6, \
                     total_copies = $7, available_copies = $8, updated_at = $9 WHERE id = $1")
            .bind(book.id)
            .bind(&book.isbn)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.category)
            .bind(book.status.to_string())
            .bind(book.total_copies)
            .bind(book.available_copies)
            .bind(book.updated_at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn insert_fine(&mut self, fine: &FineEntity) -> LibraryResult<FineEntity> {
        let sql = format!("INSERT INTO fines (member_id, transaction_id, amount, paid_at, created_at, updated_at) \
                           VALUES ($1, $2, ROUND($3::NUMERIC, 2), $4, $5, $6) RETURNING {}", FINE_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(fine.member_id)
            .bind(fine.transaction_id)
            .bind(fine.amount)
            .bind(fine.paid_at)
            .bind(fine.created_at)
            .bind(fine.updated_at)
            .fetch_one(&mut *self.tx)
            .await?;
        map_to_fine(&row)
    }

    async fn update_fine(&mut self, fine: &FineEntity) -> LibraryResult<()> {
        sqlx::query("UPDATE fines SET paid_at = $2, updated_at = $3 WHERE id = $1")
            .bind(fine.id)
            .bind(fine.paid_at)
            .bind(fine.updated_at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn update_member(&mut self, member: &MemberEntity) -> LibraryResult<()> {
        sqlx::query("UPDATE members SET name = $2, email = $3, membership_number = $4, status = $5, \
                     updated_at = $6 WHERE id = $1")
            .bind(member.id)
            .bind(&member.name)
            .bind(&member.email)
            .bind(&member.membership_number)
            .bind(member.status.to_string())
            .bind(member.updated_at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> LibraryResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
