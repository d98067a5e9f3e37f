use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::library::{FineFilter, LibraryError, LibraryResult};
use crate::fines::domain::model::FineEntity;
use crate::fines::repository::{FineDetails, FineRepository};
use crate::members::dto::MemberSummaryDto;
use crate::transactions::dto::TransactionSummaryDto;

// amount is NUMERIC(8,2) in the table and read back as a float
pub(crate) const FINE_COLUMNS: &str =
    "id, member_id, transaction_id, amount::FLOAT8 AS amount, paid_at, created_at, updated_at";

const DETAILS_SELECT: &str =
    "SELECT f.id, f.member_id, f.transaction_id, f.amount::FLOAT8 AS amount, f.paid_at, f.created_at, f.updated_at, \
     m.name AS member_name, m.email AS member_email, m.membership_number AS member_membership_number, \
     t.borrowed_at AS transaction_borrowed_at, t.due_date AS transaction_due_date \
     FROM fines f \
     JOIN members m ON m.id = f.member_id \
     JOIN transactions t ON t.id = f.transaction_id";

#[derive(Debug)]
pub struct PgFineRepository {
    pool: PgPool,
}

impl PgFineRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self {
            pool,
        }
    }
}

#[async_trait]
impl FineRepository for PgFineRepository {
    async fn get(&self, id: i64) -> LibraryResult<FineEntity> {
        let sql = format!("SELECT {} FROM fines WHERE id = $1", FINE_COLUMNS);
        let row = sqlx::query(sql.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => map_to_fine(&row),
            None => Err(LibraryError::not_found(format!("fine not found for {}", id).as_str())),
        }
    }

    async fn find(&self, filter: FineFilter) -> LibraryResult<Vec<FineDetails>> {
        let predicate = match filter {
            FineFilter::All => "",
            FineFilter::Unpaid => "WHERE f.paid_at IS NULL",
        };
        let sql = format!("{} {} ORDER BY f.created_at DESC, f.id DESC", DETAILS_SELECT, predicate);
        let rows = sqlx::query(sql.as_str()).fetch_all(&self.pool).await?;
        rows.iter().map(map_to_details).collect()
    }
}

fn map_to_details(row: &PgRow) -> LibraryResult<FineDetails> {
    let fine = map_to_fine(row)?;
    Ok(FineDetails {
        member: MemberSummaryDto {
            id: fine.member_id,
            name: row.try_get("member_name")?,
            email: row.try_get("member_email")?,
            membership_number: row.try_get("member_membership_number")?,
        },
        transaction: TransactionSummaryDto {
            id: fine.transaction_id,
            borrowed_at: row.try_get("transaction_borrowed_at")?,
            due_date: row.try_get("transaction_due_date")?,
        },
        fine,
    })
}

pub(crate) fn map_to_fine(row: &PgRow) -> LibraryResult<FineEntity> {
    Ok(FineEntity {
        id: row.try_get("id")?,
        member_id: row.try_get("member_id")?,
        transaction_id: row.try_get("transaction_id")?,
        amount: row.try_get("amount")?,
        paid_at: row.try_get("paid_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
