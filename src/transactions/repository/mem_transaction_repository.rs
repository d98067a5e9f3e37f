use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::books::dto::BookSummaryDto;
use crate::core::library::{LibraryError, LibraryResult, TransactionStatus};
use crate::members::dto::MemberSummaryDto;
use crate::transactions::domain::model::TransactionEntity;
use crate::transactions::repository::{TransactionDetails, TransactionRepository};
use crate::utils::memory::{MemoryDatabase, MemoryTables};

#[derive(Debug)]
pub struct MemTransactionRepository {
    db: MemoryDatabase,
}

impl MemTransactionRepository {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self {
            db,
        }
    }
}

#[async_trait]
impl TransactionRepository for MemTransactionRepository {
    async fn get(&self, id: i64) -> LibraryResult<TransactionEntity> {
        self.db.lock().await.transactions.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("transaction not found for {}", id).as_str()))
    }

    async fn find_overdue(&self, now: NaiveDateTime) -> LibraryResult<Vec<TransactionDetails>> {
        let tables = self.db.lock().await;
        let mut res: Vec<&TransactionEntity> = tables.transactions.values()
            .filter(|t| t.is_past_due(now))
            .collect();
        res.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
        res.into_iter().map(|t| with_parties(&tables, t)).collect()
    }

    async fn find_outstanding_by_member(&self, member_id: i64) -> LibraryResult<Vec<TransactionDetails>> {
        let outstanding = TransactionStatus::outstanding();
        let tables = self.db.lock().await;
        let mut res: Vec<&TransactionEntity> = tables.transactions.values()
            .filter(|t| t.member_id == member_id && outstanding.contains(&t.status))
            .collect();
        res.sort_by(|a, b| b.borrowed_at.cmp(&a.borrowed_at).then(b.id.cmp(&a.id)));
        res.into_iter().map(|t| with_parties(&tables, t)).collect()
    }
}

// the memory tables keep foreign keys intact, so both lookups hit
fn with_parties(tables: &MemoryTables, transaction: &TransactionEntity) -> LibraryResult<TransactionDetails> {
    let book = tables.books.get(&transaction.book_id)
        .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", transaction.book_id).as_str()))?;
    let member = tables.members.get(&transaction.member_id)
        .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", transaction.member_id).as_str()))?;
    Ok(TransactionDetails {
        transaction: transaction.clone(),
        book: BookSummaryDto::from(book),
        member: MemberSummaryDto::from(member),
    })
}
