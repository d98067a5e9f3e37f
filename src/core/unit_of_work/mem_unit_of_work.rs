use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::OwnedMutexGuard;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryResult, TransactionStatus};
use crate::core::unit_of_work::{UnitOfWork, UnitOfWorkFactory};
use crate::fines::domain::model::FineEntity;
use crate::members::domain::model::MemberEntity;
use crate::transactions::domain::model::TransactionEntity;
use crate::utils::memory::{MemoryDatabase, MemoryTables};

pub(crate) struct MemUnitOfWorkFactory {
    db: MemoryDatabase,
}

impl MemUnitOfWorkFactory {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self {
            db,
        }
    }
}

#[async_trait]
impl UnitOfWorkFactory for MemUnitOfWorkFactory {
    async fn begin(&self) -> LibraryResult<Box<dyn UnitOfWork>> {
        let guard = self.db.lock_owned().await;
        let work = (*guard).clone();
        Ok(Box::new(MemUnitOfWork { guard, work }))
    }
}

// MemUnitOfWork holds the store lock for its whole life and writes to a copy
// of the tables; commit swaps the copy in, drop discards it.
pub(crate) struct MemUnitOfWork {
    guard: OwnedMutexGuard<MemoryTables>,
    work: MemoryTables,
}

#[async_trait]
impl UnitOfWork for MemUnitOfWork {
    async fn lock_member(&mut self, member_id: i64) -> LibraryResult<Option<MemberEntity>> {
        Ok(self.work.members.get(&member_id).cloned())
    }

    async fn lock_book(&mut self, book_id: i64) -> LibraryResult<Option<BookEntity>> {
        Ok(self.work.books.get(&book_id).cloned())
    }

    async fn lock_transaction(&mut self, transaction_id: i64) -> LibraryResult<Option<TransactionEntity>> {
        Ok(self.work.transactions.get(&transaction_id).cloned())
    }

    async fn lock_fine(&mut self, fine_id: i64) -> LibraryResult<Option<FineEntity>> {
        Ok(self.work.fines.get(&fine_id).cloned())
    }

    async fn count_unpaid_fines(&mut self, member_id: i64) -> LibraryResult<i64> {
        Ok(self.work.fines.values()
            .filter(|f| f.member_id == member_id && !f.is_paid())
            .count() as i64)
    }

    async fn count_transactions(&mut self, member_id: i64, statuses: &[TransactionStatus]) -> LibraryResult<i64> {
        Ok(self.work.transactions.values()
            .filter(|t| t.member_id == member_id && statuses.contains(&t.status))
            .count() as i64)
    }

    async fn mark_overdue(&mut self, member_id: Option<i64>, now: NaiveDateTime) -> LibraryResult<Vec<i64>> {
        let mut member_ids = vec![];
        for transaction in self.work.transactions.values_mut() {
            if transaction.is_past_due(now) && member_id.map_or(true, |id| id == transaction.member_id) {
                transaction.mark_overdue(now);
                member_ids.push(transaction.member_id);
            }
        }
        Ok(member_ids)
    }

    async fn insert_transaction(&mut self, transaction: &TransactionEntity) -> LibraryResult<TransactionEntity> {
        self.work.insert_transaction(transaction)
    }

    async fn update_transaction(&mut self, transaction: &TransactionEntity) -> LibraryResult<()> {
        self.work.put_transaction(transaction)
    }

    async fn update_book(&mut self, book: &BookEntity) -> LibraryResult<()> {
        self.work.put_book(book).map(|_| ())
    }

    async fn insert_fine(&mut self, fine: &FineEntity) -> LibraryResult<FineEntity> {
        self.work.insert_fine(fine)
    }

    async fn update_fine(&mut self, fine: &FineEntity) -> LibraryResult<()> {
        self.work.put_fine(fine)
    }

    async fn update_member(&mut self, member: &MemberEntity) -> LibraryResult<()> {
        self.work.put_member(member).map(|_| ())
    }

    async fn commit(self: Box<Self>) -> LibraryResult<()> {
        let MemUnitOfWork { mut guard, work } = *self;
        *guard = work;
        Ok(())
    }
}
