pub mod mem_unit_of_work;
pub mod pg_unit_of_work;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryResult, TransactionStatus};
use crate::fines::domain::model::FineEntity;
use crate::members::domain::model::MemberEntity;
use crate::transactions::domain::model::TransactionEntity;

// UnitOfWork is the transactional boundary of a workflow. Rows returned by the
// lock_* methods stay locked until commit. Dropping a unit of work without
// calling commit rolls back every write made through it.
#[async_trait]
pub(crate) trait UnitOfWork: Send {
    async fn lock_member(&mut self, member_id: i64) -> LibraryResult<Option<MemberEntity>>;

    async fn lock_book(&mut self, book_id: i64) -> LibraryResult<Option<BookEntity>>;

    async fn lock_transaction(&mut self, transaction_id: i64) -> LibraryResult<Option<TransactionEntity>>;

    async fn lock_fine(&mut self, fine_id: i64) -> LibraryResult<Option<FineEntity>>;

    async fn count_unpaid_fines(&mut self, member_id: i64) -> LibraryResult<i64>;

    async fn count_transactions(&mut self, member_id: i64, statuses: &[TransactionStatus]) -> LibraryResult<i64>;

    // flags active transactions past their due date as overdue, for one member
    // or for everyone; returns the member id of every flagged transaction
    async fn mark_overdue(&mut self, member_id: Option<i64>, now: NaiveDateTime) -> LibraryResult<Vec<i64>>;

    async fn insert_transaction(&mut self, transaction: &TransactionEntity) -> LibraryResult<TransactionEntity>;

    async fn update_transaction(&mut self, transaction: &TransactionEntity) -> LibraryResult<()>;

    async fn update_book(&mut self, book: &BookEntity) -> LibraryResult<()>;

    async fn insert_fine(&mut self, fine: &FineEntity) -> LibraryResult<FineEntity>;

    async fn update_fine(&mut self, fine: &FineEntity) -> LibraryResult<()>;

    async fn update_member(&mut self, member: &MemberEntity) -> LibraryResult<()>;

    async fn commit(self: Box<Self>) -> LibraryResult<()>;
}

#[async_trait]
pub(crate) trait UnitOfWorkFactory: Sync + Send {
    async fn begin(&self) -> LibraryResult<Box<dyn UnitOfWork>>;
}
