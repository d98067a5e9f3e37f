pub mod mem_transaction_repository;
pub mod pg_transaction_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::books::dto::BookSummaryDto;
use crate::core::library::LibraryResult;
use crate::members::dto::MemberSummaryDto;
use crate::transactions::domain::model::TransactionEntity;

// TransactionDetails is a transaction joined with the book and member it links
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionDetails {
    pub transaction: TransactionEntity,
    pub book: BookSummaryDto,
    pub member: MemberSummaryDto,
}

// Read side of transactions; writes go through a unit of work
#[async_trait]
pub(crate) trait TransactionRepository: Sync + Send {
    async fn get(&self, id: i64) -> LibraryResult<TransactionEntity>;

    // active transactions whose due date passed, oldest due date first
    async fn find_overdue(&self, now: NaiveDateTime) -> LibraryResult<Vec<TransactionDetails>>;

    // active and overdue transactions of a member, newest first
    async fn find_outstanding_by_member(&self, member_id: i64) -> LibraryResult<Vec<TransactionDetails>>;
}
