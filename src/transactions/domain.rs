pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::transactions::dto::{OverdueSweepDto, ReturnDto, TransactionDto};

// CirculationService moves copies between the shelf and members
#[async_trait]
pub(crate) trait CirculationService: Sync + Send {
    async fn borrow(&self, member_id: i64, book_id: i64) -> LibraryResult<TransactionDto>;

    async fn return_book(&self, transaction_id: i64) -> LibraryResult<ReturnDto>;

    // active loans past their due date that the sweep has not flagged yet
    async fn find_overdue(&self) -> LibraryResult<Vec<TransactionDto>>;

    async fn mark_overdue(&self) -> LibraryResult<OverdueSweepDto>;
}
