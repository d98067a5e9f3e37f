pub mod mem_fine_repository;
pub mod pg_fine_repository;

use async_trait::async_trait;
use crate::core::library::{FineFilter, LibraryResult};
use crate::fines::domain::model::FineEntity;
use crate::members::dto::MemberSummaryDto;
use crate::transactions::dto::TransactionSummaryDto;

// FineDetails is a fine joined with the member who owes it and the loan it was charged for
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FineDetails {
    pub fine: FineEntity,
    pub member: MemberSummaryDto,
    pub transaction: TransactionSummaryDto,
}

#[async_trait]
pub(crate) trait FineRepository: Sync + Send {
    async fn get(&self, id: i64) -> LibraryResult<FineEntity>;

    // newest first
    async fn find(&self, filter: FineFilter) -> LibraryResult<Vec<FineDetails>>;
}
