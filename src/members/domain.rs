pub mod model;
pub mod service;
pub mod suspension;

use async_trait::async_trait;
use crate::core::library::{LibraryResult, MemberStatus};
use crate::members::dto::{MemberDto, MemberUpdate, NewMember};
use crate::transactions::dto::TransactionDto;

#[async_trait]
pub(crate) trait MemberService: Sync + Send {
    async fn add_member(&self, member: &NewMember) -> LibraryResult<MemberDto>;
    async fn remove_member(&self, id: i64) -> LibraryResult<()>;
    async fn update_member(&self, id: i64, update: &MemberUpdate) -> LibraryResult<MemberDto>;
    async fn find_member_by_id(&self, id: i64) -> LibraryResult<MemberDto>;
    async fn find_members(&self) -> LibraryResult<Vec<MemberDto>>;
    async fn find_borrowed(&self, member_id: i64) -> LibraryResult<Vec<TransactionDto>>;
}

// SuspensionService derives a member's status from their overdue loans
#[async_trait]
pub(crate) trait SuspensionService: Sync + Send {
    // returns the new status when it changed; a missing member is a no-op
    async fn recompute(&self, member_id: i64) -> LibraryResult<Option<MemberStatus>>;
}
