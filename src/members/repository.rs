pub mod mem_member_repository;
pub mod pg_member_repository;

use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;

pub(crate) trait MemberRepository: Repository<MemberEntity> {
}
