use async_trait::async_trait;

use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::utils::memory::MemoryDatabase;

#[derive(Debug)]
pub struct MemMemberRepository {
    db: MemoryDatabase,
}

impl MemMemberRepository {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self {
            db,
        }
    }
}

#[async_trait]
impl Repository<MemberEntity> for MemMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<MemberEntity> {
        self.db.lock().await.insert_member(entity)
    }

    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        self.db.lock().await.put_member(entity)
    }

    async fn get(&self, id: i64) -> LibraryResult<MemberEntity> {
        self.db.lock().await.members.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        self.db.lock().await.remove_member(id)
    }

    async fn find_all(&self) -> LibraryResult<Vec<MemberEntity>> {
        Ok(self.db.lock().await.members.values().cloned().collect())
    }
}

impl MemberRepository for MemMemberRepository {}
