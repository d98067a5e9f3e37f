use async_trait::async_trait;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{BookStatus, LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::memory::MemoryDatabase;

#[derive(Debug)]
pub struct MemBookRepository {
    db: MemoryDatabase,
}

impl MemBookRepository {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self {
            db,
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        self.db.lock().await.insert_book(entity)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.db.lock().await.put_book(entity)
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        self.db.lock().await.books.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        self.db.lock().await.remove_book(id)
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.db.lock().await.books.values().cloned().collect())
    }
}

#[async_trait]
impl BookRepository for MemBookRepository {
    async fn find_available(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.db.lock().await.books.values()
            .filter(|b| b.status == BookStatus::Available && b.available_copies > 0)
            .cloned().collect())
    }
}
