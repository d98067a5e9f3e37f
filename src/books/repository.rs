pub mod mem_book_repository;
pub mod pg_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // books marked available with at least one copy on the shelf
    async fn find_available(&self) -> LibraryResult<Vec<BookEntity>>;
}
