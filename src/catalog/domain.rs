pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, BookUpdate, NewBook};
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &NewBook) -> LibraryResult<BookDto>;
    async fn remove_book(&self, id: i64) -> LibraryResult<()>;
    async fn update_book(&self, id: i64, update: &BookUpdate) -> LibraryResult<BookDto>;
    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto>;
    async fn find_books(&self, available_only: bool) -> LibraryResult<Vec<BookDto>>;
}
