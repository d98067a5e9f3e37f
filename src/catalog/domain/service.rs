use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, BookUpdate, NewBook};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::{BOOK_ADDED, BOOK_REMOVED, BOOK_UPDATED, DomainEvent};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::unit_of_work::UnitOfWorkFactory;
use crate::gateway::events::{EventPublisher, publish_quietly};
use crate::utils::date::Clock;

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
    unit_of_work: Box<dyn UnitOfWorkFactory>,
    events_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      unit_of_work: Box<dyn UnitOfWorkFactory>,
                      events_publisher: Arc<dyn EventPublisher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            unit_of_work,
            events_publisher,
            clock,
        }
    }

    async fn publish(&self, event: serde_json::Result<DomainEvent>) {
        let event = event.map(|e| e.with_metadata("branch", self.branch_id.as_str()));
        publish_quietly(self.events_publisher.as_ref(), event).await;
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &NewBook) -> LibraryResult<BookDto> {
        if book.total_copies < 1 {
            return Err(LibraryError::validation("total_copies must be at least 1", Some("400".to_string())));
        }
        let entity = BookEntity::new(book.isbn.as_str(), book.title.as_str(), book.author.as_str(),
                                     book.category.clone(), book.total_copies, self.clock.now());
        let created = BookDto::from(&self.book_repository.create(&entity).await?);
        info!("added book {} with isbn {}", created.id, created.isbn);
        self.publish(DomainEvent::added(BOOK_ADDED, "books", created.id, &created)).await;
        Ok(created)
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        let removed = self.book_repository.delete(id).await?;
        if removed == 0 {
            return Err(LibraryError::not_found(format!("book not found for {}", id).as_str()));
        }
        self.publish(DomainEvent::deleted(BOOK_REMOVED, "books", id, &id)).await;
        Ok(())
    }

    // applied under the book row lock so concurrent borrows keep their copy counts
    async fn update_book(&self, id: i64, update: &BookUpdate) -> LibraryResult<BookDto> {
        let mut uow = self.unit_of_work.begin().await?;
        let mut book = uow.lock_book(id).await?
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))?;
        if let Some(isbn) = non_blank(&update.isbn, "isbn")? {
            book.isbn = isbn;
        }
        if let Some(title) = non_blank(&update.title, "title")? {
            book.title = title;
        }
        if let Some(author) = non_blank(&update.author, "author")? {
            book.author = author;
        }
        if update.category.is_some() {
            book.category = update.category.clone();
        }
        if let Some(total_copies) = update.total_copies {
            book.resize(total_copies)?;
        }
        if let Some(status) = update.status {
            book.status = status;
        }
        book.check_copies()?;
        book.updated_at = self.clock.now();
        uow.update_book(&book).await?;
        uow.commit().await?;

        let updated = BookDto::from(&book);
        self.publish(DomainEvent::updated(BOOK_UPDATED, "books", updated.id, &updated)).await;
        Ok(updated)
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn find_books(&self, available_only: bool) -> LibraryResult<Vec<BookDto>> {
        let res = if available_only {
            self.book_repository.find_available().await?
        } else {
            self.book_repository.find_all().await?
        };
        Ok(res.iter().map(BookDto::from).collect())
    }
}

fn non_blank(value: &Option<String>, name: &str) -> LibraryResult<Option<String>> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(LibraryError::validation(format!("{} must not be empty", name).as_str(), Some("400".to_string())))
        }
        Some(v) => Ok(Some(v.to_string())),
        None => Ok(None),
    }
}


#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::books::dto::{BookUpdate, NewBook};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::controller::AppState;
    use crate::core::library::{BookStatus, LibraryError};

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn CatalogService>> = AsyncOnce::new(async {
                factory::create_catalog_service(&AppState::in_memory("test"))
            });
    }

    fn new_book(isbn: &str, total_copies: i32) -> NewBook {
        NewBook {
            isbn: isbn.to_string(),
            title: "test book".to_string(),
            author: "author".to_string(),
            category: None,
            total_copies,
        }
    }

    #[tokio::test]
    async fn test_should_add_book() {
        let catalog_svc = SUT_SVC.get().await;

        let book = catalog_svc.add_book(&new_book("catalog-isbn-add", 2)).await.expect("should add book");
        assert_eq!(2, book.available_copies);

        let loaded = catalog_svc.find_book_by_id(book.id).await.expect("should return book");
        assert_eq!(book, loaded);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_isbn_and_zero_copies() {
        let catalog_svc = SUT_SVC.get().await;

        let _ = catalog_svc.add_book(&new_book("catalog-isbn-dup", 1)).await.expect("should add book");
        let res = catalog_svc.add_book(&new_book("catalog-isbn-dup", 1)).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        let res = catalog_svc.add_book(&new_book("catalog-isbn-zero", 0)).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let catalog_svc = SUT_SVC.get().await;

        let book = catalog_svc.add_book(&new_book("catalog-isbn-update", 2)).await.expect("should add book");
        let update = BookUpdate {
            title: Some("new title".to_string()),
            status: Some(BookStatus::Maintenance),
            total_copies: Some(4),
            ..BookUpdate::default()
        };
        let updated = catalog_svc.update_book(book.id, &update).await.expect("should update book");
        assert_eq!("new title", updated.title.as_str());
        assert_eq!(BookStatus::Maintenance, updated.status);
        assert_eq!(4, updated.total_copies);
        assert_eq!(4, updated.available_copies);

        let res = catalog_svc.update_book(book.id, &BookUpdate { total_copies: Some(-1), ..BookUpdate::default() }).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        let res = catalog_svc.update_book(book.id, &BookUpdate { title: Some(" ".to_string()), ..BookUpdate::default() }).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_find_available_books() {
        let catalog_svc = SUT_SVC.get().await;

        let book = catalog_svc.add_book(&new_book("catalog-isbn-shelf", 1)).await.expect("should add book");
        let hidden = catalog_svc.add_book(&new_book("catalog-isbn-repair", 1)).await.expect("should add book");
        let _ = catalog_svc.update_book(hidden.id, &BookUpdate { status: Some(BookStatus::Maintenance), ..BookUpdate::default() })
            .await.expect("should update book");

        let available = catalog_svc.find_books(true).await.expect("should find books");
        assert!(available.iter().any(|b| b.id == book.id));
        assert!(!available.iter().any(|b| b.id == hidden.id));
        let all = catalog_svc.find_books(false).await.expect("should find books");
        assert!(all.iter().any(|b| b.id == hidden.id));
    }

    #[tokio::test]
    async fn test_should_remove_book() {
        let catalog_svc = SUT_SVC.get().await;

        let book = catalog_svc.add_book(&new_book("catalog-isbn-remove", 1)).await.expect("should add book");
        let _ = catalog_svc.remove_book(book.id).await.expect("should remove book");

        let loaded = catalog_svc.find_book_by_id(book.id).await;
        assert!(matches!(loaded, Err(LibraryError::NotFound { .. })));
        let res = catalog_svc.remove_book(book.id).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }
}
