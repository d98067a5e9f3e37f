use crate::books::repository::BookRepository;
use crate::books::repository::mem_book_repository::MemBookRepository;
use crate::books::repository::pg_book_repository::PgBookRepository;
use crate::core::repository::RepositoryStore;

pub(crate) fn create_book_repository(store: &RepositoryStore) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::Postgres(pool) => {
            Box::new(PgBookRepository::new(pool.clone()))
        }
        RepositoryStore::InMemory(db) => {
            Box::new(MemBookRepository::new(db.clone()))
        }
    }
}
