use async_trait::async_trait;
use sqlx::PgPool;
use crate::core::library::LibraryResult;
use crate::core::unit_of_work::UnitOfWorkFactory;
use crate::core::unit_of_work::mem_unit_of_work::MemUnitOfWorkFactory;
use crate::core::unit_of_work::pg_unit_of_work::PgUnitOfWorkFactory;
use crate::utils::memory::MemoryDatabase;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity and return it with its assigned id
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: i64) -> LibraryResult<usize>;

    // all entities ordered by id
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;
}

#[derive(Debug, Clone)]
pub(crate) enum RepositoryStore {
    Postgres(PgPool),
    InMemory(MemoryDatabase),
}

impl RepositoryStore {
    pub fn unit_of_work_factory(&self) -> Box<dyn UnitOfWorkFactory> {
        match self {
            RepositoryStore::Postgres(pool) => { Box::new(PgUnitOfWorkFactory::new(pool.clone())) }
            RepositoryStore::InMemory(db) => { Box::new(MemUnitOfWorkFactory::new(db.clone())) }
        }
    }
}
