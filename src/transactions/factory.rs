use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::members::factory::create_suspension_service;
use crate::transactions::domain::CirculationService;
use crate::transactions::domain::service::CirculationServiceImpl;
use crate::transactions::repository::TransactionRepository;
use crate::transactions::repository::mem_transaction_repository::MemTransactionRepository;
use crate::transactions::repository::pg_transaction_repository::PgTransactionRepository;

pub(crate) fn create_transaction_repository(store: &RepositoryStore) -> Box<dyn TransactionRepository> {
    match store {
        RepositoryStore::Postgres(pool) => {
            Box::new(PgTransactionRepository::new(pool.clone()))
        }
        RepositoryStore::InMemory(db) => {
            Box::new(MemTransactionRepository::new(db.clone()))
        }
    }
}

pub(crate) fn create_circulation_service(state: &AppState) -> Box<dyn CirculationService> {
    Box::new(CirculationServiceImpl::new(&state.config, create_transaction_repository(&state.store),
                                         state.store.unit_of_work_factory(),
                                         create_suspension_service(state),
                                         state.publisher.clone(), state.clock.clone()))
}
