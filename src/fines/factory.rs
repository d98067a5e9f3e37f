use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::fines::domain::FineService;
use crate::fines::domain::service::FineServiceImpl;
use crate::fines::repository::FineRepository;
use crate::fines::repository::mem_fine_repository::MemFineRepository;
use crate::fines::repository::pg_fine_repository::PgFineRepository;
use crate::members::factory::create_suspension_service;

pub(crate) fn create_fine_repository(store: &RepositoryStore) -> Box<dyn FineRepository> {
    match store {
        RepositoryStore::Postgres(pool) => {
            Box::new(PgFineRepository::new(pool.clone()))
        }
        RepositoryStore::InMemory(db) => {
            Box::new(MemFineRepository::new(db.clone()))
        }
    }
}

pub(crate) fn create_fine_service(state: &AppState) -> Box<dyn FineService> {
    Box::new(FineServiceImpl::new(&state.config, create_fine_repository(&state.store),
                                  state.store.unit_of_work_factory(),
                                  create_suspension_service(state),
                                  state.publisher.clone(), state.clock.clone()))
}
