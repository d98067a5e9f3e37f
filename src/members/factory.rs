use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::members::domain::{MemberService, SuspensionService};
use crate::members::domain::service::MemberServiceImpl;
use crate::members::domain::suspension::SuspensionServiceImpl;
use crate::members::repository::MemberRepository;
use crate::members::repository::mem_member_repository::MemMemberRepository;
use crate::members::repository::pg_member_repository::PgMemberRepository;
use crate::transactions::factory::create_transaction_repository;

pub(crate) fn create_member_repository(store: &RepositoryStore) -> Box<dyn MemberRepository> {
    match store {
        RepositoryStore::Postgres(pool) => {
            Box::new(PgMemberRepository::new(pool.clone()))
        }
        RepositoryStore::InMemory(db) => {
            Box::new(MemMemberRepository::new(db.clone()))
        }
    }
}

pub(crate) fn create_member_service(state: &AppState) -> Box<dyn MemberService> {
    Box::new(MemberServiceImpl::new(&state.config, create_member_repository(&state.store),
                                    create_transaction_repository(&state.store),
                                    state.store.unit_of_work_factory(),
                                    state.publisher.clone(), state.clock.clone()))
}

pub(crate) fn create_suspension_service(state: &AppState) -> Box<dyn SuspensionService> {
    Box::new(SuspensionServiceImpl::new(&state.config, state.store.unit_of_work_factory(),
                                        state.publisher.clone(), state.clock.clone()))
}
