use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::controller::AppState;

pub(crate) fn create_catalog_service(state: &AppState) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(&state.store);
    Box::new(CatalogServiceImpl::new(&state.config, book_repo, state.store.unit_of_work_factory(),
                                     state.publisher.clone(), state.clock.clone()))
}
