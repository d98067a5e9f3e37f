pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::{FineFilter, LibraryResult};
use crate::fines::dto::FineDto;

#[async_trait]
pub(crate) trait FineService: Sync + Send {
    async fn find_fines(&self, filter: FineFilter) -> LibraryResult<Vec<FineDto>>;

    async fn pay_fine(&self, id: i64) -> LibraryResult<FineDto>;
}
