use std::sync::Arc;
use async_trait::async_trait;
use tracing::{info, warn};
use crate::core::domain::Configuration;
use crate::core::events::{DomainEvent, FINE_PAID};
use crate::core::library::{FineFilter, LibraryError, LibraryResult};
use crate::core::unit_of_work::UnitOfWorkFactory;
use crate::fines::domain::FineService;
use crate::fines::dto::FineDto;
use crate::fines::repository::FineRepository;
use crate::gateway::events::{EventPublisher, publish_quietly};
use crate::members::domain::SuspensionService;
use crate::utils::date::Clock;

pub(crate) struct FineServiceImpl {
    branch_id: String,
    fine_repository: Box<dyn FineRepository>,
    unit_of_work: Box<dyn UnitOfWorkFactory>,
    suspension_service: Box<dyn SuspensionService>,
    events_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl FineServiceImpl {
    pub(crate) fn new(config: &Configuration, fine_repository: Box<dyn FineRepository>,
                      unit_of_work: Box<dyn UnitOfWorkFactory>,
                      suspension_service: Box<dyn SuspensionService>,
                      events_publisher: Arc<dyn EventPublisher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            fine_repository,
            unit_of_work,
            suspension_service,
            events_publisher,
            clock,
        }
    }
}

#[async_trait]
impl FineService for FineServiceImpl {
    async fn find_fines(&self, filter: FineFilter) -> LibraryResult<Vec<FineDto>> {
        let res = self.fine_repository.find(filter).await?;
        Ok(res.iter().map(FineDto::from).collect())
    }

    // paying does not reinstate by itself, the suspension rule decides
    async fn pay_fine(&self, id: i64) -> LibraryResult<FineDto> {
        let mut uow = self.unit_of_work.begin().await?;
        let mut fine = uow.lock_fine(id).await?
            .ok_or_else(|| LibraryError::not_found(format!("fine not found for {}", id).as_str()))?;
        fine.pay(self.clock.now())?;
        uow.update_fine(&fine).await?;
        uow.commit().await?;

        info!("fine {} of {} paid by member {}", fine.id, fine.amount, fine.member_id);
        if let Err(err) = self.suspension_service.recompute(fine.member_id).await {
            warn!("failed to recompute suspension for member {}: {}", fine.member_id, err);
        }
        let paid = FineDto::from(&fine);
        let event = DomainEvent::updated(FINE_PAID, "fines", paid.id, &paid)
            .map(|e| e.with_metadata("branch", self.branch_id.as_str()));
        publish_quietly(self.events_publisher.as_ref(), event).await;
        Ok(paid)
    }
}
