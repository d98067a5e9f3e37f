use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::core::domain::Configuration;
use crate::core::events::{DomainEvent, MEMBER_ADDED, MEMBER_REMOVED, MEMBER_UPDATED};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::unit_of_work::UnitOfWorkFactory;
use crate::gateway::events::{EventPublisher, publish_quietly};
use crate::members::domain::MemberService;
use crate::members::domain::model::MemberEntity;
use crate::members::dto::{MemberDto, MemberUpdate, NewMember};
use crate::members::repository::MemberRepository;
use crate::transactions::dto::TransactionDto;
use crate::transactions::repository::TransactionRepository;
use crate::utils::date::Clock;

pub(crate) struct MemberServiceImpl {
    branch_id: String,
    member_repository: Box<dyn MemberRepository>,
    transaction_repository: Box<dyn TransactionRepository>,
    unit_of_work: Box<dyn UnitOfWorkFactory>,
    events_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl MemberServiceImpl {
    pub(crate) fn new(config: &Configuration, member_repository: Box<dyn MemberRepository>,
                      transaction_repository: Box<dyn TransactionRepository>,
                      unit_of_work: Box<dyn UnitOfWorkFactory>,
                      events_publisher: Arc<dyn EventPublisher>, clock: Arc<dyn Clock>) -> Self {
        MemberServiceImpl {
            branch_id: config.branch_id.to_string(),
            member_repository,
            transaction_repository,
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
impl MemberService for MemberServiceImpl {
    async fn add_member(&self, member: &NewMember) -> LibraryResult<MemberDto> {
        let entity = MemberEntity::new(member.name.as_str(), member.email.as_str(),
                                       member.membership_number.as_str(), self.clock.now());
        let created = MemberDto::from(&self.member_repository.create(&entity).await?);
        info!("added member {} with membership number {}", created.id, created.membership_number);
        self.publish(DomainEvent::added(MEMBER_ADDED, "members", created.id, &created)).await;
        Ok(created)
    }

    async fn remove_member(&self, id: i64) -> LibraryResult<()> {
        let removed = self.member_repository.delete(id).await?;
        if removed == 0 {
            return Err(LibraryError::not_found(format!("member not found for {}", id).as_str()));
        }
        self.publish(DomainEvent::deleted(MEMBER_REMOVED, "members", id, &id)).await;
        Ok(())
    }

    async fn update_member(&self, id: i64, update: &MemberUpdate) -> LibraryResult<MemberDto> {
        let mut uow = self.unit_of_work.begin().await?;
        let mut member = uow.lock_member(id).await?
            .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", id).as_str()))?;
        for (field, value) in [("name", &update.name), ("email", &update.email),
            ("membership_number", &update.membership_number)] {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                return Err(LibraryError::validation(format!("{} must not be empty", field).as_str(),
                                                    Some("400".to_string())));
            }
        }
        if let Some(name) = &update.name {
            member.name = name.to_string();
        }
        if let Some(email) = &update.email {
            member.email = email.to_string();
        }
        if let Some(membership_number) = &update.membership_number {
            member.membership_number = membership_number.to_string();
        }
        if let Some(status) = update.status {
            member.status = status;
        }
        member.updated_at = self.clock.now();
        uow.update_member(&member).await?;
        uow.commit().await?;

        let updated = MemberDto::from(&member);
        self.publish(DomainEvent::updated(MEMBER_UPDATED, "members", updated.id, &updated)).await;
        Ok(updated)
    }

    async fn find_member_by_id(&self, id: i64) -> LibraryResult<MemberDto> {
        self.member_repository.get(id).await.map(|m| MemberDto::from(&m))
    }

    async fn find_members(&self) -> LibraryResult<Vec<MemberDto>> {
        let res = self.member_repository.find_all().await?;
        Ok(res.iter().map(MemberDto::from).collect())
    }

    async fn find_borrowed(&self, member_id: i64) -> LibraryResult<Vec<TransactionDto>> {
        let _ = self.member_repository.get(member_id).await?;
        let res = self.transaction_repository.find_outstanding_by_member(member_id).await?;
        Ok(res.iter().map(TransactionDto::from).collect())
    }
}
