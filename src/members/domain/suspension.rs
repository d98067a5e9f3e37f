use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::core::domain::Configuration;
use crate::core::events::{DomainEvent, MEMBER_REINSTATED, MEMBER_SUSPENDED};
use crate::core::library::{LibraryResult, MemberStatus, TransactionStatus};
use crate::core::unit_of_work::UnitOfWorkFactory;
use crate::gateway::events::{EventPublisher, publish_quietly};
use crate::members::domain::SuspensionService;
use crate::members::dto::MemberDto;
use crate::utils::date::Clock;

// Suspend at the threshold, reinstate only once nothing is overdue. Counts in
// between keep the current status.
pub(crate) fn next_status(current: MemberStatus, overdue: i64, threshold: i64) -> Option<MemberStatus> {
    match current {
        MemberStatus::Active if overdue >= threshold => Some(MemberStatus::Suspended),
        MemberStatus::Suspended if overdue == 0 => Some(MemberStatus::Active),
        _ => None,
    }
}

pub(crate) struct SuspensionServiceImpl {
    branch_id: String,
    suspension_threshold: i64,
    unit_of_work: Box<dyn UnitOfWorkFactory>,
    events_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl SuspensionServiceImpl {
    pub(crate) fn new(config: &Configuration, unit_of_work: Box<dyn UnitOfWorkFactory>,
                      events_publisher: Arc<dyn EventPublisher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            suspension_threshold: config.suspension_threshold,
            unit_of_work,
            events_publisher,
            clock,
        }
    }
}

#[async_trait]
impl SuspensionService for SuspensionServiceImpl {
    async fn recompute(&self, member_id: i64) -> LibraryResult<Option<MemberStatus>> {
        let now = self.clock.now();
        let mut uow = self.unit_of_work.begin().await?;
        let Some(mut member) = uow.lock_member(member_id).await? else {
            return Ok(None);
        };
        let _ = uow.mark_overdue(Some(member_id), now).await?;
        let overdue = uow.count_transactions(member_id, &[TransactionStatus::Overdue]).await?;
        let next = next_status(member.status, overdue, self.suspension_threshold);
        if let Some(status) = next {
            member.status = status;
            member.updated_at = now;
            uow.update_member(&member).await?;
        }
        uow.commit().await?;

        if let Some(status) = next {
            info!("member {} is now {} with {} overdue loans", member_id, status, overdue);
            let name = if status == MemberStatus::Suspended { MEMBER_SUSPENDED } else { MEMBER_REINSTATED };
            let event = DomainEvent::updated(name, "members", member_id, &MemberDto::from(&member))
                .map(|e| e.with_metadata("branch", self.branch_id.as_str()));
            publish_quietly(self.events_publisher.as_ref(), event).await;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::Duration;
    use crate::books::domain::model::BookEntity;
    use crate::core::controller::AppState;
    use crate::core::library::{MemberStatus, TransactionStatus};
    use crate::core::repository::RepositoryStore;
    use crate::gateway::events::testing::RecordingPublisher;
    use crate::members::domain::model::MemberEntity;
    use crate::members::domain::suspension::next_status;
    use crate::members::factory;
    use crate::transactions::domain::model::TransactionEntity;
    use crate::utils::date::Clock;
    use crate::utils::date::testing::FixedClock;
    use crate::utils::memory::MemoryDatabase;

    #[tokio::test]
    async fn test_should_apply_hysteresis() {
        assert_eq!(Some(MemberStatus::Suspended), next_status(MemberStatus::Active, 3, 3));
        assert_eq!(Some(MemberStatus::Suspended), next_status(MemberStatus::Active, 4, 3));
        assert_eq!(None, next_status(MemberStatus::Active, 2, 3));
        assert_eq!(None, next_status(MemberStatus::Active, 0, 3));
        assert_eq!(None, next_status(MemberStatus::Suspended, 1, 3));
        assert_eq!(None, next_status(MemberStatus::Suspended, 2, 3));
        assert_eq!(None, next_status(MemberStatus::Suspended, 3, 3));
        assert_eq!(Some(MemberStatus::Active), next_status(MemberStatus::Suspended, 0, 3));
    }

    fn memory_of(state: &AppState) -> MemoryDatabase {
        match &state.store {
            RepositoryStore::InMemory(db) => db.clone(),
            RepositoryStore::Postgres(_) => panic!("expected in-memory store"),
        }
    }

    #[tokio::test]
    async fn test_should_suspend_after_sweeping_overdue_loans() {
        let clock = Arc::new(FixedClock::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let state = AppState::in_memory("test").with_clock(clock.clone()).with_publisher(publisher.clone());
        let db = memory_of(&state);
        let now = clock.now();
        let (member, transaction_ids) = {
            let mut tables = db.lock().await;
            let book = tables.insert_book(&BookEntity::new("isbn", "t", "a", None, 5, now)).expect("should insert");
            let member = tables.insert_member(&MemberEntity::new("a", "a@x", "M1", now)).expect("should insert");
            let mut ids = vec![];
            for _ in 0..3 {
                let tx = tables.insert_transaction(&TransactionEntity::borrowed(member.id, book.id, now, 14))
                    .expect("should insert");
                ids.push(tx.id);
            }
            (member, ids)
        };
        let svc = factory::create_suspension_service(&state);

        assert_eq!(None, svc.recompute(member.id).await.expect("should recompute"));
        clock.advance(Duration::days(15));
        assert_eq!(Some(MemberStatus::Suspended), svc.recompute(member.id).await.expect("should recompute"));
        {
            let tables = db.lock().await;
            assert_eq!(Some(MemberStatus::Suspended), tables.members.get(&member.id).map(|m| m.status));
            assert!(transaction_ids.iter().all(|id| tables.transactions.get(id).map(|t| t.status) == Some(TransactionStatus::Overdue)));
        }
        assert_eq!(vec!["member_suspended".to_string()], publisher.names());

        // returning two of three keeps the suspension
        {
            let mut tables = db.lock().await;
            for id in &transaction_ids[..2] {
                let mut tx = tables.transactions.get(id).cloned().expect("should exist");
                tx.mark_returned(clock.now());
                tables.put_transaction(&tx).expect("should update");
            }
        }
        assert_eq!(None, svc.recompute(member.id).await.expect("should recompute"));

        {
            let mut tables = db.lock().await;
            let mut tx = tables.transactions.get(&transaction_ids[2]).cloned().expect("should exist");
            tx.mark_returned(clock.now());
            tables.put_transaction(&tx).expect("should update");
        }
        assert_eq!(Some(MemberStatus::Active), svc.recompute(member.id).await.expect("should recompute"));
        assert_eq!(vec!["member_suspended".to_string(), "member_reinstated".to_string()], publisher.names());
    }

    #[tokio::test]
    async fn test_should_ignore_missing_member() {
        let state = AppState::in_memory("test");
        let svc = factory::create_suspension_service(&state);
        assert_eq!(None, svc.recompute(404).await.expect("should be a no-op"));
    }
}
