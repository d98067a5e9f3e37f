use std::sync::Arc;
use async_trait::async_trait;
use tracing::{info, warn};
use crate::core::domain::Configuration;
use crate::core::events::{BOOK_BORROWED, BOOK_RETURNED, DomainEvent, FINE_CREATED};
use crate::core::library::{LibraryError, LibraryResult, TransactionStatus};
use crate::core::unit_of_work::UnitOfWorkFactory;
use crate::fines::domain::model::FineEntity;
use crate::fines::dto::FineDto;
use crate::gateway::events::{EventPublisher, publish_quietly};
use crate::members::domain::SuspensionService;
use crate::transactions::domain::CirculationService;
use crate::transactions::domain::model::TransactionEntity;
use crate::transactions::dto::{OverdueSweepDto, ReturnDto, TransactionDto};
use crate::transactions::repository::TransactionRepository;
use crate::utils::date::Clock;

pub(crate) struct CirculationServiceImpl {
    config: Configuration,
    transaction_repository: Box<dyn TransactionRepository>,
    unit_of_work: Box<dyn UnitOfWorkFactory>,
    suspension_service: Box<dyn SuspensionService>,
    events_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CirculationServiceImpl {
    pub(crate) fn new(config: &Configuration, transaction_repository: Box<dyn TransactionRepository>,
                      unit_of_work: Box<dyn UnitOfWorkFactory>,
                      suspension_service: Box<dyn SuspensionService>,
                      events_publisher: Arc<dyn EventPublisher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: config.clone(),
            transaction_repository,
            unit_of_work,
            suspension_service,
            events_publisher,
            clock,
        }
    }

    async fn publish(&self, event: serde_json::Result<DomainEvent>) {
        let event = event.map(|e| e.with_metadata("branch", self.config.branch_id.as_str()));
        publish_quietly(self.events_publisher.as_ref(), event).await;
    }

    // runs after the primary commit; never fails the caller
    async fn recompute_quietly(&self, member_id: i64) {
        if let Err(err) = self.suspension_service.recompute(member_id).await {
            warn!("failed to recompute suspension for member {}: {}", member_id, err);
        }
    }
}

#[async_trait]
impl CirculationService for CirculationServiceImpl {
    async fn borrow(&self, member_id: i64, book_id: i64) -> LibraryResult<TransactionDto> {
        let now = self.clock.now();
        let mut uow = self.unit_of_work.begin().await?;
        let member = uow.lock_member(member_id).await?
            .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", member_id).as_str()))?;
        if !member.is_active() {
            return Err(LibraryError::rejected("member not active", Some("member_not_active".to_string())));
        }
        if uow.count_unpaid_fines(member_id).await? > 0 {
            return Err(LibraryError::rejected("unpaid fines", Some("unpaid_fines".to_string())));
        }
        let outstanding = uow.count_transactions(member_id, &TransactionStatus::outstanding()).await?;
        if outstanding >= self.config.max_borrowed {
            return Err(LibraryError::rejected("borrow limit reached", Some("borrow_limit_reached".to_string())));
        }
        let mut book = uow.lock_book(book_id).await?
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", book_id).as_str()))?;
        book.lend(now)?;

        let transaction = uow.insert_transaction(
            &TransactionEntity::borrowed(member_id, book_id, now, self.config.loan_days)).await?;
        uow.update_book(&book).await?;
        uow.commit().await?;

        info!("member {} borrowed book {}, {} copies left", member_id, book_id, book.available_copies);
        let borrowed = TransactionDto::from(&transaction);
        self.recompute_quietly(member_id).await;
        self.publish(DomainEvent::added(BOOK_BORROWED, "transactions", borrowed.id, &borrowed)).await;
        Ok(borrowed)
    }

    async fn return_book(&self, transaction_id: i64) -> LibraryResult<ReturnDto> {
        let now = self.clock.now();
        let mut uow = self.unit_of_work.begin().await?;
        let mut transaction = uow.lock_transaction(transaction_id).await?
            .ok_or_else(|| LibraryError::not_found(format!("transaction not found for {}", transaction_id).as_str()))?;
        if transaction.is_returned() {
            return Err(LibraryError::rejected("already returned", Some("already_returned".to_string())));
        }
        let mut book = uow.lock_book(transaction.book_id).await?
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", transaction.book_id).as_str()))?;

        let fine = match FineEntity::for_late_return(&transaction, now, self.config.fine_per_day) {
            Some(fine) => Some(uow.insert_fine(&fine).await?),
            None => None,
        };
        transaction.mark_returned(now);
        uow.update_transaction(&transaction).await?;
        book.restock(now);
        uow.update_book(&book).await?;
        uow.commit().await?;

        let returned = ReturnDto {
            transaction: TransactionDto::from(&transaction),
            fine: fine.as_ref().map(FineDto::from),
        };
        info!("transaction {} returned, fine {:?}", transaction_id, returned.fine.as_ref().map(|f| f.amount));
        self.recompute_quietly(transaction.member_id).await;
        self.publish(DomainEvent::updated(BOOK_RETURNED, "transactions", transaction_id, &returned.transaction)).await;
        if let Some(fine) = &returned.fine {
            self.publish(DomainEvent::added(FINE_CREATED, "fines", fine.id, fine)).await;
        }
        Ok(returned)
    }

    async fn find_overdue(&self) -> LibraryResult<Vec<TransactionDto>> {
        let res = self.transaction_repository.find_overdue(self.clock.now()).await?;
        Ok(res.iter().map(TransactionDto::from).collect())
    }

    async fn mark_overdue(&self) -> LibraryResult<OverdueSweepDto> {
        let mut uow = self.unit_of_work.begin().await?;
        let flagged = uow.mark_overdue(None, self.clock.now()).await?;
        uow.commit().await?;

        let mut members = flagged.clone();
        members.sort_unstable();
        members.dedup();
        info!("flagged {} overdue transactions for {} members", flagged.len(), members.len());
        for member_id in &members {
            self.recompute_quietly(*member_id).await;
        }
        Ok(OverdueSweepDto {
            marked: flagged.len(),
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::Duration;
    use crate::books::dto::NewBook;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::create_catalog_service;
    use crate::core::controller::AppState;
    use crate::core::library::{BookStatus, LibraryError, LibraryResult, MemberStatus, TransactionStatus};
    use crate::fines::domain::FineService;
    use crate::fines::factory::create_fine_service;
    use crate::gateway::events::testing::RecordingPublisher;
    use crate::members::domain::MemberService;
    use crate::members::dto::NewMember;
    use crate::members::factory::create_member_service;
    use crate::transactions::domain::CirculationService;
    use crate::transactions::factory::create_circulation_service;
    use crate::transactions::dto::TransactionDto;
    use crate::utils::date::testing::FixedClock;

    struct Library {
        state: AppState,
        clock: Arc<FixedClock>,
        publisher: Arc<RecordingPublisher>,
        catalog: Box<dyn CatalogService>,
        members: Box<dyn MemberService>,
        circulation: Box<dyn CirculationService>,
        fines: Box<dyn FineService>,
    }

    fn library() -> Library {
        let clock = Arc::new(FixedClock::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let state = AppState::in_memory("test").with_clock(clock.clone()).with_publisher(publisher.clone());
        Library {
            clock,
            publisher,
            catalog: create_catalog_service(&state),
            members: create_member_service(&state),
            circulation: create_circulation_service(&state),
            fines: create_fine_service(&state),
            state,
        }
    }

    impl Library {
        async fn book(&self, isbn: &str, total_copies: i32) -> i64 {
            self.catalog.add_book(&NewBook {
                isbn: isbn.to_string(),
                title: format!("title of {}", isbn),
                author: "author".to_string(),
                category: Some("fiction".to_string()),
                total_copies,
            }).await.expect("should add book").id
        }

        async fn member(&self, number: &str) -> i64 {
            self.members.add_member(&NewMember {
                name: format!("member {}", number),
                email: format!("{}@lib.org", number),
                membership_number: number.to_string(),
            }).await.expect("should add member").id
        }
    }

    #[tokio::test]
    async fn test_should_borrow_and_return_last_copy() {
        let lib = library();
        let book = lib.book("ISBN1", 1).await;
        let first = lib.member("M1").await;
        let second = lib.member("M2").await;

        let borrowed = lib.circulation.borrow(first, book).await.expect("should borrow");
        assert_eq!(TransactionStatus::Active, borrowed.status);
        assert_eq!(borrowed.borrowed_at + Duration::days(14), borrowed.due_date);
        let shelf = lib.catalog.find_book_by_id(book).await.expect("should find book");
        assert_eq!(0, shelf.available_copies);
        assert_eq!(BookStatus::Borrowed, shelf.status);

        let res = lib.circulation.borrow(second, book).await;
        assert!(matches!(res, Err(LibraryError::Rejected { ref message, .. }) if message == "no copies available"));

        let returned = lib.circulation.return_book(borrowed.id).await.expect("should return");
        assert_eq!(TransactionStatus::Returned, returned.transaction.status);
        assert_eq!(None, returned.fine);
        let shelf = lib.catalog.find_book_by_id(book).await.expect("should find book");
        assert_eq!(1, shelf.available_copies);
        assert_eq!(BookStatus::Available, shelf.status);

        let res = lib.circulation.return_book(borrowed.id).await;
        assert!(matches!(res, Err(LibraryError::Rejected { ref message, .. }) if message == "already returned"));
        assert_eq!(vec!["book_added", "member_added", "member_added", "book_borrowed", "book_returned"],
                   lib.publisher.names());
    }

    #[tokio::test]
    async fn test_should_fine_late_return_and_block_borrowing() {
        let lib = library();
        let book = lib.book("ISBN2", 2).await;
        let member = lib.member("M3").await;

        let borrowed = lib.circulation.borrow(member, book).await.expect("should borrow");
        lib.clock.advance(Duration::days(34));
        let returned = lib.circulation.return_book(borrowed.id).await.expect("should return");
        let fine = returned.fine.expect("should fine late return");
        assert_eq!(10.0, fine.amount);
        assert_eq!(borrowed.id, fine.transaction_id);
        assert!(lib.publisher.names().contains(&"fine_created".to_string()));

        let res = lib.circulation.borrow(member, book).await;
        assert!(matches!(res, Err(LibraryError::Rejected { ref message, .. }) if message == "unpaid fines"));

        let _ = lib.fines.pay_fine(fine.id).await.expect("should pay fine");
        let _ = lib.circulation.borrow(member, book).await.expect("should borrow after paying");
    }

    #[tokio::test]
    async fn test_should_enforce_borrow_limit() {
        let lib = library();
        let book = lib.book("ISBN3", 5).await;
        let member = lib.member("M4").await;

        for _ in 0..3 {
            let _ = lib.circulation.borrow(member, book).await.expect("should borrow");
        }
        let res = lib.circulation.borrow(member, book).await;
        assert!(matches!(res, Err(LibraryError::Rejected { ref message, .. }) if message == "borrow limit reached"));
        assert_eq!(3, lib.members.find_borrowed(member).await.expect("should list borrowed").len());

        let shelf = lib.catalog.find_book_by_id(book).await.expect("should find book");
        assert_eq!(2, shelf.available_copies);
    }

    #[tokio::test]
    async fn test_should_reject_missing_or_inactive_parties() {
        let lib = library();
        let book = lib.book("ISBN4", 1).await;
        let member = lib.member("M5").await;

        assert!(matches!(lib.circulation.borrow(404, book).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(lib.circulation.borrow(member, 404).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(lib.circulation.return_book(404).await, Err(LibraryError::NotFound { .. })));

        let _ = lib.members.update_member(member, &crate::members::dto::MemberUpdate {
            status: Some(MemberStatus::Suspended),
            ..Default::default()
        }).await.expect("should suspend");
        let res = lib.circulation.borrow(member, book).await;
        assert!(matches!(res, Err(LibraryError::Rejected { ref message, .. }) if message == "member not active"));
        assert_eq!(1, lib.catalog.find_book_by_id(book).await.expect("should find book").available_copies);
    }

    #[tokio::test]
    async fn test_should_list_and_sweep_overdue_loans() {
        let lib = library();
        let book = lib.book("ISBN5", 5).await;
        let member = lib.member("M6").await;
        let other = lib.member("M7").await;

        for _ in 0..3 {
            let _ = lib.circulation.borrow(member, book).await.expect("should borrow");
        }
        let kept = lib.circulation.borrow(other, book).await.expect("should borrow");
        lib.clock.advance(Duration::days(15));

        let overdue = lib.circulation.find_overdue().await.expect("should list overdue");
        assert_eq!(4, overdue.len());
        assert!(overdue.windows(2).all(|w| w[0].due_date <= w[1].due_date));

        let sweep = lib.circulation.mark_overdue().await.expect("should sweep");
        assert_eq!(4, sweep.marked);
        assert_eq!(vec![member, other], sweep.members);
        assert!(lib.circulation.find_overdue().await.expect("should list overdue").is_empty());
        assert_eq!(MemberStatus::Suspended, lib.members.find_member_by_id(member).await.expect("should find").status);
        assert_eq!(MemberStatus::Active, lib.members.find_member_by_id(other).await.expect("should find").status);

        let returned = lib.circulation.return_book(kept.id).await.expect("should return overdue loan");
        assert_eq!(TransactionStatus::Returned, returned.transaction.status);
        assert_eq!(0.5, returned.fine.expect("should fine").amount);
    }

    // each task gets its own service over the shared store, as concurrent requests do
    async fn borrow_concurrently(lib: &Library, borrows: Vec<(i64, i64)>) -> Vec<LibraryResult<TransactionDto>> {
        let handles: Vec<_> = borrows.into_iter().map(|(member, book)| {
            let state = lib.state.clone();
            tokio::spawn(async move { create_circulation_service(&state).borrow(member, book).await })
        }).collect();
        let mut res = vec![];
        for handle in handles {
            res.push(handle.await.expect("should join borrow"));
        }
        res
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_lend_contended_copy_once() {
        let lib = library();
        let book = lib.book("ISBN6", 1).await;
        let mut borrows = vec![];
        for n in 0..8 {
            borrows.push((lib.member(format!("M{}", 20 + n).as_str()).await, book));
        }

        let res = borrow_concurrently(&lib, borrows).await;
        assert_eq!(1, res.iter().filter(|r| r.is_ok()).count());
        assert!(res.iter().filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, LibraryError::Rejected { ref message, .. } if message == "no copies available")));
        let shelf = lib.catalog.find_book_by_id(book).await.expect("should find book");
        assert_eq!(0, shelf.available_copies);
        assert_eq!(BookStatus::Borrowed, shelf.status);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_hold_borrow_limit_under_concurrent_borrows() {
        let lib = library();
        let book = lib.book("ISBN7", 5).await;
        let member = lib.member("M30").await;
        for _ in 0..2 {
            let _ = lib.circulation.borrow(member, book).await.expect("should borrow");
        }

        let res = borrow_concurrently(&lib, vec![(member, book), (member, book)]).await;
        assert_eq!(1, res.iter().filter(|r| r.is_ok()).count());
        assert!(res.iter().filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, LibraryError::Rejected { ref message, .. } if message == "borrow limit reached")));
        assert_eq!(3, lib.members.find_borrowed(member).await.expect("should list borrowed").len());
        assert_eq!(2, lib.catalog.find_book_by_id(book).await.expect("should find book").available_copies);
    }
}
