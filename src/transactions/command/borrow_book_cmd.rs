use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, missing_fields};
use crate::transactions::domain::CirculationService;
use crate::transactions::dto::TransactionDto;

pub(crate) struct BorrowBookCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl BorrowBookCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    pub(crate) member_id: Option<i64>,
    pub(crate) book_id: Option<i64>,
}

impl BorrowBookCommandRequest {
    pub fn new(member_id: i64, book_id: i64) -> Self {
        Self {
            member_id: Some(member_id),
            book_id: Some(book_id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct BorrowBookCommandResponse {
    pub transaction: TransactionDto,
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        let (Some(member_id), Some(book_id)) = (req.member_id, req.book_id) else {
            return Err(missing_fields("member_id and book_id are required"));
        };
        self.circulation_service.borrow(member_id, book_id).await
            .map_err(CommandError::from).map(|transaction| BorrowBookCommandResponse { transaction })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory::create_catalog_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;
    use crate::members::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest};
    use crate::members::factory::create_member_service;
    use crate::transactions::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
    use crate::transactions::factory::create_circulation_service;

    #[tokio::test]
    async fn test_should_run_borrow_book() {
        let state = AppState::in_memory("test");
        let book = AddBookCommand::new(create_catalog_service(&state))
            .execute(AddBookCommandRequest::new("borrow-isbn", "t", "a", 1)).await.expect("should add book").book;
        let member = AddMemberCommand::new(create_member_service(&state))
            .execute(AddMemberCommandRequest::new("Ann", "ann@lib.org", "M1")).await.expect("should add member").member;
        let cmd = BorrowBookCommand::new(create_circulation_service(&state));

        let res = cmd.execute(BorrowBookCommandRequest::new(member.id, book.id)).await.expect("should borrow");
        assert_eq!(book.id, res.transaction.book_id);

        let res = cmd.execute(BorrowBookCommandRequest { member_id: Some(member.id), book_id: None }).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
