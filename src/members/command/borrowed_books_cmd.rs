use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::members::domain::MemberService;
use crate::transactions::dto::TransactionDto;

// BorrowedBooksCommand lists what a member still has out, overdue loans included
pub(crate) struct BorrowedBooksCommand {
    member_service: Box<dyn MemberService>,
}

impl BorrowedBooksCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct BorrowedBooksCommandRequest {
    pub(crate) member_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct BorrowedBooksCommandResponse {
    pub transactions: Vec<TransactionDto>,
}

#[async_trait]
impl Command<BorrowedBooksCommandRequest, BorrowedBooksCommandResponse> for BorrowedBooksCommand {
    async fn execute(&self, req: BorrowedBooksCommandRequest) -> Result<BorrowedBooksCommandResponse, CommandError> {
        self.member_service.find_borrowed(req.member_id).await
            .map_err(CommandError::from).map(|transactions| BorrowedBooksCommandResponse { transactions })
    }
}
