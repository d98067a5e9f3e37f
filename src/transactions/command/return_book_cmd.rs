use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::transactions::domain::CirculationService;
use crate::transactions::dto::ReturnDto;

pub(crate) struct ReturnBookCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ReturnBookCommandRequest {
    pub(crate) transaction_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct ReturnBookCommandResponse {
    pub returned: ReturnDto,
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.circulation_service.return_book(req.transaction_id).await
            .map_err(CommandError::from).map(|returned| ReturnBookCommandResponse { returned })
    }
}
