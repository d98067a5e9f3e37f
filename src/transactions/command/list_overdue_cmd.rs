use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::transactions::domain::CirculationService;
use crate::transactions::dto::TransactionDto;

pub(crate) struct ListOverdueCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl ListOverdueCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct ListOverdueCommandResponse {
    pub transactions: Vec<TransactionDto>,
}

#[async_trait]
impl Command<(), ListOverdueCommandResponse> for ListOverdueCommand {
    async fn execute(&self, _req: ()) -> Result<ListOverdueCommandResponse, CommandError> {
        self.circulation_service.find_overdue().await
            .map_err(CommandError::from).map(|transactions| ListOverdueCommandResponse { transactions })
    }
}
