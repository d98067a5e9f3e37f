use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::transactions::domain::CirculationService;
use crate::transactions::dto::OverdueSweepDto;

// MarkOverdueCommand flags every late loan and re-evaluates the affected members
pub(crate) struct MarkOverdueCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl MarkOverdueCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct MarkOverdueCommandResponse {
    pub sweep: OverdueSweepDto,
}

#[async_trait]
impl Command<(), MarkOverdueCommandResponse> for MarkOverdueCommand {
    async fn execute(&self, _req: ()) -> Result<MarkOverdueCommandResponse, CommandError> {
        self.circulation_service.mark_overdue().await
            .map_err(CommandError::from).map(|sweep| MarkOverdueCommandResponse { sweep })
    }
}
