use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::core::library::FineFilter;
use crate::fines::domain::FineService;
use crate::fines::dto::FineDto;

pub(crate) struct ListFinesCommand {
    fine_service: Box<dyn FineService>,
}

impl ListFinesCommand {
    pub(crate) fn new(fine_service: Box<dyn FineService>) -> Self {
        Self {
            fine_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ListFinesCommandRequest {
    pub(crate) filter: FineFilter,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct ListFinesCommandResponse {
    pub fines: Vec<FineDto>,
}

#[async_trait]
impl Command<ListFinesCommandRequest, ListFinesCommandResponse> for ListFinesCommand {
    async fn execute(&self, req: ListFinesCommandRequest) -> Result<ListFinesCommandResponse, CommandError> {
        self.fine_service.find_fines(req.filter).await
            .map_err(CommandError::from).map(|fines| ListFinesCommandResponse { fines })
    }
}
