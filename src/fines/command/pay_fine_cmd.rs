use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::fines::domain::FineService;
use crate::fines::dto::FineDto;

pub(crate) struct PayFineCommand {
    fine_service: Box<dyn FineService>,
}

impl PayFineCommand {
    pub(crate) fn new(fine_service: Box<dyn FineService>) -> Self {
        Self {
            fine_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct PayFineCommandRequest {
    pub(crate) fine_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct PayFineCommandResponse {
    pub fine: FineDto,
}

#[async_trait]
impl Command<PayFineCommandRequest, PayFineCommandResponse> for PayFineCommand {
    async fn execute(&self, req: PayFineCommandRequest) -> Result<PayFineCommandResponse, CommandError> {
        self.fine_service.pay_fine(req.fine_id).await
            .map_err(CommandError::from).map(|fine| PayFineCommandResponse { fine })
    }
}
