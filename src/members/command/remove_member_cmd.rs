use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::members::domain::MemberService;

pub(crate) struct RemoveMemberCommand {
    member_service: Box<dyn MemberService>,
}

impl RemoveMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RemoveMemberCommandRequest {
    pub(crate) member_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveMemberCommandResponse {
    message: String,
}

#[async_trait]
impl Command<RemoveMemberCommandRequest, RemoveMemberCommandResponse> for RemoveMemberCommand {
    async fn execute(&self, req: RemoveMemberCommandRequest) -> Result<RemoveMemberCommandResponse, CommandError> {
        self.member_service.remove_member(req.member_id).await
            .map_err(CommandError::from)
            .map(|_| RemoveMemberCommandResponse { message: "Member deleted".to_string() })
    }
}
