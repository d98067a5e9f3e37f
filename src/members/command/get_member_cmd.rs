use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::members::domain::MemberService;
use crate::members::dto::MemberDto;

pub(crate) struct GetMemberCommand {
    member_service: Box<dyn MemberService>,
}

impl GetMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GetMemberCommandRequest {
    pub(crate) member_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct GetMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<GetMemberCommandRequest, GetMemberCommandResponse> for GetMemberCommand {
    async fn execute(&self, req: GetMemberCommandRequest) -> Result<GetMemberCommandResponse, CommandError> {
        self.member_service.find_member_by_id(req.member_id).await
            .map_err(CommandError::from).map(|member| GetMemberCommandResponse { member })
    }
}
