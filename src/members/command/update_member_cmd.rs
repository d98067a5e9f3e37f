use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::members::domain::MemberService;
use crate::members::dto::{MemberDto, MemberUpdate};

pub(crate) struct UpdateMemberCommand {
    member_service: Box<dyn MemberService>,
}

impl UpdateMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateMemberCommandRequest {
    pub member_id: i64,
    pub update: MemberUpdate,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct UpdateMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<UpdateMemberCommandRequest, UpdateMemberCommandResponse> for UpdateMemberCommand {
    async fn execute(&self, req: UpdateMemberCommandRequest) -> Result<UpdateMemberCommandResponse, CommandError> {
        self.member_service.update_member(req.member_id, &req.update).await
            .map_err(CommandError::from).map(|member| UpdateMemberCommandResponse { member })
    }
}
