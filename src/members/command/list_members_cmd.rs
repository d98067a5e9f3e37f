use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::members::domain::MemberService;
use crate::members::dto::MemberDto;

pub(crate) struct ListMembersCommand {
    member_service: Box<dyn MemberService>,
}

impl ListMembersCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct ListMembersCommandResponse {
    pub members: Vec<MemberDto>,
}

#[async_trait]
impl Command<(), ListMembersCommandResponse> for ListMembersCommand {
    async fn execute(&self, _req: ()) -> Result<ListMembersCommandResponse, CommandError> {
        self.member_service.find_members().await
            .map_err(CommandError::from).map(|members| ListMembersCommandResponse { members })
    }
}
