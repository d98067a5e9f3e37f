use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, missing_fields, present};
use crate::members::domain::MemberService;
use crate::members::dto::{MemberDto, NewMember};

pub(crate) struct AddMemberCommand {
    member_service: Box<dyn MemberService>,
}

impl AddMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddMemberCommandRequest {
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) membership_number: Option<String>,
}

impl AddMemberCommandRequest {
    pub fn new(name: &str, email: &str, membership_number: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            membership_number: Some(membership_number.to_string()),
        }
    }

    pub fn build_member(&self) -> Result<NewMember, CommandError> {
        match (present(&self.name), present(&self.email), present(&self.membership_number)) {
            (Some(name), Some(email), Some(membership_number)) => Ok(NewMember {
                name: name.to_string(),
                email: email.to_string(),
                membership_number: membership_number.to_string(),
            }),
            _ => Err(missing_fields("name, email and membership_number are required")),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct AddMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<AddMemberCommandRequest, AddMemberCommandResponse> for AddMemberCommand {
    async fn execute(&self, req: AddMemberCommandRequest) -> Result<AddMemberCommandResponse, CommandError> {
        let member = req.build_member()?;
        self.member_service.add_member(&member).await
            .map_err(CommandError::from).map(|member| AddMemberCommandResponse { member })
    }
}
