use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::MemberStatus;
use crate::members::domain::model::MemberEntity;
use crate::utils::date::serializer;

// MemberDto is a data transfer object for Member service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MemberDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub membership_number: String,
    pub status: MemberStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl From<&MemberEntity> for MemberDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            id: other.id,
            name: other.name.to_string(),
            email: other.email.to_string(),
            membership_number: other.membership_number.to_string(),
            status: other.status,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MemberSummaryDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub membership_number: String,
}

impl From<&MemberEntity> for MemberSummaryDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            id: other.id,
            name: other.name.to_string(),
            email: other.email.to_string(),
            membership_number: other.membership_number.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewMember {
    pub name: String,
    pub email: String,
    pub membership_number: String,
}

// MemberUpdate is a partial change; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct MemberUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub membership_number: Option<String>,
    pub status: Option<MemberStatus>,
}
