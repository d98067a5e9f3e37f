use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::fines::domain::model::FineEntity;
use crate::fines::repository::FineDetails;
use crate::members::dto::MemberSummaryDto;
use crate::transactions::dto::TransactionSummaryDto;
use crate::utils::date::{opt_serializer, serializer};

// FineDto is a data transfer object for Fine service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FineDto {
    pub id: i64,
    pub member_id: i64,
    pub transaction_id: i64,
    pub amount: f64,
    #[serde(with = "opt_serializer")]
    pub paid_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberSummaryDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionSummaryDto>,
}

impl From<&FineEntity> for FineDto {
    fn from(other: &FineEntity) -> Self {
        Self {
            id: other.id,
            member_id: other.member_id,
            transaction_id: other.transaction_id,
            amount: other.amount,
            paid_at: other.paid_at,
            created_at: other.created_at,
            updated_at: other.updated_at,
            member: None,
            transaction: None,
        }
    }
}

impl From<&FineDetails> for FineDto {
    fn from(other: &FineDetails) -> Self {
        Self {
            member: Some(other.member.clone()),
            transaction: Some(other.transaction.clone()),
            ..FineDto::from(&other.fine)
        }
    }
}
