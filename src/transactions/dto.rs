use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookSummaryDto;
use crate::core::library::TransactionStatus;
use crate::fines::dto::FineDto;
use crate::members::dto::MemberSummaryDto;
use crate::transactions::domain::model::TransactionEntity;
use crate::transactions::repository::TransactionDetails;
use crate::utils::date::{opt_serializer, serializer};

// TransactionDto is a data transfer object for Circulation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TransactionDto {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_date: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub returned_at: Option<NaiveDateTime>,
    pub status: TransactionStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
    // filled in by listings only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<BookSummaryDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberSummaryDto>,
}

impl From<&TransactionEntity> for TransactionDto {
    fn from(other: &TransactionEntity) -> Self {
        Self {
            id: other.id,
            book_id: other.book_id,
            member_id: other.member_id,
            borrowed_at: other.borrowed_at,
            due_date: other.due_date,
            returned_at: other.returned_at,
            status: other.status,
            created_at: other.created_at,
            updated_at: other.updated_at,
            book: None,
            member: None,
        }
    }
}

impl From<&TransactionDetails> for TransactionDto {
    fn from(other: &TransactionDetails) -> Self {
        Self {
            book: Some(other.book.clone()),
            member: Some(other.member.clone()),
            ..TransactionDto::from(&other.transaction)
        }
    }
}

// TransactionSummaryDto is the slice of a transaction embedded in fine listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TransactionSummaryDto {
    pub id: i64,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_date: NaiveDateTime,
}

impl From<&TransactionEntity> for TransactionSummaryDto {
    fn from(other: &TransactionEntity) -> Self {
        Self {
            id: other.id,
            borrowed_at: other.borrowed_at,
            due_date: other.due_date,
        }
    }
}

// ReturnDto is the outcome of a return: the closed transaction and the late fee, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReturnDto {
    pub transaction: TransactionDto,
    pub fine: Option<FineDto>,
}

// OverdueSweepDto reports how many transactions were flagged overdue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OverdueSweepDto {
    pub marked: usize,
    pub members: Vec<i64>,
}
