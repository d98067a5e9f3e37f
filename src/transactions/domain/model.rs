use chrono::{Duration, NaiveDateTime};
use crate::core::domain::Identifiable;
use crate::core::library::TransactionStatus;

// TransactionEntity abstracts one borrowing of a book copy by a member.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct TransactionEntity {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub borrowed_at: NaiveDateTime,
    pub due_date: NaiveDateTime,
    pub returned_at: Option<NaiveDateTime>,
    pub status: TransactionStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TransactionEntity {
    pub fn borrowed(member_id: i64, book_id: i64, now: NaiveDateTime, loan_days: i64) -> Self {
        Self {
            id: 0,
            book_id,
            member_id,
            borrowed_at: now,
            due_date: now + Duration::days(loan_days),
            returned_at: None,
            status: TransactionStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_returned(&self) -> bool {
        self.status == TransactionStatus::Returned
    }

    pub fn is_past_due(&self, now: NaiveDateTime) -> bool {
        self.status == TransactionStatus::Active && self.due_date < now
    }

    pub fn mark_returned(&mut self, now: NaiveDateTime) {
        self.returned_at = Some(now);
        self.status = TransactionStatus::Returned;
        self.updated_at = now;
    }

    pub fn mark_overdue(&mut self, now: NaiveDateTime) {
        self.status = TransactionStatus::Overdue;
        self.updated_at = now;
    }
}

impl Identifiable for TransactionEntity {
    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::core::library::TransactionStatus;
    use crate::transactions::domain::model::TransactionEntity;

    #[tokio::test]
    async fn test_should_build_transaction() {
        let now = Utc::now().naive_utc();
        let transaction = TransactionEntity::borrowed(1, 2, now, 14);
        assert_eq!(1, transaction.member_id);
        assert_eq!(2, transaction.book_id);
        assert_eq!(now + Duration::days(14), transaction.due_date);
        assert_eq!(TransactionStatus::Active, transaction.status);
        assert!(!transaction.is_past_due(now));
        assert!(transaction.is_past_due(now + Duration::days(15)));
    }

    #[tokio::test]
    async fn test_should_mark_returned() {
        let now = Utc::now().naive_utc();
        let mut transaction = TransactionEntity::borrowed(1, 2, now, 14);
        transaction.mark_overdue(now + Duration::days(15));
        assert!(!transaction.is_past_due(now + Duration::days(15)));
        transaction.mark_returned(now + Duration::days(16));
        assert!(transaction.is_returned());
        assert_eq!(Some(now + Duration::days(16)), transaction.returned_at);
    }
}
