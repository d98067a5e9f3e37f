use chrono::NaiveDateTime;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::transactions::domain::model::TransactionEntity;
use crate::utils::date::{days_late, round_cents};

// FineEntity abstracts the penalty charged for one late return.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct FineEntity {
    pub id: i64,
    pub member_id: i64,
    pub transaction_id: i64,
    pub amount: f64,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FineEntity {
    // None when the book came back on or before its due date
    pub fn for_late_return(transaction: &TransactionEntity, now: NaiveDateTime, fine_per_day: f64) -> Option<Self> {
        let days = days_late(transaction.due_date, now);
        if days == 0 {
            return None;
        }
        Some(Self {
            id: 0,
            member_id: transaction.member_id,
            transaction_id: transaction.id,
            amount: round_cents(days as f64 * fine_per_day),
            paid_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }

    pub fn pay(&mut self, now: NaiveDateTime) -> LibraryResult<()> {
        if self.is_paid() {
            return Err(LibraryError::rejected("already paid", Some("already_paid".to_string())));
        }
        self.paid_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

impl Identifiable for FineEntity {
    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::core::library::LibraryError;
    use crate::fines::domain::model::FineEntity;
    use crate::transactions::domain::model::TransactionEntity;

    #[tokio::test]
    async fn test_should_not_fine_on_time_return() {
        let now = Utc::now().naive_utc();
        let transaction = TransactionEntity::borrowed(1, 2, now, 14);
        assert_eq!(None, FineEntity::for_late_return(&transaction, now + Duration::days(14), 0.5));
        assert_eq!(None, FineEntity::for_late_return(&transaction, now + Duration::days(3), 0.5));
    }

    #[tokio::test]
    async fn test_should_fine_late_return_by_started_day() {
        let now = Utc::now().naive_utc();
        let mut transaction = TransactionEntity::borrowed(1, 2, now, 14);
        transaction.id = 9;
        let fine = FineEntity::for_late_return(&transaction, transaction.due_date + Duration::days(20), 0.5)
            .expect("should fine");
        assert_eq!(10.0, fine.amount);
        assert_eq!(9, fine.transaction_id);
        assert_eq!(1, fine.member_id);
        let fine = FineEntity::for_late_return(&transaction, transaction.due_date + Duration::hours(1), 0.5)
            .expect("should fine");
        assert_eq!(0.5, fine.amount);
    }

    #[tokio::test]
    async fn test_should_pay_only_once() {
        let now = Utc::now().naive_utc();
        let transaction = TransactionEntity::borrowed(1, 2, now, 14);
        let mut fine = FineEntity::for_late_return(&transaction, now + Duration::days(16), 0.5).expect("should fine");
        assert!(!fine.is_paid());
        fine.pay(now).expect("should pay");
        assert!(fine.is_paid());
        assert!(matches!(fine.pay(now), Err(LibraryError::Rejected { .. })));
    }
}
