use async_trait::async_trait;

use crate::core::library::{FineFilter, LibraryError, LibraryResult};
use crate::fines::domain::model::FineEntity;
use crate::fines::repository::{FineDetails, FineRepository};
use crate::members::dto::MemberSummaryDto;
use crate::transactions::dto::TransactionSummaryDto;
use crate::utils::memory::{MemoryDatabase, MemoryTables};

#[derive(Debug)]
pub struct MemFineRepository {
    db: MemoryDatabase,
}

impl MemFineRepository {
    pub(crate) fn new(db: MemoryDatabase) -> Self {
        Self {
            db,
        }
    }
}

#[async_trait]
impl FineRepository for MemFineRepository {
    async fn get(&self, id: i64) -> LibraryResult<FineEntity> {
        self.db.lock().await.fines.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("fine not found for {}", id).as_str()))
    }

    async fn find(&self, filter: FineFilter) -> LibraryResult<Vec<FineDetails>> {
        let tables = self.db.lock().await;
        let mut res: Vec<&FineEntity> = tables.fines.values()
            .filter(|f| filter == FineFilter::All || !f.is_paid())
            .collect();
        res.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        res.into_iter().map(|f| with_parties(&tables, f)).collect()
    }
}

fn with_parties(tables: &MemoryTables, fine: &FineEntity) -> LibraryResult<FineDetails> {
    let member = tables.members.get(&fine.member_id)
        .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", fine.member_id).as_str()))?;
    let transaction = tables.transactions.get(&fine.transaction_id)
        .ok_or_else(|| LibraryError::not_found(format!("transaction not found for {}", fine.transaction_id).as_str()))?;
    Ok(FineDetails {
        fine: fine.clone(),
        member: MemberSummaryDto::from(member),
        transaction: TransactionSummaryDto::from(transaction),
    })
}
