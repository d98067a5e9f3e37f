use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, OwnedMutexGuard};
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryError, LibraryResult};
use crate::fines::domain::model::FineEntity;
use crate::members::domain::model::MemberEntity;
use crate::transactions::domain::model::TransactionEntity;

// MemoryTables mirrors the relational schema, including its unique, check and
// foreign key constraints, for development mode and tests.
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryTables {
    pub books: BTreeMap<i64, BookEntity>,
    pub members: BTreeMap<i64, MemberEntity>,
    pub transactions: BTreeMap<i64, TransactionEntity>,
    pub fines: BTreeMap<i64, FineEntity>,
    book_seq: i64,
    member_seq: i64,
    transaction_seq: i64,
    fine_seq: i64,
}

impl MemoryTables {
    pub fn insert_book(&mut self, book: &BookEntity) -> LibraryResult<BookEntity> {
        let mut book = book.clone();
        book.id = self.book_seq + 1;
        self.check_book(&book)?;
        self.book_seq = book.id;
        self.books.insert(book.id, book.clone());
        Ok(book)
    }

    pub fn put_book(&mut self, book: &BookEntity) -> LibraryResult<usize> {
        if !self.books.contains_key(&book.id) {
            return Err(LibraryError::not_found(format!("book not found for {}", book.id).as_str()));
        }
        self.check_book(book)?;
        self.books.insert(book.id, book.clone());
        Ok(1)
    }

    pub fn remove_book(&mut self, id: i64) -> LibraryResult<usize> {
        if self.transactions.values().any(|t| t.book_id == id) {
            return Err(referenced("book", id));
        }
        Ok(self.books.remove(&id).map(|_| 1).unwrap_or(0))
    }

    pub fn insert_member(&mut self, member: &MemberEntity) -> LibraryResult<MemberEntity> {
        let mut member = member.clone();
        member.id = self.member_seq + 1;
        self.check_member(&member)?;
        self.member_seq = member.id;
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    pub fn put_member(&mut self, member: &MemberEntity) -> LibraryResult<usize> {
        if !self.members.contains_key(&member.id) {
            return Err(LibraryError::not_found(format!("member not found for {}", member.id).as_str()));
        }
        self.check_member(member)?;
        self.members.insert(member.id, member.clone());
        Ok(1)
    }

    pub fn remove_member(&mut self, id: i64) -> LibraryResult<usize> {
        if self.transactions.values().any(|t| t.member_id == id) || self.fines.values().any(|f| f.member_id == id) {
            return Err(referenced("member", id));
        }
        Ok(self.members.remove(&id).map(|_| 1).unwrap_or(0))
    }

    pub fn insert_transaction(&mut self, transaction: &TransactionEntity) -> LibraryResult<TransactionEntity> {
        if !self.books.contains_key(&transaction.book_id) || !self.members.contains_key(&transaction.member_id) {
            return Err(missing_reference("transaction"));
        }
        let mut transaction = transaction.clone();
        transaction.id = self.transaction_seq + 1;
        self.transaction_seq = transaction.id;
        self.transactions.insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    pub fn put_transaction(&mut self, transaction: &TransactionEntity) -> LibraryResult<()> {
        if !self.transactions.contains_key(&transaction.id) {
            return Err(LibraryError::not_found(format!("transaction not found for {}", transaction.id).as_str()));
        }
        self.transactions.insert(transaction.id, transaction.clone());
        Ok(())
    }

    pub fn insert_fine(&mut self, fine: &FineEntity) -> LibraryResult<FineEntity> {
        if !self.members.contains_key(&fine.member_id) || !self.transactions.contains_key(&fine.transaction_id) {
            return Err(missing_reference("fine"));
        }
        if fine.amount < 0.0 {
            return Err(LibraryError::validation("fine amount must not be negative", Some("23514".to_string())));
        }
        let mut fine = fine.clone();
        fine.id = self.fine_seq + 1;
        self.fine_seq = fine.id;
        self.fines.insert(fine.id, fine.clone());
        Ok(fine)
    }

    pub fn put_fine(&mut self, fine: &FineEntity) -> LibraryResult<()> {
        if !self.fines.contains_key(&fine.id) {
            return Err(LibraryError::not_found(format!("fine not found for {}", fine.id).as_str()));
        }
        self.fines.insert(fine.id, fine.clone());
        Ok(())
    }

    fn check_book(&self, book: &BookEntity) -> LibraryResult<()> {
        if self.books.values().any(|b| b.id != book.id && b.isbn == book.isbn) {
            return Err(LibraryError::duplicate_key(format!("isbn {} already exists", book.isbn).as_str()));
        }
        if book.total_copies < 0 {
            return Err(LibraryError::validation("total copies must not be negative", Some("23514".to_string())));
        }
        book.check_copies()
    }

    fn check_member(&self, member: &MemberEntity) -> LibraryResult<()> {
        if self.members.values().any(|m| m.id != member.id && m.email == member.email) {
            return Err(LibraryError::duplicate_key(format!("email {} already exists", member.email).as_str()));
        }
        if self.members.values().any(|m| m.id != member.id && m.membership_number == member.membership_number) {
            return Err(LibraryError::duplicate_key(
                format!("membership number {} already exists", member.membership_number).as_str()));
        }
        Ok(())
    }
}

fn referenced(kind: &str, id: i64) -> LibraryError {
    LibraryError::rejected(format!("{} {} is still referenced by other records", kind, id).as_str(),
                           Some("23503".to_string()))
}

fn missing_reference(kind: &str) -> LibraryError {
    LibraryError::rejected(format!("{} refers to a missing record", kind).as_str(), Some("23503".to_string()))
}

// MemoryDatabase is a shareable handle on the in-process tables. A single async
// mutex serializes all units of work.
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryDatabase {
    tables: Arc<Mutex<MemoryTables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, MemoryTables> {
        self.tables.lock().await
    }

    pub async fn lock_owned(&self) -> OwnedMutexGuard<MemoryTables> {
        self.tables.clone().lock_owned().await
    }
}
