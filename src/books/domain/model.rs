use chrono::NaiveDateTime;
use crate::core::domain::Identifiable;
use crate::core::library::{BookStatus, LibraryError, LibraryResult};

// BookEntity abstracts a title in the catalog together with its lendable copies.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct BookEntity {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub status: BookStatus,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    // id is assigned by the store on create
    pub fn new(isbn: &str, title: &str, author: &str, category: Option<String>,
               total_copies: i32, now: NaiveDateTime) -> Self {
        Self {
            id: 0,
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            category,
            status: BookStatus::Available,
            total_copies,
            available_copies: total_copies,
            created_at: now,
            updated_at: now,
        }
    }

    // takes one copy off the shelf for a borrow
    pub fn lend(&mut self, now: NaiveDateTime) -> LibraryResult<()> {
        if self.available_copies < 1 {
            return Err(LibraryError::rejected("no copies available", Some("no_copies_available".to_string())));
        }
        self.available_copies -= 1;
        self.status = if self.available_copies == 0 { BookStatus::Borrowed } else { BookStatus::Available };
        self.updated_at = now;
        Ok(())
    }

    // puts a returned copy back on the shelf
    pub fn restock(&mut self, now: NaiveDateTime) {
        self.available_copies += 1;
        self.status = BookStatus::Available;
        self.updated_at = now;
    }

    // changes inventory size while keeping the number of lent copies
    pub fn resize(&mut self, total_copies: i32) -> LibraryResult<()> {
        let lent = self.total_copies - self.available_copies;
        let available = total_copies - lent;
        if total_copies < 0 || available < 0 {
            return Err(LibraryError::validation(
                format!("total_copies {} is less than {} copies currently borrowed", total_copies, lent).as_str(),
                Some("400".to_string())));
        }
        self.total_copies = total_copies;
        self.available_copies = available;
        // reserved and maintenance are set by staff and survive a resize
        if matches!(self.status, BookStatus::Available | BookStatus::Borrowed) {
            self.status = if available == 0 { BookStatus::Borrowed } else { BookStatus::Available };
        }
        Ok(())
    }

    pub fn check_copies(&self) -> LibraryResult<()> {
        if self.available_copies < 0 || self.available_copies > self.total_copies {
            return Err(LibraryError::validation(
                format!("available copies {} must be between 0 and {}", self.available_copies, self.total_copies).as_str(),
                Some("400".to_string())));
        }
        Ok(())
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::books::domain::model::BookEntity;
    use crate::core::library::{BookStatus, LibraryError};

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("isbn", "title", "author", None, 2, Utc::now().naive_utc());
        assert_eq!("isbn", book.isbn.as_str());
        assert_eq!(2, book.available_copies);
        assert_eq!(BookStatus::Available, book.status);
    }

    #[tokio::test]
    async fn test_should_lend_and_restock() {
        let now = Utc::now().naive_utc();
        let mut book = BookEntity::new("isbn", "title", "author", None, 2, now);
        book.lend(now).expect("should lend first copy");
        assert_eq!(1, book.available_copies);
        assert_eq!(BookStatus::Available, book.status);
        book.lend(now).expect("should lend second copy");
        assert_eq!(0, book.available_copies);
        assert_eq!(BookStatus::Borrowed, book.status);
        let res = book.lend(now);
        assert!(matches!(res, Err(LibraryError::Rejected { .. })));
        book.restock(now);
        assert_eq!(1, book.available_copies);
        assert_eq!(BookStatus::Available, book.status);
    }

    #[tokio::test]
    async fn test_should_resize_copies() {
        let now = Utc::now().naive_utc();
        let mut book = BookEntity::new("isbn", "title", "author", None, 3, now);
        book.lend(now).expect("should lend");
        book.lend(now).expect("should lend");
        book.resize(5).expect("should grow");
        assert_eq!(3, book.available_copies);
        book.resize(2).expect("should shrink");
        assert_eq!(0, book.available_copies);
        assert!(book.resize(1).is_err());
    }

    #[tokio::test]
    async fn test_should_track_status_on_resize() {
        let now = Utc::now().naive_utc();
        let mut book = BookEntity::new("isbn", "title", "author", None, 2, now);
        book.lend(now).expect("should lend");
        assert_eq!(BookStatus::Available, book.status);
        book.resize(1).expect("should shrink");
        assert_eq!(0, book.available_copies);
        assert_eq!(BookStatus::Borrowed, book.status);
        book.resize(3).expect("should grow");
        assert_eq!(2, book.available_copies);
        assert_eq!(BookStatus::Available, book.status);

        book.status = BookStatus::Maintenance;
        book.resize(1).expect("should shrink");
        assert_eq!(BookStatus::Maintenance, book.status);
    }
}
