pub mod borrow_book_cmd;
pub mod list_overdue_cmd;
pub mod mark_overdue_cmd;
pub mod return_book_cmd;
