use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, NewBook};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError, missing_fields, present};

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) isbn: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) total_copies: Option<i32>,
}

impl AddBookCommandRequest {
    pub fn new(isbn: &str, title: &str, author: &str, total_copies: i32) -> Self {
        Self {
            isbn: Some(isbn.to_string()),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            category: None,
            total_copies: Some(total_copies),
        }
    }

    pub fn build_book(&self) -> Result<NewBook, CommandError> {
        match (present(&self.isbn), present(&self.title), present(&self.author)) {
            (Some(isbn), Some(title), Some(author)) => Ok(NewBook {
                isbn: isbn.to_string(),
                title: title.to_string(),
                author: author.to_string(),
                category: self.category.clone(),
                total_copies: self.total_copies.unwrap_or(1),
            }),
            _ => Err(missing_fields("isbn, title, author required")),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book()?;
        self.catalog_service.add_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&AppState::in_memory("test"));
                AddBookCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let cmd = SUT_CMD.get().await;

        let res = cmd.execute(AddBookCommandRequest::new("cmd-isbn-add", "test book", "author", 3))
            .await.expect("should add book");
        assert_eq!("cmd-isbn-add", res.book.isbn.as_str());
        assert_eq!(3, res.book.available_copies);
    }

    #[tokio::test]
    async fn test_should_default_to_one_copy() {
        let cmd = SUT_CMD.get().await;

        let mut req = AddBookCommandRequest::new("cmd-isbn-default", "test book", "author", 0);
        req.total_copies = None;
        let res = cmd.execute(req).await.expect("should add book");
        assert_eq!(1, res.book.total_copies);
    }

    #[tokio::test]
    async fn test_should_require_isbn_title_author() {
        let cmd = SUT_CMD.get().await;

        let req = AddBookCommandRequest { title: Some("t".to_string()), ..AddBookCommandRequest::default() };
        let res = cmd.execute(req).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
