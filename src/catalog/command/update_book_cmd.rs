use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::{BookDto, BookUpdate};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: i64,
    pub update: BookUpdate,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: i64, update: BookUpdate) -> Self {
        Self {
            book_id,
            update,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(req.book_id, &req.update).await
            .map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::books::dto::BookUpdate;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::controller::AppState;

    lazy_static! {
        static ref STATE : AppState = AppState::in_memory("test");
        static ref ADD_CMD : AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                AddBookCommand::new(factory::create_catalog_service(&STATE))
            });
        static ref UPDATE_CMD : AsyncOnce<UpdateBookCommand> = AsyncOnce::new(async {
                UpdateBookCommand::new(factory::create_catalog_service(&STATE))
            });
    }

    #[tokio::test]
    async fn test_should_run_update_book() {
        let add_cmd = ADD_CMD.get().await;
        let update_cmd = UPDATE_CMD.get().await;

        let res = add_cmd.execute(AddBookCommandRequest::new("cmd-isbn-update", "test book", "author", 1))
            .await.expect("should add book");
        let update = BookUpdate { author: Some("other author".to_string()), ..BookUpdate::default() };
        let updated = update_cmd.execute(UpdateBookCommandRequest::new(res.book.id, update))
            .await.expect("should update book");
        assert_eq!("other author", updated.book.author.as_str());
        assert_eq!(res.book.title, updated.book.title);
    }
}
