use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::core::library::BookStatus;
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub status: BookStatus,
    pub total_copies: i32,
    pub available_copies: i32,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id,
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            category: other.category.clone(),
            status: other.status,
            total_copies: other.total_copies,
            available_copies: other.available_copies,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

// BookSummaryDto is the slice of a book embedded in transaction listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookSummaryDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: Option<String>,
}

impl From<&BookEntity> for BookSummaryDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
            category: other.category.clone(),
        }
    }
}

// NewBook carries the validated fields of a catalog addition
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub total_copies: i32,
}

// BookUpdate is a partial change; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct BookUpdate {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub status: Option<BookStatus>,
    pub total_copies: Option<i32>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::books::domain::model::BookEntity;
    use crate::books::dto::BookDto;

    #[tokio::test]
    async fn test_should_serialize_book() {
        let book = BookDto::from(&BookEntity::new("isbn", "title", "author", Some("fiction".to_string()), 2, Utc::now().naive_utc()));
        let json = serde_json::to_value(&book).expect("should serialize");
        assert_eq!("available", json["status"]);
        assert_eq!(2, json["available_copies"]);
        assert_eq!("fiction", json["category"]);
    }
}
