use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Rejected {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

// rejects a request whose required fields are absent or blank
pub(crate) fn missing_fields(message: &str) -> CommandError {
    CommandError::Validation { message: message.to_string(), reason_code: Some("400".to_string()) }
}

pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::Rejected { message, reason_code } => {
                CommandError::Rejected { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{CommandError, missing_fields, present};
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_build_command_error() {
        let _ = CommandError::Database { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Runtime { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Serialization { message: "test".to_string() };
        let _ = CommandError::Validation { message: "test".to_string(), reason_code: None };
    }

    #[tokio::test]
    async fn test_should_convert_library_error() {
        assert!(matches!(CommandError::from(LibraryError::rejected("unpaid fines", None)),
            CommandError::Rejected { .. }));
        assert!(matches!(CommandError::from(LibraryError::not_found("member")),
            CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::duplicate_key("isbn")),
            CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(LibraryError::runtime("boom", None)),
            CommandError::Runtime { retryable: false, .. }));
    }

    #[tokio::test]
    async fn test_should_detect_blank_fields() {
        assert_eq!(Some("isbn"), present(&Some(" isbn ".to_string())));
        assert_eq!(None, present(&Some("  ".to_string())));
        assert_eq!(None, present(&None));
        assert!(matches!(missing_fields("isbn required"), CommandError::Validation { .. }));
    }
}
