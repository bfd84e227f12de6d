//! Failure taxonomy for the generation pipeline and its mapping onto the
//! transport-agnostic [`Error`] payload.

use serde_json::json;
use tracing::error;

use super::ports::{AvatarRenderError, AvatarStoreError};
use super::{Error, InitialsValidationError};

/// Why a generation or retrieval request failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Names, counts, indices, or path segments were unacceptable.
    #[error("{message}")]
    Validation {
        /// Field the message refers to.
        field: &'static str,
        /// Explanation suitable for clients.
        message: String,
    },
    /// A requested stored image does not exist.
    #[error("image not found: {initials}/{filename}")]
    NotFound {
        /// Requested initials segment.
        initials: String,
        /// Requested file name.
        filename: String,
    },
    /// Directory creation, writes, or reads failed.
    #[error(transparent)]
    Storage(#[from] AvatarStoreError),
    /// Drawing or encoding failed mid-render.
    #[error(transparent)]
    Render(#[from] AvatarRenderError),
}

impl GenerationError {
    /// Validation failure for `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// True for caller mistakes as opposed to infrastructure failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<InitialsValidationError> for GenerationError {
    fn from(value: InitialsValidationError) -> Self {
        let field = match &value {
            InitialsValidationError::EmptyName(field) | InitialsValidationError::NoLetters(field) => {
                field.as_str()
            }
            InitialsValidationError::MalformedCode(_) => "initials",
        };
        Self::validation(field, value.to_string())
    }
}

impl From<GenerationError> for Error {
    fn from(value: GenerationError) -> Self {
        match value {
            GenerationError::Validation { field, message } => {
                Self::invalid_request(message).with_details(json!({ "field": field }))
            }
            GenerationError::NotFound { initials, filename } => {
                Self::not_found("Image not found").with_details(json!({
                    "initials": initials,
                    "filename": filename,
                }))
            }
            GenerationError::Storage(err) => Self::storage_failure(err.to_string()),
            GenerationError::Render(err) => {
                error!(error = %err, "avatar rendering failed");
                Self::internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, NameField};
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    fn name_failures_become_field_scoped_validation() {
        let err = GenerationError::from(InitialsValidationError::EmptyName(NameField::Last));
        assert_eq!(
            err,
            GenerationError::validation("last_name", "last_name must not be empty")
        );
        assert!(err.is_validation());
    }

    #[rstest]
    #[case(GenerationError::validation("num_variants", "too few"), ErrorCode::InvalidRequest)]
    #[case(
        GenerationError::NotFound { initials: "AS".to_owned(), filename: "x.png".to_owned() },
        ErrorCode::NotFound
    )]
    #[case(
        GenerationError::Storage(AvatarStoreError::write(PathBuf::from("/ro/AS"), "read-only")),
        ErrorCode::StorageFailure
    )]
    #[case(
        GenerationError::Render(AvatarRenderError::encode("oops")),
        ErrorCode::InternalError
    )]
    fn maps_onto_error_codes(#[case] err: GenerationError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(err).code(), expected);
    }

    #[rstest]
    fn storage_messages_stay_descriptive() {
        let err = GenerationError::from(AvatarStoreError::directory(
            PathBuf::from("/ro/AS"),
            "permission denied",
        ));
        let payload = Error::from(err);
        assert!(payload.message().contains("permission denied"));
    }
}
