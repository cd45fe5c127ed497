//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ConfigError;
use storage::repository::StorageError;

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors emitted by `AppearanceService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppearanceServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
