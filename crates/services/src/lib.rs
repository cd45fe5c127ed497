#![forbid(unsafe_code)]

pub mod appearance_service;
pub mod error;
pub mod quiz_loop;
pub mod snapshot_writer;

pub use quiz_core::Clock;

pub use appearance_service::AppearanceService;
pub use error::{AppearanceServiceError, QuizError};
pub use quiz_loop::QuizLoopService;
pub use snapshot_writer::SnapshotWriter;
