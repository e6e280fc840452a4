pub mod app;
pub mod clients;
pub mod config;
pub mod core;
pub mod error;
pub mod images;
pub mod quiz;

// Convenient re-exports
pub use app::{AppState, QuizApp};
pub use images::{AcquiredImage, ImageCollection, MAX_IMAGES};
pub use quiz::{OptionOutcome, QuestionRecord, QuizSession};
