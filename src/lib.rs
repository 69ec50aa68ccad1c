//! Random paragraphs and sentences from bundled themes or your own paragraph files.

pub mod config;
pub mod error;
pub mod generator;
pub mod ingest;
pub mod models;
pub mod report;
pub mod store;
pub mod utils;

pub use error::{ProserError, Result};
pub use models::{DefaultTheme, GeneratorOptions};
