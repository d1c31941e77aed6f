pub mod engine;
pub mod error;
pub mod index;
pub mod loader;
pub mod occurrence;
pub mod query;
pub mod tokenizer;

pub use engine::SearchEngine;
pub use error::LoadError;
pub use index::KeywordIndex;
pub use occurrence::{Occurrence, OccurrenceList};
pub use tokenizer::NoiseWords;

/// Document identifier, taken verbatim from the document source.
pub type DocName = String;
