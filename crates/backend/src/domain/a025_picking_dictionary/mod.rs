pub mod cache;
pub mod error;
pub mod loader;

pub use cache::DictionaryCache;
pub use error::DictionaryError;
pub use loader::{load_dictionary, load_references};
