pub mod aggregate;

pub use aggregate::{BundleComponent, DictionaryStats, ReferenceDictionary};
