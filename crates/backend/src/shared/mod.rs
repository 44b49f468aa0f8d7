pub mod config;
pub mod field_resolver;
pub mod format;
pub mod sku;
pub mod table;
