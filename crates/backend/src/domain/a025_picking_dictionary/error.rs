use thiserror::Error;

/// Dictionary workbook cannot be used; the run is aborted before any order file
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Dictionary sheet '{sheet}' not found (available sheets: {available})")]
    SheetNotFound { sheet: String, available: String },

    #[error("Dictionary sheet '{sheet}' has no '{column}' column")]
    ColumnNotFound { sheet: String, column: String },
}
