use contracts::enums::MarketplaceType;
use contracts::usecases::common::UseCaseError;
use thiserror::Error;

use crate::domain::a025_picking_dictionary::DictionaryError;

#[derive(Debug, Error)]
pub enum PickingError {
    /// Aborts the whole run
    #[error(transparent)]
    Configuration(#[from] DictionaryError),

    /// Skips one order file
    #[error("{marketplace} file '{file_name}': required column '{column}' not found")]
    MissingOrderColumn {
        marketplace: MarketplaceType,
        file_name: String,
        column: &'static str,
    },
}

impl PickingError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, PickingError::Configuration(_))
    }
}

impl From<PickingError> for UseCaseError {
    fn from(err: PickingError) -> Self {
        if err.is_configuration() {
            UseCaseError::configuration(err.to_string())
        } else {
            UseCaseError::validation(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_maps_to_configuration_code() {
        let err = PickingError::from(DictionaryError::SheetNotFound {
            sheet: "Bundle Master".to_string(),
            available: "Sheet1".to_string(),
        });
        assert!(err.is_configuration());
        let uc: UseCaseError = err.into();
        assert_eq!(uc.code, UseCaseError::CONFIGURATION);
        assert!(uc.message.contains("Bundle Master"));
    }

    #[test]
    fn test_missing_column_message_names_file_and_column() {
        let err = PickingError::MissingOrderColumn {
            marketplace: MarketplaceType::Tokopedia,
            file_name: "toped.csv".to_string(),
            column: "status",
        };
        assert!(!err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Tokopedia file 'toped.csv': required column 'status' not found"
        );
    }
}
