use serde::{Deserialize, Serialize};

/// Результат выполнения UseCase
pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Ошибка выполнения UseCase, отдаётся клиенту
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UseCaseError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl UseCaseError {
    pub const CONFIGURATION: &'static str = "CONFIGURATION_ERROR";
    pub const VALIDATION: &'static str = "VALIDATION_ERROR";
    pub const INTERNAL: &'static str = "INTERNAL_ERROR";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Справочник непригоден, весь запуск прерывается
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(Self::CONFIGURATION, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(Self::VALIDATION, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL, message)
    }

    pub fn is_configuration(&self) -> bool {
        self.code == Self::CONFIGURATION
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

impl From<anyhow::Error> for UseCaseError {
    fn from(err: anyhow::Error) -> Self {
        UseCaseError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_details() {
        let err = UseCaseError::configuration("Sheet 'Bundle Master' not found")
            .with_details("available sheets: Kurir-Shopee");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "[CONFIGURATION_ERROR] Sheet 'Bundle Master' not found: available sheets: Kurir-Shopee"
        );
    }
}
