use serde::{Deserialize, Serialize};

/// Маркетплейсы, из выгрузок заказов которых строится лист подбора
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketplaceType {
    Shopee,
    Tokopedia,
    TikTok,
}

impl MarketplaceType {
    /// Получить код маркетплейса
    pub fn code(&self) -> &'static str {
        match self {
            MarketplaceType::Shopee => "mp-shopee",
            MarketplaceType::Tokopedia => "mp-tokopedia",
            MarketplaceType::TikTok => "mp-tiktok",
        }
    }

    /// Человекочитаемое название, оно же колонка Marketplace в отчётах
    pub fn display_name(&self) -> &'static str {
        match self {
            MarketplaceType::Shopee => "Shopee",
            MarketplaceType::Tokopedia => "Tokopedia",
            MarketplaceType::TikTok => "TikTok",
        }
    }
}

impl std::fmt::Display for MarketplaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(MarketplaceType::Shopee.code(), "mp-shopee");
        assert_eq!(MarketplaceType::Tokopedia.code(), "mp-tokopedia");
        assert_eq!(MarketplaceType::TikTok.code(), "mp-tiktok");
    }

    #[test]
    fn test_display_uses_report_name() {
        assert_eq!(MarketplaceType::TikTok.to_string(), "TikTok");
    }
}
