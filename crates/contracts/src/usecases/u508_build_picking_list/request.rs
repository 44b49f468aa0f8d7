use crate::enums::MarketplaceType;
use serde::{Deserialize, Serialize};

/// One sheet of an uploaded workbook, as CSV text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetUpload {
    pub name: String,
    pub csv: String,
}

/// Dictionary ("Kamus Dashboard") workbook: courier rules, bundle master, SKU master
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryUpload {
    pub file_name: String,
    pub sheets: Vec<SheetUpload>,
}

/// Order export of one marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFileUpload {
    pub marketplace: MarketplaceType,
    pub file_name: String,
    pub csv: String,
}

/// Request to build the picking list from a dictionary and any number of order exports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickingRequest {
    pub dictionary: DictionaryUpload,
    #[serde(default)]
    pub orders: Vec<OrderFileUpload>,
}

/// Table of the result to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportTable {
    Detail,
    Summary,
}

impl ExportTable {
    pub fn from_path(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "detail" => Some(ExportTable::Detail),
            "summary" | "picking" => Some(ExportTable::Summary),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportTable::Detail => "detail_order.csv",
            ExportTable::Summary => "picking_list.csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_orders_default_to_empty() {
        let json = r#"{"dictionary":{"file_name":"Kamus.xlsx","sheets":[]}}"#;
        let request: PickingRequest = serde_json::from_str(json).unwrap();
        assert!(request.orders.is_empty());
        assert_eq!(request.dictionary.file_name, "Kamus.xlsx");
    }

    #[test]
    fn test_order_upload_uses_enum_variant_names() {
        let json = r#"{"marketplace":"TikTok","file_name":"tt.csv","csv":""}"#;
        let upload: OrderFileUpload = serde_json::from_str(json).unwrap();
        assert_eq!(upload.marketplace, MarketplaceType::TikTok);
    }

    #[test]
    fn test_export_table_from_path() {
        assert_eq!(ExportTable::from_path("Detail"), Some(ExportTable::Detail));
        assert_eq!(ExportTable::from_path("picking"), Some(ExportTable::Summary));
        assert_eq!(ExportTable::from_path("xlsx"), None);
    }
}
