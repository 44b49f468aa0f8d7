use crate::domain::a025_picking_dictionary::DictionaryStats;
use crate::enums::MarketplaceType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Picking list line: one order line, or one component of a bundle order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailRow {
    pub marketplace: MarketplaceType,
    pub order_id: String,
    /// SKU from the order export, trimmed but not cleaned
    pub sku_original: String,
    pub is_bundle: bool,
    pub sku_component: String,
    pub display_name: String,
    pub final_quantity: f64,
}

/// Quantity to pick per marketplace and SKU
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryRow {
    pub marketplace: MarketplaceType,
    pub sku_component: String,
    pub display_name: String,
    pub total_quantity: f64,
}

/// Row counters of one processed order file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarketplaceStats {
    pub marketplace: MarketplaceType,
    pub file_name: String,
    pub rows_read: usize,
    /// Rows that passed the marketplace filter
    pub rows_passed: usize,
    /// Passed rows dropped for empty SKU or non-positive quantity
    pub rows_dropped: usize,
    pub detail_rows: usize,
}

/// Order file that was skipped; the rest of the run continues
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileError {
    pub marketplace: MarketplaceType,
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PickingStatus {
    Completed,
    /// At least one order file was skipped
    CompletedWithErrors,
    /// Nothing survived filtering
    NoData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickingResponse {
    pub run_id: String,
    pub status: PickingStatus,
    pub message: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub dictionary: DictionaryStats,
    pub marketplace_stats: Vec<MarketplaceStats>,
    pub file_errors: Vec<FileError>,
    pub detail: Vec<DetailRow>,
    /// Sorted by total quantity, largest first
    pub summary: Vec<SummaryRow>,
}
