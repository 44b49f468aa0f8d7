use chrono::Utc;
use contracts::domain::a025_picking_dictionary::ReferenceDictionary;
use contracts::usecases::common::{UseCaseError, UseCaseMetadata, UseCaseResult};
use contracts::usecases::u508_build_picking_list::{
    BuildPickingList, DetailRow, ExportTable, FileError, MarketplaceStats, OrderFileUpload,
    PickingRequest, PickingResponse, PickingStatus, SummaryRow,
};
use uuid::Uuid;

use super::error::PickingError;
use super::expansion::{aggregate, expand};
use super::export::table_to_csv;
use super::normalizer::{normalize_and_filter, FilteredOrders};
use crate::domain::a025_picking_dictionary::DictionaryCache;
use crate::shared::config::{DictionaryCacheConfig, ExportConfig};
use crate::shared::table::Table;

/// Result of one pipeline run over in-memory inputs
#[derive(Debug, Clone, Default)]
pub struct PickingOutcome {
    pub detail: Vec<DetailRow>,
    pub summary: Vec<SummaryRow>,
    pub marketplace_stats: Vec<MarketplaceStats>,
    pub file_errors: Vec<FileError>,
}

impl PickingOutcome {
    pub fn status(&self) -> PickingStatus {
        if self.detail.is_empty() {
            PickingStatus::NoData
        } else if !self.file_errors.is_empty() {
            PickingStatus::CompletedWithErrors
        } else {
            PickingStatus::Completed
        }
    }

    pub fn message(&self) -> String {
        let mut message = match self.status() {
            PickingStatus::NoData => "No data matched: no order line is ready for picking".to_string(),
            _ => format!(
                "{} picking lines, {} SKUs to pick",
                self.detail.len(),
                self.summary.len()
            ),
        };
        if !self.file_errors.is_empty() {
            message.push_str(&format!("; {} file(s) skipped", self.file_errors.len()));
        }
        message
    }
}

/// Filter, expand and aggregate every order file against a loaded dictionary.
///
/// A file that lacks a required column is reported in
/// `file_errors` and the remaining files are still processed.
pub fn build_picking_list(
    dictionary: &ReferenceDictionary,
    orders: &[OrderFileUpload],
) -> PickingOutcome {
    let mut outcome = PickingOutcome::default();

    for upload in orders {
        let filtered = match filter_order_file(upload, dictionary) {
            Ok(filtered) => filtered,
            Err(e) => {
                tracing::warn!("{}", e);
                outcome.file_errors.push(FileError {
                    marketplace: upload.marketplace,
                    file_name: upload.file_name.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        let expanded = expand(&filtered, dictionary);
        outcome.marketplace_stats.push(MarketplaceStats {
            marketplace: filtered.marketplace,
            file_name: filtered.file_name.clone(),
            rows_read: filtered.rows_read,
            rows_passed: filtered.lines.len(),
            rows_dropped: expanded.rows_dropped,
            detail_rows: expanded.detail.len(),
        });
        outcome.detail.extend(expanded.detail);
    }

    outcome.summary = aggregate(&outcome.detail);
    outcome
}

fn filter_order_file(
    upload: &OrderFileUpload,
    dictionary: &ReferenceDictionary,
) -> Result<FilteredOrders, PickingError> {
    let table = Table::from_csv(&upload.file_name, &upload.csv);
    normalize_and_filter(&table, upload.marketplace, &upload.file_name, dictionary)
}

/// Executor of UseCase u508: dictionary cache plus export settings.
/// Every call works on its own data; only parsed dictionaries are shared.
pub struct PickingExecutor {
    dictionary_cache: DictionaryCache,
    csv_bom: bool,
}

impl PickingExecutor {
    pub fn new(dictionary_cache_entries: usize, csv_bom: bool) -> Self {
        Self {
            dictionary_cache: DictionaryCache::new(dictionary_cache_entries),
            csv_bom,
        }
    }

    pub fn from_settings(cache: &DictionaryCacheConfig, export: &ExportConfig) -> Self {
        Self::new(cache.max_entries, export.csv_bom)
    }

    /// Run the pipeline; a broken dictionary aborts before any order file is read
    pub fn process(&self, request: &PickingRequest) -> UseCaseResult<PickingResponse> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        tracing::info!(
            "{} run {}: dictionary '{}', {} order files",
            BuildPickingList::full_name(),
            run_id,
            request.dictionary.file_name,
            request.orders.len()
        );

        let (dictionary, cached) = self
            .dictionary_cache
            .get_or_load(&request.dictionary)
            .map_err(|e| {
                tracing::error!("Run {} aborted: {}", run_id, e);
                UseCaseError::from(PickingError::from(e))
            })?;
        if cached {
            tracing::info!("Run {}: dictionary served from cache", run_id);
        }

        let outcome = build_picking_list(&dictionary, &request.orders);
        let status = outcome.status();
        let message = outcome.message();
        tracing::info!("Run {} finished ({:?}): {}", run_id, status, message);

        Ok(PickingResponse {
            run_id,
            status,
            message,
            started_at,
            completed_at: Utc::now(),
            dictionary: dictionary.stats(),
            marketplace_stats: outcome.marketplace_stats,
            file_errors: outcome.file_errors,
            detail: outcome.detail,
            summary: outcome.summary,
        })
    }

    /// Run the pipeline and render one result table as CSV
    pub fn export_csv(
        &self,
        request: &PickingRequest,
        table: ExportTable,
    ) -> UseCaseResult<Vec<u8>> {
        let response = self.process(request)?;
        let bytes = table_to_csv(table, &response.detail, &response.summary, self.csv_bom)?;
        tracing::info!(
            "Run {}: exported {} ({} bytes)",
            response.run_id,
            table.file_name(),
            bytes.len()
        );
        Ok(bytes)
    }
}
