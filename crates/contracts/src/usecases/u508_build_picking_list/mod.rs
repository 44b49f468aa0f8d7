pub mod request;
pub mod response;

pub use request::{DictionaryUpload, ExportTable, OrderFileUpload, PickingRequest, SheetUpload};
pub use response::{
    DetailRow, FileError, MarketplaceStats, PickingResponse, PickingStatus, SummaryRow,
};

use crate::usecases::common::UseCaseMetadata;

pub struct BuildPickingList;

impl UseCaseMetadata for BuildPickingList {
    fn usecase_index() -> &'static str {
        "u508"
    }

    fn usecase_name() -> &'static str {
        "build_picking_list"
    }

    fn display_name() -> &'static str {
        "Instant & Same Day picking list"
    }

    fn description() -> &'static str {
        "Filters marketplace order exports, expands bundle SKUs into components and sums quantities per SKU"
    }
}
