//! Per-marketplace column resolution and row filtering of order exports.
//!
//! Only rows that still have to be packed survive; everything downstream works
//! on typed [`OrderLine`] records instead of raw spreadsheet rows.

use contracts::domain::a025_picking_dictionary::ReferenceDictionary;
use contracts::enums::MarketplaceType;

use super::error::PickingError;
use crate::shared::field_resolver::FieldResolver;
use crate::shared::sku::is_blank;
use crate::shared::table::{cell, Table};

/// Status of an order that is paid and waits for packing
pub const READY_TO_SHIP_STATUS: &str = "perlu dikirim";

/// "Managed by platform" values meaning the seller ships the order
pub const SELLER_MANAGED_VALUES: &[&str] = &["no", "tidak", "false"];

/// Header candidates per logical field, most specific first
#[derive(Debug, Clone, Copy)]
pub struct OrderColumnCandidates {
    pub status: &'static [&'static str],
    pub order_id: &'static [&'static str],
    pub tracking: &'static [&'static str],
    pub shipping: &'static [&'static str],
    /// Empty for marketplaces without platform-managed fulfilment
    pub managed: &'static [&'static str],
    pub sku: &'static [&'static str],
    pub quantity: &'static [&'static str],
}

pub const SHOPEE_COLUMNS: OrderColumnCandidates = OrderColumnCandidates {
    status: &["status pesanan", "order status", "status"],
    order_id: &["no. pesanan", "order id", "pesanan"],
    tracking: &["no. resi", "resi", "tracking"],
    shipping: &["opsi pengiriman", "shipping option", "pengiriman"],
    managed: &["dikelola oleh shopee", "dikelola shopee", "managed by shopee", "dikelola", "managed"],
    sku: &["sku induk", "nomor referensi sku", "sku"],
    quantity: &["jumlah produk dibeli", "jumlah", "quantity", "qty"],
};

pub const TOKOPEDIA_COLUMNS: OrderColumnCandidates = OrderColumnCandidates {
    status: &["status pesanan", "status terakhir", "order status", "status"],
    order_id: &["nomor invoice", "invoice", "order id", "no. pesanan"],
    tracking: &["no resi", "resi", "tracking"],
    shipping: &["kurir", "opsi pengiriman", "shipping", "pengiriman"],
    managed: &[],
    sku: &["nomor sku", "seller sku", "sku"],
    quantity: &["jumlah produk dibeli", "jumlah produk", "jumlah", "quantity", "qty"],
};

pub const TIKTOK_COLUMNS: OrderColumnCandidates = OrderColumnCandidates {
    status: &["order status", "status pesanan", "status"],
    order_id: &["order id", "no. pesanan"],
    tracking: &["tracking id", "no. resi", "resi", "tracking"],
    shipping: &["shipping provider name", "delivery option", "opsi pengiriman", "shipping"],
    managed: &[],
    sku: &["seller sku", "sku"],
    quantity: &["quantity", "jumlah", "qty"],
};

pub fn column_candidates(marketplace: MarketplaceType) -> &'static OrderColumnCandidates {
    match marketplace {
        MarketplaceType::Shopee => &SHOPEE_COLUMNS,
        MarketplaceType::Tokopedia => &TOKOPEDIA_COLUMNS,
        MarketplaceType::TikTok => &TIKTOK_COLUMNS,
    }
}

/// Column indexes found in one order export; `None` means the column is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub status: usize,
    pub sku: usize,
    pub quantity: usize,
    pub order_id: Option<usize>,
    pub tracking: Option<usize>,
    pub shipping: Option<usize>,
    pub managed: Option<usize>,
}

/// Order line that passed the marketplace filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub order_id: String,
    pub raw_sku: String,
    pub raw_quantity: String,
}

#[derive(Debug, Clone)]
pub struct FilteredOrders {
    pub marketplace: MarketplaceType,
    pub file_name: String,
    pub columns: ResolvedColumns,
    pub rows_read: usize,
    pub lines: Vec<OrderLine>,
}

pub fn resolve_columns(
    table: &Table,
    marketplace: MarketplaceType,
    file_name: &str,
) -> Result<ResolvedColumns, PickingError> {
    let candidates = column_candidates(marketplace);
    let mut resolver = FieldResolver::new(&table.headers);

    let missing = |column: &'static str| PickingError::MissingOrderColumn {
        marketplace,
        file_name: file_name.to_string(),
        column,
    };

    // Resolution order matters: claimed columns are not offered to later fields
    let status = resolver.resolve(candidates.status).ok_or_else(|| missing("status"))?;
    let order_id = resolver.resolve(candidates.order_id);
    let tracking = resolver.resolve(candidates.tracking);
    let shipping = resolver.resolve(candidates.shipping);
    let managed = resolver.resolve(candidates.managed);
    let sku = resolver.resolve(candidates.sku).ok_or_else(|| missing("sku"))?;
    let quantity = resolver
        .resolve(candidates.quantity)
        .ok_or_else(|| missing("quantity"))?;

    Ok(ResolvedColumns {
        status,
        sku,
        quantity,
        order_id,
        tracking,
        shipping,
        managed,
    })
}

/// Resolve columns of an order export and keep the rows ready for picking
pub fn normalize_and_filter(
    table: &Table,
    marketplace: MarketplaceType,
    file_name: &str,
    dictionary: &ReferenceDictionary,
) -> Result<FilteredOrders, PickingError> {
    let columns = resolve_columns(table, marketplace, file_name)?;

    for (field, column) in [
        ("order id", columns.order_id),
        ("tracking number", columns.tracking),
        ("shipping option", columns.shipping),
    ] {
        if column.is_none() {
            tracing::warn!("{} file '{}': no {} column", marketplace, file_name, field);
        }
    }
    if marketplace == MarketplaceType::Shopee && columns.managed.is_none() {
        tracing::warn!(
            "{} file '{}': no managed-by-platform column, filter skipped",
            marketplace,
            file_name
        );
    }

    let lines: Vec<OrderLine> = table
        .rows
        .iter()
        .filter(|row| match marketplace {
            MarketplaceType::Shopee => passes_shopee_filter(row, &columns, dictionary),
            MarketplaceType::Tokopedia | MarketplaceType::TikTok => {
                is_ready_to_ship(cell(row, Some(columns.status)))
            }
        })
        .map(|row| OrderLine {
            order_id: cell(row, columns.order_id).trim().to_string(),
            raw_sku: cell(row, Some(columns.sku)).to_string(),
            raw_quantity: cell(row, Some(columns.quantity)).to_string(),
        })
        .collect();

    tracing::info!(
        "{} file '{}': {} of {} rows ready to ship",
        marketplace,
        file_name,
        lines.len(),
        table.rows.len()
    );

    Ok(FilteredOrders {
        marketplace,
        file_name: file_name.to_string(),
        columns,
        rows_read: table.rows.len(),
        lines,
    })
}

pub fn is_ready_to_ship(status: &str) -> bool {
    status.trim().to_lowercase() == READY_TO_SHIP_STATUS
}

/// Seller-shipped, not yet shipped, instant / same day orders.
/// Conditions on absent optional columns are skipped.
fn passes_shopee_filter(
    row: &[String],
    columns: &ResolvedColumns,
    dictionary: &ReferenceDictionary,
) -> bool {
    if !is_ready_to_ship(cell(row, Some(columns.status))) {
        return false;
    }
    if columns.managed.is_some() && !is_seller_managed(cell(row, columns.managed)) {
        return false;
    }
    if columns.tracking.is_some() && !is_blank(cell(row, columns.tracking)) {
        return false;
    }
    if columns.shipping.is_some() && !dictionary.is_instant_courier(cell(row, columns.shipping)) {
        return false;
    }
    true
}

fn is_seller_managed(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    SELLER_MANAGED_VALUES.contains(&value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOPEE_HEADER: &str =
        "No. Pesanan,Status Pesanan,Dikelola oleh Shopee,No. Resi,Opsi Pengiriman,SKU Induk,Jumlah";

    fn dictionary() -> ReferenceDictionary {
        let mut dict = ReferenceDictionary::new();
        dict.add_instant_courier("Instant");
        dict.add_instant_courier("Same Day");
        dict
    }

    fn shopee_table(row: &str) -> Table {
        Table::from_csv("shopee", &format!("{}\n{}\n", SHOPEE_HEADER, row))
    }

    fn shopee_passes(row: &str) -> bool {
        let filtered =
            normalize_and_filter(&shopee_table(row), MarketplaceType::Shopee, "shopee.csv", &dictionary())
                .unwrap();
        filtered.lines.len() == 1
    }

    #[test]
    fn test_resolve_shopee_columns() {
        let table = shopee_table("1,Perlu Dikirim,No,,Instant,KIT-1,1");
        let cols = resolve_columns(&table, MarketplaceType::Shopee, "shopee.csv").unwrap();
        assert_eq!(
            cols,
            ResolvedColumns {
                status: 1,
                sku: 5,
                quantity: 6,
                order_id: Some(0),
                tracking: Some(3),
                shipping: Some(4),
                managed: Some(2),
            }
        );
    }

    #[test]
    fn test_shopee_row_passes_when_all_conditions_hold() {
        assert!(shopee_passes("1,Perlu Dikirim,No,,Instant,KIT-1,1"));
        assert!(shopee_passes("1,PERLU DIKIRIM,tidak,nan,same day,KIT-1,1"));
    }

    #[test]
    fn test_shopee_status_boundary() {
        assert!(!shopee_passes("1,Selesai,No,,Instant,KIT-1,1"));
    }

    #[test]
    fn test_shopee_managed_boundary() {
        assert!(!shopee_passes("1,Perlu Dikirim,Yes,,Instant,KIT-1,1"));
    }

    #[test]
    fn test_shopee_tracking_boundary() {
        assert!(!shopee_passes("1,Perlu Dikirim,No,SPXID0001,Instant,KIT-1,1"));
    }

    #[test]
    fn test_shopee_courier_boundary() {
        assert!(!shopee_passes("1,Perlu Dikirim,No,,Reguler,KIT-1,1"));
    }

    #[test]
    fn test_shopee_absent_optional_columns_skip_their_filters() {
        let table =
            Table::from_csv("shopee", "Status Pesanan,SKU Induk,Jumlah\nPerlu Dikirim,A,2\n");
        let filtered =
            normalize_and_filter(&table, MarketplaceType::Shopee, "s.csv", &dictionary()).unwrap();
        assert_eq!(filtered.lines.len(), 1);
        assert_eq!(filtered.lines[0].order_id, "");
        assert_eq!(filtered.columns.managed, None);
    }

    #[test]
    fn test_tokopedia_status_only_filter() {
        let table = Table::from_csv(
            "toped",
            "Nomor Invoice,Status Pesanan,No Resi,Nomor SKU,Jumlah Produk\n\
             INV/1,perlu DIKIRIM ,JNE123,A,1\n\
             INV/2,Selesai,,B,2\n",
        );
        let filtered =
            normalize_and_filter(&table, MarketplaceType::Tokopedia, "toped.csv", &dictionary())
                .unwrap();
        assert_eq!(filtered.rows_read, 2);
        assert_eq!(
            filtered.lines,
            vec![OrderLine {
                order_id: "INV/1".to_string(),
                raw_sku: "A".to_string(),
                raw_quantity: "1".to_string(),
            }]
        );
    }

    #[test]
    fn test_tiktok_columns() {
        let table = Table::from_csv(
            "tiktok",
            "Order ID,Order Status,Order Substatus,SKU ID,Seller SKU,Quantity\n\
             5771,Perlu dikirim,Menunggu,1729,TT-A,4\n",
        );
        let filtered =
            normalize_and_filter(&table, MarketplaceType::TikTok, "tiktok.csv", &dictionary())
                .unwrap();
        assert_eq!(filtered.columns.sku, 4);
        assert_eq!(filtered.lines[0].raw_sku, "TT-A");
        assert_eq!(filtered.lines[0].raw_quantity, "4");
    }

    #[test]
    fn test_missing_status_column_is_file_error() {
        let table = Table::from_csv("x", "SKU,Qty\nA,1\n");
        let err = normalize_and_filter(&table, MarketplaceType::Tokopedia, "x.csv", &dictionary())
            .unwrap_err();
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("'status'"));
        assert!(err.to_string().contains("x.csv"));
    }

    #[test]
    fn test_is_ready_to_ship() {
        assert!(is_ready_to_ship(" Perlu Dikirim "));
        assert!(is_ready_to_ship("PERLU DIKIRIM"));
        assert!(!is_ready_to_ship("Sudah Dikirim"));
    }
}
