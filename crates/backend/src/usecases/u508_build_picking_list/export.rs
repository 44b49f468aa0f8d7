use anyhow::Result;
use contracts::usecases::u508_build_picking_list::{DetailRow, ExportTable, SummaryRow};

use crate::shared::format::format_quantity;

pub const DETAIL_HEADERS: [&str; 7] = [
    "Marketplace",
    "OrderId",
    "SKU Original",
    "Is Bundle",
    "SKU Component",
    "Product Name",
    "Final Quantity",
];

pub const SUMMARY_HEADERS: [&str; 4] = [
    "Marketplace",
    "SKU Component",
    "Product Name",
    "Total Quantity",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detail (picking per order) table as CSV
pub fn detail_to_csv(rows: &[DetailRow], with_bom: bool) -> Result<Vec<u8>> {
    let mut writer = csv_writer(with_bom);
    writer.write_record(DETAIL_HEADERS)?;
    for row in rows {
        writer.write_record([
            row.marketplace.display_name(),
            row.order_id.as_str(),
            row.sku_original.as_str(),
            if row.is_bundle { "Yes" } else { "No" },
            row.sku_component.as_str(),
            row.display_name.as_str(),
            format_quantity(row.final_quantity).as_str(),
        ])?;
    }
    finish(writer)
}

/// Summary (picking list) table as CSV, in the order given
pub fn summary_to_csv(rows: &[SummaryRow], with_bom: bool) -> Result<Vec<u8>> {
    let mut writer = csv_writer(with_bom);
    writer.write_record(SUMMARY_HEADERS)?;
    for row in rows {
        writer.write_record([
            row.marketplace.display_name(),
            row.sku_component.as_str(),
            row.display_name.as_str(),
            format_quantity(row.total_quantity).as_str(),
        ])?;
    }
    finish(writer)
}

pub fn table_to_csv(
    table: ExportTable,
    detail: &[DetailRow],
    summary: &[SummaryRow],
    with_bom: bool,
) -> Result<Vec<u8>> {
    match table {
        ExportTable::Detail => detail_to_csv(detail, with_bom),
        ExportTable::Summary => summary_to_csv(summary, with_bom),
    }
}

fn csv_writer(with_bom: bool) -> csv::Writer<Vec<u8>> {
    let buffer = if with_bom {
        UTF8_BOM.to_vec()
    } else {
        Vec::new()
    };
    csv::Writer::from_writer(buffer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::MarketplaceType;

    fn detail_row() -> DetailRow {
        DetailRow {
            marketplace: MarketplaceType::Shopee,
            order_id: "2401".to_string(),
            sku_original: "XX-KIT-1".to_string(),
            is_bundle: true,
            sku_component: "B".to_string(),
            display_name: "Banana, ripe".to_string(),
            final_quantity: 6.0,
        }
    }

    #[test]
    fn test_detail_csv_with_bom() {
        let bytes = detail_to_csv(&[detail_row()], true).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "Marketplace,OrderId,SKU Original,Is Bundle,SKU Component,Product Name,Final Quantity\n\
             Shopee,2401,XX-KIT-1,Yes,B,\"Banana, ripe\",6\n"
        );
    }

    #[test]
    fn test_summary_csv_without_bom() {
        let rows = vec![SummaryRow {
            marketplace: MarketplaceType::TikTok,
            sku_component: "A".to_string(),
            display_name: "Apple".to_string(),
            total_quantity: 2.5,
        }];
        let bytes = table_to_csv(ExportTable::Summary, &[], &rows, false).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Marketplace,SKU Component,Product Name,Total Quantity\nTikTok,A,Apple,2.5\n"
        );
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let bytes = table_to_csv(ExportTable::Detail, &[], &[], false).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 1);
    }
}
