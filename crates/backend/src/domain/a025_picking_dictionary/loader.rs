use contracts::domain::a025_picking_dictionary::{BundleComponent, ReferenceDictionary};
use contracts::usecases::u508_build_picking_list::DictionaryUpload;

use super::error::DictionaryError;
use crate::shared::field_resolver::FieldResolver;
use crate::shared::sku::{clean_sku, is_blank, parse_decimal};
use crate::shared::table::{cell, Table, Workbook};

// Sheet name keywords, in priority order
pub const COURIER_SHEET_KEYWORDS: &[&str] = &["kurir", "shopee", "courier", "instant", "same day"];
pub const BUNDLE_SHEET_KEYWORDS: &[&str] = &["bundle"];
pub const SKU_SHEET_KEYWORDS: &[&str] = &["sku", "master"];

// Kurir-Shopee sheet
pub const COURIER_LABEL_COLUMNS: &[&str] = &[
    "opsi pengiriman",
    "shipping option",
    "kurir",
    "courier",
    "ekspedisi",
    "pengiriman",
];
pub const COURIER_INSTANT_COLUMNS: &[&str] = &[
    "instant/same day",
    "instant",
    "same day",
    "sameday",
    "aktif",
    "active",
];

/// Flag values marking a shipping option as instant / same day
pub const INSTANT_FLAG_VALUES: &[&str] = &["yes", "ya", "true", "1"];

// Bundle Master sheet
pub const BUNDLE_KIT_COLUMNS: &[&str] = &["kit sku", "sku bundle", "bundle sku", "kit", "bundle"];
pub const BUNDLE_COMPONENT_COLUMNS: &[&str] = &[
    "component sku",
    "sku component",
    "sku komponen",
    "component",
    "komponen",
];
pub const BUNDLE_QTY_COLUMNS: &[&str] = &["component qty", "qty", "jumlah", "quantity"];
pub const BUNDLE_COMPONENT_NAME_COLUMNS: &[&str] =
    &["component product name", "component name", "nama komponen", "product name"];

// SKU Master sheet
pub const SKU_CODE_COLUMNS: &[&str] = &["product sku", "kode sku", "sku"];
pub const SKU_NAME_COLUMNS: &[&str] = &["product name", "nama produk", "nama", "name"];

/// Indexes of the three reference sheets inside the workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SheetRoles {
    courier: usize,
    bundle: usize,
    sku: usize,
}

/// Parse the uploaded dictionary sheets and load the reference data
pub fn load_dictionary(upload: &DictionaryUpload) -> Result<ReferenceDictionary, DictionaryError> {
    let sheets: Vec<Table> = upload
        .sheets
        .iter()
        .map(|sheet| Table::from_csv(&sheet.name, &sheet.csv))
        .collect();

    tracing::info!(
        "Loading dictionary '{}' with {} sheets",
        upload.file_name,
        sheets.len()
    );
    load_references(&Workbook::new(sheets))
}

/// Build courier allow-list, bundle map and SKU name map from a workbook
pub fn load_references(workbook: &Workbook) -> Result<ReferenceDictionary, DictionaryError> {
    let roles = resolve_sheet_roles(workbook)?;
    let mut dictionary = ReferenceDictionary::new();

    for index in [roles.courier, roles.bundle, roles.sku] {
        let sheet = &workbook.sheets[index];
        if sheet.is_empty() {
            tracing::warn!("Dictionary sheet '{}' has no data rows", sheet.name);
        }
    }

    load_couriers(&workbook.sheets[roles.courier], &mut dictionary)?;
    load_bundles(&workbook.sheets[roles.bundle], &mut dictionary)?;
    load_sku_names(&workbook.sheets[roles.sku], &mut dictionary)?;

    let stats = dictionary.stats();
    tracing::info!(
        "Dictionary loaded: {} instant couriers, {} kits ({} components), {} SKU names",
        stats.instant_couriers,
        stats.kits,
        stats.components,
        stats.sku_names
    );

    Ok(dictionary)
}

fn resolve_sheet_roles(workbook: &Workbook) -> Result<SheetRoles, DictionaryError> {
    let roles: [(&[&str], usize, &str); 3] = [
        (COURIER_SHEET_KEYWORDS, 0, "Kurir-Shopee"),
        (BUNDLE_SHEET_KEYWORDS, 1, "Bundle Master"),
        (SKU_SHEET_KEYWORDS, 2, "SKU Master"),
    ];
    let mut claimed = vec![false; workbook.sheets.len()];

    // Every role takes its name match before any role falls back to a position
    let mut by_name: [Option<usize>; 3] = [None; 3];
    for (slot, (keywords, _, _)) in by_name.iter_mut().zip(roles) {
        *slot = sheet_by_name(workbook, &claimed, keywords);
        if let Some(index) = *slot {
            claimed[index] = true;
        }
    }

    let mut indexes = [0usize; 3];
    for ((index, found), (_, position, expected_name)) in
        indexes.iter_mut().zip(by_name).zip(roles)
    {
        *index = match found {
            Some(i) => i,
            None => sheet_by_position(workbook, &mut claimed, position, expected_name)?,
        };
    }

    Ok(SheetRoles {
        courier: indexes[0],
        bundle: indexes[1],
        sku: indexes[2],
    })
}

/// First unclaimed sheet whose name contains a keyword, keywords in priority order
fn sheet_by_name(workbook: &Workbook, claimed: &[bool], keywords: &[&str]) -> Option<usize> {
    keywords.iter().find_map(|keyword| {
        workbook
            .sheets
            .iter()
            .enumerate()
            .find(|(i, sheet)| !claimed[*i] && sheet.name.to_lowercase().contains(keyword))
            .map(|(i, _)| i)
    })
}

/// Sheet at `position` when it exists and no other role holds it
fn sheet_by_position(
    workbook: &Workbook,
    claimed: &mut [bool],
    position: usize,
    expected_name: &str,
) -> Result<usize, DictionaryError> {
    if position >= workbook.sheets.len() || claimed[position] {
        return Err(DictionaryError::SheetNotFound {
            sheet: expected_name.to_string(),
            available: workbook.sheet_names().join(", "),
        });
    }

    tracing::warn!(
        "No sheet named like '{}', using sheet #{} '{}'",
        expected_name,
        position,
        workbook.sheets[position].name
    );
    claimed[position] = true;
    Ok(position)
}

fn required_column(
    resolver: &mut FieldResolver,
    sheet: &Table,
    candidates: &[&str],
    position: usize,
    column: &str,
) -> Result<usize, DictionaryError> {
    resolver
        .resolve_or_position(candidates, position)
        .ok_or_else(|| DictionaryError::ColumnNotFound {
            sheet: sheet.name.clone(),
            column: column.to_string(),
        })
}

fn load_couriers(sheet: &Table, dictionary: &mut ReferenceDictionary) -> Result<(), DictionaryError> {
    let mut resolver = FieldResolver::new(&sheet.headers);
    let label_col = required_column(&mut resolver, sheet, COURIER_LABEL_COLUMNS, 0, "Opsi Pengiriman")?;
    let flag_col = required_column(&mut resolver, sheet, COURIER_INSTANT_COLUMNS, 1, "Instant/Same Day")?;

    for row in &sheet.rows {
        let label = cell(row, Some(label_col));
        if is_blank(label) {
            continue;
        }
        if is_instant_flag(cell(row, Some(flag_col))) {
            dictionary.add_instant_courier(label);
        }
    }

    tracing::debug!(
        "Sheet '{}': {} instant couriers",
        sheet.name,
        dictionary.instant_couriers.len()
    );
    Ok(())
}

fn is_instant_flag(value: &str) -> bool {
    let value = value.trim();
    INSTANT_FLAG_VALUES
        .iter()
        .any(|flag| value.eq_ignore_ascii_case(flag))
}

fn load_bundles(sheet: &Table, dictionary: &mut ReferenceDictionary) -> Result<(), DictionaryError> {
    let mut resolver = FieldResolver::new(&sheet.headers);
    let kit_col = required_column(&mut resolver, sheet, BUNDLE_KIT_COLUMNS, 0, "Kit_Sku")?;
    let component_col =
        required_column(&mut resolver, sheet, BUNDLE_COMPONENT_COLUMNS, 1, "Component_Sku")?;
    let qty_col = required_column(&mut resolver, sheet, BUNDLE_QTY_COLUMNS, 2, "Component_Qty")?;
    let name_col = resolver.resolve(BUNDLE_COMPONENT_NAME_COLUMNS);

    let mut skipped = 0usize;
    for (idx, row) in sheet.rows.iter().enumerate() {
        let kit = clean_sku(Some(cell(row, Some(kit_col))));
        let component = clean_sku(Some(cell(row, Some(component_col))));
        if is_blank(&kit) || is_blank(&component) {
            skipped += 1;
            continue;
        }

        let raw_qty = cell(row, Some(qty_col));
        let quantity = match parse_decimal(raw_qty) {
            Some(q) if q > 0.0 => q,
            _ => {
                tracing::warn!(
                    "Sheet '{}' row {}: component quantity '{}' for kit {} is not a positive number, using 1",
                    sheet.name,
                    idx + 2,
                    raw_qty,
                    kit
                );
                1.0
            }
        };

        let name = Some(cell(row, name_col).trim())
            .filter(|n| !is_blank(n))
            .map(|n| n.to_string());

        dictionary.add_bundle_component(
            &kit,
            BundleComponent {
                sku: component,
                name,
                quantity,
            },
        );
    }

    if skipped > 0 {
        tracing::warn!(
            "Sheet '{}': skipped {} rows without kit or component SKU",
            sheet.name,
            skipped
        );
    }
    Ok(())
}

fn load_sku_names(sheet: &Table, dictionary: &mut ReferenceDictionary) -> Result<(), DictionaryError> {
    let mut resolver = FieldResolver::new(&sheet.headers);
    let sku_col = required_column(&mut resolver, sheet, SKU_CODE_COLUMNS, 0, "Product_Sku")?;
    let name_col = required_column(&mut resolver, sheet, SKU_NAME_COLUMNS, 1, "Product_Name")?;

    let mut duplicates = 0usize;
    for row in &sheet.rows {
        let sku = clean_sku(Some(cell(row, Some(sku_col))));
        let name = cell(row, Some(name_col)).trim();
        if sku.is_empty() || is_blank(name) {
            continue;
        }
        if !dictionary.add_sku_name(&sku, name) {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        tracing::debug!(
            "Sheet '{}': {} duplicate SKUs ignored, first name kept",
            sheet.name,
            duplicates
        );
    }
    Ok(())
}
