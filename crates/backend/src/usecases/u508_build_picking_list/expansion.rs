use contracts::domain::a025_picking_dictionary::ReferenceDictionary;
use contracts::enums::MarketplaceType;
use contracts::usecases::u508_build_picking_list::{DetailRow, SummaryRow};
use std::collections::HashMap;

use super::normalizer::FilteredOrders;
use crate::shared::sku::{clean_sku, parse_quantity};

#[derive(Debug, Clone, Default)]
pub struct ExpansionResult {
    pub detail: Vec<DetailRow>,
    /// Lines without SKU or with a non-positive quantity
    pub rows_dropped: usize,
}

/// Turn filtered order lines into picking lines, one per bundle component.
///
/// Expansion is one level deep: a component that is itself a kit stays as is.
pub fn expand(orders: &FilteredOrders, dictionary: &ReferenceDictionary) -> ExpansionResult {
    let mut result = ExpansionResult::default();

    for line in &orders.lines {
        let sku = clean_sku(Some(&line.raw_sku));
        let quantity = parse_quantity(&line.raw_quantity);
        if sku.is_empty() || quantity <= 0.0 {
            tracing::debug!(
                "{} order '{}': dropped line sku '{}' quantity '{}'",
                orders.marketplace,
                line.order_id,
                line.raw_sku,
                line.raw_quantity
            );
            result.rows_dropped += 1;
            continue;
        }

        match dictionary.bundle_components(&sku) {
            Some(components) => {
                for component in components {
                    result.detail.push(DetailRow {
                        marketplace: orders.marketplace,
                        order_id: line.order_id.clone(),
                        sku_original: line.raw_sku.trim().to_string(),
                        is_bundle: true,
                        sku_component: component.sku.clone(),
                        display_name: display_name(
                            dictionary,
                            &component.sku,
                            component.name.as_deref(),
                        ),
                        final_quantity: quantity * component.quantity,
                    });
                }
            }
            None => {
                result.detail.push(DetailRow {
                    marketplace: orders.marketplace,
                    order_id: line.order_id.clone(),
                    sku_original: line.raw_sku.trim().to_string(),
                    is_bundle: false,
                    display_name: display_name(dictionary, &sku, None),
                    sku_component: sku,
                    final_quantity: quantity,
                });
            }
        }
    }

    result
}

/// SKU master name, then the name from the bundle sheet, then the code itself
pub fn display_name(
    dictionary: &ReferenceDictionary,
    sku: &str,
    component_name: Option<&str>,
) -> String {
    dictionary
        .sku_name(sku)
        .or(component_name)
        .unwrap_or(sku)
        .to_string()
}

/// Sum final quantities per (marketplace, SKU, name).
///
/// Largest quantity first; ties by marketplace code, SKU and name.
pub fn aggregate(detail: &[DetailRow]) -> Vec<SummaryRow> {
    let mut totals: HashMap<(MarketplaceType, &str, &str), f64> = HashMap::new();
    for row in detail {
        *totals
            .entry((
                row.marketplace,
                row.sku_component.as_str(),
                row.display_name.as_str(),
            ))
            .or_insert(0.0) += row.final_quantity;
    }

    let mut summary: Vec<SummaryRow> = totals
        .into_iter()
        .map(|((marketplace, sku, name), total)| SummaryRow {
            marketplace,
            sku_component: sku.to_string(),
            display_name: name.to_string(),
            total_quantity: total,
        })
        .collect();

    summary.sort_by(|a, b| {
        b.total_quantity
            .total_cmp(&a.total_quantity)
            .then_with(|| a.marketplace.code().cmp(b.marketplace.code()))
            .then_with(|| a.sku_component.cmp(&b.sku_component))
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    summary
}
