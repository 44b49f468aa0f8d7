/// Prefixes of internal codes that are never split (finished goods, consumer sets)
pub const PROTECTED_SKU_PREFIXES: &[&str] = &["FG-", "CS-"];

/// Cell values exported by spreadsheets for an empty cell
const NULL_MARKERS: &[&str] = &["nan", "none", "null"];

/// True when a cell is empty or holds a spreadsheet null marker
pub fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || NULL_MARKERS
            .iter()
            .any(|m| trimmed.eq_ignore_ascii_case(m))
}

/// Canonical SKU used for every dictionary lookup.
///
/// Marketplace exports prepend shop prefixes joined by a hyphen (`XX-KIT-1`).
/// The value is split on the first hyphen and the right part is kept, repeatedly,
/// until no hyphen is left or a protected prefix is reached. Repeating makes the
/// function idempotent, so the order side and the dictionary side always meet.
pub fn clean_sku(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let without_controls: String = raw.chars().filter(|c| (*c as u32) >= 32).collect();
    let mut sku = without_controls.trim();

    loop {
        if sku.is_empty() || has_protected_prefix(sku) {
            return sku.to_string();
        }
        match sku.split_once('-') {
            Some((head, tail)) => {
                let tail = tail.trim();
                if tail.is_empty() {
                    return head.trim().to_string();
                }
                sku = tail;
            }
            None => return sku.to_string(),
        }
    }
}

fn has_protected_prefix(sku: &str) -> bool {
    let upper = sku.to_uppercase();
    PROTECTED_SKU_PREFIXES.iter().any(|p| upper.starts_with(p))
}

/// Parse a quantity cell. Comma is a decimal separator; anything unparsable is 0.
pub fn parse_quantity(raw: &str) -> f64 {
    parse_decimal(raw).unwrap_or(0.0)
}

/// Parse decimal number that may use comma as decimal separator
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
