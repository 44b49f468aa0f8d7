//! Locating logically named columns in spreadsheets whose headers vary
//! between exports ("No. Resi", "no_resi", "Nomor Resi", ...).

/// Lower-case, `_`/`-` as spaces, whitespace collapsed
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves fields of one table against its headers.
///
/// Candidates are tried in order; for each candidate an exact match beats a
/// substring match. A column claimed by one field is never handed to another.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    headers: Vec<String>,
    claimed: Vec<bool>,
}

impl FieldResolver {
    pub fn new(headers: &[String]) -> Self {
        Self {
            headers: headers.iter().map(|h| normalize_header(h)).collect(),
            claimed: vec![false; headers.len()],
        }
    }

    pub fn resolve(&mut self, candidates: &[&str]) -> Option<usize> {
        for candidate in candidates {
            let candidate = normalize_header(candidate);
            if candidate.is_empty() {
                continue;
            }

            let found = self
                .free_columns()
                .find(|&i| self.headers[i] == candidate)
                .or_else(|| {
                    self.free_columns()
                        .find(|&i| self.headers[i].contains(&candidate))
                });

            if let Some(index) = found {
                self.claimed[index] = true;
                return Some(index);
            }
        }
        None
    }

    /// Like [`Self::resolve`], falling back to a fixed column position when it is still free
    pub fn resolve_or_position(&mut self, candidates: &[&str], position: usize) -> Option<usize> {
        if let Some(index) = self.resolve(candidates) {
            return Some(index);
        }
        if position < self.headers.len() && !self.claimed[position] {
            self.claimed[position] = true;
            return Some(position);
        }
        None
    }

    fn free_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.headers.len()).filter(|&i| !self.claimed[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Kit_Sku "), "kit sku");
        assert_eq!(normalize_header("No.  Resi"), "no. resi");
        assert_eq!(normalize_header("Same-Day"), "same day");
    }

    #[test]
    fn test_exact_match_beats_earlier_substring() {
        let h = headers(&["Component_Product_Name", "Component_Sku", "Component"]);
        let mut resolver = FieldResolver::new(&h);
        assert_eq!(resolver.resolve(&["component"]), Some(2));
    }

    #[test]
    fn test_candidate_order_wins() {
        let h = headers(&["Status Pembatalan", "Status Pesanan"]);
        let mut resolver = FieldResolver::new(&h);
        assert_eq!(resolver.resolve(&["status pesanan", "status"]), Some(1));
    }

    #[test]
    fn test_claimed_column_is_not_reused() {
        let h = headers(&["Status Pesanan", "No. Pesanan"]);
        let mut resolver = FieldResolver::new(&h);
        assert_eq!(resolver.resolve(&["status pesanan"]), Some(0));
        assert_eq!(resolver.resolve(&["pesanan"]), Some(1));
        assert_eq!(resolver.resolve(&["pesanan"]), None);
    }

    #[test]
    fn test_positional_fallback() {
        let h = headers(&["Col A", "Col B"]);
        let mut resolver = FieldResolver::new(&h);
        assert_eq!(resolver.resolve_or_position(&["kurir"], 0), Some(0));
        assert_eq!(resolver.resolve_or_position(&["instant"], 0), None);
        assert_eq!(resolver.resolve_or_position(&["instant"], 1), Some(1));
        assert_eq!(resolver.resolve_or_position(&["qty"], 2), None);
    }
}
