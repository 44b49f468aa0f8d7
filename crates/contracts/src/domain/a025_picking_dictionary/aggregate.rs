use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One component of a kit (bundle) SKU
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleComponent {
    /// Cleaned component SKU
    pub sku: String,
    /// Component name from the bundle sheet, used when the SKU master has no name
    pub name: Option<String>,
    /// Units of the component per one kit, always > 0
    pub quantity: f64,
}

/// Reference data of one dictionary ("kamus") workbook (a025)
///
/// All SKU keys are cleaned codes. Bundles are flat: a component is never
/// expanded again even if it is a kit itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDictionary {
    /// Shipping options counted as instant / same day, normalized with [`Self::courier_key`]
    pub instant_couriers: BTreeSet<String>,
    /// Kit SKU -> components in sheet order
    pub bundles: HashMap<String, Vec<BundleComponent>>,
    /// SKU -> display name
    pub sku_names: HashMap<String, String>,
}

/// Counters shown to the operator after the dictionary is loaded
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DictionaryStats {
    pub instant_couriers: usize,
    pub kits: usize,
    pub components: usize,
    pub sku_names: usize,
}

impl ReferenceDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shipping option labels are matched trimmed and case-insensitively
    pub fn courier_key(label: &str) -> String {
        label.trim().to_lowercase()
    }

    pub fn add_instant_courier(&mut self, label: &str) {
        let key = Self::courier_key(label);
        if !key.is_empty() {
            self.instant_couriers.insert(key);
        }
    }

    pub fn is_instant_courier(&self, label: &str) -> bool {
        self.instant_couriers.contains(&Self::courier_key(label))
    }

    pub fn add_bundle_component(&mut self, kit_sku: &str, component: BundleComponent) {
        self.bundles
            .entry(kit_sku.to_string())
            .or_default()
            .push(component);
    }

    pub fn bundle_components(&self, sku: &str) -> Option<&[BundleComponent]> {
        self.bundles.get(sku).map(|v| v.as_slice())
    }

    /// First occurrence wins; returns false when the SKU already had a name
    pub fn add_sku_name(&mut self, sku: &str, name: &str) -> bool {
        if self.sku_names.contains_key(sku) {
            return false;
        }
        self.sku_names.insert(sku.to_string(), name.to_string());
        true
    }

    pub fn sku_name(&self, sku: &str) -> Option<&str> {
        self.sku_names.get(sku).map(|s| s.as_str())
    }

    pub fn stats(&self) -> DictionaryStats {
        DictionaryStats {
            instant_couriers: self.instant_couriers.len(),
            kits: self.bundles.len(),
            components: self.bundles.values().map(|c| c.len()).sum(),
            sku_names: self.sku_names.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(sku: &str, quantity: f64) -> BundleComponent {
        BundleComponent {
            sku: sku.to_string(),
            name: None,
            quantity,
        }
    }

    #[test]
    fn test_courier_match_ignores_case_and_spaces() {
        let mut dict = ReferenceDictionary::new();
        dict.add_instant_courier(" Same Day ");
        dict.add_instant_courier("   ");
        assert!(dict.is_instant_courier("same day"));
        assert!(dict.is_instant_courier("SAME DAY"));
        assert!(!dict.is_instant_courier("Reguler"));
        assert_eq!(dict.instant_couriers.len(), 1);
    }

    #[test]
    fn test_first_sku_name_wins() {
        let mut dict = ReferenceDictionary::new();
        assert!(dict.add_sku_name("A", "Apple"));
        assert!(!dict.add_sku_name("A", "Apricot"));
        assert_eq!(dict.sku_name("A"), Some("Apple"));
        assert_eq!(dict.sku_name("B"), None);
    }

    #[test]
    fn test_stats_count_components_across_kits() {
        let mut dict = ReferenceDictionary::new();
        dict.add_bundle_component("K1", component("A", 1.0));
        dict.add_bundle_component("K1", component("B", 2.0));
        dict.add_bundle_component("K2", component("A", 3.0));
        dict.add_instant_courier("Instant");

        let stats = dict.stats();
        assert_eq!(stats.kits, 2);
        assert_eq!(stats.components, 3);
        assert_eq!(stats.instant_couriers, 1);
        assert_eq!(
            dict.bundle_components("K1").map(|c| c.len()),
            Some(2)
        );
    }
}
