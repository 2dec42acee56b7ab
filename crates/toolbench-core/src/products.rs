use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Size-group key used when a variant's details carry no `Size:` value.
pub const DEFAULT_SIZE_GROUP: &str = "Default";

/// A product parsed from a pasted `<product>` block.
///
/// Every scalar is optional: a field is `None` when its tag does not occur in
/// the block, and `Some("")` when the tag occurs but is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Raw price text, e.g. `"USD 18.50"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_out_of_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_description: Option<String>,
    /// Raw comma-separated tag string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// `tags` split on commas, trimmed, empties removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags_array: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasting_notes: Option<String>,
    #[serde(rename = "productUrl", skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    /// Currency word parsed from `original_price` (`"USD"` in `"USD 18.50"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Numeric amount parsed from `original_price`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_value: Option<f64>,
    pub variants: Vec<VariantRecord>,
    #[serde(rename = "variantsBySize")]
    pub variants_by_size: VariantsBySize,
}

impl ProductRecord {
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Size labels in the order they were first seen.
    #[must_use]
    pub fn sizes(&self) -> Vec<&str> {
        self.variants_by_size.iter().map(|g| g.size.as_str()).collect()
    }
}

/// A single `<variant_detail>` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariantRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Raw details text, e.g. `"Grind: Whole Bean, Size: 250g"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl VariantRecord {
    /// The size-group key this variant belongs to.
    #[must_use]
    pub fn size_key(&self) -> &str {
        match self.size.as_deref() {
            Some(size) if !size.is_empty() => size,
            _ => DEFAULT_SIZE_GROUP,
        }
    }
}

/// All variants sharing one size label.
///
/// `price` is taken from the first variant seen for the size and is not
/// reconciled against later variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeGroup {
    #[serde(skip)]
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub variants: Vec<VariantRecord>,
}

/// Variants grouped by size, keeping groups in first-seen order.
///
/// Serializes as a JSON object keyed by size label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantsBySize {
    groups: Vec<SizeGroup>,
}

impl VariantsBySize {
    /// Groups `variants` by [`VariantRecord::size_key`].
    #[must_use]
    pub fn from_variants(variants: &[VariantRecord]) -> Self {
        let mut by_size = Self::default();
        for variant in variants {
            by_size.push(variant.clone());
        }
        by_size
    }

    fn push(&mut self, variant: VariantRecord) {
        let key = variant.size_key();
        if let Some(group) = self.groups.iter_mut().find(|g| g.size == key) {
            group.variants.push(variant);
            return;
        }
        self.groups.push(SizeGroup {
            size: key.to_string(),
            price: variant.price.clone(),
            variants: vec![variant],
        });
    }

    #[must_use]
    pub fn get(&self, size: &str) -> Option<&SizeGroup> {
        self.groups.iter().find(|g| g.size == size)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizeGroup> {
        self.groups.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for VariantsBySize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.size, group)?;
        }
        map.end()
    }
}
