//! Product listing extraction.
//!
//! Works on a fixed two-level schema rather than the generic tag tree:
//! `<product>` blocks, each holding scalar field tags and any number of
//! `<variant_detail>` blocks. Blocks are not nested, so the first matching
//! close tag ends each block or field.
//!
//! Missing fields stay `None`; a malformed block simply contributes nothing.

use std::sync::LazyLock;

use regex::Regex;
use toolbench_core::{ProductRecord, VariantRecord, VariantsBySize};

use crate::parse_helpers::{
    capture_trimmed, parse_price, parse_variant_details, split_tags, tag_pattern,
};

/// Marker opening a product listing export.
pub const PRODUCTS_START: &str = "<PRODUCTS_START>";
/// Marker closing a product listing export.
pub const PRODUCTS_END: &str = "<PRODUCTS_END>";

/// Scalar tags read from each `<product>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    ProductId,
    OriginalPrice,
    IsOutOfStock,
    BriefDescription,
    Tags,
    TastingNotes,
    ProductUrl,
}

impl ProductField {
    pub const ALL: [ProductField; 8] = [
        ProductField::Name,
        ProductField::ProductId,
        ProductField::OriginalPrice,
        ProductField::IsOutOfStock,
        ProductField::BriefDescription,
        ProductField::Tags,
        ProductField::TastingNotes,
        ProductField::ProductUrl,
    ];

    /// The tag name as it appears in the listing.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::ProductId => "product_id",
            ProductField::OriginalPrice => "original_price",
            ProductField::IsOutOfStock => "is_out_of_stock",
            ProductField::BriefDescription => "brief_description",
            ProductField::Tags => "tags",
            ProductField::TastingNotes => "tasting_notes",
            ProductField::ProductUrl => "productUrl",
        }
    }
}

struct Patterns {
    product: Regex,
    variant: Regex,
    fields: Vec<(ProductField, Regex)>,
    variant_id: Regex,
    variant_details: Regex,
    variant_price: Regex,
    listing_start: Regex,
    listing_end: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    product: tag_pattern("product"),
    variant: tag_pattern("variant_detail"),
    fields: ProductField::ALL
        .into_iter()
        .map(|field| (field, tag_pattern(field.tag())))
        .collect(),
    variant_id: tag_pattern("variant_id"),
    variant_details: tag_pattern("variant_details"),
    variant_price: tag_pattern("price"),
    // The export sometimes wraps the listing in a JSON string inside a list:
    // <PRODUCTS_START>["..."]<PRODUCTS_END>
    listing_start: Regex::new(&format!(r#"{}\s*\[?"?"#, regex::escape(PRODUCTS_START)))
        .expect("valid listing start regex"),
    listing_end: Regex::new(&format!(r#""?\]?\s*{}"#, regex::escape(PRODUCTS_END)))
        .expect("valid listing end regex"),
});

/// Parses every `<product>` block in `raw_text`, in document order.
///
/// When `PRODUCTS_START` / `PRODUCTS_END` markers are present only the text
/// between them is considered. Never fails; input without product blocks
/// yields an empty list.
#[must_use]
pub fn parse_products(raw_text: &str) -> Vec<ProductRecord> {
    let patterns = &*PATTERNS;
    let listing = clip_to_listing(patterns, raw_text);

    let products: Vec<ProductRecord> = patterns
        .product
        .captures_iter(listing)
        .filter_map(|cap| cap.get(1))
        .map(|block| parse_product_block(patterns, block.as_str()))
        .collect();

    tracing::debug!(count = products.len(), "parsed product listing");
    products
}

/// Clips `text` to the interior of the listing markers, when present.
fn clip_to_listing<'a>(patterns: &Patterns, text: &'a str) -> &'a str {
    let mut listing = text;
    if let Some(start) = patterns.listing_start.find(listing) {
        listing = &listing[start.end()..];
    }
    if let Some(end) = patterns.listing_end.find(listing) {
        listing = &listing[..end.start()];
    }
    listing
}

fn parse_product_block(patterns: &Patterns, block: &str) -> ProductRecord {
    let mut product = ProductRecord::default();

    for (field, re) in &patterns.fields {
        let Some(value) = capture_trimmed(re, block) else {
            continue;
        };
        match field {
            ProductField::Name => product.name = Some(value),
            ProductField::ProductId => product.product_id = Some(value),
            ProductField::OriginalPrice => product.original_price = Some(value),
            ProductField::IsOutOfStock => {
                product.is_out_of_stock = Some(value.eq_ignore_ascii_case("true"));
            }
            ProductField::BriefDescription => product.brief_description = Some(value),
            ProductField::Tags => product.tags = Some(value),
            ProductField::TastingNotes => product.tasting_notes = Some(value),
            ProductField::ProductUrl => product.product_url = Some(value),
        }
    }

    if let Some((currency, amount)) = product
        .original_price
        .as_deref()
        .filter(|p| !p.is_empty())
        .and_then(parse_price)
    {
        product.currency = Some(currency);
        product.price_value = amount;
    }

    product.tags_array = product
        .tags
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(split_tags);

    product.variants = patterns
        .variant
        .captures_iter(block)
        .filter_map(|cap| cap.get(1))
        .map(|v_block| parse_variant_block(patterns, v_block.as_str()))
        .collect();
    product.variants_by_size = VariantsBySize::from_variants(&product.variants);

    product
}

fn parse_variant_block(patterns: &Patterns, v_block: &str) -> VariantRecord {
    let details = capture_trimmed(&patterns.variant_details, v_block);
    let (grind, size) = details
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(parse_variant_details)
        .unwrap_or_default();

    VariantRecord {
        id: capture_trimmed(&patterns.variant_id, v_block),
        details,
        price: capture_trimmed(&patterns.variant_price, v_block),
        grind,
        size,
    }
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
