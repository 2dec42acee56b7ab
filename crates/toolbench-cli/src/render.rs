//! Plain-text rendering of parse results for terminal output.

use toolbench_core::{ProductRecord, StoreCounts, TagNode};

const INDENT: &str = "  ";

/// Renders a section forest as an indented outline.
pub(crate) fn prompts(sections: &[TagNode]) -> String {
    let count = sections.len();
    let mut out = format!("{count} section{}", if count == 1 { "" } else { "s" });

    if sections.is_empty() {
        out.push_str("\n\nNo XML sections could be parsed. Check your input format.");
        return out;
    }

    out.push('\n');
    for section in sections {
        out.push('\n');
        write_section(&mut out, section, 0);
    }
    out.trim_end().to_string()
}

fn write_section(out: &mut String, node: &TagNode, depth: usize) {
    let pad = INDENT.repeat(depth);
    out.push_str(&format!("{pad}{}\n", node.label));
    for line in node.content.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("{pad}{INDENT}{}\n", line.trim_end()));
        }
    }
    for child in &node.children {
        write_section(out, child, depth + 1);
    }
}

/// Renders one card per product, followed by its size groups.
pub(crate) fn products(records: &[ProductRecord]) -> String {
    let mut out = format!("{} found", records.len());

    if records.is_empty() {
        out.push_str("\n\nNo products could be parsed. Check your input format.");
        return out;
    }

    for (idx, product) in records.iter().enumerate() {
        out.push_str("\n\n");
        write_product(&mut out, idx + 1, product);
    }
    out.trim_end().to_string()
}

fn write_product(out: &mut String, number: usize, product: &ProductRecord) {
    let name = product.name.as_deref().unwrap_or("Unnamed Product");
    let mut lines = vec![match &product.product_id {
        Some(id) => format!("#{number} {name} [{id}]"),
        None => format!("#{number} {name}"),
    }];

    let stock = if product.is_out_of_stock == Some(true) {
        "Out of Stock"
    } else {
        "In Stock"
    };
    lines.push(format!("{INDENT}Stock: {stock}"));
    if let Some(price) = &product.original_price {
        lines.push(format!("{INDENT}Price: {price}"));
    }
    if let Some(description) = &product.brief_description {
        lines.push(format!("{INDENT}Description: {description}"));
    }
    if let Some(notes) = &product.tasting_notes {
        lines.push(format!("{INDENT}Tasting notes: {notes}"));
    }
    if let Some(tags) = product.tags_array.as_ref().filter(|t| !t.is_empty()) {
        lines.push(format!("{INDENT}Tags ({}): {}", tags.len(), tags.join(", ")));
    }
    if let Some(url) = &product.product_url {
        lines.push(format!("{INDENT}URL: {url}"));
    }

    if !product.variants_by_size.is_empty() {
        lines.push(format!(
            "{INDENT}Variants ({} total):",
            product.variant_count()
        ));
        for group in product.variants_by_size.iter() {
            let price = group.price.as_deref().unwrap_or("n/a");
            let count = group.variants.len();
            let plural = if count == 1 { "" } else { "s" };
            lines.push(format!(
                "{INDENT}{INDENT}{} @ {price} ({count} grind{plural})",
                group.size
            ));
            for variant in &group.variants {
                let grind = variant.grind.as_deref().unwrap_or("-");
                let id = variant.id.as_deref().unwrap_or("-");
                lines.push(format!("{INDENT}{INDENT}{INDENT}{grind} ({id})"));
            }
        }
    }

    out.push_str(&lines.join("\n"));
}

/// Renders the copyable summary line, optionally followed by the id lists.
pub(crate) fn store_counts(counts: &StoreCounts, with_ids: bool) -> String {
    let mut out = counts.summary_line();
    if with_ids {
        for (label, ids) in [
            ("Active", &counts.active_ids),
            ("Churned", &counts.churned_ids),
            ("New", &counts.new_ids),
        ] {
            out.push_str(&format!("\n\n{label} ({}):", ids.len()));
            for id in ids {
                out.push_str(&format!("\n{INDENT}{id}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use toolbench_parse::{count_stores_from_str, parse_products, parse_prompts};

    use super::*;

    #[test]
    fn prompts_render_as_indented_outline() {
        let sections = parse_prompts(
            "<root><intro>Hello</intro><rules>Be kind.<tone>Warm</tone></rules></root>",
        );
        assert_eq!(
            prompts(&sections),
            "2 sections\n\nIntro\n  Hello\n\nRules\n  Be kind.\n  Tone\n    Warm"
        );
    }

    #[test]
    fn single_section_heading_is_singular() {
        let sections = parse_prompts("<intro>Hello</intro>");
        assert!(prompts(&sections).starts_with("1 section\n"));
    }

    #[test]
    fn empty_prompt_explains_itself() {
        assert_eq!(
            prompts(&[]),
            "0 sections\n\nNo XML sections could be parsed. Check your input format."
        );
    }

    #[test]
    fn product_card_lists_size_groups() {
        let records = parse_products(
            "<product><name>Kenya AA</name><product_id>P1</product_id>\
             <original_price>USD 18.50</original_price>\
             <variant_detail><variant_id>V1</variant_id>\
             <variant_details>Grind: Whole Bean, Size: 250g</variant_details>\
             <price>18.50</price></variant_detail></product>",
        );
        assert_eq!(
            products(&records),
            "1 found\n\n#1 Kenya AA [P1]\n  Stock: In Stock\n  Price: USD 18.50\n  \
             Variants (1 total):\n    250g @ 18.50 (1 grind)\n      Whole Bean (V1)"
        );
    }

    #[test]
    fn product_card_without_variants_lists_every_field() {
        let records = parse_products(
            "<product><is_out_of_stock>TRUE</is_out_of_stock>\
             <brief_description>Bright</brief_description>\
             <tasting_notes>Citrus</tasting_notes><tags>fruity, light</tags>\
             <productUrl>https://example.com/p</productUrl></product>",
        );
        assert_eq!(
            products(&records),
            "1 found\n\n#1 Unnamed Product\n  Stock: Out of Stock\n  \
             Description: Bright\n  Tasting notes: Citrus\n  \
             Tags (2): fruity, light\n  URL: https://example.com/p"
        );
    }

    #[test]
    fn product_cards_are_separated_by_one_blank_line() {
        let records = parse_products("<product><name>A</name></product><product><name>B</name></product>");
        assert_eq!(
            products(&records),
            "2 found\n\n#1 A\n  Stock: In Stock\n\n#2 B\n  Stock: In Stock"
        );
    }

    #[test]
    fn store_counts_with_empty_id_lists() {
        let counts = StoreCounts::default();
        assert_eq!(
            store_counts(&counts, true),
            "Active Stores (0), Churned Stores (0), New Stores (0)\n\n\
             Active (0):\n\nChurned (0):\n\nNew (0):"
        );
    }

    #[test]
    fn no_products_explains_itself() {
        assert_eq!(
            products(&[]),
            "0 found\n\nNo products could be parsed. Check your input format."
        );
    }

    #[test]
    fn store_counts_summary_with_ids() {
        let counts = count_stores_from_str(
            r#"{"aggregations":{"time_buckets":{"buckets":{
                "current_month":{"unique_stores":{"buckets":[{"key":"s1"},{"key":"s2"}]}},
                "previous_month":{"unique_stores":{"buckets":[{"key":"s2"},{"key":"s3"}]}}
            }}}}"#,
        )
        .unwrap();

        assert_eq!(
            store_counts(&counts, false),
            "Active Stores (1), Churned Stores (1), New Stores (1)"
        );
        assert_eq!(
            store_counts(&counts, true),
            "Active Stores (1), Churned Stores (1), New Stores (1)\n\n\
             Active (1):\n  s2\n\nChurned (1):\n  s3\n\nNew (1):\n  s1"
        );
    }
}
