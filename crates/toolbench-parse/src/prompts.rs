//! Prompt-section extraction.
//!
//! Prompt authors pick their own tag vocabulary and nest sections freely, so
//! this is the tag-tree parser with its `<root>` unwrap and no schema on top.

use toolbench_core::TagNode;

use crate::tag_tree::parse_tag_tree;

/// Parses a tagged prompt into labelled, arbitrarily deep sections.
#[must_use]
pub fn parse_prompts(raw_text: &str) -> Vec<TagNode> {
    let sections = parse_tag_tree(raw_text);
    tracing::debug!(top_level = sections.len(), "parsed prompt sections");
    sections
}
