//! Parsers behind the toolbench utilities.
//!
//! - [`tag_tree`]: lenient nested-tag scanner producing a [`TagNode`] forest.
//! - [`prompts`]: prompt-section entry point over [`tag_tree`].
//! - [`products`]: fixed-schema `<product>` / `<variant_detail>` extractor.
//! - [`store_count`]: active/churned/new partitions over aggregation buckets.
//!
//! [`TagNode`]: toolbench_core::TagNode

pub mod error;
mod parse_helpers;
pub mod products;
pub mod prompts;
pub mod store_count;
pub mod tag_tree;

pub use error::StoreCountError;
pub use products::parse_products;
pub use prompts::parse_prompts;
pub use store_count::{count_stores, count_stores_from_str};
pub use tag_tree::{parse_tag_tree, tag_label};
