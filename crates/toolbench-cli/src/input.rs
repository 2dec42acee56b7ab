//! Reading pasted input from a file or stdin.

use std::path::Path;

use anyhow::{bail, Context};

/// Reads the whole input from `path`, or from stdin when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the input cannot be read, is larger than `max_bytes`,
/// or contains only whitespace.
pub(crate) fn read_input(path: Option<&Path>, max_bytes: usize) -> anyhow::Result<String> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin().lock()).context("failed to read stdin")?,
    };
    check_input(raw, max_bytes)
}

fn check_input(raw: String, max_bytes: usize) -> anyhow::Result<String> {
    if raw.len() > max_bytes {
        bail!(
            "input is {} bytes, over the {max_bytes} byte limit (TOOLBENCH_MAX_INPUT_BYTES)",
            raw.len()
        );
    }
    if raw.trim().is_empty() {
        bail!("input is empty");
    }
    Ok(raw)
}
