//! JSON loader for transit system dumps.

use anyhow::{Context, Result};
use std::path::Path;

use crate::model::TransitSystem;

/// Decodes a JSON-encoded [`TransitSystem`] from raw bytes and validates
/// its structure.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON for a system, or if
/// validation finds non-finite coordinates or a stop id reused with a
/// different identity.
pub fn parse_system(bytes: &[u8]) -> Result<TransitSystem> {
    let system: TransitSystem =
        serde_json::from_slice(bytes).context("malformed transit system JSON")?;
    system.validate()?;
    Ok(system)
}

/// Reads and parses a system dump from a file path.
pub fn load_system(path: impl AsRef<Path>) -> Result<TransitSystem> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_system(&bytes)
}
