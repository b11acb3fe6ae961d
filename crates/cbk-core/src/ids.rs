//! ID prefix constants and generation.
//!
//! IDs are `{prefix}-{16 hex chars}`, e.g. `"aud-3f9c01ab77d2e410"`.

use crate::errors::CoreError;

pub const PREFIX_AUDIT: &str = "aud";

/// Generate a prefixed ID from 8 random bytes.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 8];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("failed to generate id: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}
