use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
///
/// Hyphens are accepted in place of underscores, so `in-review` and
/// `in_review` both name the same status.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}
