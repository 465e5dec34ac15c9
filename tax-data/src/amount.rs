use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and strips `$` and thousands separators.
fn normalize_amount(s: &str) -> String {
    s.trim().replace([',', '$'], "")
}

/// Parses a money amount such as `"80,000"`, `"$1,234.56"` or `"-250"`.
///
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses an optional amount; empty input is `None`.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if normalize_amount(s).is_empty() {
        Ok(None)
    } else {
        parse_decimal(s).map(Some)
    }
}

/// Serde adapter: an amount cell where empty means zero.
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) => parse_decimal(&s).map_err(serde::de::Error::custom),
        None => Ok(Decimal::ZERO),
    }
}

/// Serde adapter: an amount cell that must be present and non-empty.
pub(crate) fn deserialize_required_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match parse_optional_decimal(s.as_deref().unwrap_or_default()) {
        Ok(Some(amount)) => Ok(amount),
        Ok(None) => Err(serde::de::Error::custom("amount is required")),
        Err(e) => Err(serde::de::Error::custom(e)),
    }
}

/// Serde adapter: an amount cell where empty means `None`.
pub(crate) fn deserialize_optional_amount<'de, D>(
    deserializer: D
) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) => parse_optional_decimal(&s).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
