//! Options normalization.
//!
//! Primary path: a classification call mapping listing jargon and
//! abbreviations ("PCCB", "Sport Chrono Pkg") to canonical option names.
//! Fallback: a naive comma/semicolon split with trimming — no attempt at
//! abbreviation expansion, because degraded output is acceptable and
//! fabricated expansions are not.

use crate::client::{parse_json_payload, ClassifierClient};
use crate::error::NormalizeError;

const INSTRUCTION: &str = "You normalize vehicle option lists. Given raw \
option text from a listing, return a JSON array of canonical option names, \
expanding abbreviations where you are certain. Respond with JSON only.";

/// Normalize raw option text into canonical option names. Falls back to
/// [`fallback_split`] on any service failure; never errors.
pub async fn normalize_options(client: Option<&ClassifierClient>, raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    if let Some(client) = client {
        match classify(client, raw).await {
            Ok(options) => return options,
            Err(err) => {
                tracing::warn!(error = %err, "options classifier unavailable, using naive split");
            }
        }
    }
    fallback_split(raw)
}

async fn classify(client: &ClassifierClient, raw: &str) -> Result<Vec<String>, NormalizeError> {
    let content = client.complete(INSTRUCTION, raw).await?;
    let value = parse_json_payload(&content).ok_or(NormalizeError::EmptyResponse)?;

    // Accept a bare array or an {"options": [...]} wrapper.
    let items = value
        .as_array()
        .cloned()
        .or_else(|| {
            value
                .get("options")
                .and_then(serde_json::Value::as_array)
                .cloned()
        })
        .ok_or(NormalizeError::EmptyResponse)?;

    Ok(items
        .iter()
        .filter_map(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Comma/semicolon split with per-token trimming and empty-token filtering.
#[must_use]
pub fn fallback_split(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_commas_and_semicolons() {
        assert_eq!(
            fallback_split("Sport Chrono; PCCB, Bucket Seats"),
            vec!["Sport Chrono", "PCCB", "Bucket Seats"]
        );
    }

    #[test]
    fn empty_tokens_are_filtered() {
        assert_eq!(fallback_split("a,, ;b; "), vec!["a", "b"]);
    }

    #[test]
    fn abbreviations_are_not_expanded_in_fallback() {
        assert_eq!(fallback_split("PCCB"), vec!["PCCB"]);
    }

    #[test]
    fn empty_input_yields_empty_vec() {
        assert!(fallback_split("").is_empty());
        assert!(fallback_split("  ;  ,  ").is_empty());
    }

    #[tokio::test]
    async fn no_client_uses_the_naive_split() {
        let options = normalize_options(None, "Sport Chrono, PCCB").await;
        assert_eq!(options, vec!["Sport Chrono", "PCCB"]);
    }

    #[tokio::test]
    async fn blank_raw_text_short_circuits() {
        let options = normalize_options(None, "   ").await;
        assert!(options.is_empty());
    }
}
