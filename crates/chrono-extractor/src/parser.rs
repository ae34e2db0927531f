//! Parse a completion into schedule items

use crate::decoder::decode_item;
use crate::error::ParseError;
use crate::extract::extract_json;
use crate::types::ParsedSchedule;
use serde_json::Value;
use tracing::warn;

/// Parse a raw completion into decoded items and per-item failures
///
/// Batch-level problems (no JSON, invalid JSON, no `items` array) abort with
/// a [`ParseError`]. Item-level problems are collected in
/// [`ParsedSchedule::failures`]; a batch where every item failed is still
/// `Ok`.
pub fn parse_extraction_response(raw: &str) -> Result<ParsedSchedule, ParseError> {
    let json_str = extract_json(raw)?;

    let json: Value =
        serde_json::from_str(json_str).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let elements = json
        .get("items")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingItemsField)?;

    let mut parsed = ParsedSchedule::default();
    for (index, element) in elements.iter().enumerate() {
        match decode_item(element, index) {
            Ok(item) => parsed.items.push(item),
            Err(failure) => {
                warn!("Failed to decode item {}: {}", index, failure);
                parsed.failures.push(failure);
            }
        }
    }

    Ok(parsed)
}
