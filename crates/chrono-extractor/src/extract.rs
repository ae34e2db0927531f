//! Recover the JSON object from a noisy completion

use crate::error::ExtractError;

/// Return the span from the first `{` through the last `}`, inclusive
///
/// Models routinely wrap their JSON in prose or markdown fences. This is a
/// first/last-brace heuristic, not a bracket matcher: two separate objects,
/// or braces inside a string value after the real object, produce a span
/// that is not valid JSON. The parser rejects that case as invalid JSON.
pub fn extract_json(raw: &str) -> Result<&str, ExtractError> {
    let start = raw.find('{').ok_or(ExtractError::NoJsonFound)?;
    let end = raw.rfind('}').ok_or(ExtractError::NoJsonFound)?;

    if end < start {
        return Err(ExtractError::NoJsonFound);
    }

    Ok(&raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let json = r#"{"items": []}"#;
        assert_eq!(extract_json(json).unwrap(), json);
    }

    #[test]
    fn test_surrounding_prose() {
        let raw = r#"Sure! {"items":[]} Hope that helps!"#;
        assert_eq!(extract_json(raw).unwrap(), r#"{"items":[]}"#);
    }

    #[test]
    fn test_markdown_fence() {
        let raw = "```json\n{\"items\": [{\"type\": \"task\"}]}\n```";
        assert_eq!(
            extract_json(raw).unwrap(),
            "{\"items\": [{\"type\": \"task\"}]}"
        );
    }

    #[test]
    fn test_no_braces() {
        assert_eq!(extract_json("no json here"), Err(ExtractError::NoJsonFound));
        assert_eq!(extract_json(""), Err(ExtractError::NoJsonFound));
    }

    #[test]
    fn test_only_opening_brace() {
        assert_eq!(extract_json("{ unterminated"), Err(ExtractError::NoJsonFound));
    }

    #[test]
    fn test_only_closing_brace() {
        assert_eq!(extract_json("stray } here"), Err(ExtractError::NoJsonFound));
    }

    #[test]
    fn test_closing_before_opening() {
        assert_eq!(extract_json("} and then {"), Err(ExtractError::NoJsonFound));
    }

    #[test]
    fn test_two_objects_span_both() {
        // The heuristic spans from the first object to the end of the second
        let raw = r#"{"a":1} and {"b":2}"#;
        assert_eq!(extract_json(raw).unwrap(), raw);
    }

    #[test]
    fn test_multibyte_prose() {
        let raw = "Voilà — ton planning : {\"items\":[]} ✓";
        assert_eq!(extract_json(raw).unwrap(), "{\"items\":[]}");
    }
}
