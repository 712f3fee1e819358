//! Parsing of model output into an extraction payload.

use insight_core::{Error, ExtractionPayload, Result};

/// Remove a surrounding markdown code fence (```json ... ```), if present.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

/// Parse the assistant message content as an extraction payload.
///
/// The content must be a single JSON object; only non-JSON or non-object
/// content is rejected. Fields of the wrong shape are coerced or emptied
/// (see [`ExtractionPayload`]).
pub fn parse_extraction(content: &str) -> Result<ExtractionPayload> {
    let json = strip_code_fence(content);
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        Error::Serialization(format!("AI response is not valid JSON: {}", e))
    })?;
    if !value.is_object() {
        return Err(Error::Serialization(
            "AI response is not a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_object() {
        let payload = parse_extraction(
            r#"{"keywords":[{"term":"tax","frequency":3,"relevance":"high"}],
                "entities":[],"key_insights":["Pay early"],"summary":"Taxes.",
                "relationships":[{"from":"IRS","to":"tax","type":"collects","description":""}]}"#,
        )
        .unwrap();
        assert_eq!(payload.keywords.len(), 1);
        assert_eq!(payload.key_insights, vec!["Pay early".to_string()]);
        assert_eq!(payload.relationships[0].relation_type, "collects");
    }

    #[test]
    fn test_parse_missing_relationships_defaults_empty() {
        let payload = parse_extraction(r#"{"summary":"Only a summary"}"#).unwrap();
        assert!(payload.relationships.is_empty());
        assert_eq!(payload.summary, "Only a summary");
    }

    #[test]
    fn test_parse_string_keywords_and_object_summary() {
        let payload = parse_extraction(
            r#"{"keywords":["tax","irs"],"entities":"none","key_insights":[{"insight":"Pay early"}],
                "summary":{"short":"Taxes"},"relationships":null}"#,
        )
        .unwrap();
        let terms: Vec<&str> = payload.keywords.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms, vec!["tax", "irs"]);
        assert!(payload.entities.is_empty());
        assert_eq!(payload.key_insights, vec!["Pay early".to_string()]);
        assert_eq!(payload.summary, "");
        assert!(payload.relationships.is_empty());
    }

    #[test]
    fn test_parse_drops_unusable_items() {
        let payload = parse_extraction(
            r#"{"keywords":[1,{"term":"tax"},[]],"entities":[{"name":"IRS","type":"organization"},false],
                "key_insights":["Pay early",{"score":2}],"summary":"Taxes.",
                "relationships":["IRS collects tax",{"from":"IRS","to":"tax"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.keywords.len(), 1);
        assert_eq!(payload.entities.len(), 1);
        assert_eq!(payload.key_insights, vec!["Pay early".to_string()]);
        assert_eq!(payload.relationships.len(), 1);
        assert_eq!(payload.relationships[0].relation_type, "");
    }

    #[test]
    fn test_parse_fenced_json() {
        let payload = parse_extraction("```json\n{\"summary\": \"fenced\"}\n```").unwrap();
        assert_eq!(payload.summary, "fenced");
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_extraction("Here are the results you asked for").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_extraction(r#"["a", "b"]"#).is_err());
        assert!(parse_extraction("42").is_err());
    }

    #[test]
    fn test_strip_code_fence_leaves_plain_json() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }
}
