//! Fixed prompt used for knowledge extraction.

/// System instruction describing the five fields and their JSON shape.
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are an expert knowledge extraction system. Analyze documents and extract:
1. Keywords (important terms and concepts)
2. Entities (people, organizations, locations, dates)
3. Key insights (main takeaways and important points)
4. Summary (concise overview)
5. Relationships (connections between entities and concepts)

Return the results as JSON with this structure:
{
  "keywords": [{"term": "string", "frequency": number, "relevance": "high"|"medium"|"low"}],
  "entities": [{"name": "string", "type": "person"|"organization"|"location"|"date"|"other", "context": "string"}],
  "key_insights": ["string"],
  "summary": "string",
  "relationships": [{"from": "string", "to": "string", "type": "string", "description": "string"}]
}"#;

/// Build the user message for a document of the given type.
pub fn extraction_user_message(file_type: &str, content: &str) -> String {
    format!(
        "Extract knowledge from this {} document:\n\n{}",
        file_type, content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_format() {
        let msg = extraction_user_message("csv", "a,b\n1,2");
        assert_eq!(msg, "Extract knowledge from this csv document:\n\na,b\n1,2");
    }

    #[test]
    fn test_system_prompt_names_all_fields() {
        for field in [
            "\"keywords\"",
            "\"entities\"",
            "\"key_insights\"",
            "\"summary\"",
            "\"relationships\"",
        ] {
            assert!(EXTRACTION_SYSTEM_PROMPT.contains(field), "missing {}", field);
        }
    }
}
