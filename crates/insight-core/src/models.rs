//! Domain models for documents and the knowledge extracted from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Generate a new time-ordered UUIDv7 identifier.
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// Processing status of an uploaded document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

/// An uploaded document owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Original filename.
    pub title: String,
    /// Extension without the dot, or `unknown`.
    pub file_type: String,
    /// Storage key: `<user_id>/<random_id>.<ext>`.
    pub file_path: String,
    pub file_size: i64,
    pub status: DocumentStatus,
    pub uploaded_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// Request for inserting a new document row.
#[derive(Debug, Clone)]
pub struct CreateDocumentRequest {
    pub user_id: Uuid,
    pub title: String,
    pub file_type: String,
    pub file_path: String,
    pub file_size: i64,
    pub status: DocumentStatus,
}

// =============================================================================
// EXTRACTED KNOWLEDGE
// =============================================================================

/// A key term with its frequency and relevance tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyword {
    #[serde(deserialize_with = "lenient_string")]
    pub term: String,
    #[serde(deserialize_with = "lenient_frequency")]
    pub frequency: u32,
    /// `high`, `medium` or `low`; stored as returned by the model.
    #[serde(deserialize_with = "lenient_string")]
    pub relevance: String,
}

/// A named entity mentioned in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// `person`, `organization`, `location`, `date` or `other`.
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub category: String,
    /// Sentence giving the entity's context.
    #[serde(deserialize_with = "lenient_string")]
    pub context: String,
}

/// A directed connection between two entities or concepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    #[serde(deserialize_with = "lenient_string")]
    pub from: String,
    #[serde(deserialize_with = "lenient_string")]
    pub to: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub relation_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

/// The five fields requested from the model.
///
/// Models drift from the requested shape, so every field is read
/// leniently:
///
/// - a list field that is absent, `null` or not an array is empty
/// - a bare string in `keywords` or `entities` becomes the term or name
/// - an object in `key_insights` contributes its `insight`/`text` string
/// - items of any other shape, and items without a term, name or
///   endpoints, are dropped
/// - a `summary` that is not a string is empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionPayload {
    #[serde(deserialize_with = "lenient_list")]
    pub keywords: Vec<Keyword>,
    #[serde(deserialize_with = "lenient_list")]
    pub entities: Vec<Entity>,
    #[serde(deserialize_with = "lenient_list")]
    pub key_insights: Vec<String>,
    #[serde(deserialize_with = "lenient_summary")]
    pub summary: String,
    #[serde(deserialize_with = "lenient_list")]
    pub relationships: Vec<Relationship>,
}

/// Knowledge extracted from exactly one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedKnowledge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_id: Uuid,
    pub keywords: Vec<Keyword>,
    pub entities: Vec<Entity>,
    pub key_insights: Vec<String>,
    pub summary: String,
    pub relationships: Vec<Relationship>,
    pub created_at: DateTime<Utc>,
}

/// Request for inserting an extracted knowledge row.
#[derive(Debug, Clone)]
pub struct CreateKnowledgeRequest {
    pub user_id: Uuid,
    pub document_id: Uuid,
    pub payload: ExtractionPayload,
}

/// Relevance tier of a keyword, used for badge coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceTier {
    High,
    Medium,
    Low,
}

impl RelevanceTier {
    /// Anything other than `high`/`medium` falls into the low tier.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Entity category, used for card coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCategory {
    Person,
    Organization,
    Location,
    Date,
    Other,
}

impl EntityCategory {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "person" => Self::Person,
            "organization" => Self::Organization,
            "location" => Self::Location,
            "date" => Self::Date,
            _ => Self::Other,
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// A user resolved from an access token by the authentication service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session issued by the authentication service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

/// An item of a model-produced list, coerced from whatever JSON it arrived as.
trait LooseItem: Sized {
    fn from_loose(value: Value) -> Option<Self>;
}

impl LooseItem for Keyword {
    fn from_loose(value: Value) -> Option<Self> {
        let keyword = match value {
            Value::String(term) => Keyword {
                term,
                ..Default::default()
            },
            Value::Object(_) => serde_json::from_value(value).ok()?,
            _ => return None,
        };
        (!keyword.term.trim().is_empty()).then_some(keyword)
    }
}

impl LooseItem for Entity {
    fn from_loose(value: Value) -> Option<Self> {
        let entity = match value {
            Value::String(name) => Entity {
                name,
                ..Default::default()
            },
            Value::Object(_) => serde_json::from_value(value).ok()?,
            _ => return None,
        };
        (!entity.name.trim().is_empty()).then_some(entity)
    }
}

impl LooseItem for Relationship {
    fn from_loose(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let rel: Relationship = serde_json::from_value(value).ok()?;
        (!rel.from.trim().is_empty() || !rel.to.trim().is_empty()).then_some(rel)
    }
}

impl LooseItem for String {
    fn from_loose(value: Value) -> Option<Self> {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Object(map) => ["insight", "text", "content", "description"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))?
                .to_string(),
            _ => return None,
        };
        (!text.trim().is_empty()).then_some(text)
    }
}

fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: LooseItem,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(T::from_loose).collect(),
        _ => Vec::new(),
    })
}

fn lenient_summary<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// Scalars become their string form; anything else is empty.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Models return frequencies as integers, floats or numeric strings.
fn lenient_frequency<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let freq = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| v as f64)
            .or_else(|| n.as_f64())
            .unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if freq.is_finite() && freq > 0.0 {
        Ok(freq.round().min(u32::MAX as f64) as u32)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_status_round_trip_strings() {
        for status in [
            DocumentStatus::Pending,
            DocumentStatus::Processing,
            DocumentStatus::Completed,
        ] {
            let parsed: DocumentStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("archived".parse::<DocumentStatus>().is_err());
        assert_eq!(
            "COMPLETED".parse::<DocumentStatus>().unwrap(),
            DocumentStatus::Completed
        );
    }

    #[test]
    fn test_document_status_serializes_lowercase() {
        let json = serde_json::to_string(&DocumentStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }

    #[test]
    fn test_payload_missing_fields_default_to_empty() {
        let payload: ExtractionPayload =
            serde_json::from_str(r#"{"summary": "Short overview"}"#).unwrap();
        assert_eq!(payload.summary, "Short overview");
        assert!(payload.keywords.is_empty());
        assert!(payload.entities.is_empty());
        assert!(payload.key_insights.is_empty());
        assert!(payload.relationships.is_empty());
    }

    #[test]
    fn test_payload_null_fields_default_to_empty() {
        let payload: ExtractionPayload =
            serde_json::from_str(r#"{"relationships": null, "summary": null}"#).unwrap();
        assert!(payload.relationships.is_empty());
        assert_eq!(payload.summary, "");
    }

    #[test]
    fn test_payload_full_shape() {
        let json = r#"{
            "keywords": [{"term": "rust", "frequency": 4, "relevance": "high"}],
            "entities": [{"name": "Mozilla", "type": "organization", "context": "Mozilla sponsored Rust."}],
            "key_insights": ["Rust is memory safe"],
            "summary": "A document about Rust.",
            "relationships": [{"from": "Mozilla", "to": "Rust", "type": "sponsored", "description": "Early sponsor"}]
        }"#;
        let payload: ExtractionPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.keywords[0].term, "rust");
        assert_eq!(payload.keywords[0].frequency, 4);
        assert_eq!(payload.entities[0].category, "organization");
        assert_eq!(payload.relationships[0].relation_type, "sponsored");
        assert_eq!(payload.key_insights.len(), 1);
    }

    #[test]
    fn test_payload_coerces_mismatched_items() {
        let payload: ExtractionPayload = serde_json::from_str(
            r#"{
                "keywords": ["tax", {"term": "irs", "frequency": 2}, 7, {"frequency": 1}],
                "entities": ["IRS", {"name": 42, "type": ["org"]}, null],
                "key_insights": [{"insight": "File by April"}, {"text": "Keep receipts"}, {"score": 1}, 12],
                "summary": {"text": "not a string"},
                "relationships": ["IRS -> tax", {"from": "IRS", "to": "tax", "type": 3}, {}]
            }"#,
        )
        .unwrap();

        let terms: Vec<&str> = payload.keywords.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms, vec!["tax", "irs"]);
        assert_eq!(payload.keywords[0].frequency, 0);
        assert_eq!(payload.keywords[1].frequency, 2);

        let names: Vec<&str> = payload.entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["IRS", "42"]);
        assert_eq!(payload.entities[1].category, "");

        assert_eq!(
            payload.key_insights,
            vec!["File by April".to_string(), "Keep receipts".to_string(), "12".to_string()]
        );
        assert_eq!(payload.summary, "");

        assert_eq!(payload.relationships.len(), 1);
        assert_eq!(payload.relationships[0].relation_type, "3");
    }

    #[test]
    fn test_payload_non_array_lists_are_empty() {
        let payload: ExtractionPayload = serde_json::from_str(
            r#"{"keywords": "tax, irs", "entities": {"name": "IRS"}, "key_insights": "One insight",
                "summary": 5, "relationships": true}"#,
        )
        .unwrap();
        assert_eq!(payload, ExtractionPayload::default());
    }

    #[test]
    fn test_keyword_frequency_is_lenient() {
        let kws: Vec<Keyword> = serde_json::from_str(
            r#"[
                {"term": "a", "frequency": 2.6, "relevance": "low"},
                {"term": "b", "frequency": "7", "relevance": "low"},
                {"term": "c", "relevance": "low"},
                {"term": "d", "frequency": -3, "relevance": "low"}
            ]"#,
        )
        .unwrap();
        let freqs: Vec<u32> = kws.iter().map(|k| k.frequency).collect();
        assert_eq!(freqs, vec![3, 7, 0, 0]);
    }

    #[test]
    fn test_entity_and_relationship_serialize_type_key() {
        let entity = Entity {
            name: "Ada".into(),
            category: "person".into(),
            context: "Ada wrote notes.".into(),
        };
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["type"], "person");
        assert!(value.get("category").is_none());

        let rel = Relationship {
            from: "Ada".into(),
            to: "Engine".into(),
            relation_type: "described".into(),
            description: String::new(),
        };
        let value = serde_json::to_value(&rel).unwrap();
        assert_eq!(value["type"], "described");
    }

    #[test]
    fn test_relevance_tier_from_label() {
        assert_eq!(RelevanceTier::from_label("high"), RelevanceTier::High);
        assert_eq!(RelevanceTier::from_label(" Medium "), RelevanceTier::Medium);
        assert_eq!(RelevanceTier::from_label("low"), RelevanceTier::Low);
        assert_eq!(RelevanceTier::from_label("critical"), RelevanceTier::Low);
    }

    #[test]
    fn test_entity_category_from_label() {
        assert_eq!(EntityCategory::from_label("person"), EntityCategory::Person);
        assert_eq!(
            EntityCategory::from_label("Organization"),
            EntityCategory::Organization
        );
        assert_eq!(EntityCategory::from_label("event"), EntityCategory::Other);
    }

    #[test]
    fn test_new_v7_is_time_ordered() {
        let a = new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = new_v7();
        assert_eq!(a.get_version_num(), 7);
        assert!(a < b);
    }
}
