//! Domain DTOs for the recommendations resource.
//!
//! # Design
//! `Recommendation` is the five-slot form snapshot: every field is text,
//! exactly what an input box holds. Server payloads are projected onto it
//! leniently: numbers become their decimal text and missing or `null` keys
//! become empty strings, so populating from an incomplete object blanks the
//! slots it does not mention.
//!
//! The two outbound bodies differ on purpose. Create coerces `likes` to an
//! integer (or `null` when it is not a number); update and like send the
//! raw text untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Snapshot of one recommendation as text slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "scalar_text")]
    pub id: String,
    #[serde(default, alias = "productA", deserialize_with = "scalar_text")]
    pub product_a: String,
    #[serde(default, alias = "productB", deserialize_with = "scalar_text")]
    pub product_b: String,
    #[serde(default, alias = "recomType", deserialize_with = "scalar_text")]
    pub recom_type: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub likes: String,
}

/// Body of `POST /recommendations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRecommendation {
    pub product_a: String,
    pub product_b: String,
    pub recom_type: String,
    /// `None` serializes as `null`, the JSON rendering of a failed parse.
    pub likes: Option<i64>,
}

/// Body of `PUT /recommendations/{id}` and `PUT /recommendations/{id}/likes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRecommendation {
    pub product_a: String,
    pub product_b: String,
    pub recom_type: String,
    pub likes: String,
}

/// Structured failure payload. `message` is optional so a missing field can
/// be detected instead of failing the whole decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}
