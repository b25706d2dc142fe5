//! # Schema Model
//!
//! The transient schema declared alongside a create transaction:
//! a name (which also seeds the derived ledger key) and a list of
//! property declarations.
//!
//! Schemas arrive as caller-supplied JSON. Historical producers encode
//! the `required` flag as the *string* `"true"` rather than a boolean,
//! so deserialization accepts both.

use serde::{Deserialize, Deserializer, Serialize};

/// The declared runtime type of a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// A JSON string.
    String,
    /// A JSON number (integer or float).
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// A string naming an existing asset key. The validator only checks
    /// that the value is a string; key existence is the caller's job.
    Asset,
}

impl PropertyType {
    /// Whether a JSON value inhabits this declared type.
    pub fn admits(&self, value: &serde_json::Value) -> bool {
        match self {
            PropertyType::String | PropertyType::Asset => value.is_string(),
            PropertyType::Number => value.is_number(),
            PropertyType::Boolean => value.is_boolean(),
            PropertyType::Array => value.is_array(),
            PropertyType::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
            PropertyType::Asset => "asset",
        };
        f.write_str(s)
    }
}

/// A single property declaration within a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name as it appears in the payload.
    pub name: String,
    /// Declared runtime type.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Whether the property must be present in the payload.
    #[serde(default, deserialize_with = "bool_or_string")]
    pub required: bool,
}

/// A declared schema: a name plus property declarations.
///
/// Never persisted; the name doubles as the stem of the derived ledger
/// key for assets created under this schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name (e.g. `bike`). Upper-cased when deriving keys.
    pub name: String,
    /// Property declarations, in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Schema {
    /// Parse a schema from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Accept `required` as a boolean or as the strings `"true"`/`"false"`.
fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Text(s) => match s.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "required must be a boolean or \"true\"/\"false\", got {other:?}"
            ))),
        },
    }
}
