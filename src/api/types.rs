use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::deserializers;

/// One entry returned by the directory API: a set of named, multi-valued
/// attributes. The schema is owned by the upstream API; callers treat it as
/// read-only input data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// ADSI path of the entry
    #[serde(default)]
    pub path: String,
    /// Attribute name mapped to its list of values
    #[serde(default)]
    pub properties: AttributeMap,
}

impl DirectoryRecord {
    /// All values of an attribute, or an empty slice when absent
    pub fn values(&self, attr: &str) -> &[Value] {
        self.properties
            .0
            .get(&attr.to_lowercase())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// First value of an attribute
    pub fn first(&self, attr: &str) -> Option<&Value> {
        self.values(attr).first()
    }

    /// First value of an attribute, as a string
    pub fn first_str(&self, attr: &str) -> Option<&str> {
        self.first(attr).and_then(Value::as_str)
    }

    /// All string values of an attribute
    pub fn strs(&self, attr: &str) -> Vec<&str> {
        self.values(attr).iter().filter_map(Value::as_str).collect()
    }

    /// Whether the attribute is present with at least one value
    pub fn has(&self, attr: &str) -> bool {
        !self.values(attr).is_empty()
    }
}

/// Attribute map keyed by lowercased attribute name. Attribute names are
/// case-insensitive in the directory; values always surface as arrays even
/// when the API serialized a bare scalar.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AttributeMap(pub(crate) HashMap<String, Vec<Value>>);

impl AttributeMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, attr: impl Into<String>, values: Vec<Value>) {
        self.0.insert(attr.into().to_lowercase(), values);
    }
}

impl<'de> Deserialize<'de> for AttributeMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Value>::deserialize(deserializer)?;
        Ok(AttributeMap(
            raw.into_iter()
                .map(|(attr, value)| (attr.to_lowercase(), deserializers::normalize(value)))
                .collect(),
        ))
    }
}

/// Result of a provider lookup. Transport, API and parse failures surface as
/// `LookupError` instead; this type only distinguishes a populated response
/// from an empty one.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// At least one record matched the query
    Found(LookupResponse),
    /// The query matched nothing
    NotFound,
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// A populated lookup response
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    /// Matching records; never empty
    pub records: Vec<DirectoryRecord>,
    /// Endpoint the records came from
    pub source: String,
    /// Response timestamp
    pub timestamp: DateTime<Utc>,
}

impl LookupResponse {
    pub fn new(records: Vec<DirectoryRecord>, source: impl Into<String>) -> Self {
        Self {
            records,
            source: source.into(),
            timestamp: Utc::now(),
        }
    }
}
