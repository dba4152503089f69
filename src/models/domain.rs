use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Single property slot on a CRM record.
///
/// The API wraps every property value in an object (`{"value": ...}`
/// alongside version history we do not model). Values keep their JSON
/// type: strings stay strings, numbers stay numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub value: Value,
}

impl Property {
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value: value.into() }
    }
}

/// CRM record (company, ticket, ...) as returned by list and get endpoints.
///
/// The id field name varies by object type on the wire (`companyId`,
/// `objectId`, `vid`); all of them land in `id`. On the way back out
/// the id always serializes under the canonical `companyId` key,
/// whichever payload it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(
        rename = "companyId",
        alias = "objectId",
        alias = "vid",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u64>,
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

impl Record {
    pub fn new(id: u64) -> Self {
        Self {
            id: Some(id),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), Property::new(value));
        self
    }

    /// Value of a property, or `None` when the record does not carry it.
    ///
    /// Records only carry the properties the request asked for, so a
    /// missing slot means "not fetched" as often as "not set".
    pub fn property_value(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).map(|p| &p.value)
    }

    /// String value of a property. Non-string values return `None`.
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.property_value(name).and_then(Value::as_str)
    }
}

/// Opaque paging cursor handed back by list endpoints.
///
/// Some endpoints serialize the offset as a number, others as a string;
/// both forms deserialize into the same cursor and echo back verbatim
/// on the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for PageCursor {
    fn from(offset: u64) -> Self {
        Self(offset.to_string())
    }
}

impl From<&str> for PageCursor {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for PageCursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCursor {
            Text(String),
            Numeric(u64),
        }

        Ok(match RawCursor::deserialize(deserializer)? {
            RawCursor::Text(s) => PageCursor(s),
            RawCursor::Numeric(n) => PageCursor(n.to_string()),
        })
    }
}

/// One page of records in endpoint-neutral form.
///
/// Resource modules translate their wire payloads (`companies` key,
/// `objects` key, ...) into this shape before any matching runs.
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub has_more: bool,
    pub offset: Option<PageCursor>,
    /// Collection size, on the endpoints that report one.
    pub total: Option<u64>,
}

impl RecordPage {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Property criteria for scored search, keyed by property name.
///
/// Backed by an ordered map so iteration (and therefore scoring and
/// the fetched property list) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    criteria: BTreeMap<String, Value>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        self.criteria.insert(property.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.criteria.iter()
    }

    /// Names of the criteria properties, in iteration order.
    pub fn property_names(&self) -> Vec<String> {
        self.criteria.keys().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SearchCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            criteria: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Record with its property match score
///
/// Serializes flat: the record's own fields plus `matchScore`. The id
/// keeps the canonical `companyId` key even for non-company records.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: Record,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
}

/// Record with its fuzzy similarity (0.0 to 1.0)
#[derive(Debug, Clone, Serialize)]
pub struct FuzzyMatch {
    #[serde(flatten)]
    pub record: Record,
    pub similarity: f64,
}

/// Property write in the name/value wire format used by create and
/// update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    pub name: String,
    pub value: Value,
}

impl PropertyUpdate {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
