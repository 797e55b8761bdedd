//! Match and catalog models
//!
//! Records are kept flat so they serialize exactly as stored. Fields the model
//! does not know about are carried through untouched.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::Error;

/// One upcoming match as stored in the catalog document
///
/// Deserializes leniently through [`Match::try_from`]: missing or `null`
/// fields are empty, numbers and booleans in text fields become their text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Match {
    /// Free-text league or competition name
    pub league: String,
    pub home: String,
    pub away: String,

    /// Kickoff as an ISO-8601 timestamp string
    pub date: String,
    pub place: String,

    /// Broadcast channel name(s), empty when not televised
    pub tv: String,

    /// Link to the external match page
    pub link: String,

    /// Any additional fields present in the source record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Match {
    /// Build a match from the two team names, leaving other fields empty
    pub fn new(league: impl Into<String>, home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            league: league.into(),
            home: home.into(),
            away: away.into(),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_tv(mut self, tv: impl Into<String>) -> Self {
        self.tv = tv.into();
        self
    }
}

impl TryFrom<Value> for Match {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(Error::InvalidInput(format!(
                    "match record must be an object, got {}",
                    other
                )))
            }
        };

        Ok(Self {
            league: text_field(&mut fields, "league")?,
            home: text_field(&mut fields, "home")?,
            away: text_field(&mut fields, "away")?,
            date: kickoff_field(&mut fields)?,
            place: text_field(&mut fields, "place")?,
            tv: channel_field(&mut fields)?,
            link: text_field(&mut fields, "link")?,
            extra: fields,
        })
    }
}

/// Take a text field; scalars other than strings are rendered as text
fn text_field(fields: &mut Map<String, Value>, name: &str) -> Result<String, Error> {
    match fields.remove(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(Error::InvalidInput(format!(
            "field `{}` must be text, got {}",
            name, other
        ))),
    }
}

/// Kickoff; a number is taken as epoch milliseconds
fn kickoff_field(fields: &mut Map<String, Value>) -> Result<String, Error> {
    if let Some(Value::Number(n)) = fields.get("date") {
        let kickoff = n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true));
        fields.remove("date");
        return Ok(kickoff.unwrap_or_default());
    }
    text_field(fields, "date")
}

/// Broadcast channel; only a string names a channel
fn channel_field(fields: &mut Map<String, Value>) -> Result<String, Error> {
    match fields.get("tv") {
        Some(Value::Number(_)) | Some(Value::Bool(_)) => {
            fields.remove("tv");
            Ok(String::new())
        }
        _ => text_field(fields, "tv"),
    }
}

/// Full set of known matches, shaped `{ "matches": [...] }`
///
/// Records that cannot be read as a match are skipped with a warning; the
/// rest of the catalog is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub matches: Vec<Match>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    matches: Vec<Value>,
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawCatalog::deserialize(deserializer)?;
        let matches = raw
            .matches
            .into_iter()
            .enumerate()
            .filter_map(|(i, record)| match Match::try_from(record) {
                Ok(m) => Some(m),
                Err(e) => {
                    warn!("Skipping match record {}: {}", i, e);
                    None
                }
            })
            .collect();

        Ok(Self { matches })
    }
}

impl Catalog {
    pub fn new(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

/// A match with its computed score attached
///
/// Serializes flat: every stored field of the record plus `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub record: Match,
    pub score: u32,
}

impl ScoredMatch {
    /// Attach a score, discarding any stale `score` carried in the stored record
    pub fn new(mut record: Match, score: u32) -> Self {
        record.extra.remove("score");
        Self { record, score }
    }
}

/// Treat an explicit JSON `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
