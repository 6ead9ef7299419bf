use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One candidate song match. The backend guarantees none of these fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lyric: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: Option<f64>,
}

/// Body of `GET /search`. Unknown fields such as the echoed `query` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_records")]
    pub results: Option<Vec<ResultRecord>>,
}

impl SearchResponse {
    pub fn into_results(self) -> Vec<ResultRecord> {
        self.results.unwrap_or_default()
    }
}

// Truthy scalars are shown as text; `false`, zero and containers are absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    // Out-of-range numbers like `1e400` survive parsing as text and end up
    // without a finite value.
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        _ => None,
    })
}

// A present `results` must be a list (or null). Entries that are not objects
// become empty records so their siblings still decode.
fn lenient_records<'de, D>(deserializer: D) -> Result<Option<Vec<ResultRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(entries) = Option::<Vec<Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    Ok(Some(
        entries
            .into_iter()
            .map(|entry| match entry {
                Value::Object(_) => ResultRecord::deserialize(entry).unwrap_or_default(),
                _ => ResultRecord::default(),
            })
            .collect(),
    ))
}
