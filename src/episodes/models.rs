use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Episode record as returned by `GET /episodes/{id}`.
///
/// Fields the mapper does not know about are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub published_at: String,
    pub description: String,
    pub file: RawEpisodeFile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawEpisodeFile {
    pub url: String,
    pub duration: RawDuration,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Listing record from `GET /episodes`.
///
/// Only `id` and `title` are required. Everything else the API sends is kept
/// in `extra`, so a record serializes back to what the API sent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EpisodeSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<RawEpisode> for EpisodeSummary {
    fn from(raw: RawEpisode) -> Self {
        let mut file = raw.file.extra;
        file.insert("url".to_string(), Value::String(raw.file.url));
        file.insert("duration".to_string(), raw.file.duration.into());

        let mut extra = raw.extra;
        extra.insert("thumbnail".to_string(), Value::String(raw.thumbnail));
        extra.insert("published_at".to_string(), Value::String(raw.published_at));
        extra.insert("description".to_string(), Value::String(raw.description));
        extra.insert("file".to_string(), Value::Object(file));

        Self {
            id: raw.id,
            title: raw.title,
            members: raw.members,
            extra,
        }
    }
}

/// Duration in seconds, which the API sends either as a string or a number
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawDuration {
    Text(String),
    Number(Number),
}

impl From<RawDuration> for Value {
    fn from(duration: RawDuration) -> Self {
        match duration {
            RawDuration::Text(text) => Value::String(text),
            RawDuration::Number(number) => Value::Number(number),
        }
    }
}

/// Display projection of an episode, serialized with camelCase keys for the templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub published_at: String,
    pub duration: u64,
    pub duration_as_string: String,
    /// Raw HTML from the API, rendered without escaping
    pub description: String,
    pub url: String,
}
