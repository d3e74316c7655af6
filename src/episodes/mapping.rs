use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use super::models::{Episode, RawDuration, RawEpisode};
use crate::humanize::{Locale, format_short_date, format_time_string};

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("invalid published_at '{0}'")]
    InvalidDate(String),
    #[error("invalid duration '{0}'")]
    InvalidDuration(String),
}

/// Builds the display projection of a raw episode record.
pub fn map_episode(raw: &RawEpisode, locale: Locale) -> Result<Episode, MappingError> {
    let published = parse_published_at(&raw.published_at)?;
    let duration = duration_seconds(&raw.file.duration)?;

    Ok(Episode {
        id: raw.id.clone(),
        title: raw.title.clone(),
        members: raw.members.clone(),
        thumbnail: raw.thumbnail.clone(),
        published_at: format_short_date(published, locale),
        duration,
        duration_as_string: format_time_string(duration),
        description: raw.description.clone(),
        url: raw.file.url.clone(),
    })
}

/// Parses an ISO-8601 timestamp or date into a calendar date.
///
/// Offsets are normalized to UTC; timestamps without an offset are taken as UTC.
pub fn parse_published_at(value: &str) -> Result<NaiveDate, MappingError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| MappingError::InvalidDate(value.to_string()))
}

fn duration_seconds(raw: &RawDuration) -> Result<u64, MappingError> {
    let parsed = match raw {
        RawDuration::Text(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_seconds))
        }
        RawDuration::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(whole_seconds)),
    };

    parsed.ok_or_else(|| {
        let shown = match raw {
            RawDuration::Text(text) => text.clone(),
            RawDuration::Number(number) => number.to_string(),
        };
        MappingError::InvalidDuration(shown)
    })
}

fn whole_seconds(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}
