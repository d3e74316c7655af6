//! Episode data model
//!
//! Three shapes of the same record live here:
//!
//! - [`RawEpisode`] - the record as the episodes API returns it
//! - [`EpisodeSummary`] - a listing record, which may carry fewer fields
//! - [`Episode`] - the display projection consumed by the detail template
//!
//! [`map_episode`] turns the former into the latter. It is a pure function of
//! the raw record and the display [`Locale`](crate::humanize::Locale).

mod mapping;
mod models;

pub use mapping::{MappingError, map_episode, parse_published_at};
pub use models::{Episode, EpisodeSummary, RawDuration, RawEpisode, RawEpisodeFile};
