//! Domain types for the ratings catalog with strong typing.
//!
//! This module provides type-safe wrappers and domain primitives shared by the
//! store, the analytics engine and the services. It follows the Newtype pattern
//! so that title keys are never confused with free-form names.

use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::titles;

/// Stable external key of a title (e.g. `tt0903747`).
///
/// # Examples
///
/// ```rust
/// use ratingraph::domain::TitleId;
///
/// let id = TitleId::new("tt0903747");
/// assert_eq!(id.as_str(), "tt0903747");
/// assert_eq!(id.to_string(), "tt0903747");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TitleId(String);

impl TitleId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TitleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TitleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for TitleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TitleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Ok(Self(id))
    }
}

/// Title type stored in `titles.title_type`.
pub const MOVIE_TYPE: &str = "movie";
pub const SERIES_TYPE: &str = "tvSeries";
pub const EPISODE_TYPE: &str = "tvEpisode";

/// Kind of a title as seen by the engine.
///
/// The store keeps the raw corpus type string; everything that is not a movie,
/// a series or an episode collapses into [`TitleKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleKind {
    #[default]
    Movie,
    Series,
    Episode,
    Other,
}

impl TitleKind {
    /// Maps a raw corpus type string onto a kind.
    #[must_use]
    pub fn from_type(raw: &str) -> Self {
        match raw {
            MOVIE_TYPE => Self::Movie,
            SERIES_TYPE => Self::Series,
            EPISODE_TYPE => Self::Episode,
            _ => Self::Other,
        }
    }

    /// Raw type string, or `None` for [`TitleKind::Other`] which spans many types.
    #[must_use]
    pub const fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::Movie => Some(MOVIE_TYPE),
            Self::Series => Some(SERIES_TYPE),
            Self::Episode => Some(EPISODE_TYPE),
            Self::Other => None,
        }
    }

    /// Predicate restricting `titles` rows to this kind.
    #[must_use]
    pub fn condition(&self) -> Condition {
        match self.type_name() {
            Some(name) => Condition::all().add(titles::Column::TitleType.eq(name)),
            None => Condition::all().add(titles::Column::TitleType.is_not_in([
                MOVIE_TYPE,
                SERIES_TYPE,
                EPISODE_TYPE,
            ])),
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

impl FromStr for TitleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "series" | "tv" | "tvseries" => Ok(Self::Series),
            "episode" | "tvepisode" => Ok(Self::Episode),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown title kind: {other}")),
        }
    }
}

/// Y-axis scaling hint carried through episode graphs.
///
/// The engine does not render anything; the mode is echoed back so a renderer
/// knows whether to pin the axis to the full rating range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    #[default]
    Auto,
    /// Fixed 0-10 axis.
    Fixed,
    Autoscale,
}

impl FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "0-10" | "fixed" => Ok(Self::Fixed),
            "autoscale" => Ok(Self::Autoscale),
            other => Err(format!("unknown scale mode: {other}")),
        }
    }
}

/// Sort direction used by the ranking helpers.
///
/// Worst-episode lists sort ascending; every other ranking descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Returns true if this is ascending order.
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// Splits a delimited genre string into a set-like list.
///
/// Order of first appearance is kept, duplicates and blanks are dropped and the
/// corpus null marker `\N` is treated as empty.
#[must_use]
pub fn split_genres(raw: Option<&str>) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for part in raw.unwrap_or_default().split(',') {
        let genre = part.trim();
        if genre.is_empty() || genre == "\\N" {
            continue;
        }
        if !genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
            genres.push(genre.to_string());
        }
    }
    genres
}
