use serde::{Deserialize, Serialize};

use crate::domain::{TitleId, TitleKind, split_genres};
use crate::entities::{ratings, titles};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    pub kind: TitleKind,
    pub primary_title: String,
    pub original_title: Option<String>,
    pub is_adult: bool,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub genres: Vec<String>,
}

impl Title {
    /// Human readable run, e.g. `2008-2013`, `2019-Present` or `1994`.
    #[must_use]
    pub fn years_label(&self) -> String {
        match (self.start_year, self.end_year) {
            (Some(start), Some(end)) if end != start => format!("{start}-{end}"),
            (Some(start), Some(_)) => start.to_string(),
            (Some(start), None) if self.kind == TitleKind::Series => format!("{start}-Present"),
            (Some(start), None) => start.to_string(),
            (None, _) => "Unknown".to_string(),
        }
    }
}

impl From<titles::Model> for Title {
    fn from(m: titles::Model) -> Self {
        Self {
            id: TitleId::from(m.id),
            kind: TitleKind::from_type(&m.title_type),
            genres: split_genres(m.genres.as_deref()),
            primary_title: m.primary_title,
            original_title: m.original_title,
            is_adult: m.is_adult,
            start_year: m.start_year,
            end_year: m.end_year,
            runtime_minutes: m.runtime_minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average_rating: f64,
    pub num_votes: u64,
}

impl From<ratings::Model> for Rating {
    fn from(m: ratings::Model) -> Self {
        Self {
            average_rating: m.average_rating,
            num_votes: u64::try_from(m.num_votes).unwrap_or_default(),
        }
    }
}

/// A title together with its (nullable) rating row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedTitle {
    #[serde(flatten)]
    pub title: Title,
    pub rating: Option<Rating>,
}

impl RatedTitle {
    #[must_use]
    pub fn from_models(title: titles::Model, rating: Option<ratings::Model>) -> Self {
        Self {
            title: title.into(),
            rating: rating.map(Rating::from),
        }
    }

    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        self.rating.map(|r| r.average_rating)
    }

    #[must_use]
    pub fn num_votes(&self) -> Option<u64> {
        self.rating.map(|r| r.num_votes)
    }
}
