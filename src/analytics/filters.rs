//! Turns sparse optional filters into a single predicate/having pair.
//!
//! Every present filter contributes exactly one fragment. Row-level fragments
//! go to `predicate`; fragments over per-series aggregates go to `having`.
//! Callers run the page and the count from the same [`ComposedFilter`].

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};

use super::error::AnalyticsError;
use super::validation::{validate_range, validate_rating};
use crate::domain::TitleKind;
use crate::entities::{episode_panel, ratings, titles};

#[derive(Debug, Clone)]
pub struct ComposedFilter {
    pub predicate: Condition,
    pub having: Condition,
    /// Names of the filters that contributed a fragment, in composition order.
    pub applied: Vec<&'static str>,
}

impl ComposedFilter {
    fn for_kind(kind: TitleKind) -> Self {
        Self {
            predicate: kind.condition(),
            having: Condition::all(),
            applied: Vec::new(),
        }
    }

    fn filter(&mut self, name: &'static str, expr: SimpleExpr) {
        self.predicate = self.predicate.clone().add(expr);
        self.applied.push(name);
    }

    fn having(&mut self, name: &'static str, expr: SimpleExpr) {
        self.having = self.having.clone().add(expr);
        self.applied.push(name);
    }

    #[must_use]
    pub fn has_having(&self) -> bool {
        !self.having.is_empty()
    }
}

/// Filters accepted by series search and browse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesFilters {
    pub query: Option<String>,
    pub genre: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    /// Threshold on the average vote count per episode.
    pub min_votes: Option<u64>,
    pub min_seasons: Option<i32>,
    pub max_seasons: Option<i32>,
}

impl SeriesFilters {
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        validate_common(
            self.min_rating,
            self.max_rating,
            self.start_year,
            self.end_year,
        )?;
        for seasons in [self.min_seasons, self.max_seasons].into_iter().flatten() {
            if seasons < 0 {
                return Err(AnalyticsError::invalid(format!(
                    "Invalid season count: {seasons}. Season counts cannot be negative"
                )));
            }
        }
        validate_range("season", self.min_seasons, self.max_seasons)
    }

    /// Composes against `titles` inner joined with `episode_panel`, grouped by series.
    pub fn compose(&self) -> Result<ComposedFilter, AnalyticsError> {
        self.validate()?;
        let mut composed = ComposedFilter::for_kind(TitleKind::Series);

        if let Some(query) = non_blank(self.query.as_deref()) {
            composed.filter("query", title_contains(query));
        }
        if let Some(genre) = non_blank(self.genre.as_deref()) {
            composed.filter("genre", genre_contains(genre));
        }
        if let Some(year) = self.start_year {
            composed.filter("start_year", titles::Column::StartYear.gte(year));
        }
        if let Some(year) = self.end_year {
            composed.filter("end_year", titles::Column::StartYear.lte(year));
        }
        if let Some(rating) = self.min_rating {
            composed.having("min_rating", Expr::expr(avg_rating_expr()).gte(rating));
        }
        if let Some(rating) = self.max_rating {
            composed.having("max_rating", Expr::expr(avg_rating_expr()).lte(rating));
        }
        if let Some(votes) = self.min_votes {
            composed.having("min_votes", Expr::expr(avg_votes_expr()).gte(votes_param(votes)));
        }
        if let Some(seasons) = self.min_seasons {
            composed.having("min_seasons", Expr::expr(season_count_expr()).gte(seasons));
        }
        if let Some(seasons) = self.max_seasons {
            composed.having("max_seasons", Expr::expr(season_count_expr()).lte(seasons));
        }

        Ok(composed)
    }
}

/// Filters accepted by movie search, browse and the top list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieFilters {
    pub query: Option<String>,
    pub genre: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_votes: Option<u64>,
}

impl MovieFilters {
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        validate_common(
            self.min_rating,
            self.max_rating,
            self.start_year,
            self.end_year,
        )
    }

    /// Composes against `titles` left joined with `ratings`.
    ///
    /// Unrated movies pass unless a rating or vote filter is present.
    pub fn compose(&self) -> Result<ComposedFilter, AnalyticsError> {
        self.validate()?;
        let mut composed = ComposedFilter::for_kind(TitleKind::Movie);

        if let Some(query) = non_blank(self.query.as_deref()) {
            composed.filter("query", title_contains(query));
        }
        if let Some(genre) = non_blank(self.genre.as_deref()) {
            composed.filter("genre", genre_contains(genre));
        }
        if let Some(year) = self.start_year {
            composed.filter("start_year", titles::Column::StartYear.gte(year));
        }
        if let Some(year) = self.end_year {
            composed.filter("end_year", titles::Column::StartYear.lte(year));
        }
        if let Some(rating) = self.min_rating {
            composed.filter("min_rating", ratings::Column::AverageRating.gte(rating));
        }
        if let Some(rating) = self.max_rating {
            composed.filter("max_rating", ratings::Column::AverageRating.lte(rating));
        }
        if let Some(votes) = self.min_votes {
            composed.filter("min_votes", ratings::Column::NumVotes.gte(votes_param(votes)));
        }

        Ok(composed)
    }

    /// Same as [`MovieFilters::compose`] but drops movies without a rating row.
    pub fn compose_rated(&self) -> Result<ComposedFilter, AnalyticsError> {
        let mut composed = self.compose()?;
        composed.filter("rated", ratings::Column::Id.is_not_null());
        Ok(composed)
    }
}

fn validate_common(
    min_rating: Option<f64>,
    max_rating: Option<f64>,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> Result<(), AnalyticsError> {
    if let Some(rating) = min_rating {
        validate_rating("min_rating", rating)?;
    }
    if let Some(rating) = max_rating {
        validate_rating("max_rating", rating)?;
    }
    validate_range("rating", min_rating, max_rating)?;
    validate_range("year", start_year, end_year)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn votes_param(votes: u64) -> i64 {
    i64::try_from(votes).unwrap_or(i64::MAX)
}

/// `%needle%` with LIKE metacharacters escaped, lowercased to match `lower(col)`.
#[must_use]
pub fn contains_pattern(needle: &str) -> LikeExpr {
    let escaped = needle
        .to_ascii_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

fn lower(col: titles::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col((titles::Entity, col))))
}

/// Case-insensitive equality on `titles.primary_title`.
#[must_use]
pub fn title_equals(name: &str) -> SimpleExpr {
    lower(titles::Column::PrimaryTitle).eq(Func::lower(Expr::val(name)))
}

/// Case-insensitive substring match on `titles.primary_title`.
#[must_use]
pub fn title_contains(needle: &str) -> SimpleExpr {
    lower(titles::Column::PrimaryTitle).like(contains_pattern(needle))
}

#[must_use]
pub fn genre_contains(genre: &str) -> SimpleExpr {
    lower(titles::Column::Genres).like(contains_pattern(genre))
}

/// `AVG(episode_panel.average_rating)`
#[must_use]
pub fn avg_rating_expr() -> SimpleExpr {
    Func::avg(Expr::col((
        episode_panel::Entity,
        episode_panel::Column::AverageRating,
    )))
    .into()
}

/// `AVG(episode_panel.num_votes)`
#[must_use]
pub fn avg_votes_expr() -> SimpleExpr {
    Func::avg(Expr::col((
        episode_panel::Entity,
        episode_panel::Column::NumVotes,
    )))
    .into()
}

/// `MAX(episode_panel.season_number)`
#[must_use]
pub fn season_count_expr() -> SimpleExpr {
    Func::max(Expr::col((
        episode_panel::Entity,
        episode_panel::Column::SeasonNumber,
    )))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{Query, SqliteQueryBuilder};

    fn render(composed: &ComposedFilter) -> String {
        let mut query = Query::select();
        query
            .column((titles::Entity, titles::Column::Id))
            .from(titles::Entity)
            .cond_where(composed.predicate.clone());
        if composed.has_having() {
            query.cond_having(composed.having.clone());
        }
        query.to_string(SqliteQueryBuilder)
    }

    #[test]
    fn empty_series_filters_only_restrict_kind() {
        let composed = SeriesFilters::default().compose().unwrap();
        assert!(composed.applied.is_empty());
        assert!(!composed.has_having());
        let sql = render(&composed);
        assert!(sql.contains("'tvSeries'"), "{sql}");
        assert!(!sql.contains("HAVING"), "{sql}");
    }

    #[test]
    fn season_filters_route_to_having() {
        let filters = SeriesFilters {
            genre: Some("Drama".into()),
            start_year: Some(2000),
            min_seasons: Some(3),
            max_seasons: Some(6),
            min_votes: Some(500),
            ..Default::default()
        };
        let composed = filters.compose().unwrap();
        assert_eq!(
            composed.applied,
            vec!["genre", "start_year", "min_votes", "min_seasons", "max_seasons"]
        );

        let sql = render(&composed);
        let (where_part, having_part) = sql.split_once("HAVING").unwrap();
        assert!(where_part.contains("LIKE '%drama%'"), "{sql}");
        assert!(where_part.contains("\"start_year\" >= 2000"), "{sql}");
        assert!(!where_part.contains("season_number"), "{sql}");
        assert!(having_part.contains("MAX(\"episode_panel\".\"season_number\") >= 3"), "{sql}");
        assert!(having_part.contains("MAX(\"episode_panel\".\"season_number\") <= 6"), "{sql}");
        assert!(having_part.contains("AVG(\"episode_panel\".\"num_votes\") >= 500"), "{sql}");
    }

    #[test]
    fn movie_rating_filters_stay_in_where() {
        let filters = MovieFilters {
            min_rating: Some(7.5),
            min_votes: Some(10_000),
            ..Default::default()
        };
        let composed = filters.compose_rated().unwrap();
        assert!(!composed.has_having());
        assert_eq!(composed.applied, vec!["min_rating", "min_votes", "rated"]);

        let sql = render(&composed);
        assert!(sql.contains("\"ratings\".\"average_rating\" >= 7.5"), "{sql}");
        assert!(sql.contains("\"ratings\".\"num_votes\" >= 10000"), "{sql}");
        assert!(sql.contains("\"ratings\".\"id\" IS NOT NULL"), "{sql}");
    }

    #[test]
    fn blank_text_filters_are_ignored() {
        let filters = MovieFilters {
            query: Some("   ".into()),
            genre: Some(String::new()),
            ..Default::default()
        };
        assert!(filters.compose().unwrap().applied.is_empty());
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        let filters = MovieFilters {
            query: Some("100%_Pure".into()),
            ..Default::default()
        };
        let sql = render(&filters.compose().unwrap());
        assert!(sql.contains("\\%") && sql.contains("\\_pure"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let filters = SeriesFilters {
            min_rating: Some(9.0),
            max_rating: Some(8.0),
            ..Default::default()
        };
        assert!(matches!(
            filters.compose(),
            Err(AnalyticsError::InvalidInput(_))
        ));

        let filters = MovieFilters {
            start_year: Some(2010),
            end_year: Some(2000),
            ..Default::default()
        };
        assert!(filters.compose().is_err());

        let filters = SeriesFilters {
            min_seasons: Some(-1),
            ..Default::default()
        };
        assert!(filters.compose().is_err());

        let filters = MovieFilters {
            min_rating: Some(11.0),
            ..Default::default()
        };
        assert!(filters.compose().is_err());
    }
}
