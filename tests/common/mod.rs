//! Shared in-memory catalog for the integration tests.
//!
//! "Breaking Bad: Special" is loaded before "Breaking Bad" on purpose so the
//! resolver's exact tier is exercised against load order.

#![allow(dead_code)]

use ratingraph::config::AnalyticsConfig;
use ratingraph::db::Store;
use ratingraph::entities::{episodes, ratings, titles};
use sea_orm::Set;
use std::sync::Arc;

pub const BREAKING_BAD: &str = "tt0903747";
pub const BREAKING_BAD_SPECIAL: &str = "tt9000001";
pub const THE_WIRE: &str = "tt0306414";
pub const UNRATED_SHOW: &str = "tt9000002";

pub const HEAT_1995: &str = "tt0113277";
pub const HEAT_1986: &str = "tt9999991";
pub const UNRATED_FILM: &str = "tt0000002";

/// Total rows in `titles` after seeding.
pub const TITLE_COUNT: u64 = 4 + 7 + 14;

pub fn title(
    id: &str,
    title_type: &str,
    name: &str,
    start_year: Option<i32>,
    end_year: Option<i32>,
    genres: Option<&str>,
) -> titles::ActiveModel {
    titles::ActiveModel {
        id: Set(id.to_string()),
        title_type: Set(title_type.to_string()),
        primary_title: Set(name.to_string()),
        original_title: Set(Some(name.to_string())),
        is_adult: Set(false),
        start_year: Set(start_year),
        end_year: Set(end_year),
        runtime_minutes: Set(None),
        genres: Set(genres.map(str::to_string)),
    }
}

pub fn rating(id: &str, average_rating: f64, num_votes: i64) -> ratings::ActiveModel {
    ratings::ActiveModel {
        id: Set(id.to_string()),
        average_rating: Set(average_rating),
        num_votes: Set(num_votes),
    }
}

fn episode(
    id: &str,
    parent: &str,
    season: Option<i32>,
    number: Option<i32>,
) -> episodes::ActiveModel {
    episodes::ActiveModel {
        id: Set(id.to_string()),
        parent_id: Set(parent.to_string()),
        season_number: Set(season),
        episode_number: Set(number),
    }
}

/// (episode id, series id, season, episode, rating and votes)
type EpisodeRow = (
    &'static str,
    &'static str,
    Option<i32>,
    Option<i32>,
    Option<(f64, i64)>,
);

const EPISODES: &[EpisodeRow] = &[
    ("tt9100001", BREAKING_BAD_SPECIAL, Some(1), Some(1), Some((7.0, 2000))),
    ("tt0959621", BREAKING_BAD, Some(1), Some(1), Some((9.0, 30_000))),
    ("tt1054724", BREAKING_BAD, Some(1), Some(2), Some((8.6, 20_000))),
    ("tt1054725", BREAKING_BAD, Some(1), Some(3), Some((8.7, 19_000))),
    ("tt1232244", BREAKING_BAD, Some(2), Some(1), Some((8.8, 18_000))),
    ("tt1232249", BREAKING_BAD, Some(2), Some(2), Some((9.3, 25_000))),
    ("tt1232250", BREAKING_BAD, Some(2), Some(3), Some((9.6, 50_000))),
    ("tt1528116", BREAKING_BAD, Some(3), Some(1), Some((8.2, 900))),
    // unplaced: never part of any analytics view
    ("tt1999999", BREAKING_BAD, None, None, Some((9.9, 99_000))),
    ("tt0749451", THE_WIRE, Some(1), Some(1), Some((8.0, 5000))),
    ("tt0749452", THE_WIRE, Some(1), Some(2), Some((8.4, 6000))),
    ("tt0749453", THE_WIRE, Some(2), Some(1), Some((8.9, 7000))),
    ("tt9200001", UNRATED_SHOW, Some(1), Some(1), None),
    ("tt9200002", UNRATED_SHOW, Some(1), Some(2), None),
];

pub async fn empty_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("in-memory store")
}

pub async fn seeded_store() -> Arc<Store> {
    let store = empty_store().await;

    let mut title_rows = vec![
        title(
            BREAKING_BAD_SPECIAL,
            "tvSeries",
            "Breaking Bad: Special",
            Some(2020),
            None,
            None,
        ),
        title(
            BREAKING_BAD,
            "tvSeries",
            "Breaking Bad",
            Some(2008),
            Some(2013),
            Some("Crime,Drama,Thriller"),
        ),
        title(
            THE_WIRE,
            "tvSeries",
            "The Wire",
            Some(2002),
            Some(2008),
            Some("Crime,Drama,Thriller"),
        ),
        title(
            UNRATED_SHOW,
            "tvSeries",
            "Show Without Ratings",
            Some(2015),
            None,
            Some("Comedy"),
        ),
        title(
            "tt0111161",
            "movie",
            "The Shawshank Redemption",
            Some(1994),
            None,
            Some("Drama"),
        ),
        title(
            "tt0068646",
            "movie",
            "The Godfather",
            Some(1972),
            None,
            Some("Crime,Drama"),
        ),
        title(
            "tt0110912",
            "movie",
            "Pulp Fiction",
            Some(1994),
            None,
            Some("Crime,Drama"),
        ),
        title(
            HEAT_1995,
            "movie",
            "Heat",
            Some(1995),
            None,
            Some("Action,Crime,Drama"),
        ),
        title(HEAT_1986, "movie", "Heat", Some(1986), None, Some("Action,Crime")),
        title(
            "tt0000001",
            "movie",
            "Obscure Film",
            Some(2001),
            None,
            Some("Drama"),
        ),
        title(
            UNRATED_FILM,
            "movie",
            "Unrated Film",
            Some(2003),
            None,
            Some("Drama"),
        ),
    ];

    let mut rating_rows = vec![
        rating("tt0111161", 9.3, 2_800_000),
        rating("tt0068646", 9.2, 1_900_000),
        rating("tt0110912", 8.9, 2_100_000),
        rating(HEAT_1995, 8.3, 700_000),
        rating(HEAT_1986, 5.6, 20_000),
        rating("tt0000001", 6.0, 500),
    ];

    let mut episode_rows = Vec::new();
    for &(id, parent, season, number, rated) in EPISODES {
        let name = match (season, number) {
            (Some(s), Some(e)) => format!("Episode {s}.{e}"),
            _ => "Unplaced Episode".to_string(),
        };
        title_rows.push(title(id, "tvEpisode", &name, Some(2010), None, None));
        episode_rows.push(episode(id, parent, season, number));
        if let Some((avg, votes)) = rated {
            rating_rows.push(rating(id, avg, votes));
        }
    }

    store.insert_titles(title_rows).await.expect("titles");
    store.insert_ratings(rating_rows).await.expect("ratings");
    store.insert_episodes(episode_rows).await.expect("episodes");

    Arc::new(store)
}

pub fn settings() -> AnalyticsConfig {
    AnalyticsConfig::default()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
