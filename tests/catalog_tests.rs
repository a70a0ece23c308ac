//! Integration tests for catalog insights and health.

mod common;

use common::{TITLE_COUNT, assert_close, empty_store, seeded_store, settings};
use ratingraph::domain::TitleKind;
use ratingraph::services::{CatalogService, SeaOrmCatalogService};
use std::sync::Arc;

async fn service() -> SeaOrmCatalogService {
    SeaOrmCatalogService::new(seeded_store().await, settings())
}

#[tokio::test]
async fn test_genre_analysis_for_movies() {
    let svc = service().await;

    let breakdown = svc.genre_analysis(TitleKind::Movie, None).await.unwrap();
    assert_eq!(breakdown.min_votes, 1000);

    let genres: Vec<&str> = breakdown.genres.iter().map(|g| g.genres.as_str()).collect();
    assert_eq!(
        genres,
        vec!["Drama", "Crime,Drama", "Action,Crime,Drama", "Action,Crime"]
    );

    let drama = &breakdown.genres[0];
    assert_eq!(drama.title_count, 1);
    assert_close(drama.avg_rating, 9.3);

    let crime_drama = &breakdown.genres[1];
    assert_eq!(crime_drama.title_count, 2);
    assert_close(crime_drama.avg_rating, 9.05);
    assert_close(crime_drama.max_rating, 9.2);
    assert_close(crime_drama.min_rating, 8.9);
    assert_eq!(crime_drama.total_votes, 4_000_000);
}

#[tokio::test]
async fn test_genre_analysis_vote_floor() {
    let svc = service().await;

    let breakdown = svc
        .genre_analysis(TitleKind::Movie, Some(0))
        .await
        .unwrap();
    let drama = breakdown
        .genres
        .iter()
        .find(|g| g.genres == "Drama")
        .unwrap();
    // Obscure Film joins Shawshank; the unrated film never counts
    assert_eq!(drama.title_count, 2);
    assert_close(drama.min_rating, 6.0);
}

#[tokio::test]
async fn test_genre_analysis_skips_blank_and_null_marker_genres() {
    let store = seeded_store().await;
    store
        .insert_titles(vec![
            common::title("tt0000010", "movie", "Blank Genres", Some(1999), None, Some("")),
            common::title("tt0000011", "movie", "Marker Genres", Some(1999), None, Some("\\N")),
        ])
        .await
        .unwrap();
    store
        .insert_ratings(vec![
            common::rating("tt0000010", 9.9, 50_000),
            common::rating("tt0000011", 9.8, 50_000),
        ])
        .await
        .unwrap();

    let svc = SeaOrmCatalogService::new(store, settings());
    let breakdown = svc.genre_analysis(TitleKind::Movie, None).await.unwrap();
    assert!(
        breakdown
            .genres
            .iter()
            .all(|g| !g.genres.is_empty() && g.genres != "\\N")
    );
    assert_eq!(breakdown.genres[0].genres, "Drama");
}

#[tokio::test]
async fn test_decade_analysis() {
    let svc = service().await;

    let breakdown = svc.decade_analysis(TitleKind::Movie, None).await.unwrap();
    assert_eq!(breakdown.floor_year, 1920);

    let decades: Vec<i32> = breakdown.decades.iter().map(|d| d.decade).collect();
    assert_eq!(decades, vec![1990, 1980, 1970]);

    let nineties = &breakdown.decades[0];
    assert_eq!(nineties.label, "1990s");
    assert_eq!(nineties.title_count, 3);
    assert_close(nineties.max_rating, 9.3);
    assert_close(nineties.avg_rating, (9.3 + 8.9 + 8.3) / 3.0);
}

#[tokio::test]
async fn test_decade_floor_is_configurable() {
    let mut config = settings();
    config.decade_floor = 1980;
    let svc = SeaOrmCatalogService::new(seeded_store().await, config);

    let breakdown = svc.decade_analysis(TitleKind::Movie, None).await.unwrap();
    let decades: Vec<i32> = breakdown.decades.iter().map(|d| d.decade).collect();
    assert_eq!(decades, vec![1990, 1980]);
}

#[tokio::test]
async fn test_health() {
    let svc = service().await;

    let report = svc.health().await.unwrap();
    assert_eq!(report.status, "ok");
    assert_eq!(report.titles, TITLE_COUNT);
    assert_eq!(report.database, "sqlite::memory:");

    let empty = SeaOrmCatalogService::new(Arc::new(empty_store().await), settings());
    assert_eq!(empty.health().await.unwrap().titles, 0);
}
