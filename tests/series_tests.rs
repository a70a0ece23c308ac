//! Integration tests for the series analytics service.

mod common;

use common::{
    BREAKING_BAD, BREAKING_BAD_SPECIAL, THE_WIRE, assert_close, seeded_store, settings,
};
use ratingraph::analytics::{AnalyticsError, MatchTier, SeriesFilters};
use ratingraph::domain::ScaleMode;
use ratingraph::services::{SeaOrmSeriesService, SeriesService};

async fn service() -> SeaOrmSeriesService {
    SeaOrmSeriesService::new(seeded_store().await, settings())
}

#[tokio::test]
async fn test_exact_match_beats_earlier_substring_hit() {
    let svc = service().await;

    let series = svc.resolve_series("Breaking Bad").await.unwrap();
    assert_eq!(series.id.as_str(), BREAKING_BAD);
    assert_eq!(series.match_tier, MatchTier::Exact);
    assert_eq!(series.years, "2008-2013");

    let series = svc.resolve_series("  breaking BAD ").await.unwrap();
    assert_eq!(series.id.as_str(), BREAKING_BAD);
}

#[tokio::test]
async fn test_substring_match_prefers_most_recent() {
    let svc = service().await;

    let series = svc.resolve_series("Breaking").await.unwrap();
    assert_eq!(series.id.as_str(), BREAKING_BAD_SPECIAL);
    assert_eq!(series.match_tier, MatchTier::Substring);
    assert_eq!(series.years, "2020-Present");

    let series = svc.resolve_series("wire").await.unwrap();
    assert_eq!(series.id.as_str(), THE_WIRE);
}

#[tokio::test]
async fn test_resolve_errors() {
    let svc = service().await;

    assert!(matches!(
        svc.resolve_series("Nonexistent Series").await,
        Err(AnalyticsError::NotFound(_))
    ));
    assert!(matches!(
        svc.resolve_series("   ").await,
        Err(AnalyticsError::InvalidInput(_))
    ));
    // movies are not series
    assert!(matches!(
        svc.resolve_series("Pulp Fiction").await,
        Err(AnalyticsError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_episodes_exclude_unplaced() {
    let svc = service().await;

    let list = svc.episodes("Breaking Bad").await.unwrap();
    assert_eq!(list.episode_count, 7);
    let placements: Vec<(i32, i32)> = list.episodes.iter().map(|e| e.placement()).collect();
    assert_eq!(
        placements,
        vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3), (3, 1)]
    );
    assert_eq!(list.episodes[0].title.as_deref(), Some("Episode 1.1"));

    assert!(matches!(
        svc.episodes("Show Without Ratings").await,
        Err(AnalyticsError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_top_episodes_weighted() {
    let svc = service().await;

    let top = svc
        .top_episodes("Breaking Bad", None, Some(3), None)
        .await
        .unwrap();
    assert_eq!(top.min_votes, 1000);
    assert_eq!(top.considered, 6);
    assert_close(top.prior_mean, 9.0);
    assert_close(top.m, 1000.0);

    let placements: Vec<(i32, i32)> = top.episodes.iter().map(|e| e.episode.placement()).collect();
    assert_eq!(placements, vec![(2, 3), (2, 2), (1, 1)]);
    assert_close(top.episodes[2].weighted_rating, 9.0);
    for pair in top.episodes.windows(2) {
        assert!(pair[0].weighted_rating >= pair[1].weighted_rating);
    }
}

#[tokio::test]
async fn test_top_episodes_validation() {
    let svc = service().await;

    assert!(matches!(
        svc.top_episodes("Breaking Bad", None, None, Some(0.0)).await,
        Err(AnalyticsError::InvalidInput(_))
    ));
    assert!(matches!(
        svc.top_episodes("Breaking Bad", None, Some(101), None).await,
        Err(AnalyticsError::InvalidInput(_))
    ));
    assert!(matches!(
        svc.top_episodes("Breaking Bad", Some(1_000_000), None, None)
            .await,
        Err(AnalyticsError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_worst_episodes() {
    let svc = service().await;

    let worst = svc
        .worst_episodes("Breaking Bad", Some(0), Some(2))
        .await
        .unwrap();
    assert_eq!(worst.considered, 7);
    let placements: Vec<(i32, i32)> = worst.episodes.iter().map(|e| e.placement()).collect();
    assert_eq!(placements, vec![(3, 1), (1, 2)]);

    let worst = svc.worst_episodes("Breaking Bad", None, None).await.unwrap();
    assert_eq!(worst.episodes[0].placement(), (1, 2));
}

#[tokio::test]
async fn test_series_analytics() {
    let svc = service().await;

    let analytics = svc.series_analytics("Breaking Bad").await.unwrap();
    let summary = &analytics.summary;
    assert_eq!(summary.count, 7);
    assert_eq!(summary.season_count, 3);
    assert_close(summary.max, 9.6);
    assert_close(summary.min, 8.2);
    assert_close(summary.mean, 62.2 / 7.0);
    assert_eq!(summary.total_votes, 162_900);
    assert!(summary.stddev.is_some());

    let seasons: Vec<i32> = analytics.seasons.iter().map(|s| s.season).collect();
    assert_eq!(seasons, vec![1, 2, 3]);
    assert_close(analytics.seasons[1].avg_rating, (8.8 + 9.3 + 9.6) / 3.0);

    let labels: Vec<&str> = analytics
        .distribution
        .iter()
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(labels, vec!["[9, 10)", "[8, 9)"]);
    assert_eq!(analytics.distribution[0].episode_count, 3);
    assert_eq!(analytics.distribution[1].episode_count, 4);

    let finales: Vec<(i32, i32)> = analytics.finales.iter().map(|e| e.placement()).collect();
    assert_eq!(finales, vec![(1, 3), (2, 3), (3, 1)]);

    assert!(matches!(
        svc.series_analytics("Show Without Ratings").await,
        Err(AnalyticsError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_single_episode_series_has_no_stddev() {
    let svc = service().await;

    let analytics = svc.series_analytics("Breaking Bad: Special").await.unwrap();
    assert_eq!(analytics.summary.count, 1);
    assert_eq!(analytics.summary.stddev, None);
}

#[tokio::test]
async fn test_episode_graph() {
    let svc = service().await;

    let graph = svc
        .episode_graph("The Wire", ScaleMode::Fixed)
        .await
        .unwrap()
        .graph;
    assert_eq!(graph.points.len(), 3);
    assert_eq!(graph.seasons.len(), 2);

    let first = &graph.seasons[0];
    assert_eq!((first.start_index, first.end_index), (0, 1));
    assert_close(first.trendline.slope, 0.4);
    assert_close(first.trendline.intercept, 8.0);

    let second = &graph.seasons[1];
    assert_eq!((second.start_index, second.end_index), (2, 2));
    assert_close(second.trendline.slope, 0.0);
    assert_close(second.trendline.intercept, 8.9);

    assert_close(graph.rating_range.min, 8.0);
    assert_close(graph.rating_range.max, 8.9);
    assert_close(graph.axis.min, 0.0);
    assert_close(graph.axis.max, 10.0);
}

#[tokio::test]
async fn test_compare_records_missing_inline() {
    let svc = service().await;

    let names = vec!["Breaking Bad".to_string(), "Nonexistent Series".to_string()];
    let batch = svc.compare_series(&names).await.unwrap();
    assert_eq!(batch.requested, 2);
    assert_eq!(batch.found, 1);

    let known = &batch.entries[0];
    assert!(known.found);
    let detail = known.detail.as_ref().unwrap();
    assert_eq!(detail.series.id.as_str(), BREAKING_BAD);
    assert_eq!(detail.best_episode.placement(), (2, 3));
    assert_eq!(detail.worst_episode.placement(), (3, 1));

    let missing = &batch.entries[1];
    assert!(!missing.found);
    assert_eq!(missing.query, "Nonexistent Series");
    assert!(missing.detail.is_none());

    let json = serde_json::to_value(&batch).unwrap();
    assert_eq!(json["entries"][1]["found"], false);
}

#[tokio::test]
async fn test_compare_accepts_ten_rejects_eleven() {
    let svc = service().await;

    let mut names: Vec<String> = (0..9).map(|i| format!("Series {i}")).collect();
    names.push("The Wire".into());
    let batch = svc.compare_series(&names).await.unwrap();
    assert_eq!((batch.requested, batch.found), (10, 1));

    names.push("Breaking Bad".into());
    assert!(matches!(
        svc.compare_series(&names).await,
        Err(AnalyticsError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_search_series_filters() {
    let svc = service().await;

    let results = svc
        .search_series(
            SeriesFilters {
                genre: Some("crime".into()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    let ids: Vec<&str> = results.results.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec![BREAKING_BAD, THE_WIRE]);
    assert_eq!(results.result_count, 2);
    assert_eq!(results.results[0].total_episodes, 7);
    assert_eq!(results.results[0].total_seasons, 3);

    let results = svc
        .search_series(
            SeriesFilters {
                min_seasons: Some(3),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(results.result_count, 1);
    assert_eq!(results.results[0].id.as_str(), BREAKING_BAD);

    let results = svc
        .search_series(
            SeriesFilters {
                max_seasons: Some(2),
                min_rating: Some(8.0),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    let ids: Vec<&str> = results.results.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec![THE_WIRE]);

    let results = svc
        .search_series(
            SeriesFilters {
                query: Some("breaking".into()),
                ..Default::default()
            },
            Some(1),
        )
        .await
        .unwrap();
    assert_eq!(results.result_count, 1);
    assert_eq!(results.results[0].id.as_str(), BREAKING_BAD);
}

#[tokio::test]
async fn test_browse_pages_are_consistent() {
    let svc = service().await;

    let mut seen = Vec::new();
    for offset in 0..4 {
        let page = svc
            .browse_series(SeriesFilters::default(), offset, Some(1))
            .await
            .unwrap()
            .page;
        assert_eq!(page.total_count, 3);
        assert_eq!(page.offset, offset);
        for item in page.items {
            assert_eq!(item.rank, offset + 1);
            seen.push(item.item.id.as_str().to_string());
        }
    }
    assert_eq!(seen, vec![BREAKING_BAD, THE_WIRE, BREAKING_BAD_SPECIAL]);

    let ranked = svc.ranked_series(Some(2)).await.unwrap().page;
    assert_eq!(ranked.total_count, 3);
    assert_eq!(ranked.result_count, 2);
    let scores: Vec<f64> = ranked.items.iter().filter_map(|r| r.rank_score).collect();
    assert!(scores[0] >= scores[1]);

    let filtered = svc
        .browse_series(
            SeriesFilters {
                genre: Some("Crime".into()),
                ..Default::default()
            },
            0,
            Some(10),
        )
        .await
        .unwrap();
    assert_eq!(filtered.page.total_count, 2);
    assert_eq!(filtered.filters.genre.as_deref(), Some("Crime"));
}
