//! Ranking and slicing of candidate sets into pages.
//!
//! A page and its `total_count` are always derived from the same candidate
//! vector, so summing `result_count` over consecutive pages yields
//! `total_count` regardless of page size.

use std::cmp::Ordering;

use serde::Serialize;

use super::error::AnalyticsError;
use super::validation::validate_limit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(offset: u64, limit: u64) -> Result<Self, AnalyticsError> {
        Ok(Self {
            offset,
            limit: validate_limit(limit)?,
        })
    }

    pub fn first(limit: u64) -> Result<Self, AnalyticsError> {
        Self::new(0, limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    /// One-based position across all pages.
    pub rank: u64,
    pub rank_score: Option<f64>,
    #[serde(flatten)]
    pub item: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPage<T> {
    pub total_count: u64,
    pub result_count: usize,
    pub offset: u64,
    pub limit: u64,
    pub items: Vec<Ranked<T>>,
}

impl<T> RankedPage<T> {
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.offset + (self.result_count as u64) < self.total_count
    }
}

/// Orders candidates by score descending (missing scores last, ties by
/// `tie_key` ascending) and returns the requested slice.
pub fn rank_and_paginate<T, K, S, F>(
    candidates: Vec<T>,
    score: S,
    tie_key: F,
    page: PageRequest,
) -> RankedPage<T>
where
    K: Ord,
    S: Fn(&T) -> Option<f64>,
    F: Fn(&T) -> K,
{
    let mut scored: Vec<(Option<f64>, T)> =
        candidates.into_iter().map(|c| (score(&c), c)).collect();

    scored.sort_by(|(sa, a), (sb, b)| {
        compare_scores_desc(*sa, *sb).then_with(|| tie_key(a).cmp(&tie_key(b)))
    });

    let total_count = scored.len() as u64;
    let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);

    let items: Vec<Ranked<T>> = scored
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(limit)
        .map(|(idx, (rank_score, item))| Ranked {
            rank: idx as u64 + 1,
            rank_score,
            item,
        })
        .collect();

    RankedPage {
        total_count,
        result_count: items.len(),
        offset: page.offset,
        limit: page.limit,
        items,
    }
}

fn compare_scores_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
