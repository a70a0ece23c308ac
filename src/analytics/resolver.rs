//! Name to canonical title resolution.
//!
//! Two tiers: exact case-insensitive equality, then case-insensitive
//! substring (most recent first). An exact hit always wins, whatever order
//! the titles were loaded in.

use serde::Serialize;
use tracing::debug;

use super::error::AnalyticsError;
use super::validation::validate_name;
use crate::db::Store;
use crate::domain::{TitleId, TitleKind};
use crate::models::title::RatedTitle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Substring,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    pub tier: MatchTier,
    #[serde(flatten)]
    pub title: RatedTitle,
}

pub async fn resolve(
    store: &Store,
    kind: TitleKind,
    name: &str,
) -> Result<Resolved, AnalyticsError> {
    let name = validate_name(name)?;

    if let Some(title) = store.find_title_exact(kind, name).await? {
        debug!(%kind, name, id = %title.title.id, "Resolved by exact match");
        return Ok(Resolved {
            tier: MatchTier::Exact,
            title,
        });
    }

    if let Some(title) = store.find_title_containing(kind, name).await? {
        debug!(%kind, name, id = %title.title.id, "Resolved by substring match");
        return Ok(Resolved {
            tier: MatchTier::Substring,
            title,
        });
    }

    Err(not_found(kind, name))
}

pub async fn resolve_id(
    store: &Store,
    kind: TitleKind,
    id: &TitleId,
) -> Result<RatedTitle, AnalyticsError> {
    store
        .get_title(kind, id)
        .await?
        .ok_or_else(|| not_found(kind, id.as_str()))
}

fn not_found(kind: TitleKind, name: &str) -> AnalyticsError {
    let label = match kind {
        TitleKind::Movie => "Movie",
        TitleKind::Series => "Series",
        TitleKind::Episode => "Episode",
        TitleKind::Other => "Title",
    };
    AnalyticsError::not_found(format!("{label} not found: {name}"))
}
