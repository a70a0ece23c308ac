use serde::{Deserialize, Serialize};

use crate::domain::TitleId;
use crate::entities::episode_panel;

/// One placed, rated episode of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelEpisode {
    pub episode_id: TitleId,
    pub series_id: TitleId,
    pub season: i32,
    pub episode: i32,
    pub title: Option<String>,
    pub rating: f64,
    pub votes: u64,
}

impl PanelEpisode {
    /// Placement key; unique within a series.
    #[must_use]
    pub const fn placement(&self) -> (i32, i32) {
        (self.season, self.episode)
    }
}

impl From<episode_panel::Model> for PanelEpisode {
    fn from(m: episode_panel::Model) -> Self {
        Self {
            episode_id: TitleId::from(m.episode_id),
            series_id: TitleId::from(m.series_id),
            season: m.season_number,
            episode: m.episode_number,
            title: m.episode_title,
            rating: m.average_rating,
            votes: u64::try_from(m.num_votes).unwrap_or_default(),
        }
    }
}
