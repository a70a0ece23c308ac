pub use super::episode_panel::Entity as EpisodePanel;
pub use super::episodes::Entity as Episodes;
pub use super::ratings::Entity as Ratings;
pub use super::titles::Entity as Titles;
