pub mod prelude;

pub mod episode_panel;
pub mod episodes;
pub mod ratings;
pub mod titles;
