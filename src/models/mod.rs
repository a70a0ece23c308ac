pub mod episode;
pub mod results;
pub mod title;
