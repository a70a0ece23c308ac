pub mod insight;
pub mod panel;
pub mod title;
