//! The analytics and ranking engine.
//!
//! Everything here is a pure transformation over rows read from the
//! [`Store`](crate::db::Store): no state is kept between calls.

pub mod aggregate;
pub mod error;
pub mod filters;
pub mod pagination;
pub mod resolver;
pub mod scoring;
pub mod trend;
pub mod validation;

pub use aggregate::{CompareEntry, Summary};
pub use error::AnalyticsError;
pub use filters::{ComposedFilter, MovieFilters, SeriesFilters};
pub use pagination::{PageRequest, Ranked, RankedPage};
pub use resolver::{MatchTier, Resolved, resolve};
pub use trend::{EpisodeGraph, Trendline, fit_line};
