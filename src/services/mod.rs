pub mod series_service;
pub mod series_service_impl;
pub use series_service::SeriesService;
pub use series_service_impl::SeaOrmSeriesService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::MovieService;
pub use movie_service_impl::SeaOrmMovieService;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::CatalogService;
pub use catalog_service_impl::SeaOrmCatalogService;
