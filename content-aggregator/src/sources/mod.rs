pub mod news_api;
pub mod social;
pub mod tmdb;

pub use news_api::NewsApiSource;
pub use social::SocialSource;
pub use tmdb::TmdbSource;
