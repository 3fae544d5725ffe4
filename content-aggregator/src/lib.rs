pub mod types;
pub mod config;
pub mod utils;
pub mod fetcher;
pub mod normalizer;
pub mod traits;
pub mod sources;
pub mod gateway;
pub mod favorites;
pub mod preferences;
pub mod processing;
pub mod pipeline;
pub mod view;
pub mod loader;
pub mod session;

pub use types::*;
pub use config::AppConfig;
pub use fetcher::Fetcher;
pub use normalizer::ContentNormalizer;
pub use traits::ProviderGateway;
pub use gateway::HttpGateway;
pub use favorites::FavoritesStore;
pub use preferences::{Preferences, PreferencesStore, Theme, ThemeSignal};
pub use processing::FilterChain;
pub use pipeline::{aggregate, FeedStatus, FilterCriteria, SourceState, SourceStates};
pub use view::{EmptyReason, FeedView, ERROR_HEADLINE, ERROR_HINT, LOADING_MESSAGE};
pub use loader::{FeedLoader, LoadOutcome};
pub use session::DashboardSession;
pub use interfaces::empty::UnavailableSnapshotStore;
pub use interfaces::state::{JsonFileSnapshotStore, MemorySnapshotStore};
