pub mod defs;
pub mod empty;
pub mod state;

pub use defs::{
    Content, ContentBase, ContentCategory, ContentKind, ContentTypeFilter, MediaType, NewsContent,
    RecommendationContent, SocialContent, SocialPlatform,
};
pub use empty::UnavailableSnapshotStore;
pub use state::{
    JsonFileSnapshotStore, MemorySnapshotStore, SnapshotError, SnapshotStore, FAVORITES_KEY,
    PREFERENCES_KEY,
};
