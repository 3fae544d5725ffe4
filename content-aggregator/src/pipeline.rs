use crate::preferences::Preferences;
use crate::processing::FilterChain;
use crate::types::{Content, Source, SourceFailure};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Everything the filter stages read, borrowed from the session.
#[derive(Debug, Clone, Copy)]
pub struct FilterCriteria<'a> {
    pub preferences: &'a Preferences,
    pub favorite_ids: &'a HashSet<String>,
    pub search: &'a str,
}

impl<'a> FilterCriteria<'a> {
    pub fn new(preferences: &'a Preferences, favorite_ids: &'a HashSet<String>, search: &'a str) -> Self {
        Self {
            preferences,
            favorite_ids,
            search,
        }
    }

    pub fn chain(&self) -> FilterChain<'a> {
        let preferences = self.preferences;
        FilterChain::new(
            &preferences.categories,
            preferences.content_type_filter,
            preferences.show_favorites_only,
            self.favorite_ids,
            self.search,
        )
    }
}

/// Concatenate news, recommendations, and social items in that order, then
/// narrow through the filter chain. Survivors keep their concatenation order.
pub fn aggregate(
    news: &[Content],
    recommendations: &[Content],
    social: &[Content],
    criteria: &FilterCriteria<'_>,
) -> Vec<Content> {
    let mut pool = Vec::with_capacity(news.len() + recommendations.len() + social.len());
    pool.extend_from_slice(news);
    pool.extend_from_slice(recommendations);
    pool.extend_from_slice(social);

    let total = pool.len();
    let items = criteria.chain().run(pool);
    debug!("Aggregated {} of {} items", items.len(), total);
    items
}

/// What the pipeline knows about one source. `Loaded(vec![])` and
/// `Unavailable` are different outcomes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SourceState {
    #[default]
    Pending,
    Loaded(Vec<Content>),
    Unavailable(SourceFailure),
}

impl SourceState {
    /// Items contributed to aggregation; pending and unavailable sources contribute none.
    pub fn items(&self) -> &[Content] {
        match self {
            SourceState::Loaded(items) => items,
            SourceState::Pending | SourceState::Unavailable(_) => &[],
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SourceState::Pending)
    }

    pub fn failure(&self) -> Option<&SourceFailure> {
        match self {
            SourceState::Unavailable(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Snapshot of the three source states, in concatenation order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceStates {
    pub news: SourceState,
    pub recommendations: SourceState,
    pub social: SourceState,
}

impl SourceStates {
    pub fn get(&self, source: Source) -> &SourceState {
        match source {
            Source::News => &self.news,
            Source::Recommendations => &self.recommendations,
            Source::Social => &self.social,
        }
    }

    pub fn status(&self) -> FeedStatus {
        FeedStatus::from_states(self)
    }

    pub fn aggregate(&self, criteria: &FilterCriteria<'_>) -> Vec<Content> {
        aggregate(
            self.news.items(),
            self.recommendations.items(),
            self.social.items(),
            criteria,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "failures", rename_all = "lowercase")]
pub enum FeedStatus {
    /// At least one source has not settled.
    Loading,
    /// Every source settled and at least one failed.
    Error(Vec<(Source, SourceFailure)>),
    Ready,
}

impl FeedStatus {
    pub fn from_states(states: &SourceStates) -> Self {
        if Source::ALL.iter().any(|source| states.get(*source).is_pending()) {
            return FeedStatus::Loading;
        }

        let failures: Vec<(Source, SourceFailure)> = Source::ALL
            .iter()
            .filter_map(|source| {
                states
                    .get(*source)
                    .failure()
                    .map(|failure| (*source, failure.clone()))
            })
            .collect();

        if failures.is_empty() {
            FeedStatus::Ready
        } else {
            FeedStatus::Error(failures)
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FeedStatus::Ready)
    }
}
