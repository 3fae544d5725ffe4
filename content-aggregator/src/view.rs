use crate::pipeline::{FeedStatus, FilterCriteria};
use crate::types::{Content, ContentTypeFilter};
use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Loading your personalized feed...";
pub const ERROR_HEADLINE: &str = "Failed to load content";
pub const ERROR_HINT: &str =
    "There was an error fetching your content. Please check your API configuration.";

/// Why a settled, error-free feed came out empty. Variants are listed in
/// the priority they are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum EmptyReason {
    NoFavoritesYet,
    NoFavoritesMatch,
    NoSearchResults(String),
    NoContentOfType(ContentTypeFilter),
    NoCategoriesSelected,
    NoCategoryMatches,
}

impl EmptyReason {
    pub fn from_criteria(criteria: &FilterCriteria<'_>) -> Self {
        let preferences = criteria.preferences;
        if preferences.show_favorites_only && criteria.favorite_ids.is_empty() {
            EmptyReason::NoFavoritesYet
        } else if preferences.show_favorites_only {
            EmptyReason::NoFavoritesMatch
        } else if !criteria.search.is_empty() {
            EmptyReason::NoSearchResults(criteria.search.to_string())
        } else if preferences.content_type_filter != ContentTypeFilter::All {
            EmptyReason::NoContentOfType(preferences.content_type_filter)
        } else if preferences.categories.is_empty() {
            EmptyReason::NoCategoriesSelected
        } else {
            EmptyReason::NoCategoryMatches
        }
    }

    pub fn headline(&self) -> String {
        match self {
            EmptyReason::NoFavoritesYet => "No favorites yet".to_string(),
            EmptyReason::NoFavoritesMatch => "No favorited content matches your filters".to_string(),
            EmptyReason::NoSearchResults(_) => "No results found".to_string(),
            EmptyReason::NoContentOfType(filter) => format!("No {} content available", filter),
            EmptyReason::NoCategoriesSelected => "No categories selected".to_string(),
            EmptyReason::NoCategoryMatches => "No content matches your selected categories".to_string(),
        }
    }

    pub fn hint(&self) -> String {
        match self {
            EmptyReason::NoFavoritesYet => "Star some content to see it here!".to_string(),
            EmptyReason::NoFavoritesMatch => {
                "Try disabling some filters or add more favorites.".to_string()
            }
            EmptyReason::NoSearchResults(query) => {
                format!("No content matches \"{}\". Try a different search term.", query)
            }
            EmptyReason::NoContentOfType(_) => {
                "Try selecting different filters or categories.".to_string()
            }
            EmptyReason::NoCategoriesSelected => {
                "Go to Preferences to select categories to see content.".to_string()
            }
            EmptyReason::NoCategoryMatches => {
                "Try selecting different categories in Preferences.".to_string()
            }
        }
    }
}

/// The feed as presented outward: status, surviving items, and the empty-state reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub status: FeedStatus,
    pub items: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_reason: Option<EmptyReason>,
}

impl FeedView {
    pub fn new(status: FeedStatus, items: Vec<Content>, criteria: &FilterCriteria<'_>) -> Self {
        let empty_reason = if status.is_ready() && items.is_empty() {
            Some(EmptyReason::from_criteria(criteria))
        } else {
            None
        };
        Self {
            status,
            items,
            empty_reason,
        }
    }

    pub fn result_count(&self) -> String {
        match self.items.len() {
            1 => "1 result".to_string(),
            n => format!("{} results", n),
        }
    }
}
