use crate::types::{Content, ContentCategory, ContentTypeFilter};
use crate::utils::text::contains_lowercase;
use std::collections::HashSet;
use tracing::debug;

/// One narrowing step of the feed pipeline
pub trait FilterStage: Send + Sync {
    /// Get the name of this filter stage
    fn stage_name(&self) -> &'static str;

    /// Inactive stages pass every item through.
    fn is_active(&self) -> bool;

    fn keeps(&self, item: &Content) -> bool;

    /// Drop rejected items in place, preserving the order of the survivors.
    fn apply(&self, items: &mut Vec<Content>) {
        if !self.is_active() {
            return;
        }
        let before = items.len();
        items.retain(|item| self.keeps(item));
        debug!("{} stage kept {} of {} items", self.stage_name(), items.len(), before);
    }
}

/// Keeps items whose category is one of the selected categories.
pub struct CategoryStage<'a> {
    selected: &'a [ContentCategory],
}

impl<'a> CategoryStage<'a> {
    pub fn new(selected: &'a [ContentCategory]) -> Self {
        Self { selected }
    }
}

impl FilterStage for CategoryStage<'_> {
    fn stage_name(&self) -> &'static str {
        "category"
    }

    fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    fn keeps(&self, item: &Content) -> bool {
        item.category()
            .map_or(false, |category| self.selected.contains(&category))
    }
}

pub struct ContentTypeStage {
    filter: ContentTypeFilter,
}

impl ContentTypeStage {
    pub fn new(filter: ContentTypeFilter) -> Self {
        Self { filter }
    }
}

impl FilterStage for ContentTypeStage {
    fn stage_name(&self) -> &'static str {
        "content type"
    }

    fn is_active(&self) -> bool {
        self.filter != ContentTypeFilter::All
    }

    fn keeps(&self, item: &Content) -> bool {
        self.filter.matches(item.kind())
    }
}

pub struct FavoritesStage<'a> {
    enabled: bool,
    favorite_ids: &'a HashSet<String>,
}

impl<'a> FavoritesStage<'a> {
    pub fn new(enabled: bool, favorite_ids: &'a HashSet<String>) -> Self {
        Self {
            enabled,
            favorite_ids,
        }
    }
}

impl FilterStage for FavoritesStage<'_> {
    fn stage_name(&self) -> &'static str {
        "favorites"
    }

    fn is_active(&self) -> bool {
        self.enabled
    }

    fn keeps(&self, item: &Content) -> bool {
        self.favorite_ids.contains(item.id())
    }
}

/// Case-insensitive substring match on title or description.
pub struct SearchStage {
    needle: String,
}

impl SearchStage {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }
}

impl FilterStage for SearchStage {
    fn stage_name(&self) -> &'static str {
        "search"
    }

    fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    fn keeps(&self, item: &Content) -> bool {
        contains_lowercase(item.title(), &self.needle)
            || contains_lowercase(item.description(), &self.needle)
    }
}

/// The four stages in their fixed order: category, content type, favorites, search.
pub struct FilterChain<'a> {
    stages: Vec<Box<dyn FilterStage + 'a>>,
}

impl<'a> FilterChain<'a> {
    pub fn new(
        categories: &'a [ContentCategory],
        content_type: ContentTypeFilter,
        favorites_only: bool,
        favorite_ids: &'a HashSet<String>,
        search: &str,
    ) -> Self {
        let stages: Vec<Box<dyn FilterStage + 'a>> = vec![
            Box::new(CategoryStage::new(categories)),
            Box::new(ContentTypeStage::new(content_type)),
            Box::new(FavoritesStage::new(favorites_only, favorite_ids)),
            Box::new(SearchStage::new(search)),
        ];
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.stage_name()).collect()
    }

    pub fn active_stages(&self) -> Vec<&'static str> {
        self.stages
            .iter()
            .filter(|stage| stage.is_active())
            .map(|stage| stage.stage_name())
            .collect()
    }

    pub fn run(&self, mut items: Vec<Content>) -> Vec<Content> {
        for stage in &self.stages {
            stage.apply(&mut items);
        }
        items
    }
}
