mod common;

use common::{init_tracing, news, recommendation, social};
use content_aggregator::{
    aggregate, Content, ContentCategory, ContentTypeFilter, EmptyReason, FailureKind, FeedStatus,
    FeedView, FilterCriteria, Preferences, Source, SourceFailure, SourceState, SourceStates,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use tracing::info;

fn ids(items: &[Content]) -> Vec<&str> {
    items.iter().map(|item| item.id()).collect()
}

fn prefs(categories: Vec<ContentCategory>) -> Preferences {
    Preferences {
        categories,
        ..Preferences::default()
    }
}

#[test]
fn uncategorized_recommendation_is_dropped_by_category_stage() {
    init_tracing();
    info!("Testing category stage against uncategorized recommendations");

    let pool_news = vec![news("n1", "Chip news", ContentCategory::Technology)];
    let pool_recs = vec![recommendation("r1", "Arrival")];
    let preferences = prefs(vec![ContentCategory::Technology]);
    let favorites = HashSet::new();
    let criteria = FilterCriteria::new(&preferences, &favorites, "");

    let output = aggregate(&pool_news, &pool_recs, &[], &criteria);
    assert_eq!(ids(&output), vec!["n1"]);
}

#[test]
fn favorites_only_keeps_favorited_ids() {
    init_tracing();

    let pool_news = vec![news("n1", "Chip news", ContentCategory::Technology)];
    let pool_recs = vec![recommendation("r1", "Arrival")];
    let preferences = Preferences {
        categories: vec![],
        show_favorites_only: true,
        ..Preferences::default()
    };
    let favorites: HashSet<String> = ["n1".to_string()].into_iter().collect();
    let criteria = FilterCriteria::new(&preferences, &favorites, "");

    let output = aggregate(&pool_news, &pool_recs, &[], &criteria);
    assert_eq!(ids(&output), vec!["n1"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    init_tracing();

    let pool = vec![
        social("s1", "React Tips", None),
        social("s2", "Gardening in spring", None),
    ];
    let preferences = prefs(vec![]);
    let favorites = HashSet::new();
    let criteria = FilterCriteria::new(&preferences, &favorites, "react");

    let output = aggregate(&[], &[], &pool, &criteria);
    assert_eq!(ids(&output), vec!["s1"]);

    let shouting = FilterCriteria::new(&preferences, &favorites, "REACT");
    assert_eq!(ids(&aggregate(&[], &[], &pool, &shouting)), vec!["s1"]);
}

#[test]
fn search_matches_description_too() {
    let pool = vec![social("s1", "Weekly roundup", None)];
    let preferences = prefs(vec![]);
    let favorites = HashSet::new();
    // the fixture description is "About <title>"
    let criteria = FilterCriteria::new(&preferences, &favorites, "about weekly");
    assert_eq!(ids(&aggregate(&[], &[], &pool, &criteria)), vec!["s1"]);
}

#[test]
fn concatenation_order_survives_filtering() {
    init_tracing();

    let pool_news = vec![
        news("n1", "One", ContentCategory::Technology),
        news("n2", "Two", ContentCategory::Business),
    ];
    let pool_recs = vec![recommendation("r1", "Three")];
    let pool_social = vec![
        social("s1", "Four", Some(ContentCategory::Technology)),
        social("s2", "Five", Some(ContentCategory::Sports)),
    ];
    let preferences = prefs(vec![]);
    let favorites = HashSet::new();
    let criteria = FilterCriteria::new(&preferences, &favorites, "");

    let everything = aggregate(&pool_news, &pool_recs, &pool_social, &criteria);
    assert_eq!(ids(&everything), vec!["n1", "n2", "r1", "s1", "s2"]);

    let tech = prefs(vec![ContentCategory::Technology]);
    let criteria = FilterCriteria::new(&tech, &favorites, "");
    let narrowed = aggregate(&pool_news, &pool_recs, &pool_social, &criteria);
    assert_eq!(ids(&narrowed), vec!["n1", "s1"]);
}

#[test]
fn aggregate_is_deterministic() {
    let pool_news = vec![news("n1", "One", ContentCategory::Technology)];
    let pool_social = vec![social("s1", "Two", Some(ContentCategory::Technology))];
    let preferences = Preferences::default();
    let favorites = HashSet::new();
    let criteria = FilterCriteria::new(&preferences, &favorites, "o");

    let first = aggregate(&pool_news, &[], &pool_social, &criteria);
    let second = aggregate(&pool_news, &[], &pool_social, &criteria);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn empty_category_selection_is_a_superset_of_every_selection() {
    let pool_news = vec![
        news("n1", "One", ContentCategory::Technology),
        news("n2", "Two", ContentCategory::Health),
    ];
    let pool_recs = vec![recommendation("r1", "Three")];
    let pool_social = vec![social("s1", "Four", Some(ContentCategory::Science))];
    let favorites = HashSet::new();

    let open = prefs(vec![]);
    let unrestricted: HashSet<String> = aggregate(
        &pool_news,
        &pool_recs,
        &pool_social,
        &FilterCriteria::new(&open, &favorites, ""),
    )
    .iter()
    .map(|item| item.id().to_string())
    .collect();

    for category in ContentCategory::ALL {
        let selected = prefs(vec![category]);
        let restricted = aggregate(
            &pool_news,
            &pool_recs,
            &pool_social,
            &FilterCriteria::new(&selected, &favorites, ""),
        );
        assert!(restricted.len() < unrestricted.len());
        assert!(restricted
            .iter()
            .all(|item| unrestricted.contains(item.id())));
    }
}

#[test]
fn movies_filter_maps_to_recommendations() {
    let pool_news = vec![news("n1", "One", ContentCategory::Technology)];
    let pool_recs = vec![recommendation("r1", "Arrival")];
    let pool_social = vec![social("s1", "Post", None)];
    let favorites = HashSet::new();

    let run = |filter: ContentTypeFilter| {
        let preferences = Preferences {
            categories: vec![],
            content_type_filter: filter,
            ..Preferences::default()
        };
        let criteria = FilterCriteria::new(&preferences, &favorites, "");
        aggregate(&pool_news, &pool_recs, &pool_social, &criteria)
            .iter()
            .map(|item| item.id().to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(ContentTypeFilter::Movies), vec!["r1"]);
    assert_eq!(run(ContentTypeFilter::News), vec!["n1"]);
    assert_eq!(run(ContentTypeFilter::Social), vec!["s1"]);
    assert_eq!(run(ContentTypeFilter::All), vec!["n1", "r1", "s1"]);
}

fn failure(kind: FailureKind) -> SourceFailure {
    SourceFailure {
        kind,
        message: "boom".to_string(),
    }
}

#[test]
fn status_is_loading_while_any_source_is_pending() {
    let states = SourceStates {
        news: SourceState::Loaded(vec![]),
        recommendations: SourceState::Pending,
        social: SourceState::Unavailable(failure(FailureKind::Transport)),
    };
    assert_eq!(states.status(), FeedStatus::Loading);
}

#[test]
fn status_is_error_when_any_settled_source_failed() {
    let states = SourceStates {
        news: SourceState::Unavailable(failure(FailureKind::NotConfigured)),
        recommendations: SourceState::Loaded(vec![recommendation("r1", "Arrival")]),
        social: SourceState::Loaded(vec![]),
    };
    assert_eq!(
        states.status(),
        FeedStatus::Error(vec![(Source::News, failure(FailureKind::NotConfigured))])
    );

    // the failing source contributes nothing, the rest still aggregate
    let preferences = prefs(vec![]);
    let favorites = HashSet::new();
    let criteria = FilterCriteria::new(&preferences, &favorites, "");
    assert_eq!(ids(&states.aggregate(&criteria)), vec!["r1"]);
}

#[test]
fn zero_items_is_ready_not_error() {
    let states = SourceStates {
        news: SourceState::Loaded(vec![]),
        recommendations: SourceState::Loaded(vec![]),
        social: SourceState::Loaded(vec![]),
    };
    assert_eq!(states.status(), FeedStatus::Ready);
}

#[test]
fn empty_reasons_follow_priority() {
    let none: HashSet<String> = HashSet::new();
    let some: HashSet<String> = ["x".to_string()].into_iter().collect();

    let favorites_only = Preferences {
        show_favorites_only: true,
        content_type_filter: ContentTypeFilter::News,
        ..Preferences::default()
    };
    assert_eq!(
        EmptyReason::from_criteria(&FilterCriteria::new(&favorites_only, &none, "q")),
        EmptyReason::NoFavoritesYet
    );
    assert_eq!(
        EmptyReason::from_criteria(&FilterCriteria::new(&favorites_only, &some, "q")),
        EmptyReason::NoFavoritesMatch
    );

    let typed = Preferences {
        content_type_filter: ContentTypeFilter::Social,
        categories: vec![],
        ..Preferences::default()
    };
    assert_eq!(
        EmptyReason::from_criteria(&FilterCriteria::new(&typed, &none, "rust")),
        EmptyReason::NoSearchResults("rust".to_string())
    );
    let reason = EmptyReason::from_criteria(&FilterCriteria::new(&typed, &none, ""));
    assert_eq!(reason, EmptyReason::NoContentOfType(ContentTypeFilter::Social));
    assert_eq!(reason.headline(), "No social content available");

    let open = prefs(vec![]);
    assert_eq!(
        EmptyReason::from_criteria(&FilterCriteria::new(&open, &none, "")),
        EmptyReason::NoCategoriesSelected
    );
    let selected = prefs(vec![ContentCategory::Sports]);
    assert_eq!(
        EmptyReason::from_criteria(&FilterCriteria::new(&selected, &none, "")),
        EmptyReason::NoCategoryMatches
    );
}

#[test]
fn feed_view_only_explains_ready_empty_feeds() {
    let preferences = Preferences::default();
    let favorites = HashSet::new();
    let criteria = FilterCriteria::new(&preferences, &favorites, "react");

    let ready = FeedView::new(FeedStatus::Ready, vec![], &criteria);
    let reason = ready.empty_reason.clone().unwrap();
    assert_eq!(
        reason.hint(),
        "No content matches \"react\". Try a different search term."
    );
    assert_eq!(ready.result_count(), "0 results");

    let loading = FeedView::new(FeedStatus::Loading, vec![], &criteria);
    assert!(loading.empty_reason.is_none());

    let one = FeedView::new(
        FeedStatus::Ready,
        vec![social("s1", "React Tips", None)],
        &criteria,
    );
    assert!(one.empty_reason.is_none());
    assert_eq!(one.result_count(), "1 result");
}
