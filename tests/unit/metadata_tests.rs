/*!
 * Tests for the metadata resolver
 */

use dualsub::metadata::{EntryKind, MetadataResolver};

use crate::common::mock_providers::MockCatalog;

const PLACEHOLDER: &str = "No plot summary available.";

#[tokio::test]
async fn test_resolve_withFilmHit_shouldNotSearchSeries() {
    let catalog = MockCatalog::new()
        .with_film("Inception", 27205, "A thief who steals corporate secrets through dream-sharing.")
        .with_series("Inception", 1, "Should not be used");
    let calls = catalog.calls();
    let resolver = MetadataResolver::new(Box::new(catalog), PLACEHOLDER);

    let entry = resolver.resolve("Inception").await.unwrap();

    assert_eq!(entry.kind, EntryKind::Film);
    assert_eq!(entry.title, "Inception");
    assert!(entry.overview.starts_with("A thief"));
    assert_eq!(*calls.lock().unwrap(), vec!["search film Inception", "details film 27205"]);
}

#[tokio::test]
async fn test_resolve_withSeriesOnly_shouldFallBackToSeries() {
    let catalog = MockCatalog::new().with_series("The Office", 2316, "A mockumentary on office workers.");
    let calls = catalog.calls();
    let resolver = MetadataResolver::new(Box::new(catalog), PLACEHOLDER);

    let entry = resolver.resolve("The Office").await.unwrap();

    assert_eq!(entry.kind, EntryKind::Series);
    assert_eq!(entry.overview, "A mockumentary on office workers.");
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["search film The Office", "search series The Office", "details series 2316"]
    );
}

#[tokio::test]
async fn test_contextFor_withNoMatches_shouldReturnPlaceholder() {
    let resolver = MetadataResolver::new(Box::new(MockCatalog::new()), PLACEHOLDER);

    assert!(resolver.resolve("Unknown Title").await.is_none());
    assert_eq!(resolver.context_for("Unknown Title").await, PLACEHOLDER);
}

#[tokio::test]
async fn test_contextFor_withFailingFilmSearch_shouldStillTrySeries() {
    let catalog = MockCatalog::new()
        .with_series("Dark", 70523, "Four families in a German town.")
        .failing_for(EntryKind::Film);
    let resolver = MetadataResolver::new(Box::new(catalog), PLACEHOLDER);

    assert_eq!(resolver.context_for("Dark").await, "Four families in a German town.");
}

#[tokio::test]
async fn test_contextFor_withFailingCatalog_shouldDegradeToPlaceholder() {
    let catalog = MockCatalog::new()
        .with_film("Inception", 27205, "Dreams.")
        .failing_for(EntryKind::Film);
    let resolver = MetadataResolver::new(Box::new(catalog.failing_for(EntryKind::Series)), PLACEHOLDER);

    assert_eq!(resolver.context_for("Inception").await, PLACEHOLDER);
}

#[tokio::test]
async fn test_resolve_withFilmDetailsFailing_shouldNotFallBackToSeries() {
    let catalog = MockCatalog::new()
        .with_film("X", 1, "film overview")
        .with_series("X", 2, "series overview")
        .failing_details_for(EntryKind::Film);
    let calls = catalog.calls();
    let resolver = MetadataResolver::new(Box::new(catalog), PLACEHOLDER);

    assert!(resolver.resolve("X").await.is_none());
    assert_eq!(*calls.lock().unwrap(), vec!["search film X", "details film 1"]);
    assert_eq!(resolver.context_for("X").await, PLACEHOLDER);
}

#[tokio::test]
async fn test_contextFor_withEmptyOverview_shouldReturnPlaceholder() {
    let catalog = MockCatalog::new().with_film("Untitled", 1, "   ");
    let resolver = MetadataResolver::new(Box::new(catalog), PLACEHOLDER);

    assert!(resolver.resolve("Untitled").await.is_some());
    assert_eq!(resolver.context_for("Untitled").await, PLACEHOLDER);
}

#[tokio::test]
async fn test_resolve_withEmptyTitle_shouldSkipLookup() {
    let catalog = MockCatalog::new();
    let calls = catalog.calls();
    let resolver = MetadataResolver::new(Box::new(catalog), PLACEHOLDER);

    assert!(resolver.resolve("  ").await.is_none());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_disabledResolver_shouldAlwaysUsePlaceholder() {
    let resolver = MetadataResolver::disabled("none");

    assert!(!resolver.is_enabled());
    assert_eq!(resolver.context_for("Inception").await, "none");
}
