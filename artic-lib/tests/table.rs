//! Integration tests for the table controller, driven against a
//! deterministic in-memory source.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use artic_lib::error::ApiError;
use artic_lib::error::Error;
use artic_lib::error::InputError;
use artic_lib::model::Artwork;
use artic_lib::model::Page;
use artic_lib::source::RecordSource;
use artic_lib::table::ModeSwitchPolicy;
use artic_lib::table::SelectionMode;
use artic_lib::table::TableController;

/// Deterministic paged source: `total` records with ids `r1..r{total}`,
/// served in pages of `page_size`, with optional per-page failures and
/// delays. Every fetch is recorded.
struct FakeSource {
    page_size: usize,
    total: usize,
    fail_pages: Vec<u32>,
    delays_ms: Vec<(u32, u64)>,
    fetched: Mutex<Vec<u32>>,
}

impl FakeSource {
    fn new(page_size: usize, total: usize) -> Self {
        Self {
            page_size,
            total,
            fail_pages: Vec::new(),
            delays_ms: Vec::new(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, pages: &[u32]) -> Self {
        self.fail_pages = pages.to_vec();
        self
    }

    fn delaying(mut self, page: u32, ms: u64) -> Self {
        self.delays_ms.push((page, ms));
        self
    }

    fn fetched_pages(&self) -> Vec<u32> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSource for FakeSource {
    async fn fetch_page(&self, page: u32) -> Result<Page, Error> {
        self.fetched.lock().unwrap().push(page);

        if let Some((_, ms)) = self.delays_ms.iter().find(|(p, _)| *p == page) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }

        if self.fail_pages.contains(&page) {
            return Err(Error::Api(ApiError::http(503, "backend unavailable")));
        }

        let start = (page as usize - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total);
        let records = (start..end)
            .map(|i| Artwork::new(format!("r{}", i + 1)))
            .collect();
        Ok(Page::new(page, records, self.total))
    }
}

fn controller_over(source: &Arc<FakeSource>) -> TableController {
    TableController::new(Arc::clone(source) as Arc<dyn RecordSource>)
        .with_rows_per_page(10)
        .with_selection_mode(SelectionMode::Multiple)
}

fn row(id: &str) -> Artwork {
    Artwork::new(id)
}

// =============================================================================
// Selection algebra
// =============================================================================

#[tokio::test]
async fn selection_is_union_and_difference_without_duplicates() {
    let source = Arc::new(FakeSource::new(10, 30));
    let controller = controller_over(&source);

    controller.select_rows(&[row("r1"), row("r2")]);
    controller.select_rows(&[row("r2"), row("r3")]);
    assert_eq!(controller.selected_ids(), vec!["r1", "r2", "r3"]);

    controller.deselect_rows(&[row("r2"), row("r9")]);
    assert_eq!(controller.selected_ids(), vec!["r1", "r3"]);
}

#[tokio::test]
async fn selection_survives_page_navigation() {
    let source = Arc::new(FakeSource::new(10, 30));
    let controller = controller_over(&source);

    controller.load_page(1).await.unwrap();
    let view = controller.view_state();
    controller.select_rows(&view.records[0..2]);

    controller.load_page(2).await.unwrap();
    assert_eq!(controller.view_state().page_index, 2);
    assert_eq!(controller.selected_ids(), vec!["r1", "r2"]);
    assert!(controller.view_state().selected_on_page().is_empty());

    controller.load_page(1).await.unwrap();
    let view = controller.view_state();
    let on_page: Vec<_> = view
        .selected_on_page()
        .iter()
        .map(|record| record.id.clone())
        .collect();
    assert_eq!(on_page, vec!["r1", "r2"]);
}

// =============================================================================
// Page loads
// =============================================================================

#[tokio::test]
async fn failed_load_leaves_state_untouched() {
    let source = Arc::new(FakeSource::new(10, 30).failing_on(&[2]));
    let controller = controller_over(&source);

    controller.load_page(1).await.unwrap();
    let before = controller.view_state();

    let result = controller.load_page(2).await;
    assert!(matches!(result, Err(Error::Api(_))));

    let after = controller.view_state();
    assert_eq!(after.page_index, before.page_index);
    assert_eq!(after.records, before.records);
    assert_eq!(after.total_records, before.total_records);
    assert!(!after.loading);
    assert!(after.last_error.is_some());
}

#[tokio::test]
async fn load_page_rejects_page_zero() {
    let source = Arc::new(FakeSource::new(10, 30));
    let controller = controller_over(&source);

    let result = controller.load_page(0).await;
    assert!(matches!(
        result,
        Err(Error::Input(InputError::InvalidPage { value: 0 }))
    ));
    assert!(source.fetched_pages().is_empty());
}

#[tokio::test]
async fn stale_load_response_is_discarded() {
    let source = Arc::new(FakeSource::new(10, 30).delaying(1, 100));
    let controller = controller_over(&source);

    let slow = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.load_page(1).await })
    };
    // Let the slow load issue its fetch before superseding it.
    tokio::time::sleep(Duration::from_millis(10)).await;
    controller.load_page(2).await.unwrap();
    slow.await.unwrap().unwrap();

    let view = controller.view_state();
    assert_eq!(view.page_index, 2);
    assert_eq!(view.records[0].id, "r11");
    assert!(!view.loading);
}

// =============================================================================
// Bulk selection walk
// =============================================================================

#[tokio::test]
async fn select_first_n_takes_prefix_across_pages() {
    let source = Arc::new(FakeSource::new(10, 25));
    let controller = controller_over(&source);

    let committed = controller.select_first_n(12).await.unwrap();
    assert_eq!(committed, 12);

    let expected: Vec<String> = (1..=12).map(|i| format!("r{i}")).collect();
    let mut selected = controller.selected_ids();
    selected.sort_by_key(|id| id[1..].parse::<usize>().unwrap());
    assert_eq!(selected, expected);

    // Quota met on page 2; page 3 must not be fetched.
    assert_eq!(source.fetched_pages(), vec![1, 2]);
}

#[tokio::test]
async fn select_first_n_stops_at_source_exhaustion() {
    let source = Arc::new(FakeSource::new(10, 25));
    let controller = controller_over(&source);

    let committed = controller.select_first_n(100).await.unwrap();
    assert_eq!(committed, 25);
    assert_eq!(controller.selected_ids().len(), 25);
    assert_eq!(source.fetched_pages(), vec![1, 2, 3]);
}

#[tokio::test]
async fn select_first_n_unions_into_existing_selection() {
    let source = Arc::new(FakeSource::new(10, 25));
    let controller = controller_over(&source);

    controller.select_rows(&[row("r3"), row("r20")]);
    controller.select_first_n(5).await.unwrap();

    // r3 overlaps the walked prefix; no duplicate, r20 untouched.
    assert_eq!(controller.selected_ids().len(), 6);
    assert!(controller.selected_ids().contains(&"r20".to_string()));
}

#[tokio::test]
async fn select_first_n_rejects_zero_quota() {
    let source = Arc::new(FakeSource::new(10, 25));
    let controller = controller_over(&source);
    controller.select_rows(&[row("r7")]);

    let result = controller.select_first_n(0).await;
    assert!(matches!(
        result,
        Err(Error::Input(InputError::InvalidQuota { value: 0 }))
    ));
    assert_eq!(controller.selected_ids(), vec!["r7"]);
    assert!(source.fetched_pages().is_empty());
    assert!(!controller.view_state().bulk_selecting);
}

#[tokio::test]
async fn mid_walk_failure_commits_partial_prefix() {
    let source = Arc::new(FakeSource::new(10, 30).failing_on(&[2]));
    let controller = controller_over(&source);

    let committed = controller.select_first_n(25).await.unwrap();
    assert_eq!(committed, 10);
    assert_eq!(controller.selected_ids().len(), 10);

    let view = controller.view_state();
    assert!(!view.bulk_selecting);
    assert!(view.last_error.is_some());
}

#[tokio::test]
async fn new_walk_supersedes_one_in_flight() {
    let source = Arc::new(FakeSource::new(10, 30).delaying(1, 30).delaying(2, 30));
    let controller = controller_over(&source);

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.select_first_n(20).await })
    };
    tokio::time::sleep(Duration::from_millis(5)).await;
    let committed = controller.select_first_n(5).await.unwrap();
    assert_eq!(committed, 5);

    // The superseded walk commits nothing.
    assert_eq!(first.await.unwrap().unwrap(), 0);
    assert_eq!(controller.selected_ids().len(), 5);
    assert!(!controller.view_state().bulk_selecting);
}

// =============================================================================
// Selection mode
// =============================================================================

#[tokio::test]
async fn mode_switch_retains_selection_by_default() {
    let source = Arc::new(FakeSource::new(10, 30));
    let controller = controller_over(&source);

    controller.select_rows(&[row("r1"), row("r2"), row("r3")]);
    controller.set_selection_mode(SelectionMode::Single);

    assert_eq!(controller.selected_ids().len(), 3);
    assert_eq!(
        controller.view_state().selection_mode,
        SelectionMode::Single
    );
}

#[tokio::test]
async fn mode_switch_truncate_policy_keeps_one() {
    let source = Arc::new(FakeSource::new(10, 30));
    let controller = controller_over(&source)
        .with_mode_switch_policy(ModeSwitchPolicy::Truncate);

    controller.select_rows(&[row("r1"), row("r2"), row("r3")]);
    controller.set_selection_mode(SelectionMode::Single);
    assert_eq!(controller.selected_ids().len(), 1);

    // Switching back never resurrects anything.
    controller.set_selection_mode(SelectionMode::Multiple);
    assert_eq!(controller.selected_ids().len(), 1);
}
