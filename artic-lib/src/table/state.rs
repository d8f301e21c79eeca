//! View state and its pure transition function.

use crate::model::Artwork;
use crate::model::Page;

use super::selection::ModeSwitchPolicy;
use super::selection::SelectionMode;
use super::selection::SelectionSet;

/// Everything the rendering surface needs for one frame.
///
/// Mutated only through [`ViewState::apply`]; the controller translates I/O
/// completions into [`Event`]s, so every transition is testable without a
/// backend attached.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Records of the page currently displayed.
    pub records: Vec<Artwork>,
    /// 1-based index of the displayed page. Zero until the first load lands.
    pub page_index: u32,
    /// Display page size, used for pager math. Independent of the size of
    /// the pages the source actually returns.
    pub rows_per_page: usize,
    /// Total record count reported by the source at the last successful
    /// load.
    pub total_records: usize,
    /// Cross-page selection.
    pub selection: SelectionSet,
    /// True while a page load is outstanding.
    pub loading: bool,
    /// True while a bulk-selection walk is running.
    pub bulk_selecting: bool,
    /// How selection gestures are interpreted.
    pub selection_mode: SelectionMode,
    /// Human-readable description of the most recent failure, cleared by
    /// the next successful load.
    pub last_error: Option<String>,
    /// Sequence number of the newest page load issued. Completions carrying
    /// an older sequence are discarded.
    latest_load_seq: u64,
    /// Sequence number of the newest bulk-selection walk issued.
    latest_walk_seq: u64,
}

impl ViewState {
    /// Creates an empty state with the given display page size and mode.
    pub fn new(rows_per_page: usize, selection_mode: SelectionMode) -> Self {
        Self {
            rows_per_page,
            selection_mode,
            ..Self::default()
        }
    }

    /// Total number of display pages implied by the current totals.
    pub fn total_pages(&self) -> u32 {
        if self.rows_per_page == 0 {
            return 0;
        }
        self.total_records.div_ceil(self.rows_per_page) as u32
    }

    /// The subset of current-page records whose id is selected, in page
    /// order.
    pub fn selected_on_page(&self) -> Vec<&Artwork> {
        self.records
            .iter()
            .filter(|record| self.selection.contains(&record.id))
            .collect()
    }

    /// Applies one event.
    ///
    /// Page-load and walk completions are guarded by sequence number: a
    /// completion that is not the newest issued leaves the state untouched,
    /// so a stale response can neither overwrite newer records nor clear a
    /// newer operation's progress flag.
    pub fn apply(&mut self, event: Event) {
        match event {
            // Sequence numbers only ever advance: a start event that lost
            // the race to a newer one must not reclaim the latest slot or
            // re-raise the progress flag after the newer load cleared it.
            Event::PageLoadStarted { seq } => {
                if seq > self.latest_load_seq {
                    self.latest_load_seq = seq;
                    self.loading = true;
                }
            }
            Event::PageLoaded { seq, page } => {
                if seq != self.latest_load_seq {
                    return;
                }
                self.page_index = page.page_index();
                self.total_records = page.total_records();
                self.records = page.into_records();
                self.loading = false;
                self.last_error = None;
            }
            Event::PageLoadFailed { seq, message } => {
                if seq != self.latest_load_seq {
                    return;
                }
                self.loading = false;
                self.last_error = Some(message);
            }
            Event::RowsSelected { ids } => match self.selection_mode {
                SelectionMode::Multiple => {
                    self.selection.insert_all(ids);
                }
                // A single-select gesture replaces the selection.
                SelectionMode::Single => {
                    if let Some(id) = ids.into_iter().last() {
                        self.selection.clear();
                        self.selection.insert_all([id]);
                    }
                }
            },
            Event::RowsDeselected { ids } => {
                self.selection.remove_all(ids.iter().map(String::as_str));
            }
            Event::BulkSelectionStarted { seq } => {
                if seq > self.latest_walk_seq {
                    self.latest_walk_seq = seq;
                    self.bulk_selecting = true;
                }
            }
            Event::BulkSelectionApplied { seq, ids, error } => {
                if seq != self.latest_walk_seq {
                    return;
                }
                self.selection.insert_all(ids);
                self.bulk_selecting = false;
                if error.is_some() {
                    self.last_error = error;
                }
            }
            Event::SelectionModeChanged { mode, policy } => {
                if mode == SelectionMode::Single && policy == ModeSwitchPolicy::Truncate {
                    self.selection.truncate_to_one();
                }
                self.selection_mode = mode;
            }
        }
    }
}

/// State transitions, one per operation step.
///
/// Bulk selection commits once, at the end of the walk: a failed walk still
/// carries the ids accumulated before the failure, and a superseded walk's
/// commit is dropped by the sequence guard.
#[derive(Debug, Clone)]
pub enum Event {
    /// A page load was issued.
    PageLoadStarted {
        /// Load sequence number.
        seq: u64,
    },
    /// A page load completed successfully.
    PageLoaded {
        /// Load sequence number.
        seq: u64,
        /// The fetched page.
        page: Page,
    },
    /// A page load failed; prior records are retained.
    PageLoadFailed {
        /// Load sequence number.
        seq: u64,
        /// Failure description for display.
        message: String,
    },
    /// Rows on the current page were selected by the user.
    RowsSelected {
        /// Ids of the selected rows.
        ids: Vec<String>,
    },
    /// Rows were deselected by the user.
    RowsDeselected {
        /// Ids of the deselected rows.
        ids: Vec<String>,
    },
    /// A bulk-selection walk started.
    BulkSelectionStarted {
        /// Walk sequence number.
        seq: u64,
    },
    /// A bulk-selection walk committed the ids it accumulated.
    BulkSelectionApplied {
        /// Walk sequence number.
        seq: u64,
        /// Ids accumulated by the walk, in source order.
        ids: Vec<String>,
        /// Failure description if the walk stopped early.
        error: Option<String>,
    },
    /// The selection mode was switched.
    SelectionModeChanged {
        /// The new mode.
        mode: SelectionMode,
        /// What happens to an existing multi-selection.
        policy: ModeSwitchPolicy,
    },
}
