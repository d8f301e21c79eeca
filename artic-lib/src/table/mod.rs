//! Paged, selectable table state machine.
//!
//! [`TableController`] mediates between a [`RecordSource`] and a rendering
//! surface: it owns one page of records at a time, the totals for pager
//! math, and a cross-page selection. Rendering surfaces read snapshots of
//! [`ViewState`] and feed user gestures back as operation calls.

mod selection;
mod state;

pub use selection::*;
pub use state::*;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use log::debug;
use log::error;
use log::warn;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::error::InputError;
use crate::model::Artwork;
use crate::source::RecordSource;

/// Default display page size, matching the artworks API default.
pub const DEFAULT_ROWS_PER_PAGE: usize = 12;

/// Controller for a paginated, selectable record table.
///
/// Cheap to clone; clones share state, so a frontend can hand copies to
/// spawned tasks and keep one for rendering. All operations take `&self`.
///
/// # Example
///
/// ```ignore
/// let controller = TableController::new(Arc::new(client))
///     .with_rows_per_page(12)
///     .with_selection_mode(SelectionMode::Multiple);
///
/// controller.load_page(1).await?;
/// controller.select_first_n(40).await?;
/// let view = controller.view_state();
/// ```
#[derive(Clone)]
pub struct TableController {
    source: Arc<dyn RecordSource>,
    state: Arc<RwLock<ViewState>>,
    /// Monotonic sequence for page loads; the newest issued wins.
    load_seq: Arc<AtomicU64>,
    /// Bookkeeping for the bulk-selection walk in flight, if any.
    walk: Arc<Mutex<WalkGuard>>,
    mode_switch_policy: ModeSwitchPolicy,
}

/// Token and sequence of the newest bulk-selection walk.
///
/// Both live under one lock so the walk holding the live token is always
/// the one with the newest sequence.
struct WalkGuard {
    token: CancellationToken,
    seq: u64,
}

impl TableController {
    /// Creates a controller over the given source with default settings.
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(ViewState::new(
                DEFAULT_ROWS_PER_PAGE,
                SelectionMode::default(),
            ))),
            load_seq: Arc::new(AtomicU64::new(0)),
            walk: Arc::new(Mutex::new(WalkGuard {
                token: CancellationToken::new(),
                seq: 0,
            })),
            mode_switch_policy: ModeSwitchPolicy::default(),
        }
    }

    /// Sets the display page size used for pager math.
    pub fn with_rows_per_page(self, rows: usize) -> Self {
        if let Ok(mut guard) = self.state.write() {
            guard.rows_per_page = rows;
        }
        self
    }

    /// Sets the initial selection mode.
    pub fn with_selection_mode(self, mode: SelectionMode) -> Self {
        if let Ok(mut guard) = self.state.write() {
            guard.selection_mode = mode;
        }
        self
    }

    /// Sets the policy applied to an existing multi-selection when the mode
    /// switches to [`SelectionMode::Single`].
    pub fn with_mode_switch_policy(mut self, policy: ModeSwitchPolicy) -> Self {
        self.mode_switch_policy = policy;
        self
    }

    /// Returns a snapshot of the current view state.
    pub fn view_state(&self) -> ViewState {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns all selected ids, sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        self.state
            .read()
            .map(|guard| guard.selection.ids())
            .unwrap_or_default()
    }

    /// Loads the 1-based `page_index`, replacing the displayed page on
    /// success.
    ///
    /// On failure the prior records, page index, and totals are retained
    /// and the error is logged. Either way the loading flag ends cleared
    /// for the newest load issued; a completion superseded by a newer
    /// `load_page` call is discarded entirely.
    pub async fn load_page(&self, page_index: u32) -> Result<(), Error> {
        if page_index == 0 {
            let err = InputError::InvalidPage { value: page_index };
            warn!("{err}");
            return Err(err.into());
        }

        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(Event::PageLoadStarted { seq });

        match self.source.fetch_page(page_index).await {
            Ok(page) => {
                self.apply(Event::PageLoaded { seq, page });
                Ok(())
            }
            Err(e) => {
                error!("page {page_index} load failed: {e}");
                self.apply(Event::PageLoadFailed {
                    seq,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Unions the given rows' ids into the selection.
    ///
    /// In [`SelectionMode::Single`] the gesture replaces the selection with
    /// the last row given.
    pub fn select_rows(&self, rows: &[Artwork]) {
        if rows.is_empty() {
            return;
        }
        self.apply(Event::RowsSelected {
            ids: rows.iter().map(|row| row.id.clone()).collect(),
        });
    }

    /// Removes the given rows' ids from the selection. Ids not present are
    /// ignored.
    pub fn deselect_rows(&self, rows: &[Artwork]) {
        if rows.is_empty() {
            return;
        }
        self.apply(Event::RowsDeselected {
            ids: rows.iter().map(|row| row.id.clone()).collect(),
        });
    }

    /// Selects the first `n` records of the source, walking pages from
    /// page 1 until the quota is met or the source is exhausted.
    ///
    /// The walk is sequential: how many pages are needed depends on the
    /// yield of each response, and the per-page take is
    /// `min(remaining quota, page yield)` -- the source's page size need
    /// not match the display page size. On a mid-walk fetch failure the
    /// ids accumulated so far are still committed.
    ///
    /// Starting a new walk cancels one still in flight; a superseded walk
    /// commits nothing. Returns the number of ids handed to the commit.
    pub async fn select_first_n(&self, n: u64) -> Result<usize, Error> {
        if n == 0 {
            let err = InputError::InvalidQuota { value: n };
            warn!("{err}");
            return Err(err.into());
        }

        // A new walk supersedes one still in flight.
        let token = CancellationToken::new();
        let seq = match self.walk.lock() {
            Ok(mut walk) => {
                walk.token.cancel();
                walk.token = token.clone();
                walk.seq += 1;
                walk.seq
            }
            Err(_) => 0,
        };
        self.apply(Event::BulkSelectionStarted { seq });

        let mut ids: Vec<String> = Vec::new();
        let mut failure: Option<String> = None;
        let mut page_index: u32 = 1;
        let mut seen: usize = 0;

        while (ids.len() as u64) < n {
            let fetched = tokio::select! {
                _ = token.cancelled() => {
                    debug!("bulk selection superseded at page {page_index}");
                    return Ok(0);
                }
                result = self.source.fetch_page(page_index) => result,
            };

            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    error!("bulk selection: page {page_index} fetch failed: {e}");
                    failure = Some(e.to_string());
                    break;
                }
            };

            let take = (n - ids.len() as u64).min(page.len() as u64) as usize;
            ids.extend(
                page.records()
                    .iter()
                    .take(take)
                    .map(|record| record.id.clone()),
            );

            seen += page.len();
            if page.is_empty() || seen >= page.total_records() {
                break;
            }
            page_index += 1;
        }

        let committed = ids.len();
        self.apply(Event::BulkSelectionApplied {
            seq,
            ids,
            error: failure,
        });
        Ok(committed)
    }

    /// Switches the selection mode.
    ///
    /// An existing selection is kept or truncated according to the
    /// configured [`ModeSwitchPolicy`]; the mode otherwise only changes how
    /// future gestures are interpreted.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        self.apply(Event::SelectionModeChanged {
            mode,
            policy: self.mode_switch_policy,
        });
    }

    fn apply(&self, event: Event) {
        if let Ok(mut guard) = self.state.write() {
            guard.apply(event);
        }
    }
}
