//! Record source abstraction.

use async_trait::async_trait;

use crate::error::Error;
use crate::model::Page;

/// A paginated source of artwork records.
///
/// The table core talks to its backend only through this trait, so tests
/// substitute a deterministic in-memory source for the HTTP client. A source
/// decides its own page size; callers read the yield of each page from the
/// returned [`Page`] rather than assuming one.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches the 1-based `page`, returning its records and the total
    /// record count known to the source at fetch time.
    async fn fetch_page(&self, page: u32) -> Result<Page, Error>;
}
