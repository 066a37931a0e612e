//! Page-by-page iteration over list endpoints.
//!
//! Blueink list endpoints report pagination state in the
//! `X-Blueink-Pagination` response header. [`PaginatedIterator`] wraps a
//! list call and walks pages lazily:
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = blueink::Client::new("blueink_private_key")?;
//! let mut pages = client.bundles().paged_list(1, 50);
//! while let Some(page) = pages.next().await {
//!     let page = page?;
//!     println!("{} bundles on this page", page.data.as_array().map_or(0, |a| a.len()));
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::response::NormalizedResponse;

/// Boxed future produced by a page fetcher.
pub type PageFuture = Pin<Box<dyn Future<Output = Result<NormalizedResponse>> + Send>>;

/// Lazily fetches successive pages of a list endpoint.
///
/// Pages are 1-indexed, matching the API convention. The cursor advances by
/// exactly one page per yield regardless of how many items a page held.
/// Iteration terminates when:
///
/// - the next page number would exceed the server-reported total page count
///   (strictly `next_page > total_pages`);
/// - a response arrives without a pagination header (nothing further is
///   yielded);
/// - a call fails, in which case the error is yielded once and the iterator
///   is exhausted.
pub struct PaginatedIterator<F>
where
    F: FnMut(u32, u32) -> PageFuture,
{
    fetch: F,
    next_page: u32,
    per_page: u32,
    total_pages: Option<u32>,
    done: bool,
}

impl<F> PaginatedIterator<F>
where
    F: FnMut(u32, u32) -> PageFuture,
{
    /// Wrap a page fetcher, starting at `page` with `per_page` items per
    /// request.
    pub fn new(fetch: F, page: u32, per_page: u32) -> Self {
        Self {
            fetch,
            next_page: page,
            per_page,
            total_pages: None,
            done: false,
        }
    }

    /// The page number the next call will request.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// The server-reported total page count, once the first page has been
    /// fetched.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Fetch the next page, or `None` once iteration is exhausted.
    pub async fn next(&mut self) -> Option<Result<NormalizedResponse>> {
        if self.done {
            return None;
        }

        if let Some(total) = self.total_pages {
            if self.next_page > total {
                self.done = true;
                return None;
            }
        }

        let response = match (self.fetch)(self.next_page, self.per_page).await {
            Ok(response) => response,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let Some(pagination) = response.pagination else {
            // A list response without the pagination header carries no page
            // count to walk, so treat it as the end of iteration.
            self.done = true;
            return None;
        };

        if self.total_pages.is_none() {
            self.total_pages = Some(pagination.total_pages);
        }

        self.next_page += 1;
        Some(Ok(response))
    }
}
