//! Page slicing with out-of-range clamping.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpecError};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Zero-based page index and page size.
///
/// A size of zero breaks the caller contract; the engine reads it as one so
/// that rendering never fails, and [`PageSpec::validate`] reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSpec {
    pub index: usize,
    pub size: usize,
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageSpec {
    pub fn new(index: usize, size: usize) -> Self {
        PageSpec { index, size }
    }

    /// First page of the given size.
    pub fn first(size: usize) -> Self {
        PageSpec::new(0, size)
    }

    /// Page size with the zero-size contract violation absorbed.
    pub fn effective_size(&self) -> usize {
        self.size.max(1)
    }

    /// Number of pages needed for `total` records; at least one.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.effective_size()).max(1)
    }

    /// Index clamped into `0..total_pages(total)`.
    pub fn clamped_index(&self, total: usize) -> usize {
        self.index.min(self.total_pages(total) - 1)
    }

    /// Changes the page size. The index resets to 0 when it would fall past
    /// the last page under the new size.
    pub fn resize(self, size: usize, total: usize) -> Self {
        let resized = PageSpec::new(self.index, size);
        if resized.index >= resized.total_pages(total) {
            PageSpec::first(size)
        } else {
            resized
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(SpecError::ZeroPageSize);
        }
        Ok(())
    }
}

/// One page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub records: Vec<&'a T>,
    /// The index actually served, after clamping.
    pub index: usize,
    pub total_pages: usize,
}

/// Slices `records` to the page described by `page`.
///
/// `total_pages` is `ceil(len / size)` but never less than one, so an empty
/// collection has a single empty page. An index past the end clamps to the
/// last page instead of producing an empty overflow page.
///
/// ```
/// use tabview::{paginate, PageSpec};
///
/// let rows = vec![1, 2, 3, 4, 5];
/// let page = paginate(&rows, PageSpec::new(9999, 2));
/// assert_eq!(page.index, 2);
/// assert_eq!(page.records, vec![&5]);
/// assert_eq!(page.total_pages, 3);
/// ```
pub fn paginate<'a, T, I>(records: I, page: PageSpec) -> Page<'a, T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    let all: Vec<&'a T> = records.into_iter().collect();
    let total_pages = page.total_pages(all.len());
    let index = page.clamped_index(all.len());
    let size = page.effective_size();

    let records = all.into_iter().skip(index * size).take(size).collect();

    Page {
        records,
        index,
        total_pages,
    }
}
