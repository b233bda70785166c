//! Capacity-bounded paging of category groups.
//!
//! Groups are packed whole into pages of at most `max_stickers` stickers. A
//! group larger than a page is flushed onto pages of its own, split into
//! consecutive chunks labelled `"<label> (parte N)"` except for the final
//! chunk, which keeps the plain label. Concatenating every page's stickers
//! in page order always reproduces the input sequence.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Serialize, Serializer};

use super::grouping::CategoryGroup;
use super::sticker::AlbumSticker;

/// First and last order values covered by a page segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRange {
    /// Order of the first sticker.
    pub start: i64,
    /// Order of the last sticker.
    pub end: i64,
}

impl OrderRange {
    /// Range covered by `stickers`, or `None` when the slice is empty.
    pub fn spanning(stickers: &[AlbumSticker]) -> Option<Self> {
        let first = stickers.first()?;
        let last = stickers.last()?;
        Some(Self {
            start: first.order(),
            end: last.order(),
        })
    }
}

impl fmt::Display for OrderRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for OrderRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One labelled segment on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCategory {
    name: String,
    order_range: OrderRange,
    stickers: Vec<AlbumSticker>,
}

impl PageCategory {
    fn from_group(group: CategoryGroup) -> Self {
        let order_range = OrderRange {
            start: group.start_order(),
            end: group.end_order(),
        };
        let (name, stickers) = group.into_parts();
        Self {
            name,
            order_range,
            stickers,
        }
    }

    fn from_chunk(name: String, stickers: Vec<AlbumSticker>) -> Option<Self> {
        let order_range = OrderRange::spanning(&stickers)?;
        Some(Self {
            name,
            order_range,
            stickers,
        })
    }

    /// Display name of the segment.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Number of stickers in the segment.
    pub fn count(&self) -> usize {
        self.stickers.len()
    }

    /// Order range of the segment.
    pub const fn order_range(&self) -> OrderRange {
        self.order_range
    }

    /// Stickers in the segment.
    pub fn stickers(&self) -> &[AlbumSticker] {
        &self.stickers
    }

    /// Consume the segment, returning its stickers.
    pub fn into_stickers(self) -> Vec<AlbumSticker> {
        self.stickers
    }
}

/// A capacity-bounded page of category segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    categories: Vec<PageCategory>,
}

impl Page {
    /// Segments on the page, in presentation order.
    pub fn categories(&self) -> &[PageCategory] {
        &self.categories
    }

    /// Total stickers across every segment.
    pub fn sticker_count(&self) -> usize {
        self.categories.iter().map(PageCategory::count).sum()
    }

    /// Consume the page, returning its segments.
    pub fn into_categories(self) -> Vec<PageCategory> {
        self.categories
    }
}

/// Fold state: completed pages plus the batch being filled.
struct Batcher {
    capacity: usize,
    pages: Vec<Page>,
    batch: Vec<PageCategory>,
    batch_count: usize,
}

impl Batcher {
    const fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: capacity.get(),
            pages: Vec::new(),
            batch: Vec::new(),
            batch_count: 0,
        }
    }

    fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        let categories = std::mem::take(&mut self.batch);
        self.pages.push(Page { categories });
        self.batch_count = 0;
    }

    fn push_group(mut self, group: CategoryGroup) -> Self {
        let size = group.len();
        if size > self.capacity {
            self.flush();
            self.push_oversized(group);
            return self;
        }
        if self.batch_count.saturating_add(size) > self.capacity {
            self.flush();
        }
        self.batch.push(PageCategory::from_group(group));
        self.batch_count = self.batch_count.saturating_add(size);
        self
    }

    fn push_oversized(&mut self, group: CategoryGroup) {
        let (label, mut remaining) = group.into_parts();
        let mut part = 1_usize;
        while !remaining.is_empty() {
            let tail = remaining.split_off(self.capacity.min(remaining.len()));
            let chunk = std::mem::replace(&mut remaining, tail);
            let name = if remaining.is_empty() {
                label.clone()
            } else {
                format!("{label} (parte {part})")
            };
            if let Some(category) = PageCategory::from_chunk(name, chunk) {
                self.pages.push(Page {
                    categories: vec![category],
                });
            }
            part = part.saturating_add(1);
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.flush();
        self.pages
    }
}

/// Pack category groups into pages holding at most `max_stickers` stickers.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use backend::domain::album_detail::{batch_pages, group_by_category};
///
/// let pages = batch_pages(group_by_category(Vec::new()), NonZeroUsize::MIN);
/// assert!(pages.is_empty());
/// ```
pub fn batch_pages(groups: Vec<CategoryGroup>, max_stickers: NonZeroUsize) -> Vec<Page> {
    groups
        .into_iter()
        .fold(Batcher::new(max_stickers), Batcher::push_group)
        .finish()
}
