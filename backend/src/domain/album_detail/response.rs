//! Completion statistics and pagination metadata around a selected page.

use serde::Serialize;

use super::batching::{OrderRange, Page, PageCategory};
use super::filter::FilterCriteria;
use super::sticker::AlbumSticker;

/// Whole-album completion figures.
///
/// Always computed over the unfiltered album so that progress does not move
/// while the caller browses filters or pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumProgress {
    /// Number of sticker slots in the album.
    pub total_stickers: usize,
    /// Slots holding at least one copy.
    pub completed_stickers: usize,
    /// `completed / total` as a rounded percentage; zero for empty albums.
    pub percent_completed: u8,
}

impl AlbumProgress {
    /// Compute progress from each slot's held quantity.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::album_detail::AlbumProgress;
    ///
    /// let progress = AlbumProgress::from_quantities([1, 0, 3]);
    /// assert_eq!(progress.completed_stickers, 2);
    /// assert_eq!(progress.percent_completed, 67);
    /// assert_eq!(AlbumProgress::from_quantities([]).percent_completed, 0);
    /// ```
    pub fn from_quantities<I>(quantities: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let (total, completed) = quantities
            .into_iter()
            .fold((0_usize, 0_usize), |(total, completed), quantity| {
                let held = usize::from(quantity > 0);
                (total.saturating_add(1), completed.saturating_add(held))
            });
        Self {
            total_stickers: total,
            completed_stickers: completed,
            percent_completed: rounded_percent(completed, total),
        }
    }
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
fn rounded_percent(part: usize, whole: usize) -> u8 {
    let numerator = part.saturating_mul(200).saturating_add(whole);
    let percent = numerator
        .checked_div(whole.saturating_mul(2))
        .unwrap_or(0);
    u8::try_from(percent).unwrap_or(u8::MAX)
}

/// Name, size and order range of one segment on the selected page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// Display name, including gap or part annotations.
    pub name: String,
    /// Stickers in the segment.
    pub count: usize,
    /// Orders of the segment's first and last sticker, as `"start-end"`.
    pub order_range: OrderRange,
}

impl From<&PageCategory> for CategorySummary {
    fn from(category: &PageCategory) -> Self {
        Self {
            name: category.name().to_owned(),
            count: category.count(),
            order_range: category.order_range(),
        }
    }
}

/// Pagination metadata for the selected page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// 1-based index of the selected page.
    pub current_page: usize,
    /// Number of pages the filtered album spans.
    pub total_pages: usize,
    /// Stickers on the selected page.
    pub stickers_in_page: usize,
    /// Page capacity used for batching.
    pub max_stickers_per_page: usize,
    /// Segments on the selected page.
    pub categories_in_page: Vec<CategorySummary>,
}

/// Composed album detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPage {
    /// Stickers on the selected page, segments concatenated in order.
    pub stickers_list: Vec<AlbumSticker>,
    /// Slots in the whole album.
    pub total_stickers: usize,
    /// Stickers surviving the filters, across all pages.
    pub total_filtered_stickers: usize,
    /// Whole-album completion percentage.
    pub percent_completed: u8,
    /// Filters the page was composed with.
    pub filters: FilterCriteria,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Inputs to [`AlbumPage::assemble`] that do not come from the page itself.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Whole-album progress.
    pub progress: AlbumProgress,
    /// Number of stickers surviving the filters.
    pub total_filtered_stickers: usize,
    /// Filters applied.
    pub filters: FilterCriteria,
    /// 1-based index of `page`.
    pub current_page: usize,
    /// Number of pages produced.
    pub total_pages: usize,
    /// Page capacity used for batching.
    pub max_stickers: usize,
}

impl AlbumPage {
    /// Wrap a selected page with statistics and pagination metadata.
    pub fn assemble(page: Page, context: PageContext) -> Self {
        let categories_in_page: Vec<CategorySummary> =
            page.categories().iter().map(CategorySummary::from).collect();
        let stickers_list: Vec<AlbumSticker> = page
            .into_categories()
            .into_iter()
            .flat_map(PageCategory::into_stickers)
            .collect();

        Self {
            total_stickers: context.progress.total_stickers,
            total_filtered_stickers: context.total_filtered_stickers,
            percent_completed: context.progress.percent_completed,
            filters: context.filters,
            pagination: PaginationMeta {
                current_page: context.current_page,
                total_pages: context.total_pages,
                stickers_in_page: stickers_list.len(),
                max_stickers_per_page: context.max_stickers,
                categories_in_page,
            },
            stickers_list,
        }
    }
}
