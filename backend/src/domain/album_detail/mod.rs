//! Album detail composition.
//!
//! Turns one collector's full sticker list for an album into a single
//! response page. The pipeline runs leaves first:
//!
//! 1. [`annotate_stickers`] attaches trade signals on external views.
//! 2. [`FilterCriteria::apply`] applies ownership and search filters.
//! 3. [`group_by_category`] segments the ordered result by category.
//! 4. [`batch_pages`] packs segments into capacity-bounded pages.
//! 5. [`AlbumPage::assemble`] wraps the selected page with statistics.
//!
//! Every stage is a pure function of its input. Nothing here performs I/O;
//! the caller supplies fully materialised rows.

use std::num::NonZeroUsize;

use thiserror::Error;

mod batching;
mod filter;
mod grouping;
mod ownership;
mod response;
mod sticker;


pub use batching::{OrderRange, Page, PageCategory, batch_pages};
pub use filter::{FilterCriteria, OwnershipFilter, ParseOwnershipFilterError};
pub use grouping::{CategoryGroup, ORDER_GAP_THRESHOLD, group_by_category};
pub use ownership::{AlbumView, TradeSignals, ViewerHoldings, annotate_stickers};
pub use response::{AlbumPage, AlbumProgress, CategorySummary, PageContext, PaginationMeta};
pub use sticker::{AlbumSticker, StickerEntry, UNCATEGORIZED_LABEL};

/// Errors raised while composing an album page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlbumDetailError {
    /// The requested page lies outside `1..=total_pages`.
    #[error("page {requested} not found (album has {total_pages} pages)")]
    PageNotFound {
        /// Page index the caller asked for.
        requested: usize,
        /// Pages available for the current filters.
        total_pages: usize,
    },
}

/// Sort stickers into display order.
///
/// Equal orders fall back to the sticker row id so the result does not
/// depend on the caller's input order.
pub fn sort_by_order(stickers: &mut [AlbumSticker]) {
    stickers.sort_by_key(|sticker| (sticker.entry.order, sticker.entry.id));
}

/// Filter, group and paginate every page of an album.
///
/// Returns the pages in presentation order together with the number of
/// stickers that survived the filters.
pub fn paginate_album(
    owner_stickers: &[StickerEntry],
    view: &AlbumView,
    filter: &FilterCriteria,
    max_stickers: NonZeroUsize,
) -> (Vec<Page>, usize) {
    let mut annotated = annotate_stickers(owner_stickers, view);
    sort_by_order(&mut annotated);
    let filtered = filter.apply(&annotated, view.is_external());
    let filtered_count = filtered.len();
    let pages = batch_pages(group_by_category(filtered), max_stickers);
    (pages, filtered_count)
}

/// Compose the `page`-th (1-based) page of an album detail view.
///
/// Completion statistics cover the whole unfiltered album; the filtered
/// count and page contents reflect `filter`.
///
/// # Errors
///
/// Returns [`AlbumDetailError::PageNotFound`] when `page` is zero or larger
/// than the number of pages, including when the filters leave nothing to
/// page.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use backend::domain::album_detail::{
///     AlbumDetailError, AlbumView, FilterCriteria, compose_album_page,
/// };
///
/// let result = compose_album_page(
///     &[],
///     &AlbumView::Owner,
///     &FilterCriteria::default(),
///     1,
///     NonZeroUsize::MIN,
/// );
/// assert_eq!(
///     result,
///     Err(AlbumDetailError::PageNotFound { requested: 1, total_pages: 0 })
/// );
/// ```
pub fn compose_album_page(
    owner_stickers: &[StickerEntry],
    view: &AlbumView,
    filter: &FilterCriteria,
    page: usize,
    max_stickers: NonZeroUsize,
) -> Result<AlbumPage, AlbumDetailError> {
    let (pages, total_filtered_stickers) =
        paginate_album(owner_stickers, view, filter, max_stickers);
    let total_pages = pages.len();
    let selected = page
        .checked_sub(1)
        .and_then(|index| pages.into_iter().nth(index))
        .ok_or(AlbumDetailError::PageNotFound {
            requested: page,
            total_pages,
        })?;

    let progress = AlbumProgress::from_quantities(owner_stickers.iter().map(|entry| entry.quantity));
    Ok(AlbumPage::assemble(
        selected,
        PageContext {
            progress,
            total_filtered_stickers,
            filters: filter.clone(),
            current_page: page,
            total_pages,
            max_stickers: max_stickers.get(),
        },
    ))
}
