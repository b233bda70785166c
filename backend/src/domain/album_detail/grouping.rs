//! Contiguous category segmentation of the filtered sticker sequence.
//!
//! The sequence is walked once, folding each sticker into the last open
//! group or starting a new one. A new group starts when the raw category
//! changes, or when the category repeats but its order jumps by more than
//! [`ORDER_GAP_THRESHOLD`] past the group's last sticker. Gap splits get a
//! range-annotated display label such as `"Country (1xx)"`; the raw category
//! stays the grouping key so later stickers of the same category keep
//! extending the annotated group.

use super::sticker::AlbumSticker;

/// Largest order jump a category run absorbs before it is split.
pub const ORDER_GAP_THRESHOLD: i64 = 50;

/// A label-bearing, order-contiguous run of stickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    raw_category: String,
    display_label: String,
    stickers: Vec<AlbumSticker>,
    start_order: i64,
    end_order: i64,
}

impl CategoryGroup {
    fn open(sticker: AlbumSticker, display_label: String) -> Self {
        let order = sticker.order();
        Self {
            raw_category: sticker.entry.category_key().to_owned(),
            display_label,
            stickers: vec![sticker],
            start_order: order,
            end_order: order,
        }
    }

    fn continues_with(&self, sticker: &AlbumSticker) -> bool {
        self.raw_category == sticker.entry.category_key()
            && sticker.order().saturating_sub(self.end_order) <= ORDER_GAP_THRESHOLD
    }

    fn absorb(&mut self, sticker: AlbumSticker) {
        self.end_order = sticker.order();
        self.stickers.push(sticker);
    }

    /// Category shared by every sticker in the group.
    pub fn raw_category(&self) -> &str {
        self.raw_category.as_str()
    }

    /// Label shown to the viewer.
    pub fn display_label(&self) -> &str {
        self.display_label.as_str()
    }

    /// Stickers in the group, in sequence order.
    pub fn stickers(&self) -> &[AlbumSticker] {
        &self.stickers
    }

    /// Order of the first sticker absorbed.
    pub const fn start_order(&self) -> i64 {
        self.start_order
    }

    /// Order of the last sticker absorbed.
    pub const fn end_order(&self) -> i64 {
        self.end_order
    }

    /// Number of stickers in the group.
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    /// Whether the group holds no stickers.
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    /// Split the group into its display label and stickers.
    pub fn into_parts(self) -> (String, Vec<AlbumSticker>) {
        (self.display_label, self.stickers)
    }
}

/// Label for a run split off by an order gap, e.g. `"Country (1xx)"`.
fn gap_label(category: &str, order: i64) -> String {
    format!("{category} ({}xx)", order.div_euclid(100))
}

/// Partition stickers, already sorted by order, into category groups.
///
/// # Examples
/// ```
/// use backend::domain::TemplateStickerId;
/// use backend::domain::album_detail::{AlbumSticker, StickerEntry, group_by_category};
///
/// let stickers: Vec<AlbumSticker> = [1, 2, 3, 160]
///     .into_iter()
///     .map(|order| AlbumSticker {
///         entry: StickerEntry {
///             id: order as u64,
///             template_sticker_id: TemplateStickerId::new(order as u64),
///             quantity: 0,
///             category: Some("Country".to_owned()),
///             tags: Vec::new(),
///             order,
///             number: order.to_string(),
///         },
///         trade: None,
///     })
///     .collect();
///
/// let groups = group_by_category(stickers);
/// let labels: Vec<_> = groups.iter().map(|group| group.display_label()).collect();
/// assert_eq!(labels, ["Country", "Country (1xx)"]);
/// ```
pub fn group_by_category(stickers: Vec<AlbumSticker>) -> Vec<CategoryGroup> {
    stickers
        .into_iter()
        .fold(Vec::new(), |mut groups: Vec<CategoryGroup>, sticker| {
            match groups.last_mut() {
                Some(current) if current.continues_with(&sticker) => current.absorb(sticker),
                last => {
                    let category = sticker.entry.category_key();
                    let label = if last.is_some_and(|group| group.raw_category == category) {
                        gap_label(category, sticker.order())
                    } else {
                        category.to_owned()
                    };
                    groups.push(CategoryGroup::open(sticker, label));
                }
            }
            groups
        })
}
