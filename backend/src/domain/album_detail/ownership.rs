//! Cross-collector ownership comparison.
//!
//! When a collector browses somebody else's album, each sticker is tagged
//! with whether a trade is possible in either direction. Owner views carry no
//! signals at all.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::TemplateStickerId;

use super::sticker::{AlbumSticker, StickerEntry};

/// The requester's own quantities for the album template being viewed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerHoldings(HashMap<TemplateStickerId, u32>);

impl ViewerHoldings {
    /// Build holdings from `(template sticker, quantity)` pairs.
    pub fn new(holdings: HashMap<TemplateStickerId, u32>) -> Self {
        Self(holdings)
    }

    /// Quantity the viewer holds for `template`, if they hold the slot at all.
    pub fn quantity_for(&self, template: TemplateStickerId) -> Option<u32> {
        self.0.get(&template).copied()
    }

    /// Number of template slots the viewer has a holding for.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the viewer holds no slots for the template.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(TemplateStickerId, u32)> for ViewerHoldings {
    fn from_iter<T: IntoIterator<Item = (TemplateStickerId, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whose album is being viewed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AlbumView {
    /// The requester owns the album.
    #[default]
    Owner,
    /// The requester is browsing another collector's album. Empty holdings
    /// mean the viewer has no album for this template.
    External(ViewerHoldings),
}

impl AlbumView {
    /// Build a view from the external flag and optional viewer holdings.
    ///
    /// Holdings are ignored on owner views; an external view without
    /// holdings treats every template slot as not held.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::album_detail::AlbumView;
    ///
    /// assert_eq!(AlbumView::from_parts(false, None), AlbumView::Owner);
    /// assert!(AlbumView::from_parts(true, None).is_external());
    /// ```
    pub fn from_parts(is_external: bool, holdings: Option<ViewerHoldings>) -> Self {
        if is_external {
            Self::External(holdings.unwrap_or_default())
        } else {
            Self::Owner
        }
    }

    /// Whether trade signals apply to this view.
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// Trade signals attached to a sticker on an external view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSignals {
    /// The owner holds a spare the viewer lacks.
    pub you_need: bool,
    /// The viewer holds a spare the owner lacks.
    pub you_have: bool,
}

impl TradeSignals {
    /// Compare the owner's quantity with the viewer's holding for one slot.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::album_detail::TradeSignals;
    ///
    /// let signals = TradeSignals::compare(2, None);
    /// assert!(signals.you_need);
    /// assert!(!signals.you_have);
    /// ```
    pub fn compare(owner_quantity: u32, viewer_quantity: Option<u32>) -> Self {
        let viewer_lacks = viewer_quantity.is_none_or(|quantity| quantity == 0);
        let viewer_has_spare = viewer_quantity.is_some_and(|quantity| quantity > 1);
        Self {
            you_need: viewer_lacks && owner_quantity > 1,
            you_have: viewer_has_spare && owner_quantity == 0,
        }
    }
}

/// Attach trade signals to each of the owner's stickers.
///
/// Entries keep their input order. On [`AlbumView::Owner`] no signals are
/// computed.
pub fn annotate_stickers(stickers: &[StickerEntry], view: &AlbumView) -> Vec<AlbumSticker> {
    stickers
        .iter()
        .map(|entry| AlbumSticker {
            trade: match view {
                AlbumView::Owner => None,
                AlbumView::External(holdings) => Some(TradeSignals::compare(
                    entry.quantity,
                    holdings.quantity_for(entry.template_sticker_id),
                )),
            },
            entry: entry.clone(),
        })
        .collect()
}
