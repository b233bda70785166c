//! Sticker rows consumed by the album detail pipeline.

use serde::{Deserialize, Serialize};

use crate::domain::TemplateStickerId;

use super::ownership::TradeSignals;

/// Grouping key used when a template sticker has no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// One collector's sticker slot with its denormalised template fields.
///
/// `order` is the template's global sequence position. It is only
/// meaningful for display ordering and is neither unique nor contiguous
/// across an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerEntry {
    /// Identifier of the collector's sticker row.
    pub id: u64,
    /// Template slot this row belongs to.
    pub template_sticker_id: TemplateStickerId,
    /// Number of copies the collector holds.
    pub quantity: u32,
    /// Template category; absent categories group under
    /// [`UNCATEGORIZED_LABEL`].
    #[serde(default)]
    pub category: Option<String>,
    /// Template tags, matched verbatim by the search filter.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Global sequence position within the album.
    pub order: i64,
    /// Printed sticker number.
    pub number: String,
}

impl StickerEntry {
    /// Category used as the grouping key.
    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED_LABEL)
    }

    /// Whether the collector holds at least one copy.
    pub const fn is_collected(&self) -> bool {
        self.quantity > 0
    }
}

/// A sticker entry annotated with cross-collector trade signals.
///
/// `trade` is `None` on an owner's view of their own album so the signals
/// are absent from the wire format rather than reported as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSticker {
    /// Underlying sticker row.
    #[serde(flatten)]
    pub entry: StickerEntry,
    /// Trade signals computed for external views.
    #[serde(flatten)]
    pub trade: Option<TradeSignals>,
}

impl AlbumSticker {
    /// Global sequence position of the underlying entry.
    pub const fn order(&self) -> i64 {
        self.entry.order
    }
}
