//! Ownership and free-text filters applied before grouping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sticker::AlbumSticker;

/// Ownership states a caller can restrict the album view to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipFilter {
    /// At least one copy held.
    Collected,
    /// No copies held.
    Missing,
    /// More than one copy held.
    Duplicate,
    /// The owner has a spare the viewer lacks. External views only.
    YouNeed,
    /// The viewer has a spare the owner lacks. External views only.
    YouHave,
}

/// Error returned when parsing an ownership filter from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOwnershipFilterError {
    value: String,
}

impl fmt::Display for OwnershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collected => f.write_str("collected"),
            Self::Missing => f.write_str("missing"),
            Self::Duplicate => f.write_str("duplicate"),
            Self::YouNeed => f.write_str("you_need"),
            Self::YouHave => f.write_str("you_have"),
        }
    }
}

impl fmt::Display for ParseOwnershipFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid ownership filter '{}' (expected collected, missing, duplicate, you_need or you_have)",
            self.value
        )
    }
}

impl std::error::Error for ParseOwnershipFilterError {}

impl FromStr for OwnershipFilter {
    type Err = ParseOwnershipFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "collected" => Ok(Self::Collected),
            "missing" => Ok(Self::Missing),
            "duplicate" => Ok(Self::Duplicate),
            "you_need" => Ok(Self::YouNeed),
            "you_have" => Ok(Self::YouHave),
            _ => Err(ParseOwnershipFilterError {
                value: value.to_owned(),
            }),
        }
    }
}

impl OwnershipFilter {
    /// Whether `sticker` passes this filter.
    ///
    /// Trade filters only apply to external views; on an owner view they
    /// pass every sticker.
    pub fn matches(self, sticker: &AlbumSticker, is_external: bool) -> bool {
        let quantity = sticker.entry.quantity;
        match self {
            Self::Collected => quantity > 0,
            Self::Missing => quantity == 0,
            Self::Duplicate => quantity > 1,
            Self::YouNeed if is_external => sticker.trade.is_some_and(|trade| trade.you_need),
            Self::YouHave if is_external => sticker.trade.is_some_and(|trade| trade.you_have),
            Self::YouNeed | Self::YouHave => true,
        }
    }
}

/// Filters requested by the caller. Both are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Ownership predicate.
    pub ownership: Option<OwnershipFilter>,
    /// Free-text search terms.
    pub terms: Option<String>,
}

impl FilterCriteria {
    /// Build criteria, treating empty search terms as absent.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::album_detail::{FilterCriteria, OwnershipFilter};
    ///
    /// let criteria = FilterCriteria::new(Some(OwnershipFilter::Missing), Some(String::new()));
    /// assert_eq!(criteria.terms, None);
    /// ```
    pub fn new(ownership: Option<OwnershipFilter>, terms: Option<String>) -> Self {
        Self {
            ownership,
            terms: terms.filter(|value| !value.is_empty()),
        }
    }

    /// Keep the stickers that satisfy both predicates, preserving order.
    pub fn apply(&self, stickers: &[AlbumSticker], is_external: bool) -> Vec<AlbumSticker> {
        let needle = self.terms.as_deref().map(str::to_lowercase);
        stickers
            .iter()
            .filter(|sticker| {
                self.ownership
                    .is_none_or(|ownership| ownership.matches(sticker, is_external))
            })
            .filter(|sticker| {
                needle
                    .as_deref()
                    .is_none_or(|term| matches_search_term(sticker, term))
            })
            .cloned()
            .collect()
    }
}

/// Text predicate over an already lowercased `term`.
///
/// Number and category match as case-insensitive substrings. Tags only match
/// when a raw tag equals the lowercased term exactly.
fn matches_search_term(sticker: &AlbumSticker, term: &str) -> bool {
    let entry = &sticker.entry;
    let number_matches = entry.number.to_lowercase().contains(term);
    let category_matches = entry
        .category
        .as_deref()
        .is_some_and(|category| category.to_lowercase().contains(term));
    let tag_matches = entry.tags.iter().any(|tag| tag == term);
    number_matches || category_matches || tag_matches
}
