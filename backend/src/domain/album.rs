//! Album identity and read-model types shared by the album ports.
//!
//! Identifiers are transparent newtypes over the numeric keys used by the
//! datastore so that a user id can never be passed where an album id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_numeric_id {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw datastore key.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the raw datastore key.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_numeric_id! {
    /// Collector (user) identifier.
    UserId
}

define_numeric_id! {
    /// Identifier of one collector's copy of an album.
    UserAlbumId
}

define_numeric_id! {
    /// Identifier of the album template shared by every collector.
    AlbumTemplateId
}

define_numeric_id! {
    /// Identifier of a template sticker slot within an album template.
    TemplateStickerId
}

/// Presentation fields copied from the album template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumTemplateSummary {
    /// Display name of the album.
    pub name: String,
    /// Cover image location, when the template has one.
    #[serde(default)]
    pub image: Option<String>,
    /// Free-form template tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A collector's album as stored by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAlbum {
    /// Identifier of this collector's album.
    pub id: UserAlbumId,
    /// Owner of the album.
    pub user_id: UserId,
    /// Template the album was created from.
    pub album_template_id: AlbumTemplateId,
    /// Template presentation fields.
    pub template: AlbumTemplateSummary,
}

impl UserAlbum {
    /// Whether `viewer` is looking at somebody else's album.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AlbumTemplateId, AlbumTemplateSummary, UserAlbum, UserAlbumId, UserId};
    ///
    /// let album = UserAlbum {
    ///     id: UserAlbumId::new(7),
    ///     user_id: UserId::new(1),
    ///     album_template_id: AlbumTemplateId::new(3),
    ///     template: AlbumTemplateSummary::default(),
    /// };
    /// assert!(album.is_external_to(UserId::new(2)));
    /// assert!(!album.is_external_to(UserId::new(1)));
    /// ```
    pub fn is_external_to(&self, viewer: UserId) -> bool {
        self.user_id != viewer
    }
}

/// Progress summary for one album in a collector's album list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    /// Identifier of the collector's album.
    pub user_album_id: UserAlbumId,
    /// Template the album was created from.
    pub album_template_id: AlbumTemplateId,
    /// Template presentation fields.
    #[serde(flatten)]
    pub template: AlbumTemplateSummary,
    /// Number of sticker slots in the album.
    pub total_stickers: usize,
    /// Rounded share of slots with at least one sticker.
    pub percent_completed: u8,
}
