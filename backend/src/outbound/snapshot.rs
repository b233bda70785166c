//! JSON snapshot adapter for the album sticker repository port.
//!
//! A snapshot is a single JSON document holding every album with its
//! denormalised template fields and sticker rows:
//!
//! ```json
//! {
//!   "albums": [
//!     {
//!       "id": 10,
//!       "userId": 1,
//!       "albumTemplateId": 3,
//!       "template": { "name": "World Cup 2026", "image": null, "tags": [] },
//!       "stickers": [
//!         { "id": 1, "templateStickerId": 100, "quantity": 2,
//!           "category": "Flags", "tags": ["gold"], "order": 1, "number": "1" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::album_detail::{StickerEntry, ViewerHoldings};
use crate::domain::ports::{AlbumStickerRepository, AlbumStickerRepositoryError};
use crate::domain::{AlbumTemplateId, UserAlbum, UserAlbumId, UserId};

/// Errors raised while loading an album snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotLoadError {
    /// The snapshot file could not be read.
    #[error("failed to read album snapshot at '{path}': {message}")]
    Io {
        /// Path to the snapshot file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The snapshot JSON is malformed or missing required fields.
    #[error("invalid album snapshot JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// Two albums in the snapshot share an identifier.
    #[error("album {id} appears more than once in the snapshot")]
    DuplicateAlbum {
        /// The repeated album identifier.
        id: UserAlbumId,
    },
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    albums: Vec<RawAlbum>,
}

#[derive(Debug, Deserialize)]
struct RawAlbum {
    #[serde(flatten)]
    album: UserAlbum,
    #[serde(default)]
    stickers: Vec<StickerEntry>,
}

#[derive(Debug, Clone)]
struct StoredAlbum {
    album: UserAlbum,
    stickers: Vec<StickerEntry>,
}

/// In-memory album repository backed by a JSON snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotAlbumStickerRepository {
    albums: BTreeMap<UserAlbumId, StoredAlbum>,
}

impl SnapshotAlbumStickerRepository {
    /// Parse a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotLoadError`] when the JSON is malformed or an album
    /// identifier repeats.
    ///
    /// # Examples
    /// ```
    /// use backend::outbound::snapshot::SnapshotAlbumStickerRepository;
    ///
    /// let repo = SnapshotAlbumStickerRepository::from_json(r#"{ "albums": [] }"#)
    ///     .expect("valid snapshot");
    /// assert!(repo.is_empty());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SnapshotLoadError> {
        let raw: RawSnapshot =
            serde_json::from_str(json).map_err(|e| SnapshotLoadError::Parse {
                message: e.to_string(),
            })?;

        let mut albums = BTreeMap::new();
        for RawAlbum { album, stickers } in raw.albums {
            let id = album.id;
            if albums
                .insert(id, StoredAlbum { album, stickers })
                .is_some()
            {
                return Err(SnapshotLoadError::DuplicateAlbum { id });
            }
        }
        Ok(Self { albums })
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotLoadError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SnapshotLoadError> {
        let io_error = |message: String| SnapshotLoadError::Io {
            path: path.to_path_buf(),
            message,
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("snapshot path must be a file".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;
        let contents = dir
            .read_to_string(Path::new(file_name))
            .map_err(|e| io_error(e.to_string()))?;

        let repo = Self::from_json(&contents)?;
        debug!(path = %path.display(), albums = repo.len(), "album snapshot loaded");
        Ok(repo)
    }

    /// Number of albums in the snapshot.
    pub fn len(&self) -> usize {
        self.albums.len()
    }

    /// Whether the snapshot holds no albums.
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

#[async_trait]
impl AlbumStickerRepository for SnapshotAlbumStickerRepository {
    async fn find_user_album(
        &self,
        user_album_id: UserAlbumId,
    ) -> Result<Option<UserAlbum>, AlbumStickerRepositoryError> {
        Ok(self
            .albums
            .get(&user_album_id)
            .map(|stored| stored.album.clone()))
    }

    async fn list_album_stickers(
        &self,
        user_album_id: UserAlbumId,
    ) -> Result<Vec<StickerEntry>, AlbumStickerRepositoryError> {
        Ok(self
            .albums
            .get(&user_album_id)
            .map(|stored| stored.stickers.clone())
            .unwrap_or_default())
    }

    async fn find_viewer_holdings(
        &self,
        viewer: UserId,
        album_template_id: AlbumTemplateId,
    ) -> Result<Option<ViewerHoldings>, AlbumStickerRepositoryError> {
        let Some(stored) = self.albums.values().find(|stored| {
            stored.album.user_id == viewer && stored.album.album_template_id == album_template_id
        }) else {
            return Ok(None);
        };

        let mut holdings = HashMap::new();
        for entry in &stored.stickers {
            let held = holdings.entry(entry.template_sticker_id).or_insert(0_u32);
            *held = held.saturating_add(entry.quantity);
        }
        Ok(Some(ViewerHoldings::new(holdings)))
    }

    async fn list_user_albums(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserAlbum>, AlbumStickerRepositoryError> {
        Ok(self
            .albums
            .values()
            .filter(|stored| stored.album.user_id == user_id)
            .map(|stored| stored.album.clone())
            .collect())
    }
}
