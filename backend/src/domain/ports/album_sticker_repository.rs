//! Port for reading collectors' albums and their sticker rows.

use async_trait::async_trait;

use crate::domain::album_detail::{StickerEntry, ViewerHoldings};
use crate::domain::{AlbumTemplateId, UserAlbum, UserAlbumId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by album sticker repository adapters.
    pub enum AlbumStickerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "album sticker repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "album sticker repository query failed: {message}",
    }
}

/// Port for reading album rows with their denormalised template fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlbumStickerRepository: Send + Sync {
    /// Find a collector's album by id.
    async fn find_user_album(
        &self,
        user_album_id: UserAlbumId,
    ) -> Result<Option<UserAlbum>, AlbumStickerRepositoryError>;

    /// List every sticker row of an album, in any order.
    async fn list_album_stickers(
        &self,
        user_album_id: UserAlbumId,
    ) -> Result<Vec<StickerEntry>, AlbumStickerRepositoryError>;

    /// Quantities `viewer` holds for `album_template_id`, or `None` when the
    /// viewer has no album for that template.
    async fn find_viewer_holdings(
        &self,
        viewer: UserId,
        album_template_id: AlbumTemplateId,
    ) -> Result<Option<ViewerHoldings>, AlbumStickerRepositoryError>;

    /// List the albums a collector holds.
    async fn list_user_albums(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserAlbum>, AlbumStickerRepositoryError>;
}

/// Fixture implementation for tests that do not exercise album storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlbumStickerRepository;

#[async_trait]
impl AlbumStickerRepository for FixtureAlbumStickerRepository {
    async fn find_user_album(
        &self,
        _user_album_id: UserAlbumId,
    ) -> Result<Option<UserAlbum>, AlbumStickerRepositoryError> {
        Ok(None)
    }

    async fn list_album_stickers(
        &self,
        _user_album_id: UserAlbumId,
    ) -> Result<Vec<StickerEntry>, AlbumStickerRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_viewer_holdings(
        &self,
        _viewer: UserId,
        _album_template_id: AlbumTemplateId,
    ) -> Result<Option<ViewerHoldings>, AlbumStickerRepositoryError> {
        Ok(None)
    }

    async fn list_user_albums(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<UserAlbum>, AlbumStickerRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[tokio::test]
    async fn fixture_repository_reports_no_albums() {
        let repo = FixtureAlbumStickerRepository;

        let album = repo
            .find_user_album(UserAlbumId::new(1))
            .await
            .expect("fixture lookup succeeds");
        let albums = repo
            .list_user_albums(UserId::new(1))
            .await
            .expect("fixture listing succeeds");

        assert!(album.is_none());
        assert!(albums.is_empty());
    }

    #[test]
    fn error_messages_name_the_repository() {
        let err = AlbumStickerRepositoryError::connection("refused");
        assert_eq!(
            err.to_string(),
            "album sticker repository connection failed: refused"
        );
    }
}
