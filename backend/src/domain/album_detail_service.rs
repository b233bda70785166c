//! Album detail domain service.
//!
//! Gathers the owner's rows and, for external views, the viewer's holdings
//! from the repository, then hands them to the pure composition pipeline.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::album_detail::{
    AlbumDetailError, AlbumProgress, AlbumView, ViewerHoldings, compose_album_page,
};
use crate::domain::ports::{
    AlbumDetailQuery, AlbumDetailResponse, AlbumPageRequest, AlbumStickerRepository,
    AlbumStickerRepositoryError,
};
use crate::domain::{AlbumSummary, DomainError, UserAlbum, UserId};

/// Page capacity used when neither the request nor configuration sets one.
pub const DEFAULT_MAX_STICKERS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);
/// Largest page capacity accepted when configuration sets no limit.
pub const MAX_STICKERS_LIMIT: NonZeroUsize = NonZeroUsize::MIN.saturating_add(499);

/// Page capacity bounds applied to incoming requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default_max_stickers: NonZeroUsize,
    max_stickers_limit: NonZeroUsize,
}

impl PageLimits {
    /// Build limits, capping the default at the limit.
    pub fn new(default_max_stickers: NonZeroUsize, max_stickers_limit: NonZeroUsize) -> Self {
        Self {
            default_max_stickers: default_max_stickers.min(max_stickers_limit),
            max_stickers_limit,
        }
    }

    /// Capacity used when a request omits one.
    pub const fn default_max_stickers(&self) -> NonZeroUsize {
        self.default_max_stickers
    }

    /// Largest capacity a request may ask for.
    pub const fn max_stickers_limit(&self) -> NonZeroUsize {
        self.max_stickers_limit
    }

    fn resolve(&self, requested: Option<usize>) -> Result<NonZeroUsize, DomainError> {
        let Some(raw) = requested else {
            return Ok(self.default_max_stickers);
        };
        NonZeroUsize::new(raw)
            .filter(|value| *value <= self.max_stickers_limit)
            .ok_or_else(|| {
                DomainError::invalid_request(format!(
                    "maxStickers must be between 1 and {}",
                    self.max_stickers_limit
                ))
                .with_details(json!({
                    "field": "maxStickers",
                    "value": raw,
                    "max": self.max_stickers_limit.get(),
                }))
            })
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STICKERS, MAX_STICKERS_LIMIT)
    }
}

fn map_repository_error(error: AlbumStickerRepositoryError) -> DomainError {
    error!(error = %error, "album sticker repository failed");
    match error {
        AlbumStickerRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("album repository unavailable: {message}"))
        }
        AlbumStickerRepositoryError::Query { message } => {
            DomainError::internal(format!("album repository error: {message}"))
        }
    }
}

fn map_compose_error(error: AlbumDetailError) -> DomainError {
    match error {
        AlbumDetailError::PageNotFound {
            requested,
            total_pages,
        } => DomainError::not_found("page not found").with_details(json!({
            "requestedPage": requested,
            "totalPages": total_pages,
        })),
    }
}

/// Album detail service implementing the browsing driving port.
#[derive(Clone)]
pub struct AlbumDetailService<R> {
    album_repo: Arc<R>,
    limits: PageLimits,
}

impl<R> AlbumDetailService<R> {
    /// Create a new service over the album repository.
    pub fn new(album_repo: Arc<R>, limits: PageLimits) -> Self {
        Self { album_repo, limits }
    }
}

impl<R> AlbumDetailService<R>
where
    R: AlbumStickerRepository,
{
    async fn require_album(&self, request: &AlbumPageRequest) -> Result<UserAlbum, DomainError> {
        self.album_repo
            .find_user_album(request.user_album_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found("album not found"))
    }

    async fn resolve_view(
        &self,
        album: &UserAlbum,
        viewer: UserId,
    ) -> Result<AlbumView, DomainError> {
        if !album.is_external_to(viewer) {
            return Ok(AlbumView::Owner);
        }
        let holdings = self
            .album_repo
            .find_viewer_holdings(viewer, album.album_template_id)
            .await
            .map_err(map_repository_error)?;
        debug!(
            %viewer,
            held_slots = holdings.as_ref().map_or(0, ViewerHoldings::len),
            "resolved external album view"
        );
        Ok(AlbumView::from_parts(true, holdings))
    }

    async fn summarise(&self, album: UserAlbum) -> Result<AlbumSummary, DomainError> {
        let stickers = self
            .album_repo
            .list_album_stickers(album.id)
            .await
            .map_err(map_repository_error)?;
        let progress = AlbumProgress::from_quantities(stickers.iter().map(|entry| entry.quantity));
        Ok(AlbumSummary {
            user_album_id: album.id,
            album_template_id: album.album_template_id,
            template: album.template,
            total_stickers: progress.total_stickers,
            percent_completed: progress.percent_completed,
        })
    }
}

#[async_trait]
impl<R> AlbumDetailQuery for AlbumDetailService<R>
where
    R: AlbumStickerRepository,
{
    async fn fetch_album_page(
        &self,
        request: AlbumPageRequest,
    ) -> Result<AlbumDetailResponse, DomainError> {
        let page = request.page.unwrap_or(1);
        if page == 0 {
            return Err(DomainError::invalid_request("page must be at least 1")
                .with_details(json!({ "field": "page", "value": 0 })));
        }
        let max_stickers = self.limits.resolve(request.max_stickers)?;

        let album = self.require_album(&request).await?;
        let view = self.resolve_view(&album, request.viewer_id).await?;
        let stickers = self
            .album_repo
            .list_album_stickers(album.id)
            .await
            .map_err(map_repository_error)?;

        let composed = compose_album_page(&stickers, &view, &request.filter, page, max_stickers)
            .map_err(|err| {
                warn!(user_album_id = %album.id, page, error = %err, "album page out of range");
                map_compose_error(err)
            })?;
        debug!(
            user_album_id = %album.id,
            page,
            total_pages = composed.pagination.total_pages,
            external = view.is_external(),
            "album page composed"
        );

        Ok(AlbumDetailResponse {
            id: album.id,
            album_template_id: album.album_template_id,
            user_id: album.user_id,
            template: album.template,
            page: composed,
        })
    }

    async fn list_album_summaries(
        &self,
        user_id: UserId,
    ) -> Result<Vec<AlbumSummary>, DomainError> {
        let albums = self
            .album_repo
            .list_user_albums(user_id)
            .await
            .map_err(map_repository_error)?;
        let mut summaries = Vec::with_capacity(albums.len());
        for album in albums {
            summaries.push(self.summarise(album).await?);
        }
        Ok(summaries)
    }
}

#[cfg(test)]
#[path = "album_detail_service_tests.rs"]
mod tests;
