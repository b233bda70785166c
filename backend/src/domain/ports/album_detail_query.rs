//! Driving port for album detail pages and album progress summaries.
//!
//! Inbound adapters use this port to browse a collector's album without
//! importing storage concerns. The page itself is composed by the pure
//! `album_detail` pipeline; implementations only gather its inputs.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::album_detail::{AlbumPage, FilterCriteria};
use crate::domain::{
    AlbumSummary, AlbumTemplateId, AlbumTemplateSummary, DomainError, UserAlbumId, UserId,
};

/// Request for one page of an album detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumPageRequest {
    /// Album being browsed.
    pub user_album_id: UserAlbumId,
    /// Collector making the request.
    pub viewer_id: UserId,
    /// 1-based page index; defaults to the first page.
    pub page: Option<usize>,
    /// Page capacity; defaults to the configured capacity.
    pub max_stickers: Option<usize>,
    /// Ownership and search filters.
    pub filter: FilterCriteria,
}

impl AlbumPageRequest {
    /// Request the first page of an album with default capacity and no
    /// filters.
    pub fn first_page(user_album_id: UserAlbumId, viewer_id: UserId) -> Self {
        Self {
            user_album_id,
            viewer_id,
            page: None,
            max_stickers: None,
            filter: FilterCriteria::default(),
        }
    }
}

/// Album detail page together with the album's identity and template
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetailResponse {
    /// Album being browsed.
    pub id: UserAlbumId,
    /// Template the album was created from.
    pub album_template_id: AlbumTemplateId,
    /// Owner of the album.
    pub user_id: UserId,
    /// Template presentation fields.
    #[serde(flatten)]
    pub template: AlbumTemplateSummary,
    /// Composed page, statistics and pagination metadata.
    #[serde(flatten)]
    pub page: AlbumPage,
}

/// Domain use-case port for browsing albums.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlbumDetailQuery: Send + Sync {
    /// Compose one page of an album for the requesting collector.
    async fn fetch_album_page(
        &self,
        request: AlbumPageRequest,
    ) -> Result<AlbumDetailResponse, DomainError>;

    /// Summarise completion for every album a collector holds.
    async fn list_album_summaries(&self, user_id: UserId) -> Result<Vec<AlbumSummary>, DomainError>;
}

/// Fixture query with no albums.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlbumDetailQuery;

#[async_trait]
impl AlbumDetailQuery for FixtureAlbumDetailQuery {
    async fn fetch_album_page(
        &self,
        _request: AlbumPageRequest,
    ) -> Result<AlbumDetailResponse, DomainError> {
        Err(DomainError::not_found("album not found"))
    }

    async fn list_album_summaries(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<AlbumSummary>, DomainError> {
        Ok(Vec::new())
    }
}
