//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed album entities and the pure album detail
//! pipeline, plus the service that feeds it from an album repository. Keep
//! types immutable and document serialisation contracts (serde) in each
//! type's Rustdoc.
//!
//! Public surface:
//! - DomainError: error payload returned to callers.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - UserAlbum / AlbumSummary: a collector's album and its progress.
//! - AlbumDetailService: composes album pages over an
//!   [`ports::AlbumStickerRepository`].

pub mod album;
pub mod album_detail;
mod album_detail_service;
pub mod error;
pub mod ports;

pub use self::album::{
    AlbumSummary, AlbumTemplateId, AlbumTemplateSummary, TemplateStickerId, UserAlbum,
    UserAlbumId, UserId,
};
pub use self::album_detail_service::{
    AlbumDetailService, DEFAULT_MAX_STICKERS, MAX_STICKERS_LIMIT, PageLimits,
};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use backend::domain::{DomainError, DomainResult};
///
/// fn lookup() -> DomainResult<u32> {
///     Err(DomainError::not_found("album not found"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
