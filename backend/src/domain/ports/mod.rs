//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod album_detail_query;
mod album_sticker_repository;

pub use album_detail_query::{
    AlbumDetailQuery, AlbumDetailResponse, AlbumPageRequest, FixtureAlbumDetailQuery,
};
#[cfg(test)]
pub use album_sticker_repository::MockAlbumStickerRepository;
pub use album_sticker_repository::{
    AlbumStickerRepository, AlbumStickerRepositoryError, FixtureAlbumStickerRepository,
};
