//! Album detail composition for a sticker-trading backend.
//!
//! The crate turns a collector's raw sticker rows into paged, category
//! grouped album views, annotating each sticker with trade signals when
//! somebody else is browsing the album. The pure pipeline lives in
//! [`domain::album_detail`]; [`domain::AlbumDetailService`] feeds it from an
//! [`domain::ports::AlbumStickerRepository`] adapter.

pub mod config;
pub mod domain;
pub mod outbound;
