//! Album detail configuration loaded via OrthoConfig.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_MAX_STICKERS, MAX_STICKERS_LIMIT, PageLimits};

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("album-snapshot.json")
}

/// Configuration values controlling album detail pagination.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ALBUM_DETAIL")]
pub struct AlbumDetailSettings {
    /// Page capacity used when a request omits one.
    #[ortho_config(default = 100)]
    pub default_max_stickers: usize,
    /// Largest page capacity a request may ask for.
    #[ortho_config(default = 500)]
    pub max_stickers_limit: usize,
    /// Optional album snapshot path override.
    pub snapshot_path: Option<PathBuf>,
}

impl AlbumDetailSettings {
    /// Return the configured page limits. Zero values fall back to the
    /// defaults.
    pub fn page_limits(&self) -> PageLimits {
        let limit = NonZeroUsize::new(self.max_stickers_limit).unwrap_or(MAX_STICKERS_LIMIT);
        let default = NonZeroUsize::new(self.default_max_stickers).unwrap_or(DEFAULT_MAX_STICKERS);
        PageLimits::new(default, limit)
    }

    /// Return the configured snapshot path, falling back to the bundled
    /// fixture.
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(default_snapshot_path)
    }
}
