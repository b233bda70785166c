//! Compose one page of a collector's album from a JSON snapshot.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use backend::config::AlbumDetailSettings;
use backend::domain::album_detail::{FilterCriteria, OwnershipFilter};
use backend::domain::ports::{AlbumDetailQuery, AlbumPageRequest};
use backend::domain::{AlbumDetailService, UserAlbumId, UserId};
use backend::outbound::snapshot::SnapshotAlbumStickerRepository;
use clap::Parser;
use clap::error::ErrorKind;
use ortho_config::OrthoConfig;
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt};

/// `album-page` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "album-page",
    about = "Compose a paged, category-grouped album view from an album snapshot",
    version
)]
struct CliArgs {
    /// Album snapshot JSON. Falls back to `ALBUM_DETAIL_SNAPSHOT_PATH`.
    #[arg(long = "snapshot", value_name = "path")]
    snapshot: Option<PathBuf>,
    /// Album to browse.
    #[arg(long = "album", value_name = "id", required_unless_present = "summaries")]
    album: Option<u64>,
    /// Collector browsing the album.
    #[arg(long = "viewer", value_name = "user id")]
    viewer: u64,
    /// 1-based page index.
    #[arg(long = "page", value_name = "n")]
    page: Option<usize>,
    /// Page capacity in stickers.
    #[arg(long = "max-stickers", value_name = "n")]
    max_stickers: Option<usize>,
    /// Ownership filter: collected, missing, duplicate, you_need or you_have.
    #[arg(long = "ownership", value_name = "filter")]
    ownership: Option<OwnershipFilter>,
    /// Search terms matched against number, category and tags.
    #[arg(long = "terms", value_name = "text")]
    terms: Option<String>,
    /// List completion summaries for the viewer's albums instead.
    #[arg(long = "summaries", conflicts_with = "album")]
    summaries: bool,
}

impl CliArgs {
    fn page_request(&self, album: u64) -> AlbumPageRequest {
        AlbumPageRequest {
            user_album_id: UserAlbumId::new(album),
            viewer_id: UserId::new(self.viewer),
            page: self.page,
            max_stickers: self.max_stickers,
            filter: FilterCriteria::new(self.ownership, self.terms.clone()),
        }
    }
}

fn main() -> io::Result<()> {
    if let Err(e) = tracing_fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = parse_args()?;
    let settings = AlbumDetailSettings::load_from_iter([OsString::from("album-page")])
        .map_err(|error| io::Error::other(format!("load album detail settings: {error}")))?;

    let snapshot_path = args
        .snapshot
        .clone()
        .unwrap_or_else(|| settings.snapshot_path());
    let repo = SnapshotAlbumStickerRepository::load(&snapshot_path)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;
    let service = AlbumDetailService::new(Arc::new(repo), settings.page_limits());

    match args.album {
        Some(album) if !args.summaries => {
            let response = service
                .fetch_album_page(args.page_request(album))
                .await
                .map_err(display_error)?;
            write_json(&response)
        }
        _ => {
            let summaries = service
                .list_album_summaries(UserId::new(args.viewer))
                .await
                .map_err(display_error)?;
            write_json(&summaries)
        }
    }
}

fn parse_args() -> io::Result<CliArgs> {
    CliArgs::try_parse().map_err(|error| match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
        _ => display_error(error),
    })
}

/// Wrap an error so `main` reports its `Display` text rather than its
/// `Debug` form.
fn display_error(error: impl fmt::Display) -> io::Error {
    io::Error::other(error.to_string())
}

fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    writeln!(stdout)
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI argument handling.

    use clap::Parser;
use clap::error::ErrorKind;
    use rstest::rstest;

    use super::{CliArgs, OwnershipFilter, display_error};
    use backend::domain::DomainError;

    #[rstest]
    fn page_arguments_build_a_request() {
        let args = CliArgs::try_parse_from([
            "album-page",
            "--album",
            "10",
            "--viewer",
            "2",
            "--page",
            "3",
            "--ownership",
            "you_need",
            "--terms",
            "",
        ])
        .expect("arguments parse");

        let request = args.page_request(10);
        assert_eq!(request.user_album_id.get(), 10);
        assert_eq!(request.viewer_id.get(), 2);
        assert_eq!(request.page, Some(3));
        assert_eq!(request.filter.ownership, Some(OwnershipFilter::YouNeed));
        assert!(request.filter.terms.is_none());
    }

    #[rstest]
    fn album_is_required_without_summaries() {
        let error = CliArgs::try_parse_from(["album-page", "--viewer", "2"])
            .expect_err("album is missing");
        assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[rstest]
    fn summaries_do_not_need_an_album() {
        let args = CliArgs::try_parse_from(["album-page", "--viewer", "2", "--summaries"])
            .expect("arguments parse");
        assert!(args.summaries);
        assert!(args.album.is_none());
    }

    #[rstest]
    fn unknown_ownership_filter_is_rejected() {
        let result = CliArgs::try_parse_from([
            "album-page",
            "--album",
            "1",
            "--viewer",
            "1",
            "--ownership",
            "shiny",
        ]);
        assert!(result.is_err());
    }

    #[rstest]
    #[case("--help", ErrorKind::DisplayHelp)]
    #[case("--version", ErrorKind::DisplayVersion)]
    fn help_and_version_are_informational(#[case] flag: &str, #[case] expected: ErrorKind) {
        let error = CliArgs::try_parse_from(["album-page", flag]).expect_err("flag short-circuits");
        assert_eq!(error.kind(), expected);
    }

    #[rstest]
    fn reported_errors_use_display_text() {
        let error = display_error(DomainError::not_found("user album 404 not found"));
        assert_eq!(error.to_string(), "user album 404 not found");
        assert_eq!(error.kind(), std::io::ErrorKind::Other);
    }
}
