//! Tests for the album detail service.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::album_detail::{FilterCriteria, OwnershipFilter, StickerEntry, ViewerHoldings};
use crate::domain::ports::MockAlbumStickerRepository;
use crate::domain::{AlbumTemplateId, AlbumTemplateSummary, ErrorCode, TemplateStickerId, UserAlbumId};

const OWNER: UserId = UserId::new(1);
const VISITOR: UserId = UserId::new(2);
const ALBUM: UserAlbumId = UserAlbumId::new(10);
const TEMPLATE: AlbumTemplateId = AlbumTemplateId::new(3);

fn album() -> UserAlbum {
    UserAlbum {
        id: ALBUM,
        user_id: OWNER,
        album_template_id: TEMPLATE,
        template: AlbumTemplateSummary {
            name: "World Cup 2026".to_owned(),
            image: Some("https://cdn.example/wc26.png".to_owned()),
            tags: vec!["football".to_owned()],
        },
    }
}

fn sticker(id: u64, order: i64, quantity: u32) -> StickerEntry {
    StickerEntry {
        id,
        template_sticker_id: TemplateStickerId::new(id),
        quantity,
        category: Some("Flags".to_owned()),
        tags: Vec::new(),
        order,
        number: order.to_string(),
    }
}

fn stickers() -> Vec<StickerEntry> {
    vec![sticker(1, 1, 2), sticker(2, 2, 0), sticker(3, 3, 1)]
}

fn request(viewer: UserId) -> AlbumPageRequest {
    AlbumPageRequest::first_page(ALBUM, viewer)
}

fn make_service(repo: MockAlbumStickerRepository) -> AlbumDetailService<MockAlbumStickerRepository> {
    AlbumDetailService::new(Arc::new(repo), PageLimits::default())
}

fn repo_with_album() -> MockAlbumStickerRepository {
    let mut repo = MockAlbumStickerRepository::new();
    repo.expect_find_user_album()
        .times(1)
        .return_once(|_| Ok(Some(album())));
    repo
}

#[tokio::test]
async fn owner_view_composes_page_without_trade_signals() {
    let mut repo = repo_with_album();
    repo.expect_find_viewer_holdings().never();
    repo.expect_list_album_stickers()
        .times(1)
        .return_once(|_| Ok(stickers()));

    let response = make_service(repo)
        .fetch_album_page(request(OWNER))
        .await
        .expect("page composed");

    assert_eq!(response.id, ALBUM);
    assert_eq!(response.user_id, OWNER);
    assert_eq!(response.template.name, "World Cup 2026");
    assert_eq!(response.page.stickers_list.len(), 3);
    assert!(response.page.stickers_list.iter().all(|s| s.trade.is_none()));
    assert_eq!(response.page.pagination.max_stickers_per_page, 100);
    assert_eq!(response.page.percent_completed, 67);
}

#[tokio::test]
async fn external_view_compares_against_viewer_holdings() {
    let mut repo = repo_with_album();
    repo.expect_find_viewer_holdings()
        .withf(|viewer, template| *viewer == VISITOR && *template == TEMPLATE)
        .times(1)
        .return_once(|_, _| {
            Ok(Some(
                [(TemplateStickerId::new(2), 3)].into_iter().collect::<ViewerHoldings>(),
            ))
        });
    repo.expect_list_album_stickers()
        .times(1)
        .return_once(|_| Ok(stickers()));

    let mut req = request(VISITOR);
    req.filter = FilterCriteria::new(Some(OwnershipFilter::YouHave), None);
    let response = make_service(repo)
        .fetch_album_page(req)
        .await
        .expect("page composed");

    let ids: Vec<u64> = response
        .page
        .stickers_list
        .iter()
        .map(|s| s.entry.id)
        .collect();
    assert_eq!(ids, [2]);
    assert_eq!(response.page.total_filtered_stickers, 1);
    assert_eq!(response.page.total_stickers, 3);
}

#[tokio::test]
async fn external_viewer_without_album_needs_every_owner_spare() {
    let mut repo = repo_with_album();
    repo.expect_find_viewer_holdings()
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_list_album_stickers()
        .times(1)
        .return_once(|_| Ok(stickers()));

    let mut req = request(VISITOR);
    req.filter = FilterCriteria::new(Some(OwnershipFilter::YouNeed), None);
    let response = make_service(repo)
        .fetch_album_page(req)
        .await
        .expect("page composed");

    let ids: Vec<u64> = response
        .page
        .stickers_list
        .iter()
        .map(|s| s.entry.id)
        .collect();
    assert_eq!(ids, [1]);
}

#[tokio::test]
async fn missing_album_is_not_found() {
    let mut repo = MockAlbumStickerRepository::new();
    repo.expect_find_user_album()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_list_album_stickers().never();

    let err = make_service(repo)
        .fetch_album_page(request(OWNER))
        .await
        .expect_err("album is missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "album not found");
}

#[tokio::test]
async fn out_of_range_page_is_not_found_with_details() {
    let mut repo = repo_with_album();
    repo.expect_list_album_stickers()
        .times(1)
        .return_once(|_| Ok(stickers()));

    let mut req = request(OWNER);
    req.page = Some(5);
    req.max_stickers = Some(2);
    let err = make_service(repo)
        .fetch_album_page(req)
        .await
        .expect_err("page 5 does not exist");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.details(),
        Some(&json!({ "requestedPage": 5, "totalPages": 2 }))
    );
}

#[rstest]
#[case(Some(0), None)]
#[case(None, Some(0))]
#[case(None, Some(501))]
#[tokio::test]
async fn invalid_paging_is_rejected_before_lookup(
    #[case] page: Option<usize>,
    #[case] max_stickers: Option<usize>,
) {
    let mut repo = MockAlbumStickerRepository::new();
    repo.expect_find_user_album().never();

    let mut req = request(OWNER);
    req.page = page;
    req.max_stickers = max_stickers;
    let err = make_service(repo)
        .fetch_album_page(req)
        .await
        .expect_err("request is invalid");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn connection_failures_map_to_service_unavailable() {
    let mut repo = MockAlbumStickerRepository::new();
    repo.expect_find_user_album()
        .times(1)
        .return_once(|_| Err(AlbumStickerRepositoryError::connection("refused")));

    let err = make_service(repo)
        .fetch_album_page(request(OWNER))
        .await
        .expect_err("repository is down");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn query_failures_map_to_internal_error() {
    let mut repo = repo_with_album();
    repo.expect_list_album_stickers()
        .times(1)
        .return_once(|_| Err(AlbumStickerRepositoryError::query("syntax error")));

    let err = make_service(repo)
        .fetch_album_page(request(OWNER))
        .await
        .expect_err("query fails");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn summaries_report_progress_per_album() {
    let mut repo = MockAlbumStickerRepository::new();
    repo.expect_list_user_albums()
        .times(1)
        .return_once(|_| Ok(vec![album()]));
    repo.expect_list_album_stickers()
        .times(1)
        .return_once(|_| Ok(stickers()));

    let summaries = make_service(repo)
        .list_album_summaries(OWNER)
        .await
        .expect("summaries listed");

    assert_eq!(summaries.len(), 1);
    let summary = summaries.first().expect("one summary");
    assert_eq!(summary.user_album_id, ALBUM);
    assert_eq!(summary.total_stickers, 3);
    assert_eq!(summary.percent_completed, 67);
}

#[rstest]
fn limits_cap_default_at_limit() {
    let limits = PageLimits::new(
        NonZeroUsize::new(800).expect("non-zero"),
        NonZeroUsize::new(200).expect("non-zero"),
    );

    assert_eq!(limits.default_max_stickers().get(), 200);
    assert_eq!(limits.max_stickers_limit().get(), 200);
}

#[rstest]
fn default_limits_follow_album_detail_defaults() {
    let limits = PageLimits::default();

    assert_eq!(limits.default_max_stickers().get(), 100);
    assert_eq!(limits.max_stickers_limit().get(), 500);
}
