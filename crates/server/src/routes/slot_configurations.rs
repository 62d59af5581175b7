//! Slot configuration API handlers.
//!
//! Path segments are parsed by hand so that malformed store ids, unknown
//! page types and bad version numbers all produce the JSON error envelope
//! with a 400 status.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use pagecraft_core::{
    PageType, PublishedVersion, SlotConfiguration, SlotConfigurationService, StoreId,
    VersionSummary,
};
use tracing::instrument;

use super::{ApiResponse, ok};
use crate::error::{AppError, Result};
use crate::state::AppState;

type Reply<T> = Result<Json<ApiResponse<T>>>;

/// Build the slot configuration router.
pub fn router<S>() -> Router<AppState<S>>
where
    S: SlotConfigurationService + 'static,
{
    Router::new()
        .route(
            "/api/slot-configurations/defaults/{page_type}",
            get(get_defaults::<S>),
        )
        .route(
            "/api/slot-configurations/{store_id}/{page_type}/draft",
            get(get_draft::<S>)
                .put(save_draft::<S>)
                .delete(discard_draft::<S>),
        )
        .route(
            "/api/slot-configurations/{store_id}/{page_type}/published",
            get(get_published::<S>),
        )
        .route(
            "/api/slot-configurations/{store_id}/{page_type}/publish",
            post(publish::<S>),
        )
        .route(
            "/api/slot-configurations/{store_id}/{page_type}/versions",
            get(list_versions::<S>),
        )
        .route(
            "/api/slot-configurations/{store_id}/{page_type}/versions/{version}/revert",
            post(revert::<S>),
        )
}

fn parse_page_type(raw: &str) -> Result<PageType> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("unknown page type '{raw}'")))
}

fn parse_target(store_id: &str, page_type: &str) -> Result<(StoreId, PageType)> {
    let store_id = store_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("malformed store id '{store_id}'")))?;
    Ok((store_id, parse_page_type(page_type)?))
}

fn parse_version(raw: &str) -> Result<u32> {
    match raw.parse::<u32>() {
        Ok(version) if version > 0 => Ok(version),
        _ => Err(AppError::BadRequest(format!("invalid version '{raw}'"))),
    }
}

/// Fetch the system default document for a page type.
///
/// # Errors
///
/// Returns 400 for an unknown page type.
#[instrument(skip(state))]
pub async fn get_defaults<S>(
    State(state): State<AppState<S>>,
    Path(page_type): Path<String>,
) -> Reply<SlotConfiguration>
where
    S: SlotConfigurationService + 'static,
{
    let page_type = parse_page_type(&page_type)?;
    let defaults = state.service().get_defaults(page_type).await?;
    Ok(ok(defaults))
}

/// Fetch the current draft (`data: null` when there is none).
///
/// # Errors
///
/// Returns 400 for a malformed target or 500 if storage fails.
#[instrument(skip(state))]
pub async fn get_draft<S>(
    State(state): State<AppState<S>>,
    Path((store_id, page_type)): Path<(String, String)>,
) -> Reply<Option<SlotConfiguration>>
where
    S: SlotConfigurationService + 'static,
{
    let (store_id, page_type) = parse_target(&store_id, &page_type)?;
    let draft = state.service().get_draft(store_id, page_type).await?;
    Ok(ok(draft))
}

/// Replace the draft with the request body.
///
/// # Errors
///
/// Returns 400 if the body is not a valid document, 404 if the store does
/// not exist.
#[instrument(skip(state, body))]
pub async fn save_draft<S>(
    State(state): State<AppState<S>>,
    Path((store_id, page_type)): Path<(String, String)>,
    body: std::result::Result<Json<SlotConfiguration>, JsonRejection>,
) -> Reply<SlotConfiguration>
where
    S: SlotConfigurationService + 'static,
{
    let (store_id, page_type) = parse_target(&store_id, &page_type)?;
    let Json(configuration) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let saved = state
        .service()
        .save_draft(store_id, &configuration, page_type)
        .await?;
    Ok(Json(ApiResponse::success(saved).with_message("Draft saved")))
}

/// Delete the draft. Succeeds when there is no draft.
///
/// # Errors
///
/// Returns 400 for a malformed target or 500 if storage fails.
#[instrument(skip(state))]
pub async fn discard_draft<S>(
    State(state): State<AppState<S>>,
    Path((store_id, page_type)): Path<(String, String)>,
) -> Reply<()>
where
    S: SlotConfigurationService + 'static,
{
    let (store_id, page_type) = parse_target(&store_id, &page_type)?;
    state.service().discard_draft(store_id, page_type).await?;
    Ok(Json(ApiResponse::success(()).with_message("Draft discarded")))
}

/// Fetch the live document (`data: null` when never published).
///
/// # Errors
///
/// Returns 400 for a malformed target or 500 if storage fails.
#[instrument(skip(state))]
pub async fn get_published<S>(
    State(state): State<AppState<S>>,
    Path((store_id, page_type)): Path<(String, String)>,
) -> Reply<Option<SlotConfiguration>>
where
    S: SlotConfigurationService + 'static,
{
    let (store_id, page_type) = parse_target(&store_id, &page_type)?;
    let published = state.service().get_published(store_id, page_type).await?;
    Ok(ok(published))
}

/// Promote the draft to a new published version.
///
/// # Errors
///
/// Returns 404 when there is no draft to publish.
#[instrument(skip(state))]
pub async fn publish<S>(
    State(state): State<AppState<S>>,
    Path((store_id, page_type)): Path<(String, String)>,
) -> Reply<PublishedVersion>
where
    S: SlotConfigurationService + 'static,
{
    let (store_id, page_type) = parse_target(&store_id, &page_type)?;
    let published = state.service().publish(store_id, page_type).await?;
    let message = format!("Published version {}", published.version);
    Ok(Json(ApiResponse::success(published).with_message(message)))
}

/// List published versions, newest first.
///
/// # Errors
///
/// Returns 400 for a malformed target or 500 if storage fails.
#[instrument(skip(state))]
pub async fn list_versions<S>(
    State(state): State<AppState<S>>,
    Path((store_id, page_type)): Path<(String, String)>,
) -> Reply<Vec<VersionSummary>>
where
    S: SlotConfigurationService + 'static,
{
    let (store_id, page_type) = parse_target(&store_id, &page_type)?;
    let versions = state.service().list_versions(store_id, page_type).await?;
    Ok(ok(versions))
}

/// Copy a published version into the draft.
///
/// # Errors
///
/// Returns 400 for a bad version number, 404 if the version is not retained.
#[instrument(skip(state))]
pub async fn revert<S>(
    State(state): State<AppState<S>>,
    Path((store_id, page_type, version)): Path<(String, String, String)>,
) -> Reply<SlotConfiguration>
where
    S: SlotConfigurationService + 'static,
{
    let (store_id, page_type) = parse_target(&store_id, &page_type)?;
    let version = parse_version(&version)?;
    let draft = state
        .service()
        .revert_to_version(store_id, page_type, version)
        .await?;
    Ok(Json(
        ApiResponse::success(draft).with_message(format!("Draft reverted to version {version}")),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use pagecraft_core::MemorySlotStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        crate::routes::router()
            .with_state(AppState::new(MemorySlotStore::new()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn base(store_id: StoreId) -> String {
        format!("/api/slot-configurations/{store_id}/cart")
    }

    #[tokio::test]
    async fn test_draft_round_trip() {
        let app = app();
        let base = base(StoreId::generate());

        let (status, body) = send(&app, Method::GET, &format!("{base}/draft"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert!(body["data"].is_null());

        let doc = json!({"slots": {"a": {"id": "a", "type": "text", "content": "x"}}});
        let (status, body) = send(&app, Method::PUT, &format!("{base}/draft"), Some(doc)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["slots"]["a"]["content"], json!("x"));
        assert_eq!(body["data"]["metadata"]["pageType"], json!("cart"));

        let (_, body) = send(&app, Method::GET, &format!("{base}/draft"), None).await;
        assert_eq!(body["data"]["slots"]["a"]["content"], json!("x"));
    }

    #[tokio::test]
    async fn test_publish_without_draft_is_not_found() {
        let app = app();
        let base = base(StoreId::generate());

        let (status, body) = send(&app, Method::POST, &format!("{base}/publish"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("draft"));

        let (_, body) = send(&app, Method::GET, &format!("{base}/published"), None).await;
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_publish_history_and_revert() {
        let app = app();
        let base = base(StoreId::generate());

        for content in ["v1", "v2"] {
            let doc = json!({"slots": {"a": {"id": "a", "type": "text", "content": content}}});
            send(&app, Method::PUT, &format!("{base}/draft"), Some(doc)).await;
            let (status, _) = send(&app, Method::POST, &format!("{base}/publish"), None).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, body) = send(&app, Method::GET, &format!("{base}/versions"), None).await;
        let versions: Vec<u64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["version"].as_u64().unwrap())
            .collect();
        assert_eq!(versions, vec![2, 1]);

        let (status, body) =
            send(&app, Method::POST, &format!("{base}/versions/1/revert"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["slots"]["a"]["content"], json!("v1"));

        let (_, body) = send(&app, Method::GET, &format!("{base}/published"), None).await;
        assert_eq!(body["data"]["slots"]["a"]["content"], json!("v2"));
    }

    #[tokio::test]
    async fn test_discard_draft() {
        let app = app();
        let base = base(StoreId::generate());

        let doc = json!({"slots": {}});
        send(&app, Method::PUT, &format!("{base}/draft"), Some(doc)).await;
        let (status, _) = send(&app, Method::DELETE, &format!("{base}/draft"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Method::GET, &format!("{base}/draft"), None).await;
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let app = app();
        let store_id = StoreId::generate();

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/slot-configurations/{store_id}/homepage/draft"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/slot-configurations/not-a-uuid/cart/draft",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("{}/draft", base(store_id)),
            Some(json!({"metadata": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("{}/versions/zero/revert", base(store_id)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_parent_rejected() {
        let app = app();
        let doc = json!({"slots": {"a": {"id": "a", "type": "text", "parentId": "missing"}}});
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("{}/draft", base(StoreId::generate())),
            Some(doc),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_defaults_route() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::GET,
            "/api/slot-configurations/defaults/category",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["slots"]["product_1_card"].is_object());
    }
}
