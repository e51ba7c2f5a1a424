use anyhow::Result;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};
use crate::catalog::VideoRecord;
use crate::recommend::{recommend_for_video, DEFAULT_RECOMMENDATION_LIMIT};
use crate::user::{SubscriptionTier, PRE_ROLL_AD_SECS};

const PLACEHOLDER_THUMBNAIL: &str = "assets/placeholder.svg";
const DEFAULT_SOURCE: &str =
    "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4";
const LIVE_SOURCE: &str =
    "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4";

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct ListVideosQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RecommendedQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug)]
struct UploadVideoBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub source_ref: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SubscriptionBody {
    pub tier: SubscriptionTier,
}

#[derive(Serialize)]
struct LikedStateResponse {
    video_id: String,
    liked: bool,
}

/// What the player should do once playback of a video starts.
#[derive(Serialize)]
struct PlaybackGate {
    shows_ads: bool,
    pre_roll_ad_secs: Option<u64>,
}

#[derive(Serialize)]
struct LiveAccessResponse {
    source_ref: String,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    };
    Json(stats)
}

// =============================================================================
// Catalog routes
// =============================================================================

async fn list_videos(
    State(catalog): State<GuardedCatalogStore>,
    Query(query): Query<ListVideosQuery>,
) -> Response {
    let result = match (&query.q, &query.category) {
        (Some(q), _) => catalog.search(q),
        (None, Some(category)) => catalog.videos_in_category(category),
        (None, None) => catalog.list_videos(),
    };
    match result {
        Ok(videos) => Json(videos).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn get_video(
    State(catalog): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog.find_video(&id) {
        Ok(Some(video)) => Json(video).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn upload_video(
    State(catalog): State<GuardedCatalogStore>,
    Json(body): Json<UploadVideoBody>,
) -> Response {
    let title = body.title.trim();
    if title.is_empty() {
        return StatusCode::BAD_REQUEST.into_response();
    }

    // The upload is simulated: only metadata is stored, and the id is derived
    // from the current time like the rest of the demo.
    let record = VideoRecord {
        id: format!("v{}", Utc::now().timestamp_millis()),
        title: title.to_owned(),
        description: body.description.trim().to_owned(),
        category: body.category,
        duration_label: "0:00".to_owned(),
        thumbnail_ref: PLACEHOLDER_THUMBNAIL.to_owned(),
        source_ref: body.source_ref.unwrap_or_else(|| DEFAULT_SOURCE.to_owned()),
    };

    match catalog.add_video(record.clone()) {
        Ok(()) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn get_recommended(
    State(catalog): State<GuardedCatalogStore>,
    Path(id): Path<String>,
    Query(query): Query<RecommendedQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    let snapshot = catalog
        .list_videos()
        .and_then(|videos| Ok((videos, catalog.watch_history()?)));
    match snapshot {
        Ok((videos, history)) => {
            Json(recommend_for_video(&videos, &history, &id, limit)).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn get_categories(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.categories() {
        Ok(categories) => Json(categories).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

// =============================================================================
// User routes
// =============================================================================

async fn post_watch(State(state): State<ServerState>, Path(id): Path<String>) -> Response {
    if state.catalog_store.record_watch(&id).is_err() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    match state.profile_store.profile() {
        Ok(profile) => {
            let gate = PlaybackGate {
                shows_ads: profile.shows_ads(),
                pre_roll_ad_secs: profile.shows_ads().then_some(PRE_ROLL_AD_SECS),
            };
            Json(gate).into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn get_history(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.watch_history() {
        Ok(history) => Json(history).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn get_liked_videos(State(catalog): State<GuardedCatalogStore>) -> Response {
    match catalog.liked_videos() {
        Ok(likes) => Json(likes).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn get_liked_state(
    State(catalog): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog.is_liked(&id) {
        Ok(liked) => Json(LikedStateResponse { video_id: id, liked }).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn post_toggle_like(
    State(catalog): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    match catalog.toggle_like(&id) {
        Ok(liked) => Json(LikedStateResponse { video_id: id, liked }).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn get_profile(State(profiles): State<GuardedProfileStore>) -> Response {
    match profiles.profile() {
        Ok(profile) => Json(profile).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn post_login(State(profiles): State<GuardedProfileStore>) -> Response {
    match profiles.log_in() {
        Ok(profile) => Json(profile).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn post_logout(State(profiles): State<GuardedProfileStore>) -> Response {
    match profiles.log_out() {
        Ok(profile) => Json(profile).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn put_subscription(
    State(profiles): State<GuardedProfileStore>,
    Json(body): Json<SubscriptionBody>,
) -> Response {
    match profiles.set_subscription_tier(body.tier) {
        Ok(profile) => Json(profile).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn post_toggle_subscription(State(profiles): State<GuardedProfileStore>) -> Response {
    match profiles.toggle_subscription_tier() {
        Ok(profile) => Json(profile).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn get_live(State(profiles): State<GuardedProfileStore>) -> Response {
    match profiles.profile() {
        Ok(profile) if profile.can_access_live() => Json(LiveAccessResponse {
            source_ref: LIVE_SOURCE.to_owned(),
        })
        .into_response(),
        Ok(_) => StatusCode::FORBIDDEN.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

// =============================================================================
// App assembly
// =============================================================================

pub fn make_app(
    config: ServerConfig,
    catalog_store: GuardedCatalogStore,
    profile_store: GuardedProfileStore,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), catalog_store, profile_store);

    let catalog_routes: Router = Router::new()
        .route("/videos", get(list_videos))
        .route("/videos", post(upload_video))
        .route("/videos/{id}", get(get_video))
        .route("/videos/{id}/recommended", get(get_recommended))
        .route("/categories", get(get_categories))
        .with_state(state.clone());

    let user_routes: Router = Router::new()
        .route("/watch/{id}", post(post_watch))
        .route("/history", get(get_history))
        .route("/likes", get(get_liked_videos))
        .route("/likes/{id}", get(get_liked_state))
        .route("/likes/{id}", post(post_toggle_like))
        .route("/profile", get(get_profile))
        .route("/login", post(post_login))
        .route("/logout", post(post_logout))
        .route("/subscription", put(put_subscription))
        .route("/subscription/toggle", post(post_toggle_subscription))
        .with_state(state.clone());

    let live_routes: Router = Router::new()
        .route("/live", get(get_live))
        .with_state(state.clone());

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)).with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/v1/catalog", catalog_routes)
        .nest("/v1/user", user_routes)
        .nest("/v1", live_routes);

    app = app.layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

pub async fn run_server(
    catalog_store: GuardedCatalogStore,
    profile_store: GuardedProfileStore,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let app = make_app(config, catalog_store, profile_store)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
