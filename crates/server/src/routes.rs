use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{info, Level};

use common::types::Health;
use models::{Post, PostDraft};
use service::PostStore;

use crate::errors::JsonApiError;

/// Shared handler state: the post store behind its interface.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn PostStore>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn list_posts(State(state): State<ServerState>) -> Result<Json<Vec<Post>>, JsonApiError> {
    let posts = state
        .store
        .get_blog_posts()
        .await
        .map_err(JsonApiError::from_storage)?;
    info!(count = posts.len(), "list blog posts");
    Ok(Json(posts))
}

async fn create_post(
    State(state): State<ServerState>,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<Post>), JsonApiError> {
    let post = state
        .store
        .add_blog_post(draft)
        .await
        .map_err(JsonApiError::from_storage)?;
    info!(id = post.id, "created blog post");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, JsonApiError> {
    match state
        .store
        .get_blog_post_by_id(id)
        .await
        .map_err(JsonApiError::from_storage)?
    {
        Some(post) => Ok(Json(post)),
        None => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("post {id} not found")),
        )),
    }
}

async fn update_post(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(draft): Json<PostDraft>,
) -> Result<Json<Post>, JsonApiError> {
    match state
        .store
        .update_blog_post(id, draft)
        .await
        .map_err(JsonApiError::from_storage)?
    {
        Some(post) => {
            info!(id, "updated blog post");
            Ok(Json(post))
        }
        None => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("post {id} not found")),
        )),
    }
}

async fn delete_post(State(state): State<ServerState>, Path(id): Path<u64>) -> StatusCode {
    match state.store.delete_blog_post(id).await {
        Ok(true) => StatusCode::NO_CONTENT,
        Ok(false) => StatusCode::NOT_FOUND,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the full application router: static frontend, health, post CRUD
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let static_dir = ServeDir::new("frontend").fallback(ServeFile::new("frontend/index.html"));

    // Public routes (static + health)
    let public = Router::new()
        .nest_service("/", static_dir)
        .route("/health", get(health));

    // Post API routes
    let api = Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        );

    // Compose
    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
