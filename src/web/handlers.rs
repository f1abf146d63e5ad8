//! Request handlers for the directory API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::debug;

use crate::config::ShelterSeekConfig;
use crate::error::ShelterSeekError;
use crate::models::{Comment, Location, Shelter};
use crate::store::DirectoryStore;
use crate::web::forms::{CommentForm, IndexQuery, ShelterForm, parse_search_query};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ShelterSeekConfig>,
    pub store: Arc<DirectoryStore>,
}

/// Error wrapper mapping domain errors onto HTTP responses
pub struct ApiError(ShelterSeekError);

impl From<ShelterSeekError> for ApiError {
    fn from(err: ShelterSeekError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ShelterSeekError::Validation { .. } | ShelterSeekError::UnknownLocation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ShelterSeekError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the directory router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(splash))
        .route("/shelters", get(index).post(create_shelter))
        .route(
            "/shelters/{id}",
            get(show_shelter).put(update_shelter).delete(delete_shelter),
        )
        .route(
            "/shelters/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/shelters/{id}/comments/{comment_id}",
            axum::routing::put(update_comment).delete(delete_comment),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct SplashResponse {
    name: &'static str,
    version: &'static str,
    default_zip: String,
    default_radius_miles: u32,
}

async fn splash(State(state): State<AppState>) -> Json<SplashResponse> {
    Json(SplashResponse {
        name: "shelterseek",
        version: crate::VERSION,
        default_zip: state.config.search.default_zip.clone(),
        default_radius_miles: state.config.search.default_radius_miles,
    })
}

/// A stored location and the shelters listed under it
#[derive(Serialize)]
struct LocationShelters {
    location: Location,
    shelters: Vec<Shelter>,
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Json<Vec<LocationShelters>>, ApiError> {
    let params = parse_search_query(&query, &state.config.search)?;

    let resolver = state.store.resolver();
    if !resolver.lookup().is_real_zip(&params.zip) {
        return Err(ShelterSeekError::validation("Invalid ZIP. Please try again.").into());
    }

    let candidates: Vec<_> = resolver
        .resolve_locations_in_radius(&params.zip, params.radius_miles)
        .into_iter()
        .collect();
    debug!(
        "Index search {} @ {} miles resolved {} candidate locations",
        params.zip,
        params.radius_miles,
        candidates.len()
    );

    let locations = state.store.locations_matching(&candidates);
    if locations.is_empty() {
        return Err(ShelterSeekError::not_found(
            "We don't have your location in our database. Sorry!",
        )
        .into());
    }

    let listings = locations
        .into_iter()
        .map(|location| {
            let shelters = state.store.shelters_in_locations(&[location.id]);
            LocationShelters { location, shelters }
        })
        .collect();
    Ok(Json(listings))
}

async fn create_shelter(
    State(state): State<AppState>,
    Json(form): Json<ShelterForm>,
) -> Result<(StatusCode, Json<Shelter>), ApiError> {
    let draft = form.validate(&state.config.search)?;
    let shelter = state.store.create_shelter(draft)?;
    Ok((StatusCode::CREATED, Json(shelter)))
}

/// A shelter together with its comments and location
#[derive(Serialize)]
struct ShelterDetail {
    shelter: Shelter,
    comments: Vec<Comment>,
}

async fn show_shelter(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ShelterDetail>, ApiError> {
    let shelter = state.store.get_shelter(id)?;
    let comments = state.store.comments_for_shelter(id)?;
    Ok(Json(ShelterDetail { shelter, comments }))
}

async fn update_shelter(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(form): Json<ShelterForm>,
) -> Result<Json<Shelter>, ApiError> {
    let draft = form.validate(&state.config.search)?;
    let shelter = state.store.update_shelter(id, draft)?;
    Ok(Json(shelter))
}

async fn delete_shelter(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_shelter(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state.store.comments_for_shelter(id)?;
    Ok(Json(comments))
}

async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(form): Json<CommentForm>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state.store.create_comment(id, form.author, form.content)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Fetch a comment, confirming it belongs to the shelter in the path
fn comment_on_shelter(
    store: &DirectoryStore,
    shelter_id: u64,
    comment_id: u64,
) -> Result<Comment, ShelterSeekError> {
    let comment = store.get_comment(comment_id)?;
    if comment.shelter_id != shelter_id {
        return Err(ShelterSeekError::not_found(format!(
            "No comment with id {comment_id}"
        )));
    }
    Ok(comment)
}

async fn update_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(u64, u64)>,
    Json(form): Json<CommentForm>,
) -> Result<Json<Comment>, ApiError> {
    comment_on_shelter(&state.store, id, comment_id)?;
    let comment = state.store.update_comment(comment_id, form.content)?;
    Ok(Json(comment))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(u64, u64)>,
) -> Result<StatusCode, ApiError> {
    comment_on_shelter(&state.store, id, comment_id)?;
    state.store.delete_comment(comment_id)?;
    Ok(StatusCode::NO_CONTENT)
}
