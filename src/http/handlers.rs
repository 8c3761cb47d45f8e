//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! exhibit service or the database layer.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::dto::{
    CreateCollectionRequest, ExhibitListResponse, ExhibitQuery, ExhibitResponse, HealthResponse,
    LoginRequest, MessageResponse, RegisterRequest, SaveExhibitRequest, TokenResponse, required,
};
use super::error::ApiError;
use super::state::AppState;
use crate::auth::{self, AuthError, AuthUser};
use crate::db::{self, Collection, CollectionExhibit, SaveOutcome, SavedExhibit, UserProfile};
use crate::exhibits::domain::UNTITLED;
use crate::exhibits::resolver::split_id;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// Root / Health
// =============================================================================

/// GET /
pub async fn root() -> &'static str {
    "This is the API root route."
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "msg": "Not Found" })),
    )
        .into_response()
}

// =============================================================================
// Exhibits
// =============================================================================

/// GET /api/exhibits
///
/// Aggregated, image-only search across every museum. Never fails: sources
/// that error contribute nothing.
pub async fn list_exhibits(
    State(state): State<AppState>,
    Query(params): Query<ExhibitQuery>,
) -> HandlerResult<ExhibitListResponse> {
    let page = params.page();
    let page_size = params.page_size(state.paging);

    let exhibits = state
        .exhibits
        .search(params.search_text(), page, page_size, &params.filters())
        .await;

    Ok(Json(ExhibitListResponse {
        page,
        page_size,
        total_results: exhibits.len(),
        exhibits,
    }))
}

/// GET /api/exhibits/{id}
pub async fn get_exhibit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<ExhibitResponse> {
    let exhibit = state.exhibits.get(&id).await?;
    Ok(Json(ExhibitResponse { exhibit }))
}

/// GET /api/exhibits/
pub async fn missing_exhibit_id() -> ApiError {
    ApiError::BadRequest("Exhibit ID is required".to_string())
}

// =============================================================================
// Accounts
// =============================================================================

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let (Some(username), Some(email), Some(password)) = (
        required(request.username.as_deref()),
        required(request.email.as_deref()),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "Username, email and password are required".to_string(),
        ));
    };

    // CPU-bound
    let password = password.to_string();
    let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password)).await?;

    match db::create_user(&state.db, username, email, &password_hash).await {
        Ok(profile) => {
            tracing::info!(user_id = profile.id, "Registered user");
            Ok((StatusCode::CREATED, Json(profile)))
        }
        Err(e) if db::is_unique_violation(&e) => Err(ApiError::Conflict(
            "Username or email already registered".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<TokenResponse> {
    let (Some(email), Some(password)) = (
        required(request.email.as_deref()),
        request.password.clone(),
    ) else {
        return Err(AuthError::InvalidCredentials.into());
    };

    let user = db::find_user_by_email(&state.db, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let stored = user.password_hash.clone();
    let matches =
        tokio::task::spawn_blocking(move || auth::verify_password(&password, &stored)).await?;
    if !matches {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.jwt.issue(user.id, &user.email)?;
    Ok(Json(TokenResponse { token }))
}

// =============================================================================
// Collections (authenticated)
// =============================================================================

/// POST /collections
pub async fn create_collection(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateCollectionRequest>,
) -> Result<(StatusCode, Json<Collection>), ApiError> {
    let name = required(request.name.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Collection name is required".to_string()))?;

    let collection =
        db::create_collection(&state.db, user.id, name, required(request.description.as_deref()))
            .await?;

    Ok((StatusCode::CREATED, Json(collection)))
}

/// GET /collections
pub async fn list_collections(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> HandlerResult<Vec<Collection>> {
    Ok(Json(db::list_collections(&state.db, user.id).await?))
}

/// GET /collections/{id}/exhibits
pub async fn list_collection_exhibits(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(collection_id): Path<i64>,
) -> HandlerResult<Vec<SavedExhibit>> {
    let collection = owned_collection(&state, collection_id, &user).await?;
    Ok(Json(db::list_collection_exhibits(&state.db, collection.id).await?))
}

/// POST /collections/save
///
/// Title and institution are optional; the institution defaults to the one
/// named by the exhibit id prefix.
pub async fn save_exhibit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<SaveExhibitRequest>,
) -> Result<Response, ApiError> {
    let (Some(collection_id), Some(exhibit_id)) =
        (request.collection_id, required(request.exhibit_id.as_deref()))
    else {
        return Err(ApiError::BadRequest(
            "collectionId and exhibitId are required".to_string(),
        ));
    };

    let (institution, _) = split_id(exhibit_id)?;
    let institution_name = required(request.institution.as_deref())
        .unwrap_or(institution.display_name());
    let title = required(request.title.as_deref()).unwrap_or(UNTITLED);

    let collection = owned_collection(&state, collection_id, &user).await?;

    let outcome = db::save_exhibit(
        &state.db,
        collection.id,
        exhibit_id,
        title,
        institution_name,
        user.id,
    )
    .await?;

    Ok(match outcome {
        SaveOutcome::Saved(link) => (StatusCode::CREATED, Json::<CollectionExhibit>(link)).into_response(),
        SaveOutcome::AlreadyPresent => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Exhibit already in collection".to_string(),
            }),
        )
            .into_response(),
    })
}

/// DELETE /collections/{id}/exhibits/{exhibit_id}
pub async fn remove_exhibit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((collection_id, exhibit_id)): Path<(i64, String)>,
) -> Result<StatusCode, ApiError> {
    let collection = owned_collection(&state, collection_id, &user).await?;

    if db::remove_exhibit(&state.db, collection.id, &exhibit_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Exhibit not in collection".to_string()))
    }
}

/// A collection owned by the caller, or 404.
async fn owned_collection(
    state: &AppState,
    collection_id: i64,
    user: &AuthUser,
) -> Result<Collection, ApiError> {
    db::find_owned_collection(&state.db, collection_id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Collection not found".to_string()))
}
