use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    api::models::{detections::DetectionLogResponse, pagination::Pagination, users::CurrentUser},
    db::handlers::Detections,
    errors::Error,
};

/// List the current user's detection logs, newest first
#[utoipa::path(
    get,
    path = "/detections",
    tag = "detections",
    params(Pagination),
    responses(
        (status = 200, description = "Detection logs ordered by detection time descending", body = [DetectionLogResponse]),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn list_detections(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<DetectionLogResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let detections = Detections::new(&mut conn)
        .list_for_user(current_user.id, pagination.limit(), pagination.offset())
        .await?;

    Ok(Json(detections.into_iter().map(DetectionLogResponse::from).collect()))
}
