use axum::{Json, extract::State};
use chrono::{NaiveTime, Utc};

use crate::{
    AppState,
    api::models::{dashboard::DashboardStats, users::CurrentUser},
    db::handlers::{Detections, Faces},
    errors::Error,
};

/// Dashboard statistics: today's detection alerts and active registered faces
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn stats(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<DashboardStats>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let alerts_today = Detections::new(&mut conn).count_since(current_user.id, midnight).await?;
    let active_faces = Faces::new(&mut conn).count_active_for_user(current_user.id).await?;

    Ok(Json(DashboardStats::new(alerts_today, active_faces)))
}
