use axum::{Json, extract::State};

use crate::{AppState, api::models::packages::PackageResponse, db::handlers::Packages, errors::Error};

/// List available subscription packages (public)
#[utoipa::path(
    get,
    path = "/packages",
    tag = "packages",
    responses(
        (status = 200, description = "Available packages, cheapest first", body = [PackageResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<PackageResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let packages = Packages::new(&mut conn).list().await?;
    Ok(Json(packages.into_iter().map(PackageResponse::from).collect()))
}
