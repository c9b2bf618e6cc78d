use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{MessageResponse, faces::FaceResponse, users::CurrentUser},
    db::{handlers::Faces, models::faces::FaceCreateDBRequest},
    entitlements::{self, ResourceKind},
    errors::Error,
    types::FaceId,
};

/// The parsed multipart payload for a face registration.
struct FaceUpload {
    face_name: String,
    file_name: String,
    content: Vec<u8>,
}

/// Pull `face_name` and `file` out of the multipart body.
async fn read_face_upload(mut multipart: Multipart) -> Result<FaceUpload, Error> {
    let mut face_name: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| Error::BadRequest {
        message: format!("invalid multipart body: {e}"),
    })? {
        // Materialize the name first: reading the field consumes it
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("face_name") => {
                let value = field.text().await.map_err(|e| Error::BadRequest {
                    message: format!("invalid face_name field: {e}"),
                })?;
                face_name = Some(value);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("face.jpg").to_string();
                let content = field.bytes().await.map_err(|e| Error::BadRequest {
                    message: format!("invalid file field: {e}"),
                })?;
                file = Some((file_name, content.to_vec()));
            }
            _ => {}
        }
    }

    let face_name = face_name.filter(|name| !name.trim().is_empty()).ok_or(Error::Validation {
        field: "face_name",
        message: "face_name is required".to_string(),
    })?;

    let (file_name, content) = file.filter(|(_, content)| !content.is_empty()).ok_or(Error::Validation {
        field: "file",
        message: "an image file is required".to_string(),
    })?;

    Ok(FaceUpload {
        face_name,
        file_name,
        content,
    })
}

/// List the current user's registered faces
#[utoipa::path(
    get,
    path = "/faces",
    tag = "faces",
    responses(
        (status = 200, description = "List of registered faces", body = [FaceResponse]),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_faces(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<FaceResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let faces = Faces::new(&mut conn).list_for_user(current_user.id).await?;
    Ok(Json(faces.into_iter().map(FaceResponse::from).collect()))
}

/// Register a face from an uploaded image, enforcing the package face quota.
///
/// The quota gate runs before the image is written, so a denied request
/// leaves neither a row nor a file behind; if the insert fails after the
/// write, the blob is unwound.
#[utoipa::path(
    post,
    path = "/faces",
    tag = "faces",
    request_body(content = String, content_type = "multipart/form-data", description = "Fields: face_name (text), file (image)"),
    responses(
        (status = 201, description = "Face registered", body = FaceResponse),
        (status = 400, description = "Validation failure or face quota reached"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn create_face(
    State(state): State<AppState>,
    current_user: CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FaceResponse>), Error> {
    let upload = read_face_upload(multipart).await?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    entitlements::ensure_capacity(&mut tx, current_user.id, ResourceKind::Face).await?;

    // Quota passed: persist the image, then the row
    let storage_key = state.storage.store("faces", &upload.file_name, &upload.content).await?;

    // The face encoding is computed later by the recognition pipeline
    let db_request = FaceCreateDBRequest {
        user_id: current_user.id,
        face_name: upload.face_name,
        face_image_path: Some(storage_key.clone()),
    };

    let created = Faces::new(&mut tx).create(&db_request).await;
    let face = match created {
        Ok(face) => face,
        Err(e) => {
            // Unwind the blob so a failed insert retains no file
            if let Err(cleanup) = state.storage.delete(&storage_key).await {
                tracing::warn!("Failed to remove orphaned face image {}: {}", storage_key, cleanup);
            }
            return Err(e.into());
        }
    };

    if let Err(e) = tx.commit().await {
        if let Err(cleanup) = state.storage.delete(&storage_key).await {
            tracing::warn!("Failed to remove orphaned face image {}: {}", storage_key, cleanup);
        }
        return Err(Error::Database(e.into()));
    }

    Ok((StatusCode::CREATED, Json(FaceResponse::from(face))))
}

/// Delete a registered face and its stored image. Detection logs that
/// reference it keep their rows with the face reference nulled.
#[utoipa::path(
    delete,
    path = "/faces/{id}",
    tag = "faces",
    params(("id" = String, Path, description = "Face ID")),
    responses(
        (status = 200, description = "Face deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Face not found"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn delete_face(
    State(state): State<AppState>,
    Path(face_id): Path<FaceId>,
    current_user: CurrentUser,
) -> Result<Json<MessageResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let not_found = || Error::NotFound {
        resource: "face",
        id: face_id.to_string(),
    };

    let mut face_repo = Faces::new(&mut conn);
    let face = face_repo.get_owned(face_id, current_user.id).await?.ok_or_else(not_found)?;

    let deleted = face_repo.delete_owned(face_id, current_user.id).await?;
    if !deleted {
        return Err(not_found());
    }

    // Row is gone; removing the blob is best-effort
    if let Some(storage_key) = &face.face_image_path {
        if let Err(e) = state.storage.delete(storage_key).await {
            tracing::warn!("Failed to delete face image {}: {}", storage_key, e);
        }
    }

    Ok(Json(MessageResponse::new("Face deleted successfully")))
}
