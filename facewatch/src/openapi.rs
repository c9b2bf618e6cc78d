//! OpenAPI documentation assembled from the handler annotations.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "facewatch",
        description = "Control plane for a face recognition SaaS: accounts, subscription packages, cameras, registered faces, and detection logs."
    ),
    paths(
        crate::api::handlers::auth::register,
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::logout,
        crate::api::handlers::auth::me,
        crate::api::handlers::packages::list_packages,
        crate::api::handlers::cameras::list_cameras,
        crate::api::handlers::cameras::create_camera,
        crate::api::handlers::cameras::update_camera,
        crate::api::handlers::cameras::delete_camera,
        crate::api::handlers::cameras::test_camera,
        crate::api::handlers::faces::list_faces,
        crate::api::handlers::faces::create_face,
        crate::api::handlers::faces::delete_face,
        crate::api::handlers::detections::list_detections,
        crate::api::handlers::dashboard::stats,
    ),
    components(schemas(
        crate::api::models::MessageResponse,
        crate::api::models::auth::RegisterRequest,
        crate::api::models::auth::LoginRequest,
        crate::api::models::auth::TokenResponse,
        crate::api::models::users::UserResponse,
        crate::api::models::packages::PackageResponse,
        crate::api::models::cameras::CameraType,
        crate::api::models::cameras::CameraStatus,
        crate::api::models::cameras::CameraCreate,
        crate::api::models::cameras::CameraUpdate,
        crate::api::models::cameras::CameraResponse,
        crate::api::models::cameras::CameraTestResponse,
        crate::api::models::faces::FaceResponse,
        crate::api::models::detections::CameraSummary,
        crate::api::models::detections::FaceSummary,
        crate::api::models::detections::DetectionLogResponse,
        crate::api::models::dashboard::DashboardStats,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login, and session management"),
        (name = "packages", description = "Subscription package tiers"),
        (name = "cameras", description = "Camera registration and configuration"),
        (name = "faces", description = "Registered face management"),
        (name = "detections", description = "Detection log retrieval"),
        (name = "dashboard", description = "Dashboard statistics"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}
