//! API response models for subscription packages.

use crate::db::models::packages::PackageDBResponse;
use crate::types::PackageId;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Public description of a subscription tier. Limits of `-1` mean unlimited.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PackageResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PackageId,
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub period: String,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub camera_limit: Option<i32>,
    pub max_registered_faces: Option<i32>,
}

impl From<PackageDBResponse> for PackageResponse {
    fn from(db: PackageDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            price: db.price,
            period: db.period,
            description: db.description,
            features: db.features.map(|f| f.0),
            camera_limit: db.camera_limit,
            max_registered_faces: db.max_registered_faces,
        }
    }
}
