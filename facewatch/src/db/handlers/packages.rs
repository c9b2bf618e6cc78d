//! Database repository for subscription packages.

use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    db::{errors::Result, models::packages::PackageDBResponse},
    types::{PackageId, abbrev_uuid},
};

pub struct Packages<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Packages<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<PackageDBResponse>> {
        let packages = sqlx::query_as::<_, PackageDBResponse>("SELECT * FROM packages ORDER BY price ASC")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(packages)
    }

    #[instrument(skip(self), fields(package_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: PackageId) -> Result<Option<PackageDBResponse>> {
        let package = sqlx::query_as::<_, PackageDBResponse>("SELECT * FROM packages WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(package)
    }

    /// Look up a package by name, case-insensitively ("standard" matches "Standard").
    #[instrument(skip(self), err)]
    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<PackageDBResponse>> {
        let package = sqlx::query_as::<_, PackageDBResponse>("SELECT * FROM packages WHERE name ILIKE $1")
            .bind(name)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(package)
    }
}
