use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entity;
use crate::error::{MediaError, MediaResult};
use crate::models::SizeImage;

/// Registry of the image size labels the media pipeline is known to produce.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SizeRegistry: Send + Sync {
    async fn list(&self) -> MediaResult<Vec<SizeImage>>;

    async fn find_by_size(&self, size: &str) -> MediaResult<Option<SizeImage>>;
}

pub struct PgSizeRegistry {
    db: DatabaseConnection,
}

impl PgSizeRegistry {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> MediaError {
    MediaError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl SizeRegistry for PgSizeRegistry {
    async fn list(&self) -> MediaResult<Vec<SizeImage>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_size(&self, size: &str) -> MediaResult<Option<SizeImage>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Size.eq(size))
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }
}
