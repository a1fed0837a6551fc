//! Category image set writer.
//!
//! Replacing is delete-all-then-insert-all: the persisted set always mirrors
//! the last supplied list. Sizes missing from the registry are skipped with a
//! warning rather than failing the whole write, matching the upload
//! pipeline's forgiving behavior.

use domain_media::sizes::{allocate_size_keys, display_size};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entity::category_image;
use crate::error::{CategoryError, CategoryResult};
use crate::models::{ImageInput, ImageSummary};

fn internal(e: sea_orm::DbErr) -> CategoryError {
    CategoryError::Internal(format!("Database error: {}", e))
}

/// Replace the full image set of a category.
pub async fn replace(
    db: &DatabaseConnection,
    category_id: i32,
    images: &[ImageInput],
) -> CategoryResult<()> {
    category_image::Entity::delete_many()
        .filter(category_image::Column::CategoryId.eq(category_id))
        .exec(db)
        .await
        .map_err(internal)?;

    // Keep only images whose size the registry knows about
    let mut known = Vec::with_capacity(images.len());
    for image in images {
        let exists = domain_media::entity::Entity::find()
            .filter(domain_media::entity::Column::Size.eq(image.size.as_str()))
            .one(db)
            .await
            .map_err(internal)?
            .is_some();

        if exists {
            known.push(image);
        } else {
            tracing::warn!(size = %image.size, category_id, "Unknown image size, skipping");
        }
    }

    let keys = allocate_size_keys(known.iter().map(|i| i.size.as_str()));

    for (image, size_key) in known.iter().zip(keys) {
        category_image::ActiveModel {
            category_id: Set(category_id),
            url: Set(image.url.clone()),
            size_id: Set(size_key),
            public_id: Set(image.public_id.clone()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(internal)?;
    }

    tracing::info!(category_id, "Replaced category images");
    Ok(())
}

/// Load the image set of one category, bare size labels only.
pub async fn find_for_category(
    db: &DatabaseConnection,
    category_id: i32,
) -> CategoryResult<Vec<ImageSummary>> {
    let rows = category_image::Entity::find()
        .filter(category_image::Column::CategoryId.eq(category_id))
        .order_by_asc(category_image::Column::SizeId)
        .all(db)
        .await
        .map_err(internal)?;

    Ok(rows.into_iter().map(summarize).collect())
}

/// Load image sets for a batch of categories, grouped by owner id.
pub async fn find_for_categories(
    db: &DatabaseConnection,
    category_ids: Vec<i32>,
) -> CategoryResult<std::collections::HashMap<i32, Vec<ImageSummary>>> {
    let mut grouped: std::collections::HashMap<i32, Vec<ImageSummary>> =
        std::collections::HashMap::new();

    if category_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = category_image::Entity::find()
        .filter(category_image::Column::CategoryId.is_in(category_ids))
        .order_by_asc(category_image::Column::SizeId)
        .all(db)
        .await
        .map_err(internal)?;

    for row in rows {
        let category_id = row.category_id;
        grouped.entry(category_id).or_default().push(summarize(row));
    }

    Ok(grouped)
}

fn summarize(row: category_image::Model) -> ImageSummary {
    ImageSummary {
        size: display_size(&row.size_id).to_string(),
        url: row.url,
    }
}
