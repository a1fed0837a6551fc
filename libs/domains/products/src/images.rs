//! Product image set writer.
//!
//! Replace is delete-all-then-insert-all so the persisted set always mirrors
//! the last supplied list. Sizes missing from the registry are skipped with a
//! warning rather than failing the write.

use std::collections::HashMap;

use domain_media::sizes::{allocate_size_keys, display_size};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entity::product_image;
use crate::error::{ProductError, ProductResult};
use crate::models::{ImageInput, ImageSummary};

fn internal(e: sea_orm::DbErr) -> ProductError {
    ProductError::Internal(format!("Database error: {}", e))
}

/// Replace the full image set of a product.
pub async fn replace(
    db: &DatabaseConnection,
    product_id: i32,
    images: &[ImageInput],
) -> ProductResult<()> {
    product_image::Entity::delete_many()
        .filter(product_image::Column::ProductId.eq(product_id))
        .exec(db)
        .await
        .map_err(internal)?;

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
            tracing::warn!(size = %image.size, product_id, "Unknown image size, skipping");
        }
    }

    let keys = allocate_size_keys(known.iter().map(|i| i.size.as_str()));

    for (image, size_key) in known.iter().zip(keys) {
        product_image::ActiveModel {
            product_id: Set(product_id),
            url: Set(image.url.clone()),
            size_id: Set(size_key),
            public_id: Set(image.public_id.clone()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(internal)?;
    }

    tracing::info!(product_id, "Replaced product images");
    Ok(())
}

/// Load the image set of one product, bare size labels only.
pub async fn find_for_product(
    db: &DatabaseConnection,
    product_id: i32,
) -> ProductResult<Vec<ImageSummary>> {
    let rows = product_image::Entity::find()
        .filter(product_image::Column::ProductId.eq(product_id))
        .order_by_asc(product_image::Column::SizeId)
        .all(db)
        .await
        .map_err(internal)?;

    Ok(rows.into_iter().map(summarize).collect())
}

/// Load image sets for a batch of products, grouped by owner id.
pub async fn find_for_products(
    db: &DatabaseConnection,
    product_ids: Vec<i32>,
) -> ProductResult<HashMap<i32, Vec<ImageSummary>>> {
    let mut grouped: HashMap<i32, Vec<ImageSummary>> = HashMap::new();

    if product_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = product_image::Entity::find()
        .filter(product_image::Column::ProductId.is_in(product_ids))
        .order_by_asc(product_image::Column::SizeId)
        .all(db)
        .await
        .map_err(internal)?;

    for row in rows {
        let product_id = row.product_id;
        grouped.entry(product_id).or_default().push(summarize(row));
    }

    Ok(grouped)
}

fn summarize(row: product_image::Model) -> ImageSummary {
    ImageSummary {
        size: display_size(&row.size_id).to_string(),
        url: row.url,
    }
}
