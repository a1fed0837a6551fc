use async_trait::async_trait;
use axum_helpers::{Paginated, pagination::offset_for};
use database::{ConstraintViolation, constraint_violation};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::entity;
use crate::error::{UserError, UserResult};
use crate::models::{User, UserFilter, UserResponse, UserSortBy};
use crate::repository::UserRepository;

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", e))
}

fn sort_column(sort_by: UserSortBy) -> entity::Column {
    match sort_by {
        UserSortBy::Id => entity::Column::Id,
        UserSortBy::Email => entity::Column::Email,
        UserSortBy::FullName => entity::Column::FullName,
    }
}

fn build_list_query(filter: &UserFilter) -> Select<entity::Entity> {
    use sea_orm::sea_query::extension::postgres::PgExpr;
    let mut query = entity::Entity::find();

    if let Some(email) = &filter.email {
        query = query.filter(
            Expr::col((entity::Entity, entity::Column::Email)).ilike(format!("%{}%", email)),
        );
    }

    if let Some(full_name) = &filter.full_name {
        query = query.filter(
            Expr::col((entity::Entity, entity::Column::FullName)).ilike(format!("%{}%", full_name)),
        );
    }

    query
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(
        &self,
        email: String,
        password_hash: String,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> UserResult<User> {
        let duplicate_email = email.clone();

        let model = entity::ActiveModel {
            email: Set(email),
            password_hash: Set(password_hash),
            full_name: Set(full_name),
            phone: Set(phone),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(ConstraintViolation::Unique(_)) => UserError::DuplicateEmail(duplicate_email),
            _ => internal(e),
        })?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: UserFilter) -> UserResult<Paginated<UserResponse>> {
        let query = build_list_query(&filter);

        let total = query.clone().count(&self.db).await.map_err(internal)?;

        let models = query
            .order_by(sort_column(filter.sort_by), filter.sort_order.into())
            .limit(filter.limit)
            .offset(offset_for(filter.page, filter.limit))
            .all(&self.db)
            .await
            .map_err(internal)?;

        let data = models
            .into_iter()
            .map(|m| UserResponse::from(User::from(m)))
            .collect();
        Ok(Paginated::new(data, total, filter.page, filter.limit))
    }

    async fn update(
        &self,
        id: i32,
        email: Option<String>,
        password_hash: Option<String>,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> UserResult<User> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(UserError::NotFound(id))?;

        let mut active: entity::ActiveModel = model.into();
        let duplicate_email = email.clone();
        if let Some(email) = email {
            active.email = Set(email);
        }
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(full_name) = full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(phone) = phone {
            active.phone = Set(Some(phone));
        }

        let updated = active.update(&self.db).await.map_err(|e| {
            match (constraint_violation(&e), duplicate_email) {
                (Some(ConstraintViolation::Unique(_)), Some(email)) => {
                    UserError::DuplicateEmail(email)
                }
                _ => internal(e),
            }
        })?;

        tracing::info!(user_id = id, "Updated user");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(ConstraintViolation::ForeignKey(_)) => UserError::HasDependents(
                    "Cannot delete user: they have associated orders. \
                     Delete their orders first or anonymize the account."
                        .to_string(),
                ),
                _ => internal(e),
            })?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    #[test]
    fn test_list_query_applies_both_substring_filters() {
        let filter = UserFilter {
            email: Some("gmail".to_string()),
            full_name: Some("garcia".to_string()),
            ..Default::default()
        };

        let sql = build_list_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#"ILIKE '%gmail%'"#), "sql was: {}", sql);
        assert!(sql.contains(r#"ILIKE '%garcia%'"#), "sql was: {}", sql);
    }
}
