use crate::error::AppResult;
use async_trait::async_trait;
use model::entities::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::trace;

/// Fields supplied when registering a user. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Data access for `users`.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    async fn save(&self, user: NewUser) -> AppResult<user::Model>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>>;

    /// Exact, case-sensitive match. With duplicate usernames the oldest row wins.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save(&self, user: NewUser) -> AppResult<user::Model> {
        trace!("Inserting user '{}'", user.username);
        let active = user::ActiveModel {
            username: Set(user.username),
            password: Set(user.password),
            role: Set(user.role),
            ..Default::default()
        };
        Ok(active.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        trace!("Looking up user by id {}", id);
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        trace!("Looking up user by username '{}'", username);
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .order_by_asc(user::Column::Id)
            .one(&self.db)
            .await?)
    }
}
