use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use model::entities::complaint::{self, Category, Status};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::trace;

/// Fields of a complaint as submitted. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub user_id: Option<i32>,
    pub name: String,
    pub department: String,
    pub category: Category,
    pub description: String,
    pub status: Status,
    pub photo_path: Option<String>,
    pub resolution_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data access for `complaints`.
#[async_trait]
pub trait ComplaintRepository: Send + Sync + std::fmt::Debug {
    async fn save(&self, complaint: NewComplaint) -> AppResult<complaint::Model>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<complaint::Model>>;

    /// Every stored complaint, oldest id first.
    async fn find_all(&self) -> AppResult<Vec<complaint::Model>>;

    /// Writes `status` onto an already loaded complaint. Nothing else changes.
    async fn update_status(
        &self,
        existing: complaint::Model,
        status: Status,
    ) -> AppResult<complaint::Model>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmComplaintRepository {
    db: DatabaseConnection,
}

impl SeaOrmComplaintRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ComplaintRepository for SeaOrmComplaintRepository {
    async fn save(&self, complaint: NewComplaint) -> AppResult<complaint::Model> {
        trace!("Inserting complaint from '{}'", complaint.name);
        let active = complaint::ActiveModel {
            user_id: Set(complaint.user_id),
            name: Set(complaint.name),
            department: Set(complaint.department),
            category: Set(complaint.category),
            description: Set(complaint.description),
            status: Set(complaint.status),
            photo_path: Set(complaint.photo_path),
            resolution_notes: Set(complaint.resolution_notes),
            created_at: Set(complaint.created_at),
            updated_at: Set(complaint.updated_at),
            ..Default::default()
        };
        Ok(active.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<complaint::Model>> {
        trace!("Looking up complaint by id {}", id);
        Ok(complaint::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_all(&self) -> AppResult<Vec<complaint::Model>> {
        trace!("Loading all complaints");
        Ok(complaint::Entity::find()
            .order_by_asc(complaint::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn update_status(
        &self,
        existing: complaint::Model,
        status: Status,
    ) -> AppResult<complaint::Model> {
        trace!(
            "Updating complaint {} status {} -> {}",
            existing.id,
            existing.status.as_str(),
            status.as_str()
        );
        let mut active: complaint::ActiveModel = existing.into();
        active.status = Set(status);
        Ok(active.update(&self.db).await?)
    }
}
