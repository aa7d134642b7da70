use crate::error::{AppError, AppResult};
use crate::repositories::{ComplaintRepository, NewComplaint};
use chrono::{Datelike, Local, NaiveDateTime};
use model::entities::complaint::{self, Category, Status};
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

/// A complaint as handed in by a client. Timestamps default to "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintSubmission {
    pub user_id: Option<i32>,
    pub name: String,
    pub department: String,
    pub category: Category,
    pub description: String,
    pub status: Status,
    pub photo_path: Option<String>,
    pub resolution_notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Counts over every stored complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintStatistics {
    /// Number of complaints stored
    pub total: u64,
    /// Complaints that are NEW or IN_PROGRESS
    pub active: u64,
    /// Complaints that are RESOLVED
    pub resolved: u64,
    /// Count per status; every status is present
    pub by_status: BTreeMap<String, u64>,
    /// Count per category; every category is present
    pub by_category: BTreeMap<String, u64>,
    /// Share of RESOLVED complaints, rounded to a whole percent; 0 when empty
    pub resolved_percentage: u64,
    /// Complaints filed per weekday of `created_at`, Sunday first
    pub weekly_trend: Vec<WeekdayTrend>,
}

/// Complaints filed on one weekday, and how many of those are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekdayTrend {
    pub day: String,
    pub complaints: u64,
    pub resolved: u64,
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl ComplaintStatistics {
    fn from_complaints(complaints: &[complaint::Model]) -> Self {
        let mut by_status: BTreeMap<String, u64> =
            Status::iter().map(|s| (s.as_str().to_string(), 0)).collect();
        let mut by_category: BTreeMap<String, u64> =
            Category::iter().map(|c| (c.as_str().to_string(), 0)).collect();

        let mut weekly_trend: Vec<WeekdayTrend> = WEEKDAYS
            .iter()
            .map(|day| WeekdayTrend {
                day: day.to_string(),
                complaints: 0,
                resolved: 0,
            })
            .collect();

        for complaint in complaints {
            *by_status.entry(complaint.status.as_str().to_string()).or_default() += 1;
            *by_category.entry(complaint.category.as_str().to_string()).or_default() += 1;

            let weekday = complaint.created_at.weekday().num_days_from_sunday() as usize;
            let day = &mut weekly_trend[weekday];
            day.complaints += 1;
            if complaint.status == Status::Resolved {
                day.resolved += 1;
            }
        }

        let total = complaints.len() as u64;
        let resolved = complaints
            .iter()
            .filter(|c| c.status == Status::Resolved)
            .count() as u64;
        // Rounds half up, like the dashboard does
        let resolved_percentage = if total > 0 {
            (resolved * 200 + total) / (total * 2)
        } else {
            0
        };

        Self {
            total,
            active: complaints.iter().filter(|c| c.status.is_active()).count() as u64,
            resolved,
            by_status,
            by_category,
            resolved_percentage,
            weekly_trend,
        }
    }
}

/// Complaint lifecycle on top of a [`ComplaintRepository`].
#[derive(Debug, Clone)]
pub struct ComplaintService {
    complaints: Arc<dyn ComplaintRepository>,
}

impl ComplaintService {
    pub fn new(complaints: Arc<dyn ComplaintRepository>) -> Self {
        Self { complaints }
    }

    pub async fn create(&self, submission: ComplaintSubmission) -> AppResult<complaint::Model> {
        let now = Local::now().naive_local();
        let created_at = submission.created_at.unwrap_or(now);
        let updated_at = submission.updated_at.unwrap_or(created_at);

        let stored = self
            .complaints
            .save(NewComplaint {
                user_id: submission.user_id,
                name: submission.name,
                department: submission.department,
                category: submission.category,
                description: submission.description,
                status: submission.status,
                photo_path: submission.photo_path,
                resolution_notes: submission.resolution_notes,
                created_at,
                updated_at,
            })
            .await?;

        info!(
            "Complaint {} filed under {} with status {}",
            stored.id,
            stored.category.as_str(),
            stored.status.as_str()
        );
        Ok(stored)
    }

    pub async fn list_all(&self) -> AppResult<Vec<complaint::Model>> {
        let complaints = self.complaints.find_all().await?;
        debug!("Listed {} complaints", complaints.len());
        Ok(complaints)
    }

    /// Sets the status of complaint `id`.
    ///
    /// `updated_at` is left as it was. Concurrent updates are not
    /// coordinated: the last write wins.
    pub async fn update_status(&self, id: i32, status: Status) -> AppResult<complaint::Model> {
        let Some(existing) = self.complaints.find_by_id(id).await? else {
            warn!("Status update for unknown complaint {}", id);
            return Err(AppError::NotFound(format!("Complaint with id {} not found", id)));
        };

        let updated = self.complaints.update_status(existing, status).await?;
        info!("Complaint {} is now {}", updated.id, updated.status.as_str());
        Ok(updated)
    }

    pub async fn statistics(&self) -> AppResult<ComplaintStatistics> {
        let complaints = self.complaints.find_all().await?;
        Ok(ComplaintStatistics::from_complaints(&complaints))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SeaOrmComplaintRepository;
    use crate::test_utils::test_utils::{sample_timestamp, setup_test_db};
    use std::collections::HashSet;

    async fn service() -> ComplaintService {
        let db = setup_test_db().await;
        ComplaintService::new(Arc::new(SeaOrmComplaintRepository::new(db)))
    }

    fn submission(name: &str, category: Category, status: Status) -> ComplaintSubmission {
        ComplaintSubmission {
            user_id: None,
            name: name.to_string(),
            department: "Mechanical".to_string(),
            category,
            description: format!("{} has a problem", name),
            status,
            photo_path: None,
            resolution_notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_defaults_timestamps() {
        let complaints = service().await;
        let before = Local::now().naive_local();

        let created = complaints
            .create(submission("gina", Category::Technical, Status::New))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.status, Status::New);
        assert!(created.created_at >= before);
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_create_keeps_client_timestamps() {
        let complaints = service().await;

        let created = complaints
            .create(ComplaintSubmission {
                created_at: Some(sample_timestamp()),
                updated_at: Some(sample_timestamp()),
                ..submission("hank", Category::Other, Status::Closed)
            })
            .await
            .unwrap();

        assert_eq!(created.created_at, sample_timestamp());
        assert_eq!(created.updated_at, sample_timestamp());
    }

    #[tokio::test]
    async fn test_update_status_changes_only_status() {
        let complaints = service().await;
        let created = complaints
            .create(ComplaintSubmission {
                photo_path: Some("uploads/pipe.png".to_string()),
                resolution_notes: Some(String::new()),
                ..submission("ivan", Category::Maintenance, Status::New)
            })
            .await
            .unwrap();

        let updated = complaints
            .update_status(created.id, Status::Resolved)
            .await
            .unwrap();

        assert_eq!(updated.status, Status::Resolved);
        assert_eq!(
            complaint::Model {
                status: Status::New,
                ..updated
            },
            created
        );
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_is_not_found() {
        let complaints = service().await;

        let result = complaints.update_status(4242, Status::Resolved).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_all_returns_every_complaint() {
        let complaints = service().await;
        let mut created = HashSet::new();
        for name in ["c1", "c2", "c3"] {
            let c = complaints
                .create(submission(name, Category::Mess, Status::New))
                .await
                .unwrap();
            created.insert(c.id);
        }

        let listed: HashSet<i32> = complaints
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn test_concurrent_status_updates_last_write_wins() {
        let complaints = service().await;
        let created = complaints
            .create(submission("jo", Category::Technical, Status::New))
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            complaints.update_status(created.id, Status::InProgress),
            complaints.update_status(created.id, Status::Resolved),
        );
        assert!(a.is_ok());
        assert!(b.is_ok());

        let stored = complaints.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(matches!(
            stored[0].status,
            Status::InProgress | Status::Resolved
        ));
    }

    #[tokio::test]
    async fn test_statistics_counts() {
        let complaints = service().await;
        complaints
            .create(submission("k1", Category::Mess, Status::New))
            .await
            .unwrap();
        complaints
            .create(submission("k2", Category::Mess, Status::InProgress))
            .await
            .unwrap();
        complaints
            .create(submission("k3", Category::Technical, Status::Resolved))
            .await
            .unwrap();

        let stats = complaints.statistics().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.by_category["MESS"], 2);
        assert_eq!(stats.by_category["TECHNICAL"], 1);
        assert_eq!(stats.by_category["OTHER"], 0);
        assert_eq!(stats.by_status["CLOSED"], 0);
        assert_eq!(stats.by_status.len(), 4);
        assert_eq!(stats.resolved_percentage, 33);
    }

    #[tokio::test]
    async fn test_statistics_empty_store() {
        let complaints = service().await;

        let stats = complaints.statistics().await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.resolved_percentage, 0);
        assert_eq!(stats.weekly_trend.len(), 7);
        assert!(stats
            .weekly_trend
            .iter()
            .all(|day| day.complaints == 0 && day.resolved == 0));
    }

    #[tokio::test]
    async fn test_statistics_resolved_percentage_rounds() {
        let complaints = service().await;
        complaints
            .create(submission("m1", Category::Other, Status::Resolved))
            .await
            .unwrap();
        complaints
            .create(submission("m2", Category::Other, Status::Resolved))
            .await
            .unwrap();
        complaints
            .create(submission("m3", Category::Other, Status::New))
            .await
            .unwrap();

        // 2 of 3 is 66.7%
        let stats = complaints.statistics().await.unwrap();
        assert_eq!(stats.resolved_percentage, 67);
    }

    #[tokio::test]
    async fn test_statistics_weekly_trend_by_created_weekday() {
        let complaints = service().await;
        // 2024-01-15 is a Monday
        let monday = sample_timestamp();
        let wednesday = monday + chrono::Duration::days(2);
        let sunday = monday - chrono::Duration::days(1);

        for (name, at, status) in [
            ("w1", monday, Status::New),
            ("w2", monday, Status::Resolved),
            ("w3", wednesday, Status::Resolved),
            ("w4", sunday, Status::Closed),
        ] {
            complaints
                .create(ComplaintSubmission {
                    created_at: Some(at),
                    ..submission(name, Category::Technical, status)
                })
                .await
                .unwrap();
        }

        let stats = complaints.statistics().await.unwrap();
        let days: Vec<&str> = stats.weekly_trend.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, WEEKDAYS);

        let trend = |day: &str| {
            stats
                .weekly_trend
                .iter()
                .find(|d| d.day == day)
                .map(|d| (d.complaints, d.resolved))
                .unwrap()
        };
        assert_eq!(trend("Sun"), (1, 0));
        assert_eq!(trend("Mon"), (2, 1));
        assert_eq!(trend("Tue"), (0, 0));
        assert_eq!(trend("Wed"), (1, 1));
        assert_eq!(trend("Sat"), (0, 0));
        assert_eq!(stats.resolved_percentage, 50);
    }
}
