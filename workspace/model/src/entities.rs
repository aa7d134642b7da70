//! Root of the SeaORM entity modules for the complaint desk.
//! Two tables: `users` and `complaints`, with each complaint optionally
//! pointing at the user who filed it.

pub mod complaint;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::complaint::Entity as Complaint;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbBackend,
        DbErr, EntityTrait, ModelTrait, QueryFilter, Set, Statement,
    };

    use super::complaint::{Category, Status};
    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let alice = user::ActiveModel {
            username: Set("alice".to_string()),
            password: Set("secret".to_string()),
            role: Set("STUDENT".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let owned = complaint::ActiveModel {
            user_id: Set(Some(alice.id)),
            name: Set("Alice".to_string()),
            department: Set("Physics".to_string()),
            category: Set(Category::Maintenance),
            description: Set("Leaking tap in lab 3".to_string()),
            status: Set(Status::New),
            photo_path: Set(Some("uploads/tap.jpg".to_string())),
            resolution_notes: Set(None),
            created_at: Set(timestamp()),
            updated_at: Set(timestamp()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let anonymous = complaint::ActiveModel {
            user_id: Set(None),
            name: Set("Anonymous".to_string()),
            department: Set("Hostel".to_string()),
            category: Set(Category::Mess),
            description: Set("Cold food".to_string()),
            status: Set(Status::InProgress),
            photo_path: Set(None),
            resolution_notes: Set(Some(String::new())),
            created_at: Set(timestamp()),
            updated_at: Set(timestamp()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        assert_ne!(owned.id, anonymous.id);

        let complaints = Complaint::find().all(&db).await?;
        assert_eq!(complaints.len(), 2);

        // Owned complaint resolves its submitter
        let submitter = owned.find_related(User).one(&db).await?;
        assert_eq!(submitter.map(|u| u.username), Some("alice".to_string()));

        // Anonymous complaint has none
        let nobody = anonymous.find_related(User).one(&db).await?;
        assert!(nobody.is_none());

        let in_progress = Complaint::find()
            .filter(complaint::Column::Status.eq(Status::InProgress))
            .all(&db)
            .await?;
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].department, "Hostel");

        Ok(())
    }

    #[tokio::test]
    async fn test_username_is_not_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;

        for _ in 0..2 {
            user::ActiveModel {
                username: Set("bob".to_string()),
                password: Set("pw".to_string()),
                role: Set("STUDENT".to_string()),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        let bobs = User::find()
            .filter(user::Column::Username.eq("bob"))
            .all(&db)
            .await?;
        assert_eq!(bobs.len(), 2);
        assert_ne!(bobs[0].id, bobs[1].id);

        Ok(())
    }

    #[tokio::test]
    async fn test_enums_are_stored_as_their_wire_names() -> Result<(), DbErr> {
        let db = setup_db().await?;

        complaint::ActiveModel {
            name: Set("Carol".to_string()),
            department: Set("CS".to_string()),
            category: Set(Category::Technical),
            description: Set("Projector broken".to_string()),
            status: Set(Status::InProgress),
            created_at: Set(timestamp()),
            updated_at: Set(timestamp()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT category, status FROM complaints",
            ))
            .await?
            .expect("one complaint row");

        let category: String = row.try_get("", "category")?;
        let status: String = row.try_get("", "status")?;
        assert_eq!(category, "TECHNICAL");
        assert_eq!(status, "IN_PROGRESS");
        assert_eq!(Category::Technical.as_str(), category);
        assert_eq!(Status::InProgress.as_str(), status);

        Ok(())
    }

    #[test]
    fn test_enum_json_names() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"MAINTENANCE\"").unwrap(),
            Category::Maintenance
        );
        assert!(serde_json::from_str::<Status>("\"SUBMITTED\"").is_err());
        assert!(Status::New.is_active());
        assert!(!Status::Closed.is_active());
    }
}
