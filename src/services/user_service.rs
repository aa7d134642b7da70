use crate::error::AppResult;
use crate::repositories::{NewUser, UserRepository};
use model::entities::user;
use std::sync::Arc;
use tracing::{debug, info};

/// Registration and login checks on top of a [`UserRepository`].
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Stores the user as given. No uniqueness check and no hashing.
    pub async fn register(&self, user: NewUser) -> AppResult<user::Model> {
        let stored = self.users.save(user).await?;
        info!(
            "Registered user '{}' with ID {} and role '{}'",
            stored.username, stored.id, stored.role
        );
        Ok(stored)
    }

    /// Returns the matching user, or `None` when the username is unknown or
    /// the password differs.
    ///
    /// The supplied username is trimmed before lookup. Stored and supplied
    /// passwords are both trimmed, then compared exactly (case-sensitive).
    pub async fn check_login(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<user::Model>> {
        let username = username.trim();
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!("Login rejected: no user named '{}'", username);
            return Ok(None);
        };

        if user.password.trim() == password.trim() {
            debug!("Login accepted for '{}'", username);
            Ok(Some(user))
        } else {
            debug!("Login rejected: password mismatch for '{}'", username);
            Ok(None)
        }
    }
}
