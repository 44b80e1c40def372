//! Contact registration and user lookup.

use std::sync::Arc;

use tracing::info;

use watchdog_auth::generate_access_key;
use watchdog_core::error::AppError;
use watchdog_database::repositories::UserRepository;
use watchdog_entity::user::{CreateUser, User};

/// Manages user records.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Materialize or fetch the user behind a messaging platform contact.
    ///
    /// Returns the user and whether it was created by this call. An
    /// existing user keeps the access key it was first issued.
    pub async fn register_contact(
        &self,
        display_name: &str,
        external_id: &str,
    ) -> Result<(User, bool), AppError> {
        if external_id.trim().is_empty() {
            return Err(AppError::validation("External id is required"));
        }

        let data = CreateUser {
            display_name: display_name.to_string(),
            external_id: Some(external_id.to_string()),
            access_key: generate_access_key(),
        };

        if let Some(user) = self.user_repo.insert_if_absent(&data).await? {
            info!(user_id = %user.id, external_id = %external_id, "User registered");
            return Ok((user, true));
        }

        let user = self
            .user_repo
            .find_by_external_id(external_id)
            .await?
            .ok_or_else(|| AppError::internal("User vanished after registration conflict"))?;

        Ok((user, false))
    }

    /// Create a user directly, optionally linked to a messaging address.
    pub async fn create_user(
        &self,
        display_name: &str,
        external_id: Option<&str>,
    ) -> Result<User, AppError> {
        if display_name.trim().is_empty() {
            return Err(AppError::validation("Display name is required"));
        }

        let user = self
            .user_repo
            .create(&CreateUser {
                display_name: display_name.trim().to_string(),
                external_id: external_id.map(str::to_string),
                access_key: generate_access_key(),
            })
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Find a user by access key.
    pub async fn find_by_access_key(&self, access_key: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_access_key(access_key)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Find a user by messaging address.
    pub async fn find_by_external_id(&self, external_id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_external_id(external_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
