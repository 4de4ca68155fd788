use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::UserInput;
use crate::features::users::models::{Level, User, UserAttributes, UserWithLevel};
use crate::features::users::repositories::{LevelRepository, UserRepository};
use crate::shared::password::{hash_password, verify_password};

/// Service for `m_user` operations
pub struct UserService {
    users: Arc<dyn UserRepository>,
    levels: Arc<dyn LevelRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, levels: Arc<dyn LevelRepository>) -> Self {
        Self { users, levels }
    }

    pub async fn list(&self) -> Result<Vec<UserWithLevel>> {
        self.users.all_with_level().await
    }

    /// Options for the level selector on the user forms
    pub async fn levels(&self) -> Result<Vec<Level>> {
        self.levels.all().await
    }

    pub async fn find(&self, user_id: i64) -> Result<User> {
        self.users
            .find(user_id)
            .await?
            .ok_or_else(|| not_found(user_id))
    }

    pub async fn create(&self, input: UserInput) -> Result<User> {
        let attrs = self.attributes(input, None).await?;
        let user = self.users.insert(&attrs).await?;
        tracing::info!(
            "User created: user_id={}, username={}, level_id={}",
            user.user_id,
            user.username,
            user.level_id
        );
        Ok(user)
    }

    /// Overwrites level, username, nama and password
    pub async fn update(&self, user_id: i64, input: UserInput) -> Result<User> {
        let current = self.find(user_id).await?;

        let attrs = self.attributes(input, Some(&current)).await?;
        let user = self
            .users
            .update(user_id, &attrs)
            .await?
            .ok_or_else(|| not_found(user_id))?;
        tracing::info!("User updated: user_id={}", user.user_id);
        Ok(user)
    }

    pub async fn delete(&self, user_id: i64) -> Result<()> {
        if !self.users.delete(user_id).await? {
            return Err(not_found(user_id));
        }
        tracing::info!("User deleted: user_id={}", user_id);
        Ok(())
    }

    /// Resolve the level and hash the submitted password.
    ///
    /// A password that matches `current`'s digest keeps that digest.
    async fn attributes(&self, input: UserInput, current: Option<&User>) -> Result<UserAttributes> {
        if self.levels.find(input.level_id).await?.is_none() {
            return Err(AppError::ConstraintViolation(format!(
                "Level {} does not exist",
                input.level_id
            )));
        }

        let password_hash = match current {
            Some(user) if matches!(verify_password(&input.password, &user.password), Ok(true)) => {
                user.password.clone()
            }
            _ => hash_password(&input.password)?,
        };

        Ok(UserAttributes {
            level_id: input.level_id,
            username: input.username,
            nama: input.nama,
            password_hash,
        })
    }
}

fn not_found(user_id: i64) -> AppError {
    AppError::NotFound(format!("User {} not found", user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryUserStore;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn service() -> (UserService, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::with_default_levels());
        (UserService::new(store.clone(), store.clone()), store)
    }

    fn input(username: &str, password: &str, level_id: i64) -> UserInput {
        UserInput {
            level_id,
            username: username.to_string(),
            nama: Name().fake(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_hashes_the_submitted_password() {
        let (service, _store) = service();

        let user = service
            .create(input("manager_3", "rahasia123", 2))
            .await
            .unwrap();

        assert_ne!(user.password, "rahasia123");
        assert!(verify_password("rahasia123", &user.password).unwrap());
        assert!(!verify_password("$request->password", &user.password).unwrap());
    }

    #[tokio::test]
    async fn test_update_rehashes_and_overwrites() {
        let (service, _store) = service();
        let user = service.create(input("kasir_1", "lama123", 3)).await.unwrap();

        let updated = service
            .update(
                user.user_id,
                UserInput {
                    level_id: 2,
                    username: "kasir_2".to_string(),
                    nama: "Kasir Dua".to_string(),
                    password: "baru456".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.user_id, user.user_id);
        assert_eq!(updated.level_id, 2);
        assert_eq!(updated.username, "kasir_2");
        assert_eq!(updated.nama, "Kasir Dua");
        assert!(verify_password("baru456", &updated.password).unwrap());
        assert!(!verify_password("lama123", &updated.password).unwrap());
    }

    #[tokio::test]
    async fn test_unchanged_password_keeps_digest() {
        let (service, _store) = service();
        let user = service.create(input("kasir_1", "lama123", 3)).await.unwrap();

        let renamed = service
            .update(user.user_id, input("kasir_1", "lama123", 2))
            .await
            .unwrap();
        assert_eq!(renamed.password, user.password);
        assert_eq!(renamed.level_id, 2);

        let changed = service
            .update(user.user_id, input("kasir_1", "baru456", 2))
            .await
            .unwrap();
        assert_ne!(changed.password, user.password);
        assert!(verify_password("baru456", &changed.password).unwrap());
    }

    #[tokio::test]
    async fn test_unknown_level_is_a_constraint_violation() {
        let (service, store) = service();

        let result = service.create(input("ghost", "12345", 99)).await;
        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
        assert!(store.all_with_level().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_constraint_violation() {
        let (service, _store) = service();
        service.create(input("admin", "12345", 1)).await.unwrap();

        let result = service.create(input("admin", "67890", 2)).await;
        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_list_resolves_levels() {
        let (service, _store) = service();
        service.create(input("admin", "12345", 1)).await.unwrap();
        service.create(input("staff_1", "12345", 3)).await.unwrap();

        let users = service.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].level_kode, "ADM");
        assert_eq!(users[1].level_kode, "STF");
    }

    #[tokio::test]
    async fn test_missing_users_are_not_found() {
        let (service, _store) = service();
        assert!(matches!(service.find(5).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.update(5, input("x_user", "12345", 1)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(5).await, Err(AppError::NotFound(_))));
    }
}
