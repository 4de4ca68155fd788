//! In-memory repositories standing in for Postgres in handler and service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::items::models::{Item, ItemAttributes};
use crate::features::items::repositories::ItemRepository;
use crate::features::users::models::{Level, User, UserAttributes, UserWithLevel};
use crate::features::users::repositories::{LevelRepository, UserRepository};

/// `item` table with a BIGSERIAL-like id counter
#[derive(Default)]
pub struct InMemoryItemRepository {
    rows: Mutex<Vec<Item>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn all(&self) -> Result<Vec<Item>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find(&self, id: i64) -> Result<Option<Item>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned())
    }

    async fn insert(&self, attrs: &ItemAttributes) -> Result<Item> {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            *next_id
        };
        let now = Utc::now();
        let item = Item {
            id,
            name: attrs.name.clone(),
            description: attrs.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, attrs: &ItemAttributes) -> Result<Option<Item>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|item| item.id == id).map(|item| {
            item.name = attrs.name.clone();
            item.description = attrs.description.clone();
            item.updated_at = Utc::now();
            item.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|item| item.id != id);
        Ok(rows.len() < before)
    }
}

/// `m_level` + `m_user` with the foreign-key and unique-username constraints
pub struct InMemoryUserStore {
    levels: Vec<Level>,
    users: Mutex<Vec<User>>,
    next_id: Mutex<i64>,
}

impl InMemoryUserStore {
    /// Levels 1..=3: ADM, MNG, STF
    pub fn with_default_levels() -> Self {
        let levels = [
            (1, "ADM", "Administrator"),
            (2, "MNG", "Manager"),
            (3, "STF", "Staff/Kasir"),
        ]
        .into_iter()
        .map(|(level_id, kode, nama)| Level {
            level_id,
            level_kode: kode.to_string(),
            level_nama: nama.to_string(),
        })
        .collect();

        Self {
            levels,
            users: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
        }
    }

    fn check_constraints(&self, users: &[User], user_id: i64, attrs: &UserAttributes) -> Result<()> {
        if !self.levels.iter().any(|l| l.level_id == attrs.level_id) {
            return Err(AppError::ConstraintViolation(
                "user references a missing record".to_string(),
            ));
        }
        if users
            .iter()
            .any(|u| u.username == attrs.username && u.user_id != user_id)
        {
            return Err(AppError::ConstraintViolation(
                "user already exists".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LevelRepository for InMemoryUserStore {
    async fn all(&self) -> Result<Vec<Level>> {
        Ok(self.levels.clone())
    }

    async fn find(&self, level_id: i64) -> Result<Option<Level>> {
        Ok(self.levels.iter().find(|l| l.level_id == level_id).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn all_with_level(&self) -> Result<Vec<UserWithLevel>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter_map(|u| {
                let level = self.levels.iter().find(|l| l.level_id == u.level_id)?;
                Some(UserWithLevel {
                    user_id: u.user_id,
                    level_id: u.level_id,
                    username: u.username.clone(),
                    nama: u.nama.clone(),
                    level_kode: level.level_kode.clone(),
                    level_nama: level.level_nama.clone(),
                })
            })
            .collect())
    }

    async fn find(&self, user_id: i64) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, attrs: &UserAttributes) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        self.check_constraints(&users, 0, attrs)?;

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let user = User {
            user_id: *next_id,
            level_id: attrs.level_id,
            username: attrs.username.clone(),
            nama: attrs.nama.clone(),
            password: attrs.password_hash.clone(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user_id: i64, attrs: &UserAttributes) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        self.check_constraints(&users, user_id, attrs)?;

        Ok(users.iter_mut().find(|u| u.user_id == user_id).map(|u| {
            u.level_id = attrs.level_id;
            u.username = attrs.username.clone();
            u.nama = attrs.nama.clone();
            u.password = attrs.password_hash.clone();
            u.clone()
        }))
    }

    async fn delete(&self, user_id: i64) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.user_id != user_id);
        Ok(users.len() < before)
    }
}
