//! User account store

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::user::{UpdateProfile, User},
};

/// A new account ready for insertion (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>>;
    /// Insert a new account; duplicate email is a conflict
    async fn insert(&self, user: NewUser) -> AppResult<User>;
    async fn update_profile(&self, id: i32, update: &UpdateProfile) -> AppResult<User>;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply_profile(user: &mut User, update: &UpdateProfile) {
    if let Some(name) = &update.name {
        user.name = name.clone();
    }
    if let Some(phone) = &update.phone {
        user.phone = Some(phone.clone());
    }
    if let Some(address) = &update.address {
        user.address = Some(address.clone());
    }
    if let Some(lang) = &update.preferred_language {
        user.preferred_language = Some(lang.clone());
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, new: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&new.email)) {
            return Err(AppError::Conflict(format!(
                "An account with email {} already exists",
                new.email
            )));
        }
        let user = User {
            id: users.len() as i32 + 1,
            email: new.email,
            name: new.name,
            phone: None,
            address: None,
            preferred_language: None,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: i32, update: &UpdateProfile) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::UserNotFound(format!("User {} not found", id)))?;
        apply_profile(user, update);
        Ok(user.clone())
    }
}

// ---------------------------------------------------------------------------
// Postgres implementation
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewUser) -> AppResult<User> {
        if self.get_by_email(&new.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "An account with email {} already exists",
                new.email
            )));
        }
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new.email)
        .bind(&new.name)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_profile(&self, id: i32, update: &UpdateProfile) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                preferred_language = COALESCE($5, preferred_language)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(&update.preferred_language)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::UserNotFound(format!("User {} not found", id)))?;
        Ok(row)
    }
}
