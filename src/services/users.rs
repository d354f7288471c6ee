//! Authentication and account service

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateProfile, User, UserClaims},
    repository::{users::NewUser, UserRepository},
};

#[derive(Clone)]
pub struct UsersService {
    users: Arc<dyn UserRepository>,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(users: Arc<dyn UserRepository>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Create an account and sign the caller in. Field validation (email
    /// shape, password length) has already run at the API boundary.
    pub async fn sign_up(&self, request: CreateUser) -> AppResult<(String, User)> {
        let password_hash = self.hash_password(&request.password)?;
        let user = self
            .users
            .insert(NewUser {
                email: request.email,
                name: request.name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "Account created");

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Authenticate by email and password and return a bearer token.
    /// The error message never reveals which of the two was wrong.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Resolve the identity behind a set of validated claims
    pub async fn current_identity(&self, claims: &UserClaims) -> AppResult<User> {
        self.users
            .get_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(format!("User {} not found", claims.user_id)))
    }

    pub async fn update_profile(&self, user_id: i32, update: UpdateProfile) -> AppResult<User> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Name must not be empty".to_string()));
            }
        }
        self.users.update_profile(user_id, &update).await
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid stored password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::users::InMemoryUserRepository;

    fn service() -> UsersService {
        UsersService::new(
            Arc::new(InMemoryUserRepository::new()),
            AuthConfig {
                jwt_secret: "test-secret".to_string(),
                jwt_expiration_hours: 1,
            },
        )
    }

    fn signup_request() -> CreateUser {
        CreateUser {
            email: "rajesh@example.com".to_string(),
            password: "secret123".to_string(),
            name: "Rajesh Kumar".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trips() {
        let svc = service();
        let (token, user) = svc.sign_up(signup_request()).await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(user.email, "rajesh@example.com");

        let (token2, user2) = svc
            .sign_in("rajesh@example.com", "secret123")
            .await
            .unwrap();
        assert_eq!(user2.id, user.id);

        let claims = UserClaims::from_token(&token2, "test-secret").unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.sub, "rajesh@example.com");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_with_generic_message() {
        let svc = service();
        svc.sign_up(signup_request()).await.unwrap();

        let err = svc
            .sign_in("rajesh@example.com", "wrong-password")
            .await
            .unwrap_err();
        match err {
            AppError::Authentication(msg) => assert_eq!(msg, "Invalid email or password"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_email_gets_the_same_message_as_wrong_password() {
        let svc = service();
        let err = svc.sign_in("nobody@example.com", "whatever").await.unwrap_err();
        match err {
            AppError::Authentication(msg) => assert_eq!(msg, "Invalid email or password"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn stale_claims_for_a_missing_user_are_not_found() {
        let svc = service();
        let claims = UserClaims {
            sub: "ghost@example.com".to_string(),
            user_id: 404,
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        };
        let err = svc.current_identity(&claims).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = service();
        svc.sign_up(signup_request()).await.unwrap();
        let err = svc.sign_up(signup_request()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn profile_update_is_partial() {
        let svc = service();
        let (_, user) = svc.sign_up(signup_request()).await.unwrap();

        let updated = svc
            .update_profile(
                user.id,
                UpdateProfile {
                    phone: Some("9876543210".to_string()),
                    preferred_language: Some("kannada".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Rajesh Kumar");
        assert_eq!(updated.phone.as_deref(), Some("9876543210"));
        assert_eq!(updated.preferred_language.as_deref(), Some("kannada"));
    }
}
