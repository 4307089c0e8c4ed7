use std::sync::Arc;

use bcrypt::DEFAULT_COST;
use tracing::info;

use crate::api::{AdminSummary, CreateUserRequest, StudentSummary, UserResponse};
use crate::auth::password::{hash_password_with_cost, verify_password};
use crate::auth::{JwtError, JwtUtil, PasswordError};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Role, User};
use crate::database::repository::UserRepository;
use crate::summary::count_by_label;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("user with email {0} already exists")]
    EmailTaken(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user with ID {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Account lifecycle, authentication and the user-level summaries
pub struct UserService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtUtil>,
    password_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtUtil>) -> Self {
        Self {
            users,
            jwt,
            password_cost: DEFAULT_COST,
        }
    }

    /// Lower bcrypt cost; only meant for tests
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    /// Create an account with the given role; the password is bcrypt-hashed off the runtime
    pub async fn register(&self, request: CreateUserRequest, role: Role) -> Result<User, UserServiceError> {
        let email = request.email.trim().to_string();
        if email.is_empty() {
            return Err(UserServiceError::EmptyEmail);
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(UserServiceError::EmailTaken(email));
        }

        let cost = self.password_cost;
        let plain = request.password;
        let hashed = tokio::task::spawn_blocking(move || hash_password_with_cost(&plain, cost)).await??;

        let new_user = NewUser {
            name: request.name.trim().to_string(),
            email: email.clone(),
            password: hashed,
            class: request.class.filter(|c| !c.trim().is_empty()),
            birthday: request.birthday,
            role,
        };

        let user = self.users.create_user(new_user).await.map_err(|e| match e {
            DatabaseError::Conflict(_) => UserServiceError::EmailTaken(email),
            other => other.into(),
        })?;

        info!("Created {} account {} (ID {})", role, user.email, user.id);
        Ok(user)
    }

    /// Exchange credentials for a signed token. Unknown email and wrong
    /// password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, UserServiceError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or(UserServiceError::InvalidCredentials)?;

        let plain = password.to_string();
        let hash = user.password.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await?;
        if !matches {
            return Err(UserServiceError::InvalidCredentials);
        }

        Ok(self.jwt.generate_token(&user)?)
    }

    pub async fn profile(&self, id: i64) -> Result<UserResponse, UserServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(UserServiceError::NotFound(id))
    }

    pub async fn update_profile_url(&self, id: i64, profile_url: &str) -> Result<(), UserServiceError> {
        self.users
            .update_profile_url(id, profile_url)
            .await
            .map_err(|e| not_found_as(e, id))
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserServiceError> {
        self.users.delete_user(id).await.map_err(|e| not_found_as(e, id))?;
        info!("Deleted user {}", id);
        Ok(())
    }

    /// Student headcount per class
    pub async fn student_summary(&self) -> Result<StudentSummary, UserServiceError> {
        let users = self.users.list_users().await?;
        let counts = count_by_label(&users, |u| u.has_role(Role::Mahasiswa), User::class_label);
        Ok(counts.into())
    }

    pub async fn admin_summary(&self) -> Result<AdminSummary, UserServiceError> {
        let users = self.users.list_users().await?;
        let counts = count_by_label(&users, |u| u.has_role(Role::Admin), User::class_label);

        let admins = users
            .into_iter()
            .filter(|u| u.has_role(Role::Admin))
            .map(UserResponse::from)
            .collect();

        Ok(AdminSummary {
            total_admins: counts.total,
            admins,
        })
    }

    pub async fn students(&self) -> Result<Vec<UserResponse>, UserServiceError> {
        let students = self.users.list_by_role(Role::Mahasiswa).await?;
        Ok(students.into_iter().map(UserResponse::from).collect())
    }

    pub async fn health_check(&self) -> Result<(), UserServiceError> {
        Ok(self.users.ping().await?)
    }
}

fn not_found_as(err: DatabaseError, id: i64) -> UserServiceError {
    match err {
        DatabaseError::NotFound(_) => UserServiceError::NotFound(id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{student_request, InMemoryUserRepository};

    fn service() -> UserService {
        let jwt = Arc::new(JwtUtil::new("service-test-secret", 1).unwrap());
        UserService::new(Arc::new(InMemoryUserRepository::default()), jwt).with_password_cost(4)
    }

    #[tokio::test]
    async fn register_hashes_password_and_rejects_duplicates() {
        let svc = service();
        let user = svc
            .register(student_request("Ani", "ani@kampus.id", Some("TI-1")), Role::Mahasiswa)
            .await
            .unwrap();
        assert_ne!(user.password, "rahasia123");
        assert_eq!(user.role, "mahasiswa");

        let err = svc
            .register(student_request("Ani 2", "ani@kampus.id", None), Role::Mahasiswa)
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::EmailTaken(email) if email == "ani@kampus.id"));
    }

    #[tokio::test]
    async fn register_requires_email_and_password() {
        let svc = service();
        let err = svc
            .register(student_request("Ani", "  ", None), Role::Mahasiswa)
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::EmptyEmail));

        let mut request = student_request("Ani", "ani@kampus.id", None);
        request.password = String::new();
        let err = svc.register(request, Role::Mahasiswa).await.unwrap_err();
        assert!(matches!(err, UserServiceError::Password(PasswordError::Empty)));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let svc = service();
        svc.register(student_request("Ani", "ani@kampus.id", None), Role::Mahasiswa)
            .await
            .unwrap();

        let token = svc.login("ani@kampus.id", "rahasia123").await.unwrap();
        assert!(!token.is_empty());

        assert!(matches!(
            svc.login("ani@kampus.id", "salah-sandi").await,
            Err(UserServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.login("nobody@kampus.id", "rahasia123").await,
            Err(UserServiceError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn summaries_group_by_trimmed_class() {
        let svc = service();
        for (i, class) in ["A ", " A", "B"].iter().enumerate() {
            let mut request = student_request("Siswa", &format!("s{}@kampus.id", i), None);
            request.class = Some(class.to_string());
            svc.register(request, Role::Mahasiswa).await.unwrap();
        }
        svc.register(student_request("Admin", "admin@kampus.id", Some("Staff")), Role::Admin)
            .await
            .unwrap();

        let students = svc.student_summary().await.unwrap();
        assert_eq!(students.total_students, 3);
        assert_eq!(students.class_counts.get("A"), Some(&2));
        assert_eq!(students.class_counts.get("B"), Some(&1));

        let admins = svc.admin_summary().await.unwrap();
        assert_eq!(admins.total_admins, 1);
        assert_eq!(admins.admins[0].email, "admin@kampus.id");

        assert_eq!(svc.students().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let svc = service();
        assert!(matches!(svc.profile(99).await, Err(UserServiceError::NotFound(99))));
        assert!(matches!(svc.delete_user(99).await, Err(UserServiceError::NotFound(99))));
        assert!(matches!(
            svc.update_profile_url(99, "http://x/y.png").await,
            Err(UserServiceError::NotFound(99))
        ));
    }
}
