use chrono::Utc;
use uuid::Uuid;

use provault_auth::password::hash_password;
use provault_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserPatch, validate_password, validate_username};
use crate::error::ApiError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self) -> Result<Vec<User>, ApiError> {
        self.users.list().await
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, ApiError> {
        if !validate_username(&input.username) {
            return Err(ApiError::InvalidUsername);
        }
        if !validate_password(&input.password) {
            return Err(ApiError::InvalidPassword);
        }
        let role = match input.role.as_deref() {
            None => UserRole::User,
            Some(v) => UserRole::from_str_value(v).ok_or(ApiError::InvalidRole)?,
        };

        let password_hash =
            hash_password(&input.password).map_err(|e| ApiError::Internal(e.into()))?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: input.username.trim().to_owned(),
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub username: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

pub struct UpdateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateUserUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, input: UpdateUserInput) -> Result<User, ApiError> {
        if let Some(ref username) = input.username {
            if !validate_username(username) {
                return Err(ApiError::InvalidUsername);
            }
        }
        if let Some(ref password) = input.password {
            if !validate_password(password) {
                return Err(ApiError::InvalidPassword);
            }
        }
        let role = input
            .role
            .as_deref()
            .map(|v| UserRole::from_str_value(v).ok_or(ApiError::InvalidRole))
            .transpose()?;

        let patch = UserPatch {
            username: input.username.map(|u| u.trim().to_owned()),
            role,
            password_hash: input
                .password
                .map(|p| hash_password(&p).map_err(|e| ApiError::Internal(e.into())))
                .transpose()?,
        };
        if patch.is_empty() {
            return Err(ApiError::MissingData);
        }

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        self.users.update(user_id, &patch).await?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    /// Delete `target_id` on behalf of `actor_id`. Self-deletion is blocked.
    pub async fn execute(&self, actor_id: Uuid, target_id: Uuid) -> Result<(), ApiError> {
        if actor_id == target_id {
            return Err(ApiError::OwnAccountDeletion);
        }
        if !self.users.delete(target_id).await? {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockUserRepo {
        users: Mutex<Vec<User>>,
    }

    impl MockUserRepo {
        fn new(users: Vec<User>) -> Self {
            Self {
                users: Mutex::new(users),
            }
        }
    }

    impl UserRepository for MockUserRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }
        async fn list(&self) -> Result<Vec<User>, ApiError> {
            Ok(self.users.lock().unwrap().clone())
        }
        async fn create(&self, user: &User) -> Result<(), ApiError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == user.username) {
                return Err(ApiError::UserAlreadyExists);
            }
            users.push(user.clone());
            Ok(())
        }
        async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<(), ApiError> {
            let mut users = self.users.lock().unwrap();
            let user = users.iter_mut().find(|u| u.id == id).unwrap();
            if let Some(ref username) = patch.username {
                user.username = username.clone();
            }
            if let Some(role) = patch.role {
                user.role = role;
            }
            if let Some(ref hash) = patch.password_hash {
                user.password_hash = hash.clone();
            }
            Ok(())
        }
        async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            Ok(users.len() < before)
        }
    }

    fn test_user(username: &str, role: UserRole) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            password_hash: "$argon2id$stub".into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn should_reject_update_with_no_fields() {
        let user = test_user("alice", UserRole::User);
        let usecase = UpdateUserUseCase {
            users: MockUserRepo::new(vec![user.clone()]),
        };
        let result = usecase
            .execute(
                user.id,
                UpdateUserInput {
                    username: None,
                    role: None,
                    password: None,
                },
            )
            .await;
        assert!(matches!(result, Err(ApiError::MissingData)));
    }

    #[tokio::test]
    async fn should_update_only_supplied_fields() {
        let user = test_user("alice", UserRole::User);
        let usecase = UpdateUserUseCase {
            users: MockUserRepo::new(vec![user.clone()]),
        };
        let updated = usecase
            .execute(
                user.id,
                UpdateUserInput {
                    username: None,
                    role: Some("admin".into()),
                    password: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::Admin);
        assert_eq!(updated.username, "alice");
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn should_block_self_deletion() {
        let admin = test_user("root", UserRole::Admin);
        let usecase = DeleteUserUseCase {
            users: MockUserRepo::new(vec![admin.clone()]),
        };
        let result = usecase.execute(admin.id, admin.id).await;
        assert!(matches!(result, Err(ApiError::OwnAccountDeletion)));
    }

    #[tokio::test]
    async fn should_delete_other_user() {
        let admin = test_user("root", UserRole::Admin);
        let victim = test_user("alice", UserRole::User);
        let usecase = DeleteUserUseCase {
            users: MockUserRepo::new(vec![admin.clone(), victim.clone()]),
        };
        usecase.execute(admin.id, victim.id).await.unwrap();
        let result = usecase.execute(admin.id, victim.id).await;
        assert!(matches!(result, Err(ApiError::UserNotFound)));
    }
}
