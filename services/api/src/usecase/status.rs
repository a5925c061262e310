use chrono::Utc;
use uuid::Uuid;

use provault_domain::category::CategoryType;

use crate::domain::repository::StatusRepository;
use crate::domain::types::{Status, StatusPatch};
use crate::error::ApiError;

const DEFAULT_COLOR: &str = "#6b7280";

// ── ListStatuses ─────────────────────────────────────────────────────────────

pub struct ListStatusesUseCase<S: StatusRepository> {
    pub statuses: S,
}

impl<S: StatusRepository> ListStatusesUseCase<S> {
    pub async fn execute(&self, category_type: Option<String>) -> Result<Vec<Status>, ApiError> {
        let category_type = category_type
            .as_deref()
            .map(|v| CategoryType::from_str_value(v).ok_or(ApiError::InvalidCategoryType))
            .transpose()?;
        self.statuses.list(category_type).await
    }
}

// ── CreateStatus ─────────────────────────────────────────────────────────────

pub struct CreateStatusInput {
    pub name: String,
    pub category_type: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    pub description: Option<String>,
}

pub struct CreateStatusUseCase<S: StatusRepository> {
    pub statuses: S,
}

impl<S: StatusRepository> CreateStatusUseCase<S> {
    pub async fn execute(&self, input: CreateStatusInput) -> Result<Status, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::MissingData);
        }
        let category_type = CategoryType::from_str_value(&input.category_type)
            .ok_or(ApiError::InvalidCategoryType)?;
        let display_order = input.display_order.unwrap_or(0);
        if display_order < 0 {
            return Err(ApiError::InvalidDisplayOrder);
        }

        let status = Status {
            id: Uuid::now_v7(),
            name: input.name.trim().to_owned(),
            category_type,
            color: input.color.unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
            icon: input.icon.unwrap_or_default(),
            display_order,
            description: input.description,
            created_at: Utc::now(),
        };
        self.statuses.create(&status).await?;
        Ok(status)
    }
}

// ── UpdateStatus ─────────────────────────────────────────────────────────────

pub struct UpdateStatusInput {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    pub description: Option<Option<String>>,
}

pub struct UpdateStatusUseCase<S: StatusRepository> {
    pub statuses: S,
}

impl<S: StatusRepository> UpdateStatusUseCase<S> {
    pub async fn execute(
        &self,
        status_id: Uuid,
        input: UpdateStatusInput,
    ) -> Result<Status, ApiError> {
        if let Some(ref name) = input.name {
            if name.trim().is_empty() {
                return Err(ApiError::MissingData);
            }
        }
        if let Some(order) = input.display_order {
            if order < 0 {
                return Err(ApiError::InvalidDisplayOrder);
            }
        }
        let patch = StatusPatch {
            name: input.name.map(|n| n.trim().to_owned()),
            color: input.color,
            icon: input.icon,
            display_order: input.display_order,
            description: input.description,
        };
        if patch.is_empty() {
            return Err(ApiError::MissingData);
        }

        self.statuses
            .find_by_id(status_id)
            .await?
            .ok_or(ApiError::StatusNotFound)?;
        self.statuses.update(status_id, &patch).await?;
        self.statuses
            .find_by_id(status_id)
            .await?
            .ok_or(ApiError::StatusNotFound)
    }
}

// ── DeleteStatus ─────────────────────────────────────────────────────────────

pub struct DeleteStatusUseCase<S: StatusRepository> {
    pub statuses: S,
}

impl<S: StatusRepository> DeleteStatusUseCase<S> {
    pub async fn execute(&self, status_id: Uuid) -> Result<(), ApiError> {
        let status = self
            .statuses
            .find_by_id(status_id)
            .await?
            .ok_or(ApiError::StatusNotFound)?;
        // Profiles carry the status by name, so the reference check matches
        // on (name, category type) rather than a foreign key.
        if self
            .statuses
            .profiles_using(&status.name, status.category_type)
            .await?
            > 0
        {
            return Err(ApiError::StatusInUse);
        }
        if !self.statuses.delete(status_id).await? {
            return Err(ApiError::StatusNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockStatusRepo {
        statuses: Mutex<Vec<Status>>,
        usage: Mutex<HashMap<(String, CategoryType), u64>>,
    }

    impl MockStatusRepo {
        fn new(statuses: Vec<Status>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
                usage: Mutex::new(HashMap::new()),
            }
        }

        fn with_usage(self, name: &str, category_type: CategoryType, count: u64) -> Self {
            self.usage
                .lock()
                .unwrap()
                .insert((name.to_owned(), category_type), count);
            self
        }
    }

    impl StatusRepository for MockStatusRepo {
        async fn list(
            &self,
            category_type: Option<CategoryType>,
        ) -> Result<Vec<Status>, ApiError> {
            Ok(self
                .statuses
                .lock()
                .unwrap()
                .iter()
                .filter(|s| category_type.is_none_or(|t| s.category_type == t))
                .cloned()
                .collect())
        }
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Status>, ApiError> {
            Ok(self
                .statuses
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == id)
                .cloned())
        }
        async fn create(&self, status: &Status) -> Result<(), ApiError> {
            let mut statuses = self.statuses.lock().unwrap();
            if statuses
                .iter()
                .any(|s| s.name == status.name && s.category_type == status.category_type)
            {
                return Err(ApiError::StatusAlreadyExists);
            }
            statuses.push(status.clone());
            Ok(())
        }
        async fn update(&self, id: Uuid, patch: &StatusPatch) -> Result<(), ApiError> {
            let mut statuses = self.statuses.lock().unwrap();
            let status = statuses.iter_mut().find(|s| s.id == id).unwrap();
            if let Some(ref name) = patch.name {
                status.name = name.clone();
            }
            if let Some(ref color) = patch.color {
                status.color = color.clone();
            }
            Ok(())
        }
        async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
            let mut statuses = self.statuses.lock().unwrap();
            let before = statuses.len();
            statuses.retain(|s| s.id != id);
            Ok(statuses.len() < before)
        }
        async fn profiles_using(
            &self,
            name: &str,
            category_type: CategoryType,
        ) -> Result<u64, ApiError> {
            Ok(*self
                .usage
                .lock()
                .unwrap()
                .get(&(name.to_owned(), category_type))
                .unwrap_or(&0))
        }
    }

    fn test_status(name: &str, category_type: CategoryType) -> Status {
        Status {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            category_type,
            color: DEFAULT_COLOR.to_owned(),
            icon: String::new(),
            display_order: 0,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn should_block_delete_while_profiles_carry_the_name() {
        let status = test_status("pending", CategoryType::ForSale);
        let id = status.id;
        let usecase = DeleteStatusUseCase {
            statuses: MockStatusRepo::new(vec![status]).with_usage(
                "pending",
                CategoryType::ForSale,
                2,
            ),
        };
        let result = usecase.execute(id).await;
        assert!(matches!(result, Err(ApiError::StatusInUse)));
    }

    #[tokio::test]
    async fn should_delete_unused_status() {
        let status = test_status("archived", CategoryType::Personal);
        let id = status.id;
        let usecase = DeleteStatusUseCase {
            statuses: MockStatusRepo::new(vec![status]),
        };
        usecase.execute(id).await.unwrap();
    }

    #[tokio::test]
    async fn should_default_color_and_order() {
        let usecase = CreateStatusUseCase {
            statuses: MockStatusRepo::new(vec![]),
        };
        let status = usecase
            .execute(CreateStatusInput {
                name: "active".into(),
                category_type: "personal".into(),
                color: None,
                icon: None,
                display_order: None,
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(status.color, DEFAULT_COLOR);
        assert_eq!(status.display_order, 0);
    }
}
