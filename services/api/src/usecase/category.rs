use chrono::Utc;
use uuid::Uuid;

use provault_domain::category::CategoryType;

use crate::domain::repository::CategoryRepository;
use crate::domain::types::{Category, CategoryPatch};
use crate::error::ApiError;

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> ListCategoriesUseCase<C> {
    pub async fn execute(&self, kind: Option<String>) -> Result<Vec<Category>, ApiError> {
        let kind = kind
            .as_deref()
            .map(|v| CategoryType::from_str_value(v).ok_or(ApiError::InvalidCategoryType))
            .transpose()?;
        self.categories.list(kind).await
    }
}

// ── CreateCategory ───────────────────────────────────────────────────────────

pub struct CreateCategoryInput {
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
}

pub struct CreateCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> CreateCategoryUseCase<C> {
    pub async fn execute(&self, input: CreateCategoryInput) -> Result<Category, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::MissingData);
        }
        let kind =
            CategoryType::from_str_value(&input.kind).ok_or(ApiError::InvalidCategoryType)?;

        let category = Category {
            id: Uuid::now_v7(),
            name: input.name.trim().to_owned(),
            kind,
            description: input.description,
            created_at: Utc::now(),
        };
        // Uniqueness of (name, type) is the store's job; a collision comes
        // back as CategoryAlreadyExists.
        self.categories.create(&category).await?;
        Ok(category)
    }
}

// ── UpdateCategory ───────────────────────────────────────────────────────────

pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

pub struct UpdateCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> UpdateCategoryUseCase<C> {
    pub async fn execute(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<Category, ApiError> {
        if let Some(ref name) = input.name {
            if name.trim().is_empty() {
                return Err(ApiError::MissingData);
            }
        }
        let patch = CategoryPatch {
            name: input.name.map(|n| n.trim().to_owned()),
            description: input.description,
        };
        if patch.is_empty() {
            return Err(ApiError::MissingData);
        }

        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or(ApiError::CategoryNotFound)?;
        self.categories.update(category_id, &patch).await?;
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or(ApiError::CategoryNotFound)
    }
}

// ── DeleteCategory ───────────────────────────────────────────────────────────

pub struct DeleteCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> DeleteCategoryUseCase<C> {
    pub async fn execute(&self, category_id: Uuid) -> Result<(), ApiError> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or(ApiError::CategoryNotFound)?;
        if self.categories.profile_count(category_id).await? > 0 {
            return Err(ApiError::CategoryInUse);
        }
        if !self.categories.delete(category_id).await? {
            return Err(ApiError::CategoryNotFound);
        }
        Ok(())
    }
}
