use chrono::Utc;
use uuid::Uuid;

use provault_domain::category::CategoryType;
use provault_domain::field::FieldKind;

use crate::domain::repository::CustomFieldRepository;
use crate::domain::types::{CustomField, CustomFieldPatch};
use crate::error::ApiError;

fn parse_display_order(value: i32) -> Result<i32, ApiError> {
    if value < 0 {
        return Err(ApiError::InvalidDisplayOrder);
    }
    Ok(value)
}

// ── ListFields ───────────────────────────────────────────────────────────────

pub struct ListFieldsUseCase<F: CustomFieldRepository> {
    pub fields: F,
}

impl<F: CustomFieldRepository> ListFieldsUseCase<F> {
    pub async fn execute(&self, category_type: Option<String>) -> Result<Vec<CustomField>, ApiError> {
        let category_type = category_type
            .as_deref()
            .map(|v| CategoryType::from_str_value(v).ok_or(ApiError::InvalidCategoryType))
            .transpose()?;
        self.fields.list(category_type).await
    }
}

// ── CreateField ──────────────────────────────────────────────────────────────

pub struct CreateFieldInput {
    pub name: String,
    pub kind: String,
    pub category_type: String,
    pub display_order: i32,
    pub is_required: bool,
    pub options: Option<Vec<String>>,
    pub description: Option<String>,
}

pub struct CreateFieldUseCase<F: CustomFieldRepository> {
    pub fields: F,
}

impl<F: CustomFieldRepository> CreateFieldUseCase<F> {
    pub async fn execute(&self, input: CreateFieldInput) -> Result<CustomField, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::MissingData);
        }
        let kind = FieldKind::from_str_value(&input.kind).ok_or(ApiError::InvalidFieldKind)?;
        let category_type = CategoryType::from_str_value(&input.category_type)
            .ok_or(ApiError::InvalidCategoryType)?;
        let display_order = parse_display_order(input.display_order)?;

        let field = CustomField {
            id: Uuid::now_v7(),
            name: input.name.trim().to_owned(),
            kind,
            category_type,
            display_order,
            is_required: input.is_required,
            // Option lists only mean anything on select fields.
            options: match kind {
                FieldKind::Select => input.options,
                _ => None,
            },
            description: input.description,
            created_at: Utc::now(),
        };
        self.fields.create(&field).await?;
        Ok(field)
    }
}

// ── UpdateField ──────────────────────────────────────────────────────────────

pub struct UpdateFieldInput {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub display_order: Option<i32>,
    pub is_required: Option<bool>,
    pub options: Option<Option<Vec<String>>>,
    pub description: Option<Option<String>>,
}

pub struct UpdateFieldUseCase<F: CustomFieldRepository> {
    pub fields: F,
}

impl<F: CustomFieldRepository> UpdateFieldUseCase<F> {
    pub async fn execute(
        &self,
        field_id: Uuid,
        input: UpdateFieldInput,
    ) -> Result<CustomField, ApiError> {
        if let Some(ref name) = input.name {
            if name.trim().is_empty() {
                return Err(ApiError::MissingData);
            }
        }
        let patch = CustomFieldPatch {
            name: input.name.map(|n| n.trim().to_owned()),
            kind: input
                .kind
                .as_deref()
                .map(|v| FieldKind::from_str_value(v).ok_or(ApiError::InvalidFieldKind))
                .transpose()?,
            display_order: input.display_order.map(parse_display_order).transpose()?,
            is_required: input.is_required,
            options: input.options,
            description: input.description,
        };
        if patch.is_empty() {
            return Err(ApiError::MissingData);
        }

        self.fields
            .find_by_id(field_id)
            .await?
            .ok_or(ApiError::FieldNotFound)?;
        self.fields.update(field_id, &patch).await?;
        self.fields
            .find_by_id(field_id)
            .await?
            .ok_or(ApiError::FieldNotFound)
    }
}

// ── UpdateFieldOrder ─────────────────────────────────────────────────────────

pub struct UpdateFieldOrderUseCase<F: CustomFieldRepository> {
    pub fields: F,
}

impl<F: CustomFieldRepository> UpdateFieldOrderUseCase<F> {
    pub async fn execute(&self, field_id: Uuid, display_order: i32) -> Result<(), ApiError> {
        let display_order = parse_display_order(display_order)?;
        self.fields
            .find_by_id(field_id)
            .await?
            .ok_or(ApiError::FieldNotFound)?;
        self.fields.update_order(field_id, display_order).await
    }
}

// ── DeleteField ──────────────────────────────────────────────────────────────

pub struct DeleteFieldUseCase<F: CustomFieldRepository> {
    pub fields: F,
}

impl<F: CustomFieldRepository> DeleteFieldUseCase<F> {
    pub async fn execute(&self, field_id: Uuid) -> Result<(), ApiError> {
        if !self.fields.delete(field_id).await? {
            return Err(ApiError::FieldNotFound);
        }
        Ok(())
    }
}
