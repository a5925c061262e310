use chrono::Utc;
use uuid::Uuid;

use provault_domain::email::{EmailStatus, validate_email_address};
use provault_domain::pagination::PageRequest;

use crate::domain::repository::EmailRepository;
use crate::domain::types::{EmailAccount, EmailListFilter, EmailPatch, EmailStats};
use crate::error::ApiError;

// ── ListEmails ───────────────────────────────────────────────────────────────

pub struct ListEmailsInput {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct EmailPage {
    pub emails: Vec<EmailAccount>,
    pub total: u64,
    pub page: PageRequest,
}

pub struct ListEmailsUseCase<E: EmailRepository> {
    pub emails: E,
}

impl<E: EmailRepository> ListEmailsUseCase<E> {
    pub async fn execute(&self, input: ListEmailsInput) -> Result<EmailPage, ApiError> {
        let filter = EmailListFilter {
            status: input
                .status
                .as_deref()
                .map(|v| EmailStatus::from_str_value(v).ok_or(ApiError::InvalidEmailStatus))
                .transpose()?,
            search: input.search.filter(|s| !s.trim().is_empty()),
        };
        let page = input.page.clamped();
        let (emails, total) = self.emails.list(&filter, page).await?;
        Ok(EmailPage {
            emails,
            total,
            page,
        })
    }
}

// ── EmailStats ───────────────────────────────────────────────────────────────

pub struct EmailStatsUseCase<E: EmailRepository> {
    pub emails: E,
}

impl<E: EmailRepository> EmailStatsUseCase<E> {
    pub async fn execute(&self) -> Result<EmailStats, ApiError> {
        self.emails.stats().await
    }
}

// ── AvailableEmail ───────────────────────────────────────────────────────────

pub struct AvailableEmailUseCase<E: EmailRepository> {
    pub emails: E,
}

impl<E: EmailRepository> AvailableEmailUseCase<E> {
    /// Preview the next claimable email without claiming it.
    pub async fn execute(&self) -> Result<EmailAccount, ApiError> {
        self.emails
            .find_first_free()
            .await?
            .ok_or(ApiError::EmailNotFound)
    }
}

// ── CreateEmail ──────────────────────────────────────────────────────────────

pub struct CreateEmailInput {
    pub email: String,
    pub password: String,
    pub notes: Option<String>,
}

pub struct CreateEmailUseCase<E: EmailRepository> {
    pub emails: E,
}

impl<E: EmailRepository> CreateEmailUseCase<E> {
    pub async fn execute(&self, input: CreateEmailInput) -> Result<EmailAccount, ApiError> {
        let account = build_account(input)?;
        self.emails.create(&account).await?;
        Ok(account)
    }
}

fn build_account(input: CreateEmailInput) -> Result<EmailAccount, ApiError> {
    let address = input.email.trim().to_owned();
    if !validate_email_address(&address) {
        return Err(ApiError::InvalidEmailAddress);
    }
    if input.password.is_empty() {
        return Err(ApiError::MissingData);
    }
    Ok(EmailAccount {
        id: Uuid::now_v7(),
        email: address,
        password: input.password,
        status: EmailStatus::Free,
        notes: input.notes,
        used_at: None,
        created_at: Utc::now(),
    })
}

// ── BulkImportEmails ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct BulkImportFailure {
    pub email: String,
    pub reason: &'static str,
}

/// Per-item outcome of a bulk import — the one intentionally partial
/// operation in the API.
#[derive(Debug, Default)]
pub struct BulkImportOutput {
    pub successful: Vec<EmailAccount>,
    pub failed: Vec<BulkImportFailure>,
}

pub struct BulkImportEmailsUseCase<E: EmailRepository> {
    pub emails: E,
}

impl<E: EmailRepository> BulkImportEmailsUseCase<E> {
    pub async fn execute(
        &self,
        items: Vec<CreateEmailInput>,
    ) -> Result<BulkImportOutput, ApiError> {
        if items.is_empty() {
            return Err(ApiError::MissingData);
        }
        let mut output = BulkImportOutput::default();
        for item in items {
            let address = item.email.clone();
            match build_account(item) {
                Ok(account) => match self.emails.create(&account).await {
                    Ok(()) => output.successful.push(account),
                    Err(e) => output.failed.push(BulkImportFailure {
                        email: address,
                        reason: e.kind(),
                    }),
                },
                Err(e) => output.failed.push(BulkImportFailure {
                    email: address,
                    reason: e.kind(),
                }),
            }
        }
        Ok(output)
    }
}

// ── UpdateEmail ──────────────────────────────────────────────────────────────

pub struct UpdateEmailInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub status: Option<String>,
    pub notes: Option<Option<String>>,
}

pub struct UpdateEmailUseCase<E: EmailRepository> {
    pub emails: E,
}

impl<E: EmailRepository> UpdateEmailUseCase<E> {
    pub async fn execute(
        &self,
        email_id: Uuid,
        input: UpdateEmailInput,
    ) -> Result<EmailAccount, ApiError> {
        if let Some(ref address) = input.email {
            if !validate_email_address(address.trim()) {
                return Err(ApiError::InvalidEmailAddress);
            }
        }
        let patch = EmailPatch {
            email: input.email.map(|a| a.trim().to_owned()),
            password: input.password.filter(|p| !p.is_empty()),
            status: input
                .status
                .as_deref()
                .map(|v| EmailStatus::from_str_value(v).ok_or(ApiError::InvalidEmailStatus))
                .transpose()?,
            notes: input.notes,
        };
        if patch.is_empty() {
            return Err(ApiError::MissingData);
        }

        self.emails
            .find_by_id(email_id)
            .await?
            .ok_or(ApiError::EmailNotFound)?;
        self.emails.update(email_id, &patch).await?;
        self.emails
            .find_by_id(email_id)
            .await?
            .ok_or(ApiError::EmailNotFound)
    }
}

// ── DeleteEmail ──────────────────────────────────────────────────────────────

pub struct DeleteEmailUseCase<E: EmailRepository> {
    pub emails: E,
}

impl<E: EmailRepository> DeleteEmailUseCase<E> {
    pub async fn execute(&self, email_id: Uuid) -> Result<(), ApiError> {
        let account = self
            .emails
            .find_by_id(email_id)
            .await?
            .ok_or(ApiError::EmailNotFound)?;
        // The assigned_email foreign key would refuse the delete anyway;
        // checking first turns a store error into a clean conflict.
        if self.emails.profile_count(&account.email).await? > 0 {
            return Err(ApiError::EmailInUse);
        }
        if !self.emails.delete(email_id).await? {
            return Err(ApiError::EmailNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockEmailRepo {
        emails: Mutex<Vec<EmailAccount>>,
        assignments: Mutex<HashMap<String, u64>>,
    }

    impl MockEmailRepo {
        fn new(emails: Vec<EmailAccount>) -> Self {
            Self {
                emails: Mutex::new(emails),
                assignments: Mutex::new(HashMap::new()),
            }
        }

        fn with_assignment(self, address: &str, count: u64) -> Self {
            self.assignments
                .lock()
                .unwrap()
                .insert(address.to_owned(), count);
            self
        }
    }

    impl EmailRepository for MockEmailRepo {
        async fn list(
            &self,
            filter: &EmailListFilter,
            page: PageRequest,
        ) -> Result<(Vec<EmailAccount>, u64), ApiError> {
            let emails = self.emails.lock().unwrap();
            let matching: Vec<EmailAccount> = emails
                .iter()
                .filter(|e| filter.status.is_none_or(|s| e.status == s))
                .filter(|e| {
                    filter
                        .search
                        .as_deref()
                        .is_none_or(|q| e.email.contains(q))
                })
                .cloned()
                .collect();
            let total = matching.len() as u64;
            let start = ((page.page - 1) * page.per_page) as usize;
            let page_rows = matching
                .into_iter()
                .skip(start)
                .take(page.per_page as usize)
                .collect();
            Ok((page_rows, total))
        }
        async fn stats(&self) -> Result<EmailStats, ApiError> {
            let emails = self.emails.lock().unwrap();
            let count =
                |s: EmailStatus| emails.iter().filter(|e| e.status == s).count() as u64;
            Ok(EmailStats {
                total: emails.len() as u64,
                free: count(EmailStatus::Free),
                used: count(EmailStatus::Used),
                blocked: count(EmailStatus::Blocked),
            })
        }
        async fn find_first_free(&self) -> Result<Option<EmailAccount>, ApiError> {
            Ok(self
                .emails
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.status == EmailStatus::Free)
                .min_by_key(|e| e.id)
                .cloned())
        }
        async fn find_by_id(&self, id: Uuid) -> Result<Option<EmailAccount>, ApiError> {
            Ok(self.emails.lock().unwrap().iter().find(|e| e.id == id).cloned())
        }
        async fn create(&self, email: &EmailAccount) -> Result<(), ApiError> {
            let mut emails = self.emails.lock().unwrap();
            if emails.iter().any(|e| e.email == email.email) {
                return Err(ApiError::EmailAlreadyExists);
            }
            emails.push(email.clone());
            Ok(())
        }
        async fn update(&self, id: Uuid, patch: &EmailPatch) -> Result<(), ApiError> {
            let mut emails = self.emails.lock().unwrap();
            let email = emails.iter_mut().find(|e| e.id == id).unwrap();
            if let Some(ref address) = patch.email {
                email.email = address.clone();
            }
            if let Some(status) = patch.status {
                email.status = status;
            }
            Ok(())
        }
        async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
            let mut emails = self.emails.lock().unwrap();
            let before = emails.len();
            emails.retain(|e| e.id != id);
            Ok(emails.len() < before)
        }
        async fn profile_count(&self, address: &str) -> Result<u64, ApiError> {
            Ok(*self.assignments.lock().unwrap().get(address).unwrap_or(&0))
        }
    }

    fn test_email(address: &str, status: EmailStatus) -> EmailAccount {
        EmailAccount {
            id: Uuid::now_v7(),
            email: address.to_owned(),
            password: "pw".into(),
            status,
            notes: None,
            used_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn should_reject_malformed_address() {
        let usecase = CreateEmailUseCase {
            emails: MockEmailRepo::new(vec![]),
        };
        let result = usecase
            .execute(CreateEmailInput {
                email: "not-an-address".into(),
                password: "pw".into(),
                notes: None,
            })
            .await;
        assert!(matches!(result, Err(ApiError::InvalidEmailAddress)));
    }

    #[tokio::test]
    async fn should_import_bulk_with_partial_failures() {
        let usecase = BulkImportEmailsUseCase {
            emails: MockEmailRepo::new(vec![test_email("taken@x.com", EmailStatus::Free)]),
        };
        let output = usecase
            .execute(vec![
                CreateEmailInput {
                    email: "fresh@x.com".into(),
                    password: "pw".into(),
                    notes: None,
                },
                CreateEmailInput {
                    email: "taken@x.com".into(),
                    password: "pw".into(),
                    notes: None,
                },
                CreateEmailInput {
                    email: "broken".into(),
                    password: "pw".into(),
                    notes: None,
                },
            ])
            .await
            .unwrap();

        assert_eq!(output.successful.len(), 1);
        assert_eq!(output.successful[0].email, "fresh@x.com");
        assert_eq!(output.failed.len(), 2);
        assert_eq!(output.failed[0].reason, "EMAIL_ALREADY_EXISTS");
        assert_eq!(output.failed[1].reason, "INVALID_EMAIL_ADDRESS");
    }

    #[tokio::test]
    async fn should_reject_empty_bulk_import() {
        let usecase = BulkImportEmailsUseCase {
            emails: MockEmailRepo::new(vec![]),
        };
        let result = usecase.execute(vec![]).await;
        assert!(matches!(result, Err(ApiError::MissingData)));
    }

    #[tokio::test]
    async fn should_block_delete_of_assigned_email() {
        let email = test_email("held@x.com", EmailStatus::Used);
        let id = email.id;
        let usecase = DeleteEmailUseCase {
            emails: MockEmailRepo::new(vec![email]).with_assignment("held@x.com", 1),
        };
        let result = usecase.execute(id).await;
        assert!(matches!(result, Err(ApiError::EmailInUse)));
    }

    #[tokio::test]
    async fn should_report_pool_stats() {
        let usecase = EmailStatsUseCase {
            emails: MockEmailRepo::new(vec![
                test_email("a@x.com", EmailStatus::Free),
                test_email("b@x.com", EmailStatus::Used),
                test_email("c@x.com", EmailStatus::Used),
                test_email("d@x.com", EmailStatus::Blocked),
            ]),
        };
        let stats = usecase.execute().await.unwrap();
        assert_eq!(
            stats,
            EmailStats {
                total: 4,
                free: 1,
                used: 2,
                blocked: 1
            }
        );
    }

    #[tokio::test]
    async fn should_return_404_when_pool_is_dry() {
        let usecase = AvailableEmailUseCase {
            emails: MockEmailRepo::new(vec![test_email("b@x.com", EmailStatus::Used)]),
        };
        let result = usecase.execute().await;
        assert!(matches!(result, Err(ApiError::EmailNotFound)));
    }
}
