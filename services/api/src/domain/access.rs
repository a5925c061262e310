//! The single authorization predicate.
//!
//! Every handler routes its role/ownership decision through [`permitted`]
//! instead of branching on the role inline, so the whole access matrix
//! lives (and is tested) in one place.

use uuid::Uuid;

use provault_domain::user::UserRole;

/// Resolved identity of the caller.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Update,
    Delete,
}

/// Resource being acted on. `owner` carries the owning user where
/// ownership scopes the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Category,
    CustomField,
    Status,
    EmailPool,
    User,
    Profile { owner: Option<Uuid> },
    Reminder { owner: Uuid },
}

/// Whether `actor` may perform `action` on `resource`.
///
/// Admins may do everything. Regular users may read the shared catalogs
/// (categories, fields, statuses, email pool), manage their own profiles
/// and reminders, and nothing else.
pub fn permitted(actor: &Actor, action: Action, resource: Resource) -> bool {
    if actor.is_admin() {
        return true;
    }
    match resource {
        Resource::Category | Resource::CustomField | Resource::Status | Resource::EmailPool => {
            action == Action::List
        }
        Resource::User => false,
        Resource::Profile { owner } => match action {
            Action::List | Action::Create => true,
            Action::Update | Action::Delete => owner == Some(actor.user_id),
        },
        Resource::Reminder { owner } => owner == actor.user_id,
    }
}

/// Owner scope for profile listings: admins see every row, users only
/// their own.
pub fn profile_list_scope(actor: &Actor) -> Option<Uuid> {
    if actor.is_admin() {
        None
    } else {
        Some(actor.user_id)
    }
}
