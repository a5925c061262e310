use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use provault_core::health::{healthz, readyz};
use provault_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, me, register},
    category::{create_category, delete_category, list_categories, update_category},
    email::{
        available_email, bulk_import_emails, create_email, delete_email, email_stats, list_emails,
        update_email,
    },
    field::{create_field, delete_field, list_fields, update_field, update_field_order},
    profile::{create_profile, delete_profile, list_profiles, update_profile},
    reminder::{
        create_reminder, delete_reminder, dismiss_reminder, list_reminders, pending_reminders,
    },
    status::{create_status, delete_status, list_statuses, update_status},
    user::{create_user, delete_user, list_users, update_user},
    ws::ws_handler,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        // Profiles
        .route("/profiles", get(list_profiles))
        .route("/profiles", post(create_profile))
        .route("/profiles/{id}", put(update_profile))
        .route("/profiles/{id}", delete(delete_profile))
        // Emails
        .route("/emails", get(list_emails))
        .route("/emails", post(create_email))
        .route("/emails/stats", get(email_stats))
        .route("/emails/available", get(available_email))
        .route("/emails/bulk", post(bulk_import_emails))
        .route("/emails/{id}", put(update_email))
        .route("/emails/{id}", delete(delete_email))
        // Categories
        .route("/categories", get(list_categories))
        .route("/categories", post(create_category))
        .route("/categories/{id}", put(update_category))
        .route("/categories/{id}", delete(delete_category))
        // Custom fields
        .route("/fields", get(list_fields))
        .route("/fields", post(create_field))
        .route("/fields/{id}", put(update_field))
        .route("/fields/{id}/order", put(update_field_order))
        .route("/fields/{id}", delete(delete_field))
        // Statuses
        .route("/statuses", get(list_statuses))
        .route("/statuses", post(create_status))
        .route("/statuses/{id}", put(update_status))
        .route("/statuses/{id}", delete(delete_status))
        // Users
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/{id}", put(update_user))
        .route("/users/{id}", delete(delete_user))
        // Reminders
        .route("/reminders", get(list_reminders))
        .route("/reminders", post(create_reminder))
        .route("/reminders/pending", get(pending_reminders))
        .route("/reminders/{id}/dismiss", put(dismiss_reminder))
        .route("/reminders/{id}", delete(delete_reminder))
        // Real-time channel
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
