//! sea-orm entities for the Provault tables.

pub mod categories;
pub mod custom_fields;
pub mod emails;
pub mod profiles;
pub mod reminders;
pub mod statuses;
pub mod users;
