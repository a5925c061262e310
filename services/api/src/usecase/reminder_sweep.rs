//! Periodic verification-reminder sweep.
//!
//! Each tick scans for profiles stuck in `pending` past the staleness
//! threshold and writes one `verification` reminder per profile, suppressed
//! while a reminder from the trailing window exists. All failures are
//! non-fatal: a per-profile insert failure skips that profile, a failed
//! scan abandons the tick, and the next tick starts from scratch.

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use provault_domain::reminder::{ReminderStatus, VERIFICATION_KIND};

use crate::domain::repository::{NotifierPort, ProfileRepository, ReminderRepository};
use crate::domain::types::{Event, Reminder, StalePendingProfile};
use crate::error::ApiError;

/// Hours a profile may sit in `pending` before a reminder is due.
pub const STALE_AFTER_HOURS: i64 = 12;

/// Trailing window within which an existing verification reminder
/// suppresses a new one.
pub const LOOKBACK_HOURS: i64 = 12;

/// Injectable time source so tests can cross tick boundaries without
/// wall-clock waits.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct ReminderSweep<P, R, N, C>
where
    P: ProfileRepository,
    R: ReminderRepository,
    N: NotifierPort,
    C: Clock,
{
    pub profiles: P,
    pub reminders: R,
    pub notifier: N,
    pub clock: C,
}

impl<P, R, N, C> ReminderSweep<P, R, N, C>
where
    P: ProfileRepository,
    R: ReminderRepository,
    N: NotifierPort,
    C: Clock,
{
    /// One sweep pass. Returns the number of reminders created.
    pub async fn run_once(&self) -> Result<usize, ApiError> {
        let now = self.clock.now();
        let older_than = now - Duration::hours(STALE_AFTER_HOURS);
        let reminded_since = now - Duration::hours(LOOKBACK_HOURS);

        let stale = self
            .profiles
            .find_stale_pending(older_than, reminded_since)
            .await?;

        let mut created = 0;
        for profile in stale {
            match self.create_reminder(&profile, now).await {
                Ok(reminder) => {
                    created += 1;
                    self.notifier
                        .notify_user(
                            profile.user_id,
                            &Event::ReminderCreated {
                                reminder_id: reminder.id,
                                profile_id: reminder.profile_id,
                                message: reminder.message,
                            },
                        )
                        .await;
                }
                Err(e) => {
                    warn!(
                        profile_id = %profile.profile_id,
                        error = %e,
                        "skipping verification reminder"
                    );
                }
            }
        }
        Ok(created)
    }

    async fn create_reminder(
        &self,
        profile: &StalePendingProfile,
        now: DateTime<Utc>,
    ) -> Result<Reminder, ApiError> {
        let reminder = Reminder {
            id: Uuid::now_v7(),
            user_id: profile.user_id,
            profile_id: profile.profile_id,
            kind: VERIFICATION_KIND.to_owned(),
            message: format!(
                "Profile \"{}\" has been awaiting verification for more than {} hours. \
                 Check its verification status.",
                profile.site_name, STALE_AFTER_HOURS
            ),
            reminder_date: None,
            status: ReminderStatus::Pending,
            created_at: now,
        };
        self.reminders.create(&reminder).await?;
        Ok(reminder)
    }

    /// Tick forever. Errors are logged and never escape, so the host
    /// process outlives any sweep failure.
    pub async fn run_loop(self, period: std::time::Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(created) if created > 0 => {
                    info!(created, "verification sweep created reminders");
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "verification sweep tick failed");
                }
            }
        }
    }
}
