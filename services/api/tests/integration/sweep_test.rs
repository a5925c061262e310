use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use provault_api::usecase::reminder_sweep::{Clock, ReminderSweep};
use provault_domain::reminder::{ReminderStatus, VERIFICATION_KIND};

use crate::helpers::{MockProfileRepo, MockReminderRepo, NullNotifier, pending_profile};

struct FixedClock {
    now: DateTime<Utc>,
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

fn sweep_at(
    profiles: MockProfileRepo,
    now: DateTime<Utc>,
) -> ReminderSweep<MockProfileRepo, MockReminderRepo, NullNotifier, FixedClock> {
    let reminders = MockReminderRepo {
        reminders: std::sync::Arc::clone(&profiles.reminders),
    };
    ReminderSweep {
        profiles,
        reminders,
        notifier: NullNotifier,
        clock: FixedClock { now },
    }
}

#[tokio::test]
async fn should_create_exactly_one_reminder_across_two_close_ticks() {
    // Profile created at T with status pending.
    let t0 = Utc::now();
    let profile = pending_profile(Uuid::now_v7(), t0);
    let profile_id = profile.id;

    let profiles = MockProfileRepo::default();
    profiles.profiles.lock().unwrap().push(profile);

    // Sweep at T+13h: one reminder.
    let sweep = sweep_at(profiles.clone(), t0 + Duration::hours(13));
    assert_eq!(sweep.run_once().await.unwrap(), 1);
    {
        let reminders = profiles.reminders.lock().unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].profile_id, profile_id);
        assert_eq!(reminders[0].kind, VERIFICATION_KIND);
        assert_eq!(reminders[0].status, ReminderStatus::Pending);
    }

    // Sweep again at T+13h05m: still one reminder.
    let sweep = sweep_at(
        profiles.clone(),
        t0 + Duration::hours(13) + Duration::minutes(5),
    );
    assert_eq!(sweep.run_once().await.unwrap(), 0);
    assert_eq!(profiles.reminders.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_leave_young_and_non_pending_profiles_alone() {
    let now = Utc::now();
    let profiles = MockProfileRepo::default();
    {
        let mut rows = profiles.profiles.lock().unwrap();
        // Eleven hours old: under the threshold.
        rows.push(pending_profile(Uuid::now_v7(), now - Duration::hours(11)));
        // Old, but no longer pending.
        let mut active = pending_profile(Uuid::now_v7(), now - Duration::hours(48));
        active.status = "active".into();
        rows.push(active);
    }

    let sweep = sweep_at(profiles.clone(), now);
    assert_eq!(sweep.run_once().await.unwrap(), 0);
    assert!(profiles.reminders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_cover_every_stale_profile_in_one_tick() {
    let now = Utc::now();
    let profiles = MockProfileRepo::default();
    {
        let mut rows = profiles.profiles.lock().unwrap();
        for hours in [13, 20, 30] {
            rows.push(pending_profile(Uuid::now_v7(), now - Duration::hours(hours)));
        }
    }

    let sweep = sweep_at(profiles.clone(), now);
    assert_eq!(sweep.run_once().await.unwrap(), 3);
    assert_eq!(profiles.reminders.lock().unwrap().len(), 3);
}
