use uuid::Uuid;

use provault_api::domain::access::{Actor, profile_list_scope};
use provault_api::usecase::profile::{
    CreateProfileInput, CreateProfileUseCase, ListProfilesInput, ListProfilesUseCase,
};
use provault_domain::category::CategoryType;
use provault_domain::email::EmailStatus;
use provault_domain::user::UserRole;

use crate::helpers::{MockCategoryRepo, MockProfileRepo, free_email, pending_profile, test_category};

fn create_input(category_id: Uuid) -> CreateProfileInput {
    CreateProfileInput {
        category_id,
        site_name: "example.com".into(),
        status: "pending".into(),
        username: "login".into(),
        password: "pw".into(),
        verification_status: None,
        phone: None,
        registration_status: None,
        registration_country: None,
        ip_country: None,
        comments: None,
    }
}

#[tokio::test]
async fn should_allocate_the_single_free_email_exactly_once_under_concurrency() {
    let category = test_category(CategoryType::ForSale);
    let categories = MockCategoryRepo::default();
    categories.categories.lock().unwrap().push(category.clone());

    let profiles = MockProfileRepo::default();
    profiles
        .email_pool
        .lock()
        .unwrap()
        .push(free_email("only@x.com"));

    let usecase_a = CreateProfileUseCase {
        profiles: profiles.clone(),
        categories: categories.clone(),
    };
    let usecase_b = CreateProfileUseCase {
        profiles: profiles.clone(),
        categories,
    };

    let (a, b) = tokio::join!(
        usecase_a.execute(Uuid::now_v7(), create_input(category.id)),
        usecase_b.execute(Uuid::now_v7(), create_input(category.id)),
    );
    let a = a.unwrap();
    let b = b.unwrap();

    // Exactly one of the two concurrent creations holds the address.
    let assigned: Vec<_> = [&a, &b]
        .iter()
        .filter_map(|r| r.profile.assigned_email.as_deref())
        .collect();
    assert_eq!(assigned, vec!["only@x.com"]);

    let pool = profiles.email_pool.lock().unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool[0].status, EmailStatus::Used);
    assert!(pool[0].used_at.is_some());
}

#[tokio::test]
async fn should_walk_the_full_allocation_scenario() {
    // Scenario: one free email, two for_sale creations in sequence.
    let category = test_category(CategoryType::ForSale);
    let categories = MockCategoryRepo::default();
    categories.categories.lock().unwrap().push(category.clone());

    let profiles = MockProfileRepo::default();
    profiles
        .email_pool
        .lock()
        .unwrap()
        .push(free_email("a@x.com"));

    let usecase = CreateProfileUseCase {
        profiles: profiles.clone(),
        categories,
    };

    let first = usecase
        .execute(Uuid::now_v7(), create_input(category.id))
        .await
        .unwrap();
    assert_eq!(first.profile.assigned_email.as_deref(), Some("a@x.com"));
    assert_eq!(
        profiles.email_pool.lock().unwrap()[0].status,
        EmailStatus::Used
    );

    let second = usecase
        .execute(Uuid::now_v7(), create_input(category.id))
        .await
        .unwrap();
    assert_eq!(second.profile.assigned_email, None);
}

#[tokio::test]
async fn should_never_leak_foreign_rows_to_a_non_admin_listing() {
    let alice = Uuid::now_v7();
    let bob = Uuid::now_v7();

    let profiles = MockProfileRepo::default();
    {
        let mut rows = profiles.profiles.lock().unwrap();
        rows.push(pending_profile(alice, chrono::Utc::now()));
        rows.push(pending_profile(bob, chrono::Utc::now()));
        rows.push(pending_profile(bob, chrono::Utc::now()));
    }

    let usecase = ListProfilesUseCase { profiles };
    let alice_actor = Actor {
        user_id: alice,
        username: "alice".into(),
        role: UserRole::User,
    };
    let admin_actor = Actor {
        user_id: Uuid::now_v7(),
        username: "root".into(),
        role: UserRole::Admin,
    };

    let own = usecase
        .execute(
            profile_list_scope(&alice_actor),
            ListProfilesInput {
                category: None,
                status: None,
                search: None,
            },
        )
        .await
        .unwrap();
    assert!(own.iter().all(|row| row.profile.user_id == alice));
    assert_eq!(own.len(), 1);

    let all = usecase
        .execute(
            profile_list_scope(&admin_actor),
            ListProfilesInput {
                category: None,
                status: None,
                search: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}
