use provault_api::error::ApiError;
use provault_api::usecase::auth::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use provault_auth::token::validate_token;
use provault_domain::user::UserRole;

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET};

#[tokio::test]
async fn should_register_then_login_with_the_same_credentials() {
    let users = MockUserRepo::default();

    let register = RegisterUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let registered = register
        .execute(RegisterInput {
            username: "alice".into(),
            password: "secret-pw".into(),
            role: None,
        })
        .await
        .unwrap();

    let info = validate_token(&registered.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, registered.user.id);
    assert_eq!(info.role, UserRole::User);

    let login = LoginUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let logged_in = login
        .execute(LoginInput {
            username: "alice".into(),
            password: "secret-pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.user.id, registered.user.id);
}

#[tokio::test]
async fn should_keep_exactly_one_row_for_a_duplicate_registration() {
    let users = MockUserRepo::default();
    let register = RegisterUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    register
        .execute(RegisterInput {
            username: "alice".into(),
            password: "secret-pw".into(),
            role: None,
        })
        .await
        .unwrap();

    let second = register
        .execute(RegisterInput {
            username: "alice".into(),
            password: "other-pw".into(),
            role: None,
        })
        .await;
    assert!(matches!(second, Err(ApiError::UserAlreadyExists)));
    assert_eq!(users.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_registered_admin_roles_it_does_not_know() {
    let register = RegisterUseCase {
        users: MockUserRepo::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = register
        .execute(RegisterInput {
            username: "mallory".into(),
            password: "secret-pw".into(),
            role: Some("superuser".into()),
        })
        .await;
    assert!(matches!(result, Err(ApiError::InvalidRole)));
}

#[tokio::test]
async fn should_reject_token_signed_with_another_secret() {
    let register = RegisterUseCase {
        users: MockUserRepo::default(),
        jwt_secret: "other-secret".to_owned(),
    };
    let output = register
        .execute(RegisterInput {
            username: "alice".into(),
            password: "secret-pw".into(),
            role: None,
        })
        .await
        .unwrap();

    assert!(validate_token(&output.token, TEST_JWT_SECRET).is_err());
}
