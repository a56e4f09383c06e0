mod common;

use common::create_test_app_state;
use vidhyarthi_seva::config::security_config::{
    create_token, require_admin, verify_token, Claims, ROLE_ADMIN, ROLE_STUDENT,
};

#[tokio::test]
async fn test_create_and_verify_token() {
    let state = create_test_app_state();
    let user_id = "7f9c24e5-0000-4000-8000-000000000001";

    let token = create_token(&state, user_id, ROLE_STUDENT).expect("Failed to create token");
    assert!(!token.is_empty());

    let claims = verify_token(&state, &token).expect("Failed to verify token");
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, ROLE_STUDENT);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let state = create_test_app_state();

    let result = verify_token(&state, "invalid.token.here");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_token_with_wrong_secret_rejected() {
    let state = create_test_app_state();

    let token = create_token(&state, "some-user", ROLE_STUDENT).expect("Failed to create token");

    let mut different_state = (*state).clone();
    different_state.jwt_secret = "different_secret_key_minimum_32_characters_long".to_string();

    let result = verify_token(&std::sync::Arc::new(different_state), &token);
    assert!(result.is_err());
}

#[test]
fn test_admin_gate() {
    let admin = Claims {
        sub: "u1".to_string(),
        role: ROLE_ADMIN.to_string(),
        exp: 2_000_000_000,
        iat: 1_000_000_000,
    };
    let student = Claims {
        sub: "u2".to_string(),
        role: ROLE_STUDENT.to_string(),
        exp: 2_000_000_000,
        iat: 1_000_000_000,
    };

    assert!(require_admin(&admin).is_ok());
    assert!(require_admin(&student).is_err());
}

#[test]
fn test_password_hashing() {
    let password = "SecurePassword123";
    let hash = bcrypt::hash(password, 4).unwrap();

    assert!(bcrypt::verify(password, &hash).unwrap());
    assert!(!bcrypt::verify("WrongPassword", &hash).unwrap());
}
