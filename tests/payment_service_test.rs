mod common;

use common::{cleanup_test_db, create_test_app_state, run_test_migrations};
use diesel::prelude::*;
use uuid::Uuid;
use vidhyarthi_seva::error::ApiError;
use vidhyarthi_seva::models::models::{AppState, NewCourse, NewUser};
use vidhyarthi_seva::schema::{courses, payments, users};
use vidhyarthi_seva::services::payment_service::PaymentService;
use vidhyarthi_seva::services::razorpay_service::payment_signature;

fn seed_user_and_course(state: &AppState) -> (Uuid, Uuid) {
    let conn = &mut state.db.get().expect("test database unavailable");
    run_test_migrations(conn);
    cleanup_test_db(conn);

    let user_id = Uuid::new_v4();
    diesel::insert_into(users::table)
        .values(NewUser {
            id: user_id,
            first_name: "Asha".to_string(),
            last_name: "Verma".to_string(),
            email: format!("asha+{}@example.com", user_id),
            password_hash: "x".to_string(),
            role: "student".to_string(),
        })
        .execute(conn)
        .unwrap();

    let course_id = Uuid::new_v4();
    diesel::insert_into(courses::table)
        .values(NewCourse {
            id: course_id,
            title: "CA Final Audit".to_string(),
            description: None,
            lectures: Some(120),
            hours: Some(300),
            timings: None,
            batch_start_date: None,
            video_language: None,
            syllabus_type: None,
            thumbnail: None,
            access_options: serde_json::json!([]),
        })
        .execute(conn)
        .unwrap();

    (user_id, course_id)
}

fn payment_count(state: &AppState) -> i64 {
    let conn = &mut state.db.get().unwrap();
    payments::table.count().get_result(conn).unwrap()
}

#[test]
#[ignore = "requires a live Postgres at TEST_DATABASE_URL"]
fn rejected_signature_persists_nothing() {
    let state = create_test_app_state();
    let (user_id, course_id) = seed_user_and_course(&state);
    let before = payment_count(&state);

    let result = PaymentService::verify_payment(
        &state,
        "order_abc",
        "pay_123",
        "forged",
        &course_id.to_string(),
        &user_id.to_string(),
        999,
    );

    assert!(result.is_err());
    assert_eq!(payment_count(&state), before);
}

#[test]
#[ignore = "requires a live Postgres at TEST_DATABASE_URL"]
fn accepted_signature_persists_exactly_one_paid_record() {
    let state = create_test_app_state();
    let (user_id, course_id) = seed_user_and_course(&state);
    let before = payment_count(&state);

    let signature = payment_signature(&state.razorpay_key_secret, "order_abc", "pay_123");
    let payment = PaymentService::verify_payment(
        &state,
        "order_abc",
        "pay_123",
        &signature,
        &course_id.to_string(),
        &user_id.to_string(),
        999,
    )
    .expect("verification should succeed");

    assert_eq!(payment.status, "paid");
    assert_eq!(payment.amount, 999);
    assert_eq!(payment.razorpay_order_id, "order_abc");
    assert_eq!(payment.razorpay_payment_id.as_deref(), Some("pay_123"));
    assert_eq!(payment_count(&state), before + 1);
}

#[test]
#[ignore = "requires a live Postgres at TEST_DATABASE_URL"]
fn duplicate_submission_returns_the_first_record() {
    let state = create_test_app_state();
    let (user_id, course_id) = seed_user_and_course(&state);

    let signature = payment_signature(&state.razorpay_key_secret, "order_dup", "pay_dup");
    let first = PaymentService::verify_payment(
        &state,
        "order_dup",
        "pay_dup",
        &signature,
        &course_id.to_string(),
        &user_id.to_string(),
        500,
    )
    .unwrap();
    let count_after_first = payment_count(&state);

    let second = PaymentService::verify_payment(
        &state,
        "order_dup",
        "pay_dup",
        &signature,
        &course_id.to_string(),
        &user_id.to_string(),
        500,
    )
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(payment_count(&state), count_after_first);
}

#[test]
#[ignore = "requires a live Postgres at TEST_DATABASE_URL"]
fn listing_returns_newest_first() {
    let state = create_test_app_state();
    let (user_id, course_id) = seed_user_and_course(&state);

    for (order_id, payment_id) in [
        ("order_t1", "pay_t1"),
        ("order_t2", "pay_t2"),
        ("order_t3", "pay_t3"),
    ] {
        let signature = payment_signature(&state.razorpay_key_secret, order_id, payment_id);
        PaymentService::verify_payment(
            &state,
            order_id,
            payment_id,
            &signature,
            &course_id.to_string(),
            &user_id.to_string(),
            100,
        )
        .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    let listing = PaymentService::list_all(&state).unwrap();
    assert_eq!(listing.len(), 3);
    assert!(listing[0].created_at >= listing[1].created_at);
    assert!(listing[1].created_at >= listing[2].created_at);
    assert_eq!(listing[0].user.first_name, "Asha");
    assert_eq!(listing[0].course.title, "CA Final Audit");
}

#[test]
#[ignore = "requires a live Postgres at TEST_DATABASE_URL"]
fn created_record_transitions_to_paid_instead_of_inserting_fresh() {
    let state = create_test_app_state();
    let (user_id, course_id) = seed_user_and_course(&state);

    // Simulate the order-creation insert.
    let pending_id = Uuid::new_v4();
    {
        let conn = &mut state.db.get().unwrap();
        diesel::insert_into(payments::table)
            .values((
                payments::id.eq(pending_id),
                payments::user_id.eq(user_id),
                payments::course_id.eq(course_id),
                payments::amount.eq(750_i64),
                payments::currency.eq("INR"),
                payments::razorpay_order_id.eq("order_pending"),
                payments::status.eq("created"),
            ))
            .execute(conn)
            .unwrap();
    }
    let before = payment_count(&state);

    let signature = payment_signature(&state.razorpay_key_secret, "order_pending", "pay_p1");
    let payment = PaymentService::verify_payment(
        &state,
        "order_pending",
        "pay_p1",
        &signature,
        &course_id.to_string(),
        &user_id.to_string(),
        750,
    )
    .unwrap();

    assert_eq!(payment.id, pending_id);
    assert_eq!(payment.status, "paid");
    assert_eq!(payment_count(&state), before);
}

#[test]
#[ignore = "requires a live Postgres at TEST_DATABASE_URL"]
fn payment_id_reused_under_another_order_is_rejected() {
    let state = create_test_app_state();
    let (user_id, course_id) = seed_user_and_course(&state);

    let signature = payment_signature(&state.razorpay_key_secret, "order_one", "pay_shared");
    PaymentService::verify_payment(
        &state,
        "order_one",
        "pay_shared",
        &signature,
        &course_id.to_string(),
        &user_id.to_string(),
        250,
    )
    .unwrap();
    let before = payment_count(&state);

    let reused = payment_signature(&state.razorpay_key_secret, "order_two", "pay_shared");
    let result = PaymentService::verify_payment(
        &state,
        "order_two",
        "pay_shared",
        &reused,
        &course_id.to_string(),
        &user_id.to_string(),
        250,
    );

    assert!(matches!(result, Err(ApiError::BadRequest(_))));
    assert_eq!(payment_count(&state), before);
}
