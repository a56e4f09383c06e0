use crate::error::ApiError;
use crate::models::models::{
    AppState, NewPayment, Payment, PaymentCourseSummary, PaymentListItem, PaymentUserSummary,
    PAYMENT_STATUS_CREATED, PAYMENT_STATUS_PAID,
};
use crate::schema::{courses, payments, users};
use crate::services::razorpay_service::{
    order_receipt, to_minor_units, verify_payment_signature, RazorpayClient,
};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct PaymentService;

impl PaymentService {
    /// Opens a gateway order for a course purchase and records the attempt
    /// as a `created` payment keyed by the gateway order id. If the process
    /// dies between gateway confirmation and verification, the attempt is
    /// still on record and recoverable.
    pub async fn create_order(
        state: Arc<AppState>,
        amount: i64,
        course_id: &str,
        user_id: &str,
    ) -> Result<Value, ApiError> {
        let course_uuid = Uuid::parse_str(course_id)
            .map_err(|_| ApiError::BadRequest("Invalid course id".to_string()))?;
        let user_uuid = Uuid::parse_str(user_id)
            .map_err(|_| ApiError::BadRequest("Invalid user id".to_string()))?;

        {
            let conn = &mut state.db.get().map_err(|e| {
                error!("Database connection error: {}", e);
                ApiError::DatabaseConnection(e.to_string())
            })?;

            courses::table
                .find(course_uuid)
                .select(courses::id)
                .first::<Uuid>(conn)
                .optional()?
                .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

            users::table
                .find(user_uuid)
                .select(users::id)
                .first::<Uuid>(conn)
                .optional()?
                .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        }

        let receipt = order_receipt(course_id, Utc::now().timestamp_millis());
        // courseId/userId ride along as opaque gateway metadata for
        // reconciliation.
        let notes = json!({ "courseId": course_id, "userId": user_id });

        let client = RazorpayClient::new(&state)?;
        let order = client
            .create_order(to_minor_units(amount)?, "INR", &receipt, notes)
            .await?;

        let gateway_order_id = order["id"]
            .as_str()
            .ok_or_else(|| {
                error!("Razorpay order response missing order id: {}", order);
                ApiError::Gateway("Gateway order response missing id".to_string())
            })?
            .to_string();

        let conn = &mut state.db.get().map_err(|e| {
            error!("Database connection error: {}", e);
            ApiError::DatabaseConnection(e.to_string())
        })?;

        diesel::insert_into(payments::table)
            .values(NewPayment {
                id: Uuid::new_v4(),
                user_id: user_uuid,
                course_id: course_uuid,
                amount,
                currency: "INR".to_string(),
                razorpay_order_id: gateway_order_id.clone(),
                razorpay_payment_id: None,
                razorpay_signature: None,
                status: PAYMENT_STATUS_CREATED.to_string(),
            })
            .execute(conn)
            .map_err(|e| {
                // The gateway order exists either way; keep the ids around
                // so the attempt can be reconciled.
                error!(
                    "Failed to record created payment for order {}: {}",
                    gateway_order_id, e
                );
                ApiError::Database(e)
            })?;

        info!(
            "Razorpay order {} opened for user {} / course {} (amount {})",
            gateway_order_id, user_id, course_id, amount
        );

        Ok(order)
    }

    /// Checks the client-reported checkout outcome against the gateway
    /// signature and, only on a match, records the payment as paid.
    ///
    /// Idempotent: a repeat submission for an already-paid order returns
    /// the existing record, and a concurrent duplicate insert resolves the
    /// unique-key conflict the same way.
    pub fn verify_payment(
        state: &AppState,
        order_id: &str,
        payment_id: &str,
        signature: &str,
        course_id: &str,
        user_id: &str,
        amount: i64,
    ) -> Result<Payment, ApiError> {
        // No persistence of any kind happens before this check passes.
        if !verify_payment_signature(&state.razorpay_key_secret, order_id, payment_id, signature) {
            warn!("Signature mismatch for order {}", order_id);
            return Err(ApiError::InvalidSignature);
        }

        let course_uuid = Uuid::parse_str(course_id)
            .map_err(|_| ApiError::BadRequest("Invalid course id".to_string()))?;
        let user_uuid = Uuid::parse_str(user_id)
            .map_err(|_| ApiError::BadRequest("Invalid user id".to_string()))?;

        let conn = &mut state.db.get().map_err(|e| {
            error!("Database connection error: {}", e);
            ApiError::DatabaseConnection(e.to_string())
        })?;

        let result = conn.transaction::<Payment, DieselError, _>(|conn| {
            let existing: Option<Payment> = payments::table
                .filter(payments::razorpay_order_id.eq(order_id))
                .select(Payment::as_select())
                .first(conn)
                .optional()?;

            match existing {
                Some(payment) if payment.status == PAYMENT_STATUS_PAID => {
                    info!(
                        "Order {} already recorded as paid; returning existing record",
                        order_id
                    );
                    Ok(payment)
                }
                Some(payment) => diesel::update(payments::table.find(payment.id))
                    .set((
                        payments::status.eq(PAYMENT_STATUS_PAID),
                        payments::razorpay_payment_id.eq(payment_id),
                        payments::razorpay_signature.eq(signature),
                        payments::updated_at.eq(Utc::now()),
                    ))
                    .returning(Payment::as_returning())
                    .get_result(conn),
                // No local record: the order was confirmed at the gateway
                // but never reached us (crash window, or an order opened
                // before this release). Insert fresh, as paid.
                None => diesel::insert_into(payments::table)
                    .values(NewPayment {
                        id: Uuid::new_v4(),
                        user_id: user_uuid,
                        course_id: course_uuid,
                        amount,
                        currency: "INR".to_string(),
                        razorpay_order_id: order_id.to_string(),
                        razorpay_payment_id: Some(payment_id.to_string()),
                        razorpay_signature: Some(signature.to_string()),
                        status: PAYMENT_STATUS_PAID.to_string(),
                    })
                    .returning(Payment::as_returning())
                    .get_result(conn),
            }
        });

        match result {
            Ok(payment) => {
                info!(
                    "Payment verified: order {} payment {} user {}",
                    order_id, payment_id, user_id
                );
                Ok(payment)
            }
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                let recorded: Option<Payment> = payments::table
                    .filter(payments::razorpay_order_id.eq(order_id))
                    .select(Payment::as_select())
                    .first(conn)
                    .optional()
                    .map_err(|e| {
                        error!(
                            "Failed to load recorded payment for order {}: {}",
                            order_id, e
                        );
                        ApiError::PaymentPersistence(e.to_string())
                    })?;

                match recorded {
                    // Two verification calls raced; the other one won the
                    // insert. Treat as already recorded.
                    Some(payment) => {
                        info!(
                            "Duplicate verification for order {}; returning recorded payment",
                            order_id
                        );
                        Ok(payment)
                    }
                    // No row for this order means the conflict was on the
                    // payment id, which is already attached to a different
                    // order. Nothing was saved.
                    None => {
                        warn!(
                            "Payment {} already recorded against another order; rejecting order {}",
                            payment_id, order_id
                        );
                        Err(ApiError::BadRequest(
                            "Payment id already recorded against another order".to_string(),
                        ))
                    }
                }
            }
            Err(e) => {
                // The money already moved at the gateway; log the ids so
                // the attempt can be reconciled.
                error!(
                    "Verified payment could not be recorded: order {} payment {} user {}: {}",
                    order_id, payment_id, user_id, e
                );
                Err(ApiError::PaymentPersistence(e.to_string()))
            }
        }
    }

    /// All payments, newest first, each expanded with purchaser and course
    /// title for the admin dashboard.
    pub fn list_all(state: &AppState) -> Result<Vec<PaymentListItem>, ApiError> {
        let conn = &mut state.db.get().map_err(|e| {
            error!("Database connection error: {}", e);
            ApiError::DatabaseConnection(e.to_string())
        })?;

        let rows: Vec<(Payment, String, String, String, String)> = payments::table
            .inner_join(users::table)
            .inner_join(courses::table)
            .order(payments::created_at.desc())
            .select((
                Payment::as_select(),
                users::first_name,
                users::last_name,
                users::email,
                courses::title,
            ))
            .load(conn)
            .map_err(|e| {
                error!("Failed to fetch payments: {}", e);
                ApiError::Database(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(payment, first_name, last_name, email, title)| PaymentListItem {
                id: payment.id.to_string(),
                user: PaymentUserSummary {
                    first_name,
                    last_name,
                    email,
                },
                course: PaymentCourseSummary { title },
                amount: payment.amount,
                currency: payment.currency,
                status: payment.status,
                created_at: payment.created_at,
            })
            .collect())
    }

    /// The calling user's own payments, newest first.
    pub fn list_for_user(state: &AppState, user_uuid: Uuid) -> Result<Vec<Payment>, ApiError> {
        let conn = &mut state.db.get().map_err(|e| {
            error!("Database connection error: {}", e);
            ApiError::DatabaseConnection(e.to_string())
        })?;

        payments::table
            .filter(payments::user_id.eq(user_uuid))
            .order(payments::created_at.desc())
            .select(Payment::as_select())
            .load(conn)
            .map_err(|e| {
                error!("Failed to fetch payments for user {}: {}", user_uuid, e);
                ApiError::Database(e)
            })
    }
}
