use crate::schema::{courses, payments, users};
use crate::utility::{validate_access_options, validate_password};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub jwt_secret: String,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub razorpay_api_url: String,
    pub app_url: String,
}

// ---------------------------------------------------------------------------
// Entities

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(table_name = users)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(table_name = courses)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub lectures: Option<i32>,
    pub hours: Option<i32>,
    pub timings: Option<String>,
    pub batch_start_date: Option<DateTime<Utc>>,
    pub video_language: Option<String>,
    pub syllabus_type: Option<String>,
    pub thumbnail: Option<String>,
    pub access_options: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = courses)]
pub struct NewCourse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub lectures: Option<i32>,
    pub hours: Option<i32>,
    pub timings: Option<String>,
    pub batch_start_date: Option<DateTime<Utc>>,
    pub video_language: Option<String>,
    pub syllabus_type: Option<String>,
    pub thumbnail: Option<String>,
    pub access_options: JsonValue,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = courses)]
pub struct CourseChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lectures: Option<i32>,
    pub hours: Option<i32>,
    pub timings: Option<String>,
    pub batch_start_date: Option<DateTime<Utc>>,
    pub video_language: Option<String>,
    pub syllabus_type: Option<String>,
    pub thumbnail: Option<String>,
    pub access_options: Option<JsonValue>,
    pub updated_at: DateTime<Utc>,
}

/// One purchase attempt/outcome. Inserted with status `created` when the
/// gateway order is opened, transitioned to `paid` once the signature
/// check passes. Never deleted.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(table_name = payments)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = payments)]
pub struct NewPayment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    pub status: String,
}

pub const PAYMENT_STATUS_CREATED: &str = "created";
pub const PAYMENT_STATUS_PAID: &str = "paid";
pub const PAYMENT_STATUS_FAILED: &str = "failed";

// ---------------------------------------------------------------------------
// Auth DTOs

#[derive(Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50, message = "First name must be 2-50 characters"))]
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[validate(length(min = 2, max = 50, message = "Last name must be 2-50 characters"))]
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8), custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
        }
    }
}

// ---------------------------------------------------------------------------
// Course DTOs

/// One purchasable access tier embedded in a course. Prices are whole
/// rupees; zero or negative prices and negative view counts are rejected
/// instead of being coerced.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AccessOption {
    #[serde(rename = "type")]
    pub tier: String,
    pub price: i64,
    pub views: i64,
    pub validity: String,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct CourseRequest {
    #[validate(length(min = 1, max = 255, message = "Course title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub lectures: Option<i32>,
    pub hours: Option<i32>,
    pub timings: Option<String>,
    #[serde(rename = "batchStartDate")]
    pub batch_start_date: Option<DateTime<Utc>>,
    #[serde(rename = "videoLanguage")]
    pub video_language: Option<String>,
    #[serde(rename = "syllabusType")]
    pub syllabus_type: Option<String>,
    pub thumbnail: Option<String>,
    #[validate(custom(function = "validate_access_options"))]
    #[serde(rename = "accessOptions", default)]
    pub access_options: Vec<AccessOption>,
}

/// Update payload. Every field is optional; fields the caller leaves out
/// are left untouched on the stored course.
#[derive(Deserialize, ToSchema, Validate)]
pub struct CourseUpdateRequest {
    #[validate(length(min = 1, max = 255, message = "Course title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub lectures: Option<i32>,
    pub hours: Option<i32>,
    pub timings: Option<String>,
    #[serde(rename = "batchStartDate")]
    pub batch_start_date: Option<DateTime<Utc>>,
    #[serde(rename = "videoLanguage")]
    pub video_language: Option<String>,
    #[serde(rename = "syllabusType")]
    pub syllabus_type: Option<String>,
    pub thumbnail: Option<String>,
    #[validate(custom(function = "validate_access_options"))]
    #[serde(rename = "accessOptions")]
    pub access_options: Option<Vec<AccessOption>>,
}

#[derive(Serialize, ToSchema)]
pub struct CourseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lectures: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<String>,
    #[serde(rename = "batchStartDate", skip_serializing_if = "Option::is_none")]
    pub batch_start_date: Option<DateTime<Utc>>,
    #[serde(rename = "videoLanguage", skip_serializing_if = "Option::is_none")]
    pub video_language: Option<String>,
    #[serde(rename = "syllabusType", skip_serializing_if = "Option::is_none")]
    pub syllabus_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "accessOptions")]
    pub access_options: JsonValue,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        CourseResponse {
            id: course.id.to_string(),
            title: course.title,
            description: course.description,
            lectures: course.lectures,
            hours: course.hours,
            timings: course.timings,
            batch_start_date: course.batch_start_date,
            video_language: course.video_language,
            syllabus_type: course.syllabus_type,
            thumbnail: course.thumbnail,
            access_options: course.access_options,
            created_at: course.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Payment DTOs

#[derive(Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    /// Amount in whole rupees; converted to paise for the gateway order.
    #[validate(range(min = 1, message = "Amount must be greater than zero"))]
    pub amount: i64,
    #[serde(rename = "courseId")]
    pub course_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub success: bool,
    /// The gateway order object, passed through as-is.
    pub order: JsonValue,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "razorpay_order_id is required"))]
    pub razorpay_order_id: String,
    #[validate(length(min = 1, message = "razorpay_payment_id is required"))]
    pub razorpay_payment_id: String,
    #[validate(length(min = 1, message = "razorpay_signature is required"))]
    pub razorpay_signature: String,
    #[serde(rename = "courseId")]
    pub course_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1, message = "Amount must be greater than zero"))]
    pub amount: i64,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub payment: PaymentResponse,
}

#[derive(Serialize, ToSchema)]
pub struct PaymentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub course: String,
    pub amount: i64,
    pub currency: String,
    pub razorpay_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_signature: Option<String>,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        PaymentResponse {
            id: payment.id.to_string(),
            user: payment.user_id.to_string(),
            course: payment.course_id.to_string(),
            amount: payment.amount,
            currency: payment.currency,
            razorpay_order_id: payment.razorpay_order_id,
            razorpay_payment_id: payment.razorpay_payment_id,
            razorpay_signature: payment.razorpay_signature,
            status: payment.status,
            created_at: payment.created_at,
        }
    }
}

/// Admin listing row: each payment expanded with the purchaser and the
/// course title, per the admin dashboard contract.
#[derive(Serialize, ToSchema)]
pub struct PaymentListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: PaymentUserSummary,
    pub course: PaymentCourseSummary,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct PaymentUserSummary {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct PaymentCourseSummary {
    pub title: String,
}

#[derive(Serialize, ToSchema)]
pub struct PaymentListResponse {
    pub success: bool,
    pub payments: Vec<PaymentListItem>,
}

#[derive(Serialize, ToSchema)]
pub struct MyPaymentsResponse {
    pub success: bool,
    pub payments: Vec<PaymentResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct CourseListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<CourseResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct CourseDataResponse {
    pub success: bool,
    pub data: CourseResponse,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_payload_leaves_omitted_fields_out() {
        let payload: CourseUpdateRequest =
            serde_json::from_str(r#"{"description": "Updated blurb"}"#).unwrap();
        assert_eq!(payload.description.as_deref(), Some("Updated blurb"));
        assert!(payload.title.is_none());
        assert!(payload.access_options.is_none());
    }

    #[test]
    fn update_payload_carries_access_options_when_sent() {
        let payload: CourseUpdateRequest = serde_json::from_str(
            r#"{"accessOptions": [{"type": "Full Access", "price": 999, "views": 2, "validity": "6 months"}]}"#,
        )
        .unwrap();
        let options = payload.access_options.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].tier, "Full Access");
        assert_eq!(options[0].price, 999);
    }

    #[test]
    fn payment_response_echoes_all_gateway_identifiers() {
        let payment = Payment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            amount: 999,
            currency: "INR".to_string(),
            razorpay_order_id: "order_abc".to_string(),
            razorpay_payment_id: Some("pay_123".to_string()),
            razorpay_signature: Some("ab12cd34".to_string()),
            status: PAYMENT_STATUS_PAID.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let body = serde_json::to_value(PaymentResponse::from(payment)).unwrap();
        assert_eq!(body["razorpay_order_id"], "order_abc");
        assert_eq!(body["razorpay_payment_id"], "pay_123");
        assert_eq!(body["razorpay_signature"], "ab12cd34");
    }
}
