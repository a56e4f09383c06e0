use crate::handlers::{
    all_payments::__path_all_payments, create_course::__path_create_course,
    create_order::__path_create_order, current_user::__path_current_user,
    delete_course::__path_delete_course, get_course::__path_get_course,
    health::__path_health_check, list_courses::__path_list_courses, login::__path_login,
    my_payments::__path_my_payments, register::__path_register,
    update_course::__path_update_course, verify_payment::__path_verify_payment,
};
use crate::models::models::{
    AccessOption, CourseRequest, CourseUpdateRequest, CreateOrderRequest, LoginRequest,
    RegisterRequest, VerifyPaymentRequest,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check, register, login, current_user,
        list_courses, get_course, create_course, update_course, delete_course,
        create_order, verify_payment, all_payments, my_payments
    ),
    components(schemas(
        RegisterRequest, LoginRequest, CourseRequest, CourseUpdateRequest, AccessOption,
        CreateOrderRequest, VerifyPaymentRequest
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Courses", description = "Course catalog"),
        (name = "Payments", description = "Course purchase and payment verification")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
