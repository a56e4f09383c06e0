pub mod all_payments;
pub mod create_course;
pub mod create_order;
pub mod current_user;
pub mod delete_course;
pub mod get_course;
pub mod health;
pub mod list_courses;
pub mod login;
pub mod my_payments;
pub mod register;
pub mod update_course;
pub mod verify_payment;
