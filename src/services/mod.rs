pub mod payment_service;
pub mod razorpay_service;
