pub mod ai_model_handler;
pub mod auth_handler;
pub mod comment_handler;
pub mod course_handler;
pub mod dashboard_handler;
pub mod hand_motion_handler;
pub mod lesson_handler;
pub mod notification_handler;
pub mod payment_handler;
pub mod progress_handler;
pub mod resource_handler;
pub mod subscription_handler;
pub mod user_handler;
pub mod voucher_handler;
pub mod welcome_handler;
