pub mod ai_model;
pub mod course;
pub mod notification;
pub mod payment;
pub mod progress;
pub mod subscription;
pub mod user;
pub mod voucher;
