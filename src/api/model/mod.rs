pub mod ai_model;
pub mod auth;
pub mod common;
pub mod course;
pub mod dashboard;
pub mod notification;
pub mod payment;
pub mod progress;
pub mod subscription;
pub mod user;
pub mod voucher;
