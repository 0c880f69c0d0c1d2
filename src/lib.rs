pub mod api {
    pub mod handler;
    pub mod model;
    pub mod openapi;
    pub mod router;
}
pub mod config;
pub mod db {
    pub mod entity;
    pub mod repo;
    pub mod unit_of_work;
    pub mod update_builder;
}
pub mod error;
pub mod middleware;
pub mod service;
pub mod util;

// Re-export AppState for convenience
pub use crate::config::app_config::AppState;
