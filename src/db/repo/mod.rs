pub mod ai_models_repository;
pub mod comments_repository;
pub mod courses_repository;
pub mod dashboard_repository;
pub mod hand_motions_repository;
pub mod leaderboard_repository;
pub mod lessons_repository;
pub mod notifications_repository;
pub mod payments_repository;
pub mod progress_repository;
pub mod resources_repository;
pub mod subscriptions_repository;
pub mod users_repository;
pub mod vouchers_repository;
