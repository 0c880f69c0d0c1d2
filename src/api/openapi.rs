use crate::api::handler::{
    ai_model_handler, auth_handler, comment_handler, course_handler, dashboard_handler,
    hand_motion_handler, lesson_handler, notification_handler, payment_handler, progress_handler,
    resource_handler, subscription_handler, user_handler, voucher_handler, welcome_handler,
};
use crate::error::error_model::ApiError;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LearnHub API",
        description = "Courses, lessons, sign-language hand motions, subscriptions and PayOS payments."
    ),
    paths(
        welcome_handler::welcome_handler,
        auth_handler::register_handler,
        auth_handler::login_handler,
        auth_handler::google_login_handler,
        auth_handler::me_handler,
        user_handler::create_user_handler,
        user_handler::get_users_handler,
        user_handler::get_me_handler,
        user_handler::change_password_handler,
        user_handler::get_user_handler,
        user_handler::update_user_handler,
        user_handler::delete_user_handler,
        course_handler::get_courses_handler,
        course_handler::get_course_handler,
        course_handler::create_course_handler,
        course_handler::update_course_handler,
        course_handler::delete_course_handler,
        lesson_handler::get_lessons_handler,
        lesson_handler::get_lesson_handler,
        lesson_handler::create_lesson_handler,
        lesson_handler::update_lesson_handler,
        lesson_handler::delete_lesson_handler,
        resource_handler::get_resources_handler,
        resource_handler::get_resource_handler,
        resource_handler::create_resource_handler,
        resource_handler::update_resource_handler,
        resource_handler::delete_resource_handler,
        comment_handler::get_comments_handler,
        comment_handler::get_comment_handler,
        comment_handler::create_comment_handler,
        comment_handler::update_comment_handler,
        comment_handler::delete_comment_handler,
        ai_model_handler::get_ai_models_handler,
        ai_model_handler::get_ai_model_handler,
        ai_model_handler::create_ai_model_handler,
        ai_model_handler::update_ai_model_handler,
        ai_model_handler::delete_ai_model_handler,
        hand_motion_handler::get_hand_motions_handler,
        hand_motion_handler::get_hand_motion_handler,
        hand_motion_handler::create_hand_motion_handler,
        hand_motion_handler::update_hand_motion_handler,
        hand_motion_handler::delete_hand_motion_handler,
        notification_handler::get_notifications_handler,
        notification_handler::get_my_notifications_handler,
        notification_handler::create_notification_handler,
        notification_handler::mark_read_handler,
        notification_handler::delete_notification_handler,
        voucher_handler::get_vouchers_handler,
        voucher_handler::get_voucher_handler,
        voucher_handler::get_voucher_by_code_handler,
        voucher_handler::create_voucher_handler,
        voucher_handler::update_voucher_handler,
        voucher_handler::delete_voucher_handler,
        subscription_handler::get_plans_handler,
        subscription_handler::get_plan_handler,
        subscription_handler::create_plan_handler,
        subscription_handler::update_plan_handler,
        subscription_handler::delete_plan_handler,
        subscription_handler::get_subscriptions_handler,
        subscription_handler::get_my_subscriptions_handler,
        subscription_handler::get_subscription_handler,
        subscription_handler::create_subscription_handler,
        subscription_handler::update_subscription_handler,
        subscription_handler::delete_subscription_handler,
        payment_handler::create_payment_handler,
        payment_handler::payos_return_handler,
        payment_handler::payos_webhook_handler,
        payment_handler::get_payments_handler,
        payment_handler::get_my_payments_handler,
        payment_handler::get_payment_handler,
        progress_handler::submit_progress_handler,
        progress_handler::get_my_progress_handler,
        progress_handler::get_leaderboard_handler,
        progress_handler::get_user_leaderboard_handler,
        dashboard_handler::user_stats_handler,
        dashboard_handler::revenue_stats_handler,
        dashboard_handler::subscription_stats_handler,
        dashboard_handler::lesson_completion_stats_handler,
    ),
    components(schemas(ApiError)),
    modifiers(&BearerAuth),
    tags(
        (name = "Health"),
        (name = "Authentication", description = "Registration, login and tokens"),
        (name = "Users"),
        (name = "Courses"),
        (name = "Lessons"),
        (name = "Resources"),
        (name = "Comments"),
        (name = "AI Models"),
        (name = "Hand Motions"),
        (name = "Notifications"),
        (name = "Vouchers"),
        (name = "Subscription Plans"),
        (name = "Subscriptions"),
        (name = "Payments", description = "PayOS checkout and callbacks"),
        (name = "Progress", description = "Lesson progress, streaks and leaderboard"),
        (name = "Dashboard", description = "Monthly statistics for staff"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_payment_callbacks_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/payments/payos/webhook"));
        assert!(doc.paths.paths.contains_key("/dashboard/revenue-stats-by-month"));
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn return_url_is_documented_as_unauthenticated() {
        let doc = ApiDoc::openapi();
        let operation = doc.paths.paths["/payments/payos/return"]
            .get
            .as_ref()
            .expect("GET operation");
        let description = operation.description.as_deref().unwrap_or_default();
        assert!(description.contains("Unauthenticated"), "{}", description);
        let security = operation.security.as_ref().expect("security override");
        assert_eq!(security.len(), 1);
    }
}
