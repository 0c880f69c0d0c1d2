#[path = "helpers.rs"]
mod helpers;

#[path = "integration/auth_test.rs"]
mod auth_test;
#[path = "integration/content_test.rs"]
mod content_test;
#[path = "integration/payment_test.rs"]
mod payment_test;
#[path = "integration/progress_test.rs"]
mod progress_test;
#[path = "integration/rbac_test.rs"]
mod rbac_test;
