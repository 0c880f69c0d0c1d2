use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct Message {
    #[schema(example = "Hello")]
    /// Message to display
    pub message: String,
    #[schema(example = "Success")]
    /// Status of the message
    pub status: String,
}

impl Message {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: "Success".to_string(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// current page of the pagination
    #[param(default = 1, example = 1)]
    #[serde(default = "default_page")]
    pub page: i64,
    /// number of items per page
    #[param(default = 20, example = 20)]
    #[serde(default = "default_size")]
    pub size: i64,
}

impl PaginationQuery {
    /// Page and size clamped to sane bounds.
    pub fn normalized(&self) -> (i64, i64) {
        (self.page.max(1), self.size.clamp(1, 100))
    }
}

pub fn total_pages(total_items: i64, items_per_page: i64) -> i64 {
    (total_items as f64 / items_per_page as f64).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_is_clamped() {
        let query = PaginationQuery { page: 0, size: 500 };
        assert_eq!(query.normalized(), (1, 100));
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(0, 20), 0);
    }
}
