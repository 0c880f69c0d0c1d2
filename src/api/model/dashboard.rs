use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    /// Calendar year, defaults to the current year
    #[param(example = 2025)]
    pub year: Option<i32>,
}

/// Aggregate row as returned by the database (months without data are absent).
#[derive(Debug, Clone, FromRow)]
pub struct MonthAggregate {
    pub month: i32,
    pub total: i64,
    pub amount: i64,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct MonthlyStat {
    #[schema(example = 1)]
    pub month: i32,
    #[schema(example = 42)]
    pub total: i64,
    /// Summed amount, only present on revenue series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlySeries {
    pub year: i32,
    pub data: Vec<MonthlyStat>,
}
