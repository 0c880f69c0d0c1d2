use crate::api::model::dashboard::{MonthAggregate, MonthlySeries, MonthlyStat};
use crate::config::app_config::AppState;
use crate::db::repo::dashboard_repository;
use crate::error::error_model::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Datelike, Utc};
use std::sync::Arc;

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy)]
pub enum Series {
    Users,
    Revenue,
    Subscriptions,
    LessonCompletions,
}

/// Requested year, defaulting to the current one.
pub fn resolve_year(year: Option<i32>) -> Result<i32, AppError> {
    let year = year.unwrap_or_else(|| Utc::now().year());
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::bad_request(format!(
            "year must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(year)
}

/// Expands sparse per-month rows into exactly twelve entries, January first.
pub fn fill_months(rows: &[MonthAggregate], with_amount: bool) -> Vec<MonthlyStat> {
    (1..=12)
        .map(|month| {
            let row = rows.iter().find(|row| row.month == month);
            MonthlyStat {
                month,
                total: row.map(|r| r.total).unwrap_or(0),
                amount: with_amount.then(|| row.map(|r| r.amount).unwrap_or(0)),
            }
        })
        .collect()
}

#[tracing::instrument(
    skip(state),
    fields(service.name = "dashboard_service", service.operation = "monthly_stats")
)]
pub async fn monthly_stats(
    state: Arc<AppState>,
    series: Series,
    year: Option<i32>,
) -> Result<Response, AppError> {
    let year = resolve_year(year)?;
    let pool = &state.pg_pool;
    let rows = match series {
        Series::Users => dashboard_repository::users_by_month(pool, year).await?,
        Series::Revenue => dashboard_repository::revenue_by_month(pool, year).await?,
        Series::Subscriptions => dashboard_repository::subscriptions_by_month(pool, year).await?,
        Series::LessonCompletions => {
            dashboard_repository::lesson_completions_by_month(pool, year).await?
        }
    };
    let data = fill_months(&rows, matches!(series, Series::Revenue));
    Ok((StatusCode::OK, Json(MonthlySeries { year, data })).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_months_are_zero_filled() {
        let rows = vec![
            MonthAggregate {
                month: 3,
                total: 4,
                amount: 400_000,
            },
            MonthAggregate {
                month: 12,
                total: 1,
                amount: 99_000,
            },
        ];
        let data = fill_months(&rows, false);
        assert_eq!(data.len(), 12);
        assert_eq!(data[0].month, 1);
        assert_eq!(data[0].total, 0);
        assert_eq!(data[2].total, 4);
        assert_eq!(data[11].total, 1);
        assert!(data.iter().all(|stat| stat.amount.is_none()));

        let revenue = fill_months(&rows, true);
        assert_eq!(revenue[2].amount, Some(400_000));
        assert_eq!(revenue[5].amount, Some(0));
    }

    #[test]
    fn empty_year_still_has_twelve_rows() {
        let data = fill_months(&[], true);
        assert_eq!(data.len(), 12);
        assert!(data.iter().all(|stat| stat.total == 0));
    }

    #[test]
    fn year_bounds() {
        assert_eq!(resolve_year(Some(2025)).unwrap(), 2025);
        assert!(resolve_year(Some(1999)).is_err());
        assert!(resolve_year(Some(2101)).is_err());
        assert_eq!(resolve_year(None).unwrap(), Utc::now().year());
    }
}
