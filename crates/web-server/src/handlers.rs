use crate::{AppState, error::AppError};
use analyzer::{DashboardSession, DashboardView};
use axum::{
    Json,
    extract::{Query, State},
};
use core_types::{Language, Period, Selection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ManagersQuery {
    pub fund_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodsQuery {
    pub fund_type: Option<String>,
    pub manager: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub fund_type: Option<String>,
    pub manager: Option<String>,
    pub period: Option<String>,
    pub lang: Option<String>,
}

/// The period buttons on offer, with the manager they were computed for.
#[derive(Debug, Serialize)]
pub struct PeriodsResponse {
    pub fund_type: Option<String>,
    pub manager: Option<String>,
    pub periods: Vec<Period>,
}

fn known_fund_type(state: &AppState, fund_type: Option<String>) -> Result<Option<String>, AppError> {
    match fund_type {
        Some(fund_type) if !state.dataset.has_fund_type(&fund_type) => Err(AppError::NotFound(
            format!("Unknown fund type '{fund_type}'"),
        )),
        other => Ok(other),
    }
}

/// A short-lived session over the shared dataset. Missing parts of the
/// selection fall back to the configured defaults.
fn session(state: &AppState, selection: Selection) -> DashboardSession {
    DashboardSession::with_selection(
        Arc::clone(&state.dataset),
        Arc::clone(&state.catalog),
        &state.dashboard,
        selection,
    )
}

/// # GET /api/fund-types
pub async fn get_fund_types(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(analyzer::controls::fund_type_options(&state.dataset))
}

/// # GET /api/managers?fund_type=
pub async fn get_managers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ManagersQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let fund_type = known_fund_type(&state, query.fund_type)?;
    Ok(Json(analyzer::controls::manager_options(
        &state.dataset,
        fund_type.as_deref(),
    )))
}

/// # GET /api/periods?fund_type=&manager=
pub async fn get_periods(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PeriodsQuery>,
) -> Result<Json<PeriodsResponse>, AppError> {
    let fund_type = known_fund_type(&state, query.fund_type)?;
    let session = session(
        &state,
        Selection {
            fund_type: fund_type.or_else(|| state.dashboard.default_fund_type.clone()),
            manager: query.manager,
            period: Period::YearToDate,
            language: state.dashboard.default_language,
        },
    );
    let selection = session.selection();
    Ok(Json(PeriodsResponse {
        fund_type: selection.fund_type.clone(),
        manager: selection.manager.clone(),
        periods: session.periods(),
    }))
}

/// # GET /api/dashboard?fund_type=&manager=&period=&lang=
/// The full dashboard for one selection.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let fund_type = known_fund_type(&state, query.fund_type)?;
    let period = match query.period {
        Some(code) => code.parse::<Period>()?,
        None => state.dashboard.default_period,
    };
    let language = match query.lang {
        Some(code) => code.parse::<Language>()?,
        None => state.dashboard.default_language,
    };

    let view = session(
        &state,
        Selection {
            fund_type: fund_type.or_else(|| state.dashboard.default_fund_type.clone()),
            manager: query
                .manager
                .or_else(|| state.dashboard.default_manager.clone()),
            period,
            language,
        },
    )
    .view();

    tracing::debug!(
        fund_type = ?view.selection.fund_type,
        manager = ?view.selection.manager,
        period = %view.selection.period,
        "Dashboard rendered."
    );
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use core_types::Observation;
    use dataset::Dataset;
    use i18n::Catalog;
    use serde_json::Value;
    use tower::ServiceExt;

    fn obs(fund_type: &str, manager: &str, y: i32, m: u32, change: f64) -> Observation {
        Observation {
            report_date: NaiveDate::from_ymd_opt(y, m, 28).unwrap(),
            fund_type: fund_type.into(),
            manager: manager.into(),
            relative_change: Some(change),
            participant_count: Some(1000.0),
            expense_ratio_pct: Some(0.5),
        }
    }

    fn state() -> Arc<AppState> {
        let dataset = Dataset::new(vec![
            obs("TIPF", "SEB", 2022, 3, 1.0),
            obs("TIPF", "SEB", 2024, 3, 2.0),
            obs("TIPF", "Luminor", 2024, 3, -1.0),
            obs("1996-2002", "Swedbank", 2024, 3, 0.5),
        ]);
        Arc::new(AppState {
            dataset: Arc::new(dataset),
            catalog: Arc::new(Catalog::embedded().unwrap()),
            dashboard: Default::default(),
        })
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn lists_fund_types_and_managers() {
        let (status, body) = get("/api/fund-types").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["1996-2002", "TIPF"]));

        let (_, body) = get("/api/managers?fund_type=TIPF").await;
        assert_eq!(body, serde_json::json!(["Luminor", "SEB"]));
    }

    #[tokio::test]
    async fn periods_follow_manager_history() {
        let (status, body) = get("/api/periods?fund_type=TIPF&manager=SEB").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["periods"], serde_json::json!(["YTD", "1", "2", "ALL"]));
    }

    #[tokio::test]
    async fn dashboard_returns_ranked_tables() {
        let (status, body) =
            get("/api/dashboard?fund_type=TIPF&manager=SEB&period=YTD&lang=en").await;
        assert_eq!(status, StatusCode::OK);
        let growth = body["tables"]["growth"].as_array().unwrap();
        assert_eq!(growth[0]["manager"], "SEB");
        assert_eq!(growth[0]["cumulative_growth"], "+2.00");
        assert_eq!(growth[0]["highlighted"], true);
        assert_eq!(growth[1]["cumulative_growth"], "-1.00");
    }

    #[tokio::test]
    async fn unknown_fund_type_is_not_found() {
        let (status, body) = get("/api/dashboard?fund_type=NOPE").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("NOPE"));
    }

    #[tokio::test]
    async fn bad_period_is_rejected() {
        let (status, _) = get("/api/dashboard?fund_type=TIPF&period=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
