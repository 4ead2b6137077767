use crate::errors::AppError;
use crate::export::{integrator_apps_csv, tools_csv};
use crate::models::{
    AppsSummary, ChartResponse, CursorRequest, InfoResponse, IntegratorResponse, IntegratorTotals, to_observations,
};
use crate::series::{SeriesError, SeriesKind, normalize, passthrough_monthly};
use crate::session::{ChartSession, CursorMode};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
};
use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_index(Local::now().date_naive()))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn day_data(State(state): State<AppState>, Path(app): Path<String>) -> Result<Json<ChartResponse>, AppError> {
    load_chart(&state, SeriesKind::Daily, app).await.map(Json)
}

pub async fn month_data(
    State(state): State<AppState>,
    Path(app): Path<String>,
) -> Result<Json<ChartResponse>, AppError> {
    load_chart(&state, SeriesKind::Monthly, app).await.map(Json)
}

pub async fn get_chart(
    State(state): State<AppState>,
    Path((app, kind)): Path<(String, String)>,
) -> Result<Json<ChartResponse>, AppError> {
    let key = (app, parse_kind(&kind)?);
    let charts = state.charts.lock().await;
    let session = charts.get(&key).ok_or_else(|| not_loaded(&key.0, key.1))?;
    Ok(Json(session.to_response()))
}

pub async fn set_cursor(
    State(state): State<AppState>,
    Path((app, kind)): Path<(String, String)>,
    Json(payload): Json<CursorRequest>,
) -> Result<Json<ChartResponse>, AppError> {
    let mode = CursorMode::parse(&payload.mode).ok_or_else(|| AppError::bad_request("mode must be 'pan' or 'select'"))?;
    let key = (app, parse_kind(&kind)?);

    let mut charts = state.charts.lock().await;
    let session = charts.get_mut(&key).ok_or_else(|| not_loaded(&key.0, key.1))?;
    session.set_cursor(mode);
    Ok(Json(session.to_response()))
}

pub async fn mark_rendered(
    State(state): State<AppState>,
    Path((app, kind)): Path<(String, String)>,
) -> Result<Json<ChartResponse>, AppError> {
    let key = (app, parse_kind(&kind)?);

    let mut charts = state.charts.lock().await;
    let session = charts.get_mut(&key).ok_or_else(|| not_loaded(&key.0, key.1))?;
    if session.mark_rendered() {
        info!("chart {}/{} rendered", key.0, key.1.as_str());
    }
    Ok(Json(session.to_response()))
}

pub async fn get_apps(State(state): State<AppState>) -> Result<Json<AppsSummary>, AppError> {
    let apps = state.apps.lock().await;
    let status = apps
        .as_ref()
        .ok_or_else(|| AppError::unavailable("apps status has not been polled yet"))?;
    Ok(Json(AppsSummary::from(status)))
}

pub async fn get_info(State(state): State<AppState>, Path(date): Path<String>) -> Result<Json<InfoResponse>, AppError> {
    let date = parse_date(&date)?;
    let payload = state.upstream.info(local_midnight_millis(date)?).await?;

    let message = payload
        .tools
        .is_empty()
        .then(|| format!("No apps executed on {date}."));

    Ok(Json(InfoResponse {
        date,
        tools: payload.tools,
        message,
    }))
}

pub async fn get_info_csv(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    let payload = state.upstream.info(local_midnight_millis(date)?).await?;
    let body = tools_csv(date, &payload.tools)?;

    Ok(csv_attachment(&format!("apps-{date}.csv"), body))
}

pub async fn get_integrator_totals(State(state): State<AppState>) -> Result<Json<IntegratorTotals>, AppError> {
    Ok(Json(state.upstream.integrator_totals().await?))
}

pub async fn get_integrator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IntegratorResponse>, AppError> {
    load_integrator(&state, &id).await.map(Json)
}

pub async fn get_integrator_csv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let integrator = load_integrator(&state, &id).await?;
    let body = integrator_apps_csv(&integrator.apps)?;
    Ok(csv_attachment(&format!("integrator-{}.csv", integrator.id), body))
}

async fn load_integrator(state: &AppState, id: &str) -> Result<IntegratorResponse, AppError> {
    let payload = state.upstream.integrator(id).await?;
    payload
        .into_response(&Local)
        .map_err(AppError::bad_gateway)?
        .ok_or_else(|| AppError::not_found(format!("no integrator {id}")))
}

fn csv_attachment(filename: &str, body: String) -> impl IntoResponse + use<> {
    let disposition = format!("attachment; filename=\"{filename}\"");
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
}

async fn load_chart(state: &AppState, kind: SeriesKind, app: String) -> Result<ChartResponse, AppError> {
    let raw = state.upstream.series(kind, &app).await?;
    let today = Local::now().date_naive();
    let observations = to_observations(&raw, &Local)?;

    let series = match kind {
        SeriesKind::Daily => normalize(&observations, today)?,
        SeriesKind::Monthly if observations.is_empty() => {
            return Err(SeriesError::InvalidInput("no monthly buckets reported".into()).into());
        }
        SeriesKind::Monthly => passthrough_monthly(&observations),
    };

    info!(
        "loaded {} chart for {app}: {} sparse -> {} points",
        kind.as_str(),
        observations.len(),
        series.len()
    );

    let session = ChartSession::load(series);
    let response = session.to_response();
    state.charts.lock().await.insert((app, kind), session);
    Ok(response)
}

fn parse_kind(kind: &str) -> Result<SeriesKind, AppError> {
    SeriesKind::parse(kind).ok_or_else(|| AppError::bad_request("chart kind must be 'day' or 'month'"))
}

fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    let date =
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?;
    if date > Local::now().date_naive() {
        return Err(AppError::bad_request(format!("{date} is in the future")));
    }
    Ok(date)
}

fn local_midnight_millis(date: NaiveDate) -> Result<i64, AppError> {
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|instant| instant.timestamp_millis())
        .ok_or_else(|| AppError::bad_request(format!("{date} has no local midnight")))
}

fn not_loaded(app: &str, kind: SeriesKind) -> AppError {
    AppError::not_found(format!("no {} chart loaded for {app}", kind.as_str()))
}
