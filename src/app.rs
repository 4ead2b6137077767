use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/day-data/:app", get(handlers::day_data))
        .route("/api/month-data/:app", get(handlers::month_data))
        .route("/api/charts/:app/:kind", get(handlers::get_chart))
        .route("/api/charts/:app/:kind/cursor", post(handlers::set_cursor))
        .route("/api/charts/:app/:kind/rendered", post(handlers::mark_rendered))
        .route("/api/apps", get(handlers::get_apps))
        .route("/api/info/:date", get(handlers::get_info))
        .route("/api/info/:date/csv", get(handlers::get_info_csv))
        .route("/api/integrators", get(handlers::get_integrator_totals))
        .route("/api/integrators/:id", get(handlers::get_integrator))
        .route("/api/integrators/:id/csv", get(handlers::get_integrator_csv))
        .with_state(state)
}
