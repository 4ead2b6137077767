pub mod app;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod poller;
pub mod series;
pub mod session;
pub mod state;
pub mod ui;
pub mod upstream;

pub use app::router;
pub use config::Config;
pub use series::{normalize, passthrough_monthly, DenseSeries, Observation, SeriesError};
pub use state::AppState;
