use crate::models::AppsStatus;
use crate::series::SeriesKind;
use crate::session::ChartSession;
use crate::upstream::Upstream;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

pub type ChartKey = (String, SeriesKind);

#[derive(Clone)]
pub struct AppState {
    pub upstream: Upstream,
    pub charts: Arc<Mutex<HashMap<ChartKey, ChartSession>>>,
    pub apps: Arc<Mutex<Option<AppsStatus>>>,
}

impl AppState {
    pub fn new(upstream: Upstream) -> Self {
        Self {
            upstream,
            charts: Arc::new(Mutex::new(HashMap::new())),
            apps: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn refresh_apps(&self) -> bool {
        match self.upstream.apps().await {
            Ok(status) => {
                *self.apps.lock().await = Some(status);
                true
            }
            Err(err) => {
                tracing::warn!("apps status poll failed: {err}");
                false
            }
        }
    }
}
