use crate::series::{Observation, SeriesError, SeriesKind};
use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

// Rows before the Unix epoch are corrupt; the floor also bounds a daily span.
pub const EARLIEST_TIMESTAMP_MILLIS: i64 = 0;

pub fn day_from_millis<Tz: TimeZone>(millis: i64, tz: &Tz) -> Result<NaiveDate, SeriesError> {
    if millis < EARLIEST_TIMESTAMP_MILLIS {
        return Err(SeriesError::InvalidInput(format!("timestamp {millis} predates 1970")));
    }
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|instant| instant.date_naive())
        .ok_or_else(|| SeriesError::InvalidInput(format!("unrepresentable timestamp {millis}")))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawObservation {
    /// Epoch milliseconds.
    pub date: i64,
    pub count: u64,
}

impl RawObservation {
    pub fn to_observation<Tz: TimeZone>(&self, tz: &Tz) -> Result<Observation, SeriesError> {
        Ok(Observation::new(day_from_millis(self.date, tz)?, self.count))
    }
}

pub fn to_observations<Tz: TimeZone>(raw: &[RawObservation], tz: &Tz) -> Result<Vec<Observation>, SeriesError> {
    raw.iter().map(|entry| entry.to_observation(tz)).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct AppsStatus {
    pub running: u64,
    pub submitted: u64,
    pub failed: u64,
    pub completed: u64,
    #[serde(default)]
    pub running_names: String,
    #[serde(default)]
    pub submitted_names: String,
    #[serde(default)]
    pub failed_names: String,
}

#[derive(Debug, Serialize)]
pub struct AppsSummary {
    pub running: u64,
    pub submitted: u64,
    pub failed: u64,
    pub completed: u64,
    pub running_apps: String,
    pub submitted_apps: String,
    pub failed_apps: String,
}

impl From<&AppsStatus> for AppsSummary {
    fn from(status: &AppsStatus) -> Self {
        let describe = |count: u64, names: &str, empty: &str| {
            if count == 0 { empty.to_string() } else { names.to_string() }
        };

        Self {
            running: status.running,
            submitted: status.submitted,
            failed: status.failed,
            completed: status.completed,
            running_apps: describe(status.running, &status.running_names, "There are currently no running apps."),
            submitted_apps: describe(
                status.submitted,
                &status.submitted_names,
                "There are currently no submitted apps.",
            ),
            failed_apps: describe(
                status.failed,
                &status.failed_names,
                "There are currently no failed apps. Woohoo!",
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct ToolsPayload {
    #[serde(default)]
    pub tools: Vec<ToolCount>,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub date: NaiveDate,
    pub tools: Vec<ToolCount>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IntegratorRecord {
    pub id: serde_json::Value,
    #[serde(default)]
    pub integrator_name: String,
    #[serde(default)]
    pub integrator_email: String,
}

#[derive(Debug, Deserialize)]
pub struct IntegratorAppRecord {
    pub name: String,
    pub description: Option<String>,
    pub wikiurl: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub overall_job_type: String,
    pub integration_date: i64,
}

#[derive(Debug, Deserialize)]
pub struct IntegratorPayload {
    #[serde(default)]
    pub data: Vec<IntegratorRecord>,
    #[serde(default)]
    pub apps: Vec<IntegratorAppRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegratorTotals {
    pub total: u64,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IntegratorApp {
    pub name: String,
    pub description: String,
    pub wiki_url: Option<String>,
    pub rating: f64,
    pub job_type: String,
    pub created: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct IntegratorResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub apps: Vec<IntegratorApp>,
}

impl IntegratorPayload {
    pub fn into_response<Tz: TimeZone>(self, tz: &Tz) -> Result<Option<IntegratorResponse>, SeriesError> {
        let Some(record) = self.data.into_iter().next() else {
            return Ok(None);
        };

        let apps = self
            .apps
            .into_iter()
            .map(|app| {
                Ok(IntegratorApp {
                    created: day_from_millis(app.integration_date, tz)?,
                    description: app
                        .description
                        .filter(|text| !text.trim().is_empty())
                        .unwrap_or_else(|| "No description found".to_string()),
                    name: app.name,
                    wiki_url: app.wikiurl,
                    rating: app.average_rating,
                    job_type: app.overall_job_type,
                })
            })
            .collect::<Result<Vec<_>, SeriesError>>()?;

        let id = match record.id {
            serde_json::Value::String(id) => id,
            other => other.to_string(),
        };

        Ok(Some(IntegratorResponse {
            id,
            name: record.integrator_name,
            email: record.integrator_email,
            apps,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct CursorRequest {
    pub mode: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ZoomWindow {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub kind: SeriesKind,
    pub first_date: Option<NaiveDate>,
    pub points: Vec<Observation>,
    pub zoom: Option<ZoomWindow>,
    pub cursor: &'static str,
    pub rendered: bool,
}
