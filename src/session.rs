use crate::models::{ChartResponse, ZoomWindow};
use crate::series::{DenseSeries, SeriesKind};

pub const DAILY_ZOOM_DAYS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    #[default]
    Pan,
    Select,
}

impl CursorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pan" => Some(Self::Pan),
            "select" => Some(Self::Select),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::Select => "select",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartSession {
    series: DenseSeries,
    zoom: Option<ZoomWindow>,
    cursor: CursorMode,
    rendered: bool,
}

impl ChartSession {
    pub fn load(series: DenseSeries) -> Self {
        let zoom = initial_zoom(&series);
        Self {
            series,
            zoom,
            cursor: CursorMode::default(),
            rendered: false,
        }
    }

    pub fn zoom(&self) -> Option<ZoomWindow> {
        self.zoom
    }

    pub fn cursor(&self) -> CursorMode {
        self.cursor
    }

    pub fn set_cursor(&mut self, mode: CursorMode) {
        self.cursor = mode;
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn mark_rendered(&mut self) -> bool {
        let first = !self.rendered;
        self.rendered = true;
        first
    }

    pub fn to_response(&self) -> ChartResponse {
        ChartResponse {
            kind: self.series.kind(),
            first_date: self.series.first_day(),
            points: self.series.points().to_vec(),
            zoom: self.zoom,
            cursor: self.cursor.as_str(),
            rendered: self.rendered,
        }
    }
}

fn initial_zoom(series: &DenseSeries) -> Option<ZoomWindow> {
    let last = series.len().checked_sub(1)?;
    let start = match series.kind() {
        SeriesKind::Daily => series.len().saturating_sub(DAILY_ZOOM_DAYS),
        SeriesKind::Monthly => 0,
    };
    Some(ZoomWindow { start, end: last })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{normalize, passthrough_monthly, Observation};
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()
    }

    #[test]
    fn daily_session_zooms_to_last_forty_days() {
        let series = normalize(&[Observation::new(start(), 1)], start() + Duration::days(99)).unwrap();
        let session = ChartSession::load(series);

        assert_eq!(session.zoom(), Some(ZoomWindow { start: 60, end: 99 }));
        assert_eq!(session.cursor(), CursorMode::Pan);
        assert!(!session.is_rendered());
    }

    #[test]
    fn short_daily_series_zooms_to_everything() {
        let series = normalize(&[Observation::new(start(), 1)], start() + Duration::days(4)).unwrap();
        let session = ChartSession::load(series);
        assert_eq!(session.zoom(), Some(ZoomWindow { start: 0, end: 4 }));
    }

    #[test]
    fn empty_monthly_session_has_no_zoom() {
        let session = ChartSession::load(passthrough_monthly(&[]));
        assert_eq!(session.zoom(), None);
        assert_eq!(session.to_response().first_date, None);
    }

    #[test]
    fn rendered_flag_flips_once() {
        let mut session = ChartSession::load(passthrough_monthly(&[Observation::new(start(), 3)]));
        assert!(session.mark_rendered());
        assert!(!session.mark_rendered());
        assert!(session.to_response().rendered);
    }

    #[test]
    fn cursor_mode_switch_keeps_series() {
        let series = normalize(&[Observation::new(start(), 2)], start() + Duration::days(2)).unwrap();
        let mut session = ChartSession::load(series.clone());

        session.set_cursor(CursorMode::parse("select").unwrap());
        assert_eq!(session.cursor(), CursorMode::Select);
        assert_eq!(session.to_response().points, series.points());
        assert_eq!(session.to_response().cursor, "select");
        assert_eq!(CursorMode::parse("zoom"), None);
    }
}
