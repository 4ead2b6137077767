use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Observation {
    #[serde(rename = "date")]
    pub day: NaiveDate,
    pub count: u64,
}

impl Observation {
    pub fn new(day: NaiveDate, count: u64) -> Self {
        Self { day, count }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Daily,
    Monthly,
}

impl SeriesKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "day" | "daily" => Some(Self::Daily),
            "month" | "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseSeries {
    kind: SeriesKind,
    points: Vec<Observation>,
}

impl DenseSeries {
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.points.first().map(|point| point.day)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("observation for {day} falls outside {start}..={today}")]
    OutOfRangeObservation {
        day: NaiveDate,
        start: NaiveDate,
        today: NaiveDate,
    },
}

/// `today` must be read once by the caller; this function never looks at
/// the clock. When a day appears more than once the first entry wins.
pub fn normalize(observations: &[Observation], today: NaiveDate) -> Result<DenseSeries, SeriesError> {
    let start = validate(observations, today)?;
    let span = (today - start).num_days();

    let mut points = Vec::with_capacity(span as usize + 1);
    let mut cursor = 0;
    for offset in 0..=span {
        let candidate = start + Duration::days(offset);
        match observations.get(cursor) {
            Some(observation) if observation.day == candidate => {
                points.push(Observation::new(candidate, observation.count));
                while observations.get(cursor).is_some_and(|o| o.day <= candidate) {
                    cursor += 1;
                }
            }
            _ => points.push(Observation::new(candidate, 0)),
        }
    }

    Ok(DenseSeries {
        kind: SeriesKind::Daily,
        points,
    })
}

pub fn passthrough_monthly(observations: &[Observation]) -> DenseSeries {
    let points = observations
        .iter()
        .map(|observation| Observation::new(month_bucket(observation.day), observation.count))
        .collect();

    DenseSeries {
        kind: SeriesKind::Monthly,
        points,
    }
}

pub fn month_bucket(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn validate(observations: &[Observation], today: NaiveDate) -> Result<NaiveDate, SeriesError> {
    let Some(first) = observations.first() else {
        return Err(SeriesError::InvalidInput("no observations to normalize".into()));
    };
    let start = first.day;

    for pair in observations.windows(2) {
        if pair[1].day < pair[0].day {
            return Err(SeriesError::InvalidInput(format!(
                "observations are not ascending: {} follows {}",
                pair[1].day, pair[0].day
            )));
        }
    }

    // ascending, so the last entry is the latest day
    if let Some(last) = observations.last().filter(|o| o.day > today) {
        return Err(SeriesError::OutOfRangeObservation {
            day: last.day,
            start,
            today,
        });
    }

    Ok(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(y: i32, m: u32, d: u32, count: u64) -> Observation {
        Observation::new(day(y, m, d), count)
    }

    #[test]
    fn normalize_fills_missing_days_with_zero() {
        let input = [obs(2020, 1, 1, 3), obs(2020, 1, 3, 5)];
        let series = normalize(&input, day(2020, 1, 3)).unwrap();

        assert_eq!(series.kind(), SeriesKind::Daily);
        assert_eq!(
            series.points(),
            &[obs(2020, 1, 1, 3), obs(2020, 1, 2, 0), obs(2020, 1, 3, 5)]
        );
    }

    #[test]
    fn normalize_single_day_span() {
        let input = [obs(2020, 1, 1, 2)];
        let series = normalize(&input, day(2020, 1, 1)).unwrap();
        assert_eq!(series.points(), &[obs(2020, 1, 1, 2)]);
    }

    #[test]
    fn normalize_rejects_empty_input() {
        let err = normalize(&[], day(2020, 1, 1)).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidInput(_)));
    }

    #[test]
    fn normalize_rejects_day_after_today() {
        let input = [obs(2020, 1, 1, 1), obs(2020, 1, 9, 4)];
        let err = normalize(&input, day(2020, 1, 5)).unwrap_err();
        assert_eq!(
            err,
            SeriesError::OutOfRangeObservation {
                day: day(2020, 1, 9),
                start: day(2020, 1, 1),
                today: day(2020, 1, 5),
            }
        );
    }

    #[test]
    fn normalize_rejects_start_after_today() {
        let input = [obs(2020, 2, 1, 1)];
        let err = normalize(&input, day(2020, 1, 31)).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfRangeObservation { .. }));
    }

    #[test]
    fn normalize_rejects_unsorted_input() {
        let input = [obs(2020, 1, 3, 1), obs(2020, 1, 2, 1)];
        let err = normalize(&input, day(2020, 1, 4)).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidInput(_)));
    }

    #[test]
    fn normalize_keeps_first_of_duplicate_days() {
        let input = [
            obs(2020, 1, 1, 7),
            obs(2020, 1, 1, 9),
            obs(2020, 1, 2, 4),
        ];
        let series = normalize(&input, day(2020, 1, 3)).unwrap();
        assert_eq!(
            series.points(),
            &[obs(2020, 1, 1, 7), obs(2020, 1, 2, 4), obs(2020, 1, 3, 0)]
        );
    }

    #[test]
    fn normalize_length_matches_day_span_across_month_and_leap_day() {
        let input = [obs(2020, 2, 27, 1), obs(2020, 3, 2, 6)];
        let today = day(2020, 3, 10);
        let series = normalize(&input, today).unwrap();

        let expected_len = (today - day(2020, 2, 27)).num_days() as usize + 1;
        assert_eq!(series.len(), expected_len);
        assert_eq!(series.points()[2], obs(2020, 2, 29, 0));
        assert_eq!(series.points()[4], obs(2020, 3, 2, 6));
        assert_eq!(series.points().last().unwrap().day, today);
    }

    #[test]
    fn normalize_output_is_strictly_consecutive() {
        let input = [obs(2019, 12, 20, 2), obs(2020, 1, 4, 8), obs(2020, 1, 15, 1)];
        let series = normalize(&input, day(2020, 1, 20)).unwrap();

        for pair in series.points().windows(2) {
            assert_eq!(pair[1].day - pair[0].day, Duration::days(1));
        }
        let total: u64 = series.points().iter().map(|p| p.count).sum();
        assert_eq!(total, 11);
        assert_eq!(series.first_day(), Some(day(2019, 12, 20)));
    }

    #[test]
    fn normalize_is_idempotent() {
        let input = [obs(2021, 6, 1, 1), obs(2021, 6, 4, 2)];
        let today = day(2021, 6, 10);
        assert_eq!(normalize(&input, today), normalize(&input, today));
    }

    #[test]
    fn passthrough_monthly_tags_month_buckets() {
        let input = [obs(2020, 1, 15, 10), obs(2020, 3, 2, 4)];
        let series = passthrough_monthly(&input);

        assert_eq!(series.kind(), SeriesKind::Monthly);
        assert_eq!(series.points(), &[obs(2020, 1, 1, 10), obs(2020, 3, 1, 4)]);
    }

    #[test]
    fn series_kind_parses_route_names() {
        assert_eq!(SeriesKind::parse("day"), Some(SeriesKind::Daily));
        assert_eq!(SeriesKind::parse("monthly"), Some(SeriesKind::Monthly));
        assert_eq!(SeriesKind::parse("week"), None);
    }
}
