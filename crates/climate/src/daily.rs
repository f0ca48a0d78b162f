//! Aggregation of sub-daily samples into calendar days.

use chrono::NaiveDate;

use crate::series::ClimateSeries;

/// Per-day summaries of a [`ClimateSeries`].
///
/// All vectors are parallel and ordered by date. A series that already has
/// one sample per day aggregates to itself (mean = min = max = the sample).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyClimate {
    dates: Vec<NaiveDate>,
    mean_temp: Vec<f64>,
    min_temp: Vec<f64>,
    max_temp: Vec<f64>,
    precip_total: Vec<f64>,
}

impl DailyClimate {
    /// Returns the calendar dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the daily mean temperatures.
    pub fn mean_temp(&self) -> &[f64] {
        &self.mean_temp
    }

    /// Returns the daily minimum temperatures.
    pub fn min_temp(&self) -> &[f64] {
        &self.min_temp
    }

    /// Returns the daily maximum temperatures.
    pub fn max_temp(&self) -> &[f64] {
        &self.max_temp
    }

    /// Returns the daily precipitation totals.
    pub fn precip_total(&self) -> &[f64] {
        &self.precip_total
    }

    /// Daily temperature range (max - min) for each day.
    pub fn temp_range(&self) -> Vec<f64> {
        self.max_temp
            .iter()
            .zip(&self.min_temp)
            .map(|(hi, lo)| hi - lo)
            .collect()
    }

    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if there are no days.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Groups the samples of `series` by calendar date.
///
/// Relies on the chronological ordering guaranteed by [`ClimateSeries::new`],
/// so each day is a contiguous run of samples.
pub fn daily_aggregate(series: &ClimateSeries) -> DailyClimate {
    let mut out = DailyClimate {
        dates: Vec::new(),
        mean_temp: Vec::new(),
        min_temp: Vec::new(),
        max_temp: Vec::new(),
        precip_total: Vec::new(),
    };

    let mut run: Option<(NaiveDate, DayAccumulator)> = None;
    for ((ts, &t), &p) in series
        .timestamps()
        .iter()
        .zip(series.temperature())
        .zip(series.precipitation())
    {
        let date = ts.date();
        match &mut run {
            Some((d, acc)) if *d == date => acc.add(t, p),
            slot => {
                if let Some((d, acc)) = slot.take() {
                    acc.flush_into(d, &mut out);
                }
                *slot = Some((date, DayAccumulator::new(t, p)));
            }
        }
    }
    if let Some((d, acc)) = run {
        acc.flush_into(d, &mut out);
    }

    out
}

struct DayAccumulator {
    sum: f64,
    count: usize,
    min: f64,
    max: f64,
    precip: f64,
}

impl DayAccumulator {
    fn new(t: f64, p: f64) -> Self {
        Self {
            sum: t,
            count: 1,
            min: t,
            max: t,
            precip: p,
        }
    }

    fn add(&mut self, t: f64, p: f64) {
        self.sum += t;
        self.count += 1;
        self.min = self.min.min(t);
        self.max = self.max.max(t);
        self.precip += p;
    }

    fn flush_into(self, date: NaiveDate, out: &mut DailyClimate) {
        out.dates.push(date);
        out.mean_temp.push(self.sum / self.count as f64);
        out.min_temp.push(self.min);
        out.max_temp.push(self.max);
        out.precip_total.push(self.precip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDateTime};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn hourly_samples_collapse_to_days() {
        // Two days of 6-hourly samples.
        let ts: Vec<NaiveDateTime> = (0..8).map(|i| start() + Duration::hours(6 * i)).collect();
        let temp = vec![10.0, 14.0, 18.0, 14.0, 20.0, 22.0, 26.0, 24.0];
        let precip = vec![0.0, 1.0, 0.5, 0.0, 0.0, 0.0, 2.0, 2.0];
        let series = ClimateSeries::new(ts, temp, precip, None).unwrap();

        let daily = daily_aggregate(&series);
        assert_eq!(daily.len(), 2);
        assert_relative_eq!(daily.mean_temp()[0], 14.0, epsilon = 1e-12);
        assert_relative_eq!(daily.mean_temp()[1], 23.0, epsilon = 1e-12);
        assert_eq!(daily.min_temp(), &[10.0, 20.0]);
        assert_eq!(daily.max_temp(), &[18.0, 26.0]);
        assert_relative_eq!(daily.precip_total()[0], 1.5, epsilon = 1e-12);
        assert_relative_eq!(daily.precip_total()[1], 4.0, epsilon = 1e-12);
        assert_eq!(daily.temp_range(), vec![8.0, 6.0]);
    }

    #[test]
    fn daily_samples_pass_through() {
        let ts: Vec<NaiveDateTime> = (0..3).map(|i| start() + Duration::days(i)).collect();
        let temp = vec![15.0, 16.0, 17.0];
        let series = ClimateSeries::new(ts, temp.clone(), vec![0.0, 3.0, 0.0], None).unwrap();

        let daily = daily_aggregate(&series);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily.mean_temp(), &temp[..]);
        assert_eq!(daily.temp_range(), vec![0.0; 3]);
    }
}
