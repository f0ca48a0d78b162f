use chrono::{Duration, NaiveDate, NaiveDateTime};
use cmpi_climate::{ClimateError, ClimateSeries, HarshnessConfig, build_profile, daily_aggregate};

/// One year of four-hourly samples following a seasonal sinusoid.
fn seasonal_year(mean: f64, amplitude: f64) -> ClimateSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let n = 365 * 6;
    let mut ts: Vec<NaiveDateTime> = Vec::with_capacity(n);
    let mut temp = Vec::with_capacity(n);
    let mut precip = Vec::with_capacity(n);
    let mut dew = Vec::with_capacity(n);
    for i in 0..n {
        let day = (i / 6) as f64;
        let hour = (i % 6) as f64 * 4.0;
        let seasonal = amplitude * (2.0 * std::f64::consts::PI * day / 365.0).sin();
        let diurnal = 3.0 * (2.0 * std::f64::consts::PI * (hour - 9.0) / 24.0).sin();
        let t = mean + seasonal + diurnal;
        ts.push(start + Duration::hours(i as i64 * 4));
        temp.push(t);
        precip.push(if i % 12 == 0 { 2.0 } else { 0.0 });
        dew.push(t - 5.0);
    }
    ClimateSeries::new(ts, temp, precip, Some(dew)).unwrap()
}

#[test]
fn sub_daily_year_collapses_to_365_days() {
    let series = seasonal_year(20.0, 6.0);
    let daily = daily_aggregate(&series);
    assert_eq!(daily.len(), 365);

    let profile = build_profile(&series, &HarshnessConfig::default()).unwrap();
    assert_eq!(profile.n_days, 365);
    assert!((profile.precip_total - 365.0).abs() < 1e-9);
    assert!(profile.avg_daily_range > 0.0);
    assert!(profile.temp_min < profile.temp_mean && profile.temp_mean < profile.temp_max);

    let rh = profile.avg_humidity.unwrap();
    assert!(rh > 50.0 && rh < 90.0, "rh = {rh}");
}

#[test]
fn harsher_climate_scores_higher() {
    let cfg = HarshnessConfig::default();
    let mild = build_profile(&seasonal_year(21.0, 2.0), &cfg).unwrap();
    let hot = build_profile(&seasonal_year(30.0, 6.0), &cfg).unwrap();
    let cold = build_profile(&seasonal_year(5.0, 10.0), &cfg).unwrap();

    for p in [&mild, &hot, &cold] {
        assert!((0.0..=1.0).contains(&p.harshness));
    }
    assert!(hot.harshness > mild.harshness);
    assert!(cold.harshness > mild.harshness);
    assert!(hot.cooling_degree_days > mild.cooling_degree_days);
    assert!(cold.heating_degree_days > mild.heating_degree_days);
}

#[test]
fn degree_day_only_configuration() {
    let series = seasonal_year(30.0, 6.0);
    let cfg = HarshnessConfig::default().with_extremes_weight(0.0);
    let profile = build_profile(&series, &cfg).unwrap();
    let expected = (profile.heating_degree_days + profile.cooling_degree_days) / 3000.0;
    assert!((profile.harshness - expected.min(1.0)).abs() < 1e-12);
}

#[test]
fn invalid_series_is_rejected_at_the_boundary() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let ts = vec![start, start + Duration::days(1)];

    let err = ClimateSeries::new(ts.clone(), vec![20.0, f64::NAN], vec![0.0, 0.0], None);
    assert!(matches!(err, Err(ClimateError::Validation { .. })));

    let err = ClimateSeries::new(ts, vec![20.0], vec![0.0, 0.0], None);
    assert!(matches!(err, Err(ClimateError::LengthMismatch { .. })));

    let err = ClimateSeries::new(vec![], vec![], vec![], None);
    assert!(matches!(err, Err(ClimateError::EmptySeries)));
}
