//! 사이클 이력 집계와 경보 판정 테스트.
use std::collections::BTreeSet;

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use stove_heat_balance::stove::{
    condition_index, evaluate, evaluate_alerts, evaluate_series, evaluate_stove_series,
    evaluate_what_if, historical_records, latest_record, stove_ids, AlertKind, AlertThresholds,
    CycleError, EfficiencyModel, MeasurementRecord,
};

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid timestamp")
}

/// 입열은 3850으로 고정하고 출열은 `m_air`에 비례하도록 만든 측정값.
fn record(stove: &str, cycle: &str, hours: i64, m_air: f64) -> MeasurementRecord {
    MeasurementRecord {
        stove_id: stove.into(),
        cycle_id: cycle.into(),
        timestamp: base_time() + Duration::hours(hours),
        m_fuel: 100.0,
        cv_fuel: 30.0,
        eta_combustion: 0.95,
        m_air_comb: 10.0,
        t_air_comb: 125.0,
        cp_air: 1.0,
        t_ambient: 25.0,
        m_air,
        t_hot_blast: 1025.0,
        m_flue: 3.0,
        cp_flue: 1.1,
        t_flue: 225.0,
        t_ref: 25.0,
        k: 0.5,
        area: 40.0,
        t_internal: 900.0,
        t_surface: 90.0,
        d: 0.4,
        eps: 0.8,
        sigma: 5.670374e-8,
    }
}

#[test]
fn empty_input_gives_empty_series() {
    let records: Vec<MeasurementRecord> = Vec::new();
    let series = evaluate_series(&records, &EfficiencyModel::default()).expect("empty is fine");
    assert!(series.is_empty());
    assert_eq!(series.len(), 0);
}

#[test]
fn series_preserves_input_order_and_scales_to_percent() {
    // 일부러 시각 순서를 뒤섞는다.
    let records = vec![
        record("S1", "C3", 3, 1.8),
        record("S1", "C1", 1, 2.1),
        record("S1", "C2", 2, 0.9),
        record("S1", "C4", 4, 5.0),
    ];
    let model = EfficiencyModel::default();
    let series = evaluate_series(&records, &model).expect("valid records");
    assert_eq!(series.len(), records.len());
    for (point, rec) in series.points.iter().zip(&records) {
        assert_eq!(point.cycle_id, rec.cycle_id);
        assert_eq!(point.timestamp, rec.timestamp);
        let eta = evaluate(rec, &model).expect("valid record").efficiency;
        assert!((point.efficiency_percent - 100.0 * eta).abs() <= 0.005 + 1e-9);
    }
    // 입열 = 2850 + 1000 = 3850, 출열 = 1.8 * 1000 = 1800
    assert_eq!(series.points[0].efficiency_percent, 46.75);
    // 5.0 * 1000 > 3850 → 100%
    assert_eq!(series.points[3].efficiency_percent, 100.0);
}

#[test]
fn invalid_record_fails_series_with_context() {
    let mut bad = record("S1", "C2", 2, 1.0);
    bad.d = 0.0;
    let records = vec![record("S1", "C1", 1, 1.0), bad];
    let err = evaluate_series(&records, &EfficiencyModel::default()).unwrap_err();
    match err {
        CycleError::InvalidRecord {
            index,
            cycle_id,
            source,
        } => {
            assert_eq!(index, 1);
            assert_eq!(cycle_id, "C2");
            assert_eq!(source.field(), "d");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn stove_series_filters_by_id() {
    let records = vec![
        record("S1", "A1", 1, 1.0),
        record("S2", "B1", 2, 2.0),
        record("S1", "A2", 3, 3.0),
    ];
    let series =
        evaluate_stove_series(&records, "S1", &EfficiencyModel::default()).expect("valid");
    let cycles: Vec<_> = series.points.iter().map(|p| p.cycle_id.as_str()).collect();
    assert_eq!(cycles, ["A1", "A2"]);
    assert!(series.points.iter().all(|p| p.stove_id == "S1"));
    assert_eq!(historical_records(&records, "S2").len(), 1);
    assert!(historical_records(&records, "S9").is_empty());
}

#[test]
fn latest_record_is_last_by_position() {
    let records = vec![
        record("S1", "late", 10, 1.0),
        record("S2", "other", 5, 1.0),
        record("S1", "early", 1, 1.0),
    ];
    let latest = latest_record(&records, "S1").expect("found");
    assert_eq!(latest.cycle_id, "early");
}

#[test]
fn latest_record_missing_stove_is_not_found() {
    let records = vec![record("S1", "C1", 1, 1.0)];
    assert_eq!(
        latest_record(&records, "S7").unwrap_err(),
        CycleError::NotFound {
            stove_id: "S7".into()
        }
    );
    assert!(matches!(
        latest_record(&[], "S1"),
        Err(CycleError::NotFound { .. })
    ));
}

#[test]
fn stove_ids_are_sorted_and_unique() {
    let records = vec![
        record("S3", "a", 1, 1.0),
        record("S1", "b", 2, 1.0),
        record("S3", "c", 3, 1.0),
        record("S2", "d", 4, 1.0),
    ];
    assert_eq!(stove_ids(&records), ["S1", "S2", "S3"]);
}

#[test]
fn condition_index_uses_all_values_below_window() {
    assert_relative_eq!(condition_index(&[70.0, 80.0, 90.0]).unwrap(), 80.0);
}

#[test]
fn condition_index_uses_last_five_values() {
    let values = [10.0, 20.0, 60.0, 70.0, 80.0, 90.0, 100.0];
    assert_relative_eq!(condition_index(&values).unwrap(), 80.0);
}

#[test]
fn condition_index_of_empty_input_fails() {
    assert_eq!(condition_index(&[]).unwrap_err(), CycleError::EmptyInput);
}

#[test]
fn alerts_fire_on_thresholds() {
    let th = AlertThresholds {
        efficiency_low: 0.70,
        shell_temp_high: 150.0,
        ..Default::default()
    };
    assert_eq!(
        evaluate_alerts(0.65, 160.0, &th),
        BTreeSet::from([AlertKind::LowEfficiency, AlertKind::ShellOverheat])
    );
    assert!(evaluate_alerts(0.80, 100.0, &th).is_empty());
    // 경계값은 경보가 아니다.
    assert!(evaluate_alerts(0.70, 150.0, &th).is_empty());
}

#[test]
fn what_if_combines_balance_and_alerts() {
    let mut rec = record("S1", "C1", 1, 1.8);
    rec.t_surface = 170.0;
    let th = AlertThresholds::default();
    let model = EfficiencyModel::default();

    let report = evaluate_what_if(&rec, &model, &th, None).expect("valid record");
    assert_eq!(report.result, evaluate(&rec, &model).expect("valid record"));
    assert_eq!(
        report.alerts,
        BTreeSet::from([AlertKind::LowEfficiency, AlertKind::ShellOverheat])
    );

    let report = evaluate_what_if(&rec, &model, &th, Some(240.0)).expect("valid record");
    assert!(report.alerts.contains(&AlertKind::LongCycle));

    let report = evaluate_what_if(&rec, &model, &th, Some(90.0)).expect("valid record");
    assert!(!report.alerts.contains(&AlertKind::LongCycle));
}

#[test]
fn correction_factor_flows_into_series() {
    let records = vec![record("S1", "C1", 1, 1.8)];
    let corrected = EfficiencyModel {
        correction_factor: 0.75,
    };
    let plain = evaluate_series(&records, &EfficiencyModel::default()).unwrap();
    let scaled = evaluate_series(&records, &corrected).unwrap();
    assert_relative_eq!(
        scaled.points[0].efficiency_percent,
        plain.points[0].efficiency_percent * 0.75,
        epsilon = 0.01
    );
}
