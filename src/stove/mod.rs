//! 열풍로 열수지 계산 모듈 모음.
//! 측정값 한 건의 열수지(heat_balance)와 사이클 이력 집계(cycle)로 구성한다.
//! 이 모듈은 순수 계산만 하며 입출력이나 로그를 남기지 않는다.

pub mod cycle;
pub mod heat_balance;
pub mod record;
pub mod what_if;

pub use cycle::{
    condition_index, cycle_duration_alert, evaluate_alerts, evaluate_series,
    evaluate_stove_series, historical_records, latest_record, stove_ids, AlertKind,
    AlertThresholds, CycleError, EfficiencySeries, SeriesPoint,
};
pub use heat_balance::{
    efficiency, evaluate, flue_loss, heat_input, heat_output, shell_loss, EfficiencyModel,
    HeatBalanceResult, STEFAN_BOLTZMANN,
};
pub use record::{MeasurementRecord, ValidationError};
pub use what_if::{evaluate_what_if, WhatIfReport};
