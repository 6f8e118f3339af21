use std::collections::BTreeSet;

use serde::Serialize;

use super::cycle::{self, AlertKind, AlertThresholds};
use super::heat_balance::{self, EfficiencyModel, HeatBalanceResult};
use super::record::{MeasurementRecord, ValidationError};

/// 가정(what-if) 운전점 평가 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatIfReport {
    pub result: HeatBalanceResult,
    pub alerts: BTreeSet<AlertKind>,
}

/// 운전점 한 건의 열수지와 경보를 함께 계산한다.
///
/// `cycle_duration_min`이 주어진 경우에만 장시간 사이클 경보를 판정한다.
pub fn evaluate_what_if(
    record: &MeasurementRecord,
    model: &EfficiencyModel,
    thresholds: &AlertThresholds,
    cycle_duration_min: Option<f64>,
) -> Result<WhatIfReport, ValidationError> {
    let result = heat_balance::evaluate(record, model)?;
    let mut alerts = cycle::evaluate_alerts(result.efficiency, record.t_surface, thresholds);
    if let Some(duration) = cycle_duration_min {
        alerts.extend(cycle::cycle_duration_alert(duration, thresholds));
    }
    Ok(WhatIfReport { result, alerts })
}
