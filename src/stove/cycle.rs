use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::heat_balance::{self, EfficiencyModel};
use super::record::{MeasurementRecord, ValidationError};

/// 상태지수 계산에 쓰는 최근 값 개수.
pub const CONDITION_WINDOW: usize = 5;

/// 경보 판단 기준값. 각 항목은 독립적으로 바꿀 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// 효율 하한 (0~1)
    pub efficiency_low: f64,
    /// 쉘 표면 온도 상한 [°C]
    pub shell_temp_high: f64,
    /// 장시간 사이클 기준 [min]
    pub cycle_duration_long: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            efficiency_low: 0.70,
            shell_temp_high: 150.0,
            cycle_duration_long: 180.0,
        }
    }
}

/// 경보 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AlertKind {
    LowEfficiency,
    ShellOverheat,
    LongCycle,
}

/// 효율 시계열의 한 점.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub stove_id: String,
    pub cycle_id: String,
    pub timestamp: NaiveDateTime,
    /// 효율 [%], 소수 둘째 자리 반올림
    pub efficiency_percent: f64,
}

/// 입력 순서를 그대로 따르는 효율 시계열.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EfficiencySeries {
    pub points: Vec<SeriesPoint>,
}

impl EfficiencySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 효율[%] 값만 순서대로 뽑는다.
    pub fn efficiencies_percent(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.efficiency_percent).collect()
    }
}

/// 사이클 집계 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CycleError {
    #[error("열풍로 {stove_id}의 기록이 없습니다")]
    NotFound { stove_id: String },
    #[error("빈 효율 목록으로는 상태지수를 계산할 수 없습니다")]
    EmptyInput,
    #[error("{index}번째 기록(사이클 {cycle_id})이 유효하지 않습니다: {source}")]
    InvalidRecord {
        index: usize,
        cycle_id: String,
        #[source]
        source: ValidationError,
    },
}

fn round_percent(eta: f64) -> f64 {
    (eta * 100.0 * 100.0).round() / 100.0
}

/// 기록마다 열수지를 계산해 효율[%] 시계열을 만든다.
///
/// 정렬하지 않는다. 표시 순서는 호출자가 넘긴 순서를 따른다.
/// 하나라도 검증에 실패하면 전체가 실패한다.
pub fn evaluate_series<'a, I>(
    records: I,
    model: &EfficiencyModel,
) -> Result<EfficiencySeries, CycleError>
where
    I: IntoIterator<Item = &'a MeasurementRecord>,
{
    let points = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let result = heat_balance::evaluate(record, model).map_err(|source| {
                CycleError::InvalidRecord {
                    index,
                    cycle_id: record.cycle_id.clone(),
                    source,
                }
            })?;
            Ok(SeriesPoint {
                stove_id: record.stove_id.clone(),
                cycle_id: record.cycle_id.clone(),
                timestamp: record.timestamp,
                efficiency_percent: round_percent(result.efficiency),
            })
        })
        .collect::<Result<Vec<_>, CycleError>>()?;
    Ok(EfficiencySeries { points })
}

/// 한 열풍로의 기록만 골라 시계열을 만든다.
pub fn evaluate_stove_series(
    records: &[MeasurementRecord],
    stove_id: &str,
    model: &EfficiencyModel,
) -> Result<EfficiencySeries, CycleError> {
    evaluate_series(historical_records(records, stove_id), model)
}

/// 해당 열풍로의 기록을 입력 순서대로 모두 돌려준다.
pub fn historical_records<'a>(
    records: &'a [MeasurementRecord],
    stove_id: &str,
) -> Vec<&'a MeasurementRecord> {
    records.iter().filter(|r| r.stove_id == stove_id).collect()
}

/// 해당 열풍로의 마지막 기록(목록 위치 기준, 시각 기준 아님).
pub fn latest_record<'a>(
    records: &'a [MeasurementRecord],
    stove_id: &str,
) -> Result<&'a MeasurementRecord, CycleError> {
    records
        .iter()
        .rev()
        .find(|r| r.stove_id == stove_id)
        .ok_or_else(|| CycleError::NotFound {
            stove_id: stove_id.to_string(),
        })
}

/// 데이터셋에 등장하는 열풍로 ID를 정렬·중복 제거해 돌려준다.
pub fn stove_ids(records: &[MeasurementRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.stove_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 최근 성능 상태지수: 값이 5개 이상이면 마지막 5개, 아니면 전체의 평균.
pub fn condition_index(efficiencies: &[f64]) -> Result<f64, CycleError> {
    if efficiencies.is_empty() {
        return Err(CycleError::EmptyInput);
    }
    let window = &efficiencies[efficiencies.len().saturating_sub(CONDITION_WINDOW)..];
    Ok(window.iter().sum::<f64>() / window.len() as f64)
}

/// 효율과 쉘 표면 온도로 경보를 판정한다.
pub fn evaluate_alerts(
    eta: f64,
    t_surface: f64,
    thresholds: &AlertThresholds,
) -> BTreeSet<AlertKind> {
    let mut alerts = BTreeSet::new();
    if eta < thresholds.efficiency_low {
        alerts.insert(AlertKind::LowEfficiency);
    }
    if t_surface > thresholds.shell_temp_high {
        alerts.insert(AlertKind::ShellOverheat);
    }
    alerts
}

/// 호출자가 직접 준 사이클 시간[min]으로 장시간 사이클 경보를 판정한다.
pub fn cycle_duration_alert(duration_min: f64, thresholds: &AlertThresholds) -> Option<AlertKind> {
    (duration_min > thresholds.cycle_duration_long).then_some(AlertKind::LongCycle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_percent(0.123456), 12.35);
        assert_eq!(round_percent(1.0), 100.0);
        assert_eq!(round_percent(0.0), 0.0);
    }

    #[test]
    fn condition_index_window() {
        assert_eq!(condition_index(&[10.0]).unwrap(), 10.0);
        assert_eq!(
            condition_index(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap(),
            4.0
        );
    }

    #[test]
    fn long_cycle_only_above_threshold() {
        let th = AlertThresholds::default();
        assert_eq!(cycle_duration_alert(180.0, &th), None);
        assert_eq!(cycle_duration_alert(181.0, &th), Some(AlertKind::LongCycle));
    }
}
