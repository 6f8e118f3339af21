use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::heat_balance::STEFAN_BOLTZMANN;

/// 열풍로 사이클의 한 운전점 측정값.
///
/// 모델은 단위 변환을 하지 않는다. 온도는 모두 °C, 두께는 m 로 주어야 하며
/// 유량·비열·발열량은 호출자가 서로 일관된 단위계로 맞춰 넣는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub stove_id: String,
    pub cycle_id: String,
    pub timestamp: NaiveDateTime,

    /// 연료 유량
    pub m_fuel: f64,
    /// 연료 발열량
    pub cv_fuel: f64,
    /// 연소 효율 (0~1)
    pub eta_combustion: f64,

    /// 연소용 공기 질량 유량
    pub m_air_comb: f64,
    /// 연소용 공기 온도 [°C]
    pub t_air_comb: f64,
    /// 공기 정압비열
    pub cp_air: f64,
    /// 주변 온도 [°C]
    pub t_ambient: f64,

    /// 송풍(열풍) 공기 질량 유량
    pub m_air: f64,
    /// 열풍 온도 [°C]
    pub t_hot_blast: f64,

    /// 배가스 유량
    pub m_flue: f64,
    /// 배가스 정압비열
    pub cp_flue: f64,
    /// 배가스 온도 [°C]
    pub t_flue: f64,
    /// 배가스 기준 온도 [°C]
    pub t_ref: f64,

    /// 쉘 열전도율
    pub k: f64,
    /// 쉘 면적
    #[serde(rename = "A")]
    pub area: f64,
    /// 내부 온도 [°C]
    pub t_internal: f64,
    /// 쉘 표면 온도 [°C]
    pub t_surface: f64,
    /// 쉘 두께 [m], 0보다 커야 한다.
    pub d: f64,
    /// 쉘 방사율 (0~1)
    pub eps: f64,
    /// 스테판-볼츠만 상수. 기록에 없으면 [`STEFAN_BOLTZMANN`]을 쓴다.
    /// 기록에 있으면 범위 검사 없이 그대로 신뢰한다.
    #[serde(default = "default_sigma")]
    pub sigma: f64,
}

fn default_sigma() -> f64 {
    STEFAN_BOLTZMANN
}

/// 측정값이 모델 입력 조건을 위반했을 때의 오류.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} 값이 유한한 숫자가 아닙니다: {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} 값은 음수일 수 없습니다: {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} 값은 0보다 커야 합니다: {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} 값은 0~1 범위여야 합니다: {value}")]
    OutOfUnitInterval { field: &'static str, value: f64 },
    #[error("{term} 계산 결과가 유한하지 않습니다: {value}")]
    TermOverflow { term: &'static str, value: f64 },
}

impl ValidationError {
    /// 위반한 필드 이름. 계산 결과가 넘친 경우에는 열량 항 이름.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotFinite { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::OutOfUnitInterval { field, .. } => field,
            ValidationError::TermOverflow { term, .. } => term,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if finite(field, value)? < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

fn strictly_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if finite(field, value)? <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&finite(field, value)?) {
        return Err(ValidationError::OutOfUnitInterval { field, value });
    }
    Ok(())
}

impl MeasurementRecord {
    /// 모델 평가 전에 입력 불변 조건을 검사한다.
    ///
    /// 값을 보정하지 않고 첫 번째 위반을 그대로 돌려준다.
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_negative("m_fuel", self.m_fuel)?;
        non_negative("cv_fuel", self.cv_fuel)?;
        unit_interval("eta_combustion", self.eta_combustion)?;

        non_negative("m_air_comb", self.m_air_comb)?;
        finite("t_air_comb", self.t_air_comb)?;
        non_negative("cp_air", self.cp_air)?;
        finite("t_ambient", self.t_ambient)?;

        non_negative("m_air", self.m_air)?;
        finite("t_hot_blast", self.t_hot_blast)?;

        non_negative("m_flue", self.m_flue)?;
        non_negative("cp_flue", self.cp_flue)?;
        finite("t_flue", self.t_flue)?;
        finite("t_ref", self.t_ref)?;

        non_negative("k", self.k)?;
        non_negative("A", self.area)?;
        finite("t_internal", self.t_internal)?;
        finite("t_surface", self.t_surface)?;
        strictly_positive("d", self.d)?;
        unit_interval("eps", self.eps)?;
        Ok(())
    }
}
