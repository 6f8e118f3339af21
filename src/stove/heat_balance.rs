use serde::{Deserialize, Serialize};

use super::record::{MeasurementRecord, ValidationError};

/// 스테판-볼츠만 상수 [W/m²·K⁴]
pub const STEFAN_BOLTZMANN: f64 = 5.670374e-8;

const CELSIUS_TO_KELVIN: f64 = 273.15;

/// 측정값 한 건에 대한 열수지 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatBalanceResult {
    /// 연료 연소 입열
    pub q_fuel: f64,
    /// 연소용 공기 현열 (주변보다 차가우면 음수)
    pub q_air_comb: f64,
    /// 열풍 유효 출열
    pub q_blast: f64,
    /// 배가스 손실
    pub q_flue: f64,
    /// 쉘 전도+복사 손실
    pub q_shell: f64,
    /// 열효율 (0~1)
    pub efficiency: f64,
}

impl HeatBalanceResult {
    /// 총 입열.
    pub fn total_input(&self) -> f64 {
        self.q_fuel + self.q_air_comb
    }

    /// 배가스 손실과 쉘 손실의 합.
    pub fn total_losses(&self) -> f64 {
        self.q_flue + self.q_shell
    }

    /// 입열에서 유효열과 손실을 뺀 열수지 잔차.
    pub fn unaccounted(&self) -> f64 {
        self.total_input() - self.q_blast - self.total_losses()
    }
}

/// 연료 연소열과 연소용 공기 현열을 계산한다.
///
/// 연소용 공기가 주변보다 차가우면 공기 항은 음수로 남는다.
pub fn heat_input(
    m_fuel: f64,
    cv_fuel: f64,
    eta_comb: f64,
    m_air_comb: f64,
    cp_air: f64,
    t_air_comb: f64,
    t_ambient: f64,
) -> (f64, f64) {
    let q_fuel = m_fuel * cv_fuel * eta_comb;
    let q_air_comb = m_air_comb * cp_air * (t_air_comb - t_ambient);
    (q_fuel, q_air_comb)
}

/// 열풍이 가져가는 유효 열량.
pub fn heat_output(m_air: f64, cp_air: f64, t_hot_blast: f64, t_ambient: f64) -> f64 {
    m_air * cp_air * (t_hot_blast - t_ambient)
}

/// 배가스 현열 손실.
pub fn flue_loss(m_flue: f64, cp_flue: f64, t_flue: f64, t_ref: f64) -> f64 {
    m_flue * cp_flue * (t_flue - t_ref)
}

/// 쉘 벽체를 통한 전도 손실과 표면 복사 손실의 합.
///
/// 복사항은 °C 입력을 켈빈으로 바꿔 4제곱 차를 취한다. `d`는 0보다 커야 하며
/// 검사는 [`MeasurementRecord::validate`]가 맡는다.
#[allow(clippy::too_many_arguments)]
pub fn shell_loss(
    k: f64,
    area: f64,
    t_internal: f64,
    t_surface: f64,
    d: f64,
    eps: f64,
    sigma: f64,
    t_ambient: f64,
) -> f64 {
    let conduction = k * area * (t_internal - t_surface) / d;
    let t_surface_k = t_surface + CELSIUS_TO_KELVIN;
    let t_ambient_k = t_ambient + CELSIUS_TO_KELVIN;
    let radiation = eps * sigma * area * (t_surface_k.powi(4) - t_ambient_k.powi(4));
    conduction + radiation
}

/// 유효 출열 ÷ 총 입열로 정의한 열효율.
///
/// 총 입열이 0 이하이면 정확히 0.0을 돌려주고, 나머지는 0~1로 클램프한다.
/// 손실항은 비율 계산에 쓰지 않는다.
pub fn efficiency(
    q_blast: f64,
    q_fuel: f64,
    q_air_comb: f64,
    _q_flue: f64,
    _q_shell: f64,
) -> f64 {
    bounded_ratio(q_blast, q_fuel + q_air_comb, 1.0)
}

/// `factor * q_blast / total_input`을 0~1로 묶는다.
///
/// 총 입열이 양수가 아니거나(NaN 포함) 비율이 NaN이면 0.0.
fn bounded_ratio(q_blast: f64, total_input: f64, factor: f64) -> f64 {
    if total_input.is_nan() || total_input <= 0.0 {
        return 0.0;
    }
    let ratio = (q_blast / total_input) * factor;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// 효율 정의에 곱해지는 보정 계수 설정.
///
/// 기본값 1.0은 보정 없음이며 이때 [`efficiency`]와 비트 단위로 같은 값을 낸다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyModel {
    pub correction_factor: f64,
}

impl Default for EfficiencyModel {
    fn default() -> Self {
        Self {
            correction_factor: 1.0,
        }
    }
}

impl EfficiencyModel {
    /// 보정 계수를 적용한 효율.
    pub fn efficiency(&self, q_blast: f64, q_fuel: f64, q_air_comb: f64) -> f64 {
        bounded_ratio(q_blast, q_fuel + q_air_comb, self.correction_factor)
    }
}

/// 측정값을 검증한 뒤 다섯 개 열량 항과 효율을 계산한다.
///
/// 유한한 입력이라도 곱셈이 넘쳐 열량 항이 무한대가 되면
/// [`ValidationError::TermOverflow`]로 거부한다.
pub fn evaluate(
    record: &MeasurementRecord,
    model: &EfficiencyModel,
) -> Result<HeatBalanceResult, ValidationError> {
    record.validate()?;

    let (q_fuel, q_air_comb) = heat_input(
        record.m_fuel,
        record.cv_fuel,
        record.eta_combustion,
        record.m_air_comb,
        record.cp_air,
        record.t_air_comb,
        record.t_ambient,
    );
    let q_blast = heat_output(
        record.m_air,
        record.cp_air,
        record.t_hot_blast,
        record.t_ambient,
    );
    let q_flue = flue_loss(record.m_flue, record.cp_flue, record.t_flue, record.t_ref);
    let q_shell = shell_loss(
        record.k,
        record.area,
        record.t_internal,
        record.t_surface,
        record.d,
        record.eps,
        record.sigma,
        record.t_ambient,
    );

    for (term, value) in [
        ("q_fuel", q_fuel),
        ("q_air_comb", q_air_comb),
        ("q_blast", q_blast),
        ("q_flue", q_flue),
        ("q_shell", q_shell),
        ("total_input", q_fuel + q_air_comb),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::TermOverflow { term, value });
        }
    }

    Ok(HeatBalanceResult {
        q_fuel,
        q_air_comb,
        q_blast,
        q_flue,
        q_shell,
        efficiency: model.efficiency(q_blast, q_fuel, q_air_comb),
    })
}
