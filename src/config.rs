use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::stove::{AlertThresholds, EfficiencyModel};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "stove_config.toml";

/// 애플리케이션 설정을 표현한다.
///
/// 모든 항목에 기본값이 있으므로 파일에는 바꾸려는 값만 적어도 된다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: AlertThresholds,
    pub model: EfficiencyModel,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 허용되지 않는 설정값
    #[error("잘못된 설정값 {field} = {value}")]
    Invalid { field: &'static str, value: f64 },
}

impl Config {
    /// TOML 문자열에서 설정을 읽고 검증한다.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// 보정 계수는 양의 유한값, 경보 기준은 유한값이어야 한다.
    /// 효율 하한은 효율과 같은 0~1 비율로 적는다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factor = self.model.correction_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "model.correction_factor",
                value: factor,
            });
        }
        let thresholds = [
            ("thresholds.efficiency_low", self.thresholds.efficiency_low),
            ("thresholds.shell_temp_high", self.thresholds.shell_temp_high),
            (
                "thresholds.cycle_duration_long",
                self.thresholds.cycle_duration_long,
            ),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        let low = self.thresholds.efficiency_low;
        if !(0.0..=1.0).contains(&low) {
            return Err(ConfigError::Invalid {
                field: "thresholds.efficiency_low",
                value: low,
            });
        }
        Ok(())
    }

    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = Config::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "설정 파일을 읽었습니다");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일을 생성했습니다");
        Ok(cfg)
    }
}
