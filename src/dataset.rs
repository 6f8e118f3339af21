//! 사이클 로그 파일 읽기.
//!
//! 로그는 `[[records]]` 표의 배열로 이루어진 TOML 문서이며 필드 이름은
//! [`MeasurementRecord`]와 같다. 시각은 따옴표로 감싼 ISO-8601 문자열로 적는다.
//!
//! ```toml
//! [[records]]
//! stove_id = "S1"
//! cycle_id = "C001"
//! timestamp = "2024-03-01T08:00:00"
//! m_fuel = 500.0
//! # ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stove::MeasurementRecord;

/// 로그 읽기 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("사이클 로그를 읽을 수 없습니다 ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("사이클 로그 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
}

/// 호출자가 넘기는 측정값 묶음.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleLog {
    #[serde(default)]
    pub records: Vec<MeasurementRecord>,
}

impl CycleLog {
    pub fn from_toml_str(content: &str) -> Result<Self, DatasetError> {
        Ok(toml::from_str(content)?)
    }

    /// 파일에서 로그를 읽는다.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let log = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            records = log.records.len(),
            "사이클 로그를 읽었습니다"
        );
        Ok(log)
    }

    /// 시각 오름차순으로 정렬한다. 같은 시각끼리는 원래 순서를 유지한다.
    pub fn sort_by_timestamp(&mut self) {
        self.records.sort_by_key(|r| r.timestamp);
    }
}
