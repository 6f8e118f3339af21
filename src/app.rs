use std::path::PathBuf;

use clap::{Args, Subcommand};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::dataset::{CycleLog, DatasetError};
use crate::stove::{self, CycleError, ValidationError};
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 사이클 로그 읽기 오류
    #[error("데이터 오류: {0}")]
    Dataset(#[from] DatasetError),
    /// 측정값 검증 오류
    #[error("입력 검증 오류: {0}")]
    Validation(#[from] ValidationError),
    /// 이력 집계 오류
    #[error("이력 계산 오류: {0}")]
    Cycle(#[from] CycleError),
}

/// 명령줄에서 경보 기준을 덮어쓰는 옵션.
#[derive(Debug, Clone, Default, Args)]
pub struct ThresholdOverrides {
    /// 효율 경보 기준 (0~1)
    #[arg(long, global = true)]
    pub efficiency_low: Option<f64>,
    /// 쉘 과열 경보 기준 [°C]
    #[arg(long, global = true)]
    pub shell_temp_high: Option<f64>,
    /// 장시간 사이클 기준 [min]
    #[arg(long, global = true)]
    pub cycle_duration_long: Option<f64>,
}

impl ThresholdOverrides {
    /// 지정된 항목만 설정에 반영한다.
    pub fn apply(&self, config: &mut Config) {
        let th = &mut config.thresholds;
        if let Some(v) = self.efficiency_low {
            th.efficiency_low = v;
        }
        if let Some(v) = self.shell_temp_high {
            th.shell_temp_high = v;
        }
        if let Some(v) = self.cycle_duration_long {
            th.cycle_duration_long = v;
        }
    }
}

/// 지원하는 하위 명령.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 로그에 있는 열풍로 목록
    Stoves {
        /// 사이클 로그(TOML) 경로
        log: PathBuf,
    },
    /// 열풍로 효율 이력과 상태지수
    History {
        log: PathBuf,
        /// 열풍로 ID
        #[arg(long)]
        stove: String,
        /// 시각 순으로 정렬해 표시
        #[arg(long)]
        sort: bool,
    },
    /// 최근 사이클을 기준으로 한 가정 분석
    WhatIf {
        log: PathBuf,
        #[arg(long)]
        stove: String,
        /// 사이클 시간 [min]. 주면 장시간 사이클 경보를 판정한다.
        #[arg(long)]
        duration: Option<f64>,
        /// 각 값을 프롬프트에서 수정
        #[arg(long, short)]
        interactive: bool,
    },
}

/// 하위 명령을 실행한다.
pub fn run(command: &Command, config: &Config) -> Result<(), AppError> {
    tracing::debug!(?command, "명령 실행");
    match command {
        Command::Stoves { log } => {
            let log = CycleLog::load(log)?;
            ui_cli::print_stove_ids(&stove::stove_ids(&log.records));
        }
        Command::History { log, stove, sort } => {
            let mut log = CycleLog::load(log)?;
            if *sort {
                log.sort_by_timestamp();
            }
            let series = stove::evaluate_stove_series(&log.records, stove, &config.model)?;
            if series.is_empty() {
                return Err(CycleError::NotFound {
                    stove_id: stove.clone(),
                }
                .into());
            }
            let index = stove::condition_index(&series.efficiencies_percent())?;
            ui_cli::print_series(stove, &series, index);
        }
        Command::WhatIf {
            log,
            stove,
            duration,
            interactive,
        } => {
            let log = CycleLog::load(log)?;
            let latest = stove::latest_record(&log.records, stove)?;
            let record = if *interactive {
                ui_cli::edit_record(latest)?
            } else {
                latest.clone()
            };
            let report =
                stove::evaluate_what_if(&record, &config.model, &config.thresholds, *duration)?;
            if !report.alerts.is_empty() {
                tracing::warn!(stove = %stove, alerts = ?report.alerts, "경보 발생");
            }
            ui_cli::print_what_if(&record, &report);
        }
    }
    Ok(())
}
