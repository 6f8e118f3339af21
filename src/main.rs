use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stove_heat_balance::{app, config};
use tracing_subscriber::EnvFilter;

/// 열풍로 사이클 로그로 열수지 효율을 계산한다.
#[derive(Parser)]
#[command(name = "stove_heat_balance", version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(flatten)]
    overrides: app::ThresholdOverrides,
    #[command(subcommand)]
    command: app::Command,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령을 실행한다.
fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match try_run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: &Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    cli.overrides.apply(&mut cfg);
    cfg.validate()?;
    app::run(&cli.command, &cfg)
}
