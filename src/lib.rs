//! 열풍로 열수지 계산 로직을 라이브러리로 분리하여 CLI 외의 호출자도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod config;
pub mod dataset;
pub mod stove;
pub mod ui_cli;
