use std::io::{self, Write};

use crate::app::AppError;
use crate::stove::{AlertKind, EfficiencySeries, MeasurementRecord, WhatIfReport};

/// 열풍로 ID 목록을 출력한다.
pub fn print_stove_ids(ids: &[String]) {
    if ids.is_empty() {
        println!("로그에 열풍로 기록이 없습니다.");
        return;
    }
    println!("열풍로 목록:");
    for id in ids {
        println!("  {id}");
    }
}

/// 효율 이력과 상태지수를 표로 출력한다.
pub fn print_series(stove_id: &str, series: &EfficiencySeries, condition_index: f64) {
    println!("\n=== 열풍로 {stove_id} 효율 이력 ===");
    println!("{:<20} {:<12} {:>10}", "시각", "사이클", "효율 [%]");
    for p in &series.points {
        println!(
            "{:<20} {:<12} {:>10.2}",
            p.timestamp.format("%Y-%m-%d %H:%M:%S"),
            p.cycle_id,
            p.efficiency_percent
        );
    }
    println!("상태지수(최근 평균): {condition_index:.2} %");
}

/// 가정 분석 결과와 경보를 출력한다.
pub fn print_what_if(record: &MeasurementRecord, report: &WhatIfReport) {
    let r = &report.result;
    println!(
        "\n=== 가정 분석: 열풍로 {} / 사이클 {} ===",
        record.stove_id, record.cycle_id
    );
    println!("열풍로 효율: {:.1} %", r.efficiency * 100.0);
    println!("{:<12} {:>16}", "항목", "값");
    println!("{:<12} {:>16.2}", "총 입열", r.total_input());
    println!("{:<12} {:>16.2}", "유효 출열", r.q_blast);
    println!("{:<12} {:>16.2}", "배가스 손실", r.q_flue);
    println!("{:<12} {:>16.2}", "쉘 손실", r.q_shell);
    println!("{:<12} {:>16.2}", "미계상 열량", r.unaccounted());
    println!("{:<12} {:>16.2}", "효율 [%]", r.efficiency * 100.0);
    for alert in &report.alerts {
        println!("경고: {}", alert_message(*alert));
    }
}

fn alert_message(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::LowEfficiency => "효율이 기준 이하입니다!",
        AlertKind::ShellOverheat => "쉘 과열!",
        AlertKind::LongCycle => "사이클 시간이 기준을 초과했습니다!",
    }
}

/// 최근 기록을 기본값으로 보여주며 각 값을 수정받는다.
///
/// 엔터만 누르면 기존 값을 유지한다. 비열과 스테판-볼츠만 상수는 기록 값을 그대로 쓴다.
pub fn edit_record(latest: &MeasurementRecord) -> Result<MeasurementRecord, AppError> {
    println!("\n가정 분석용 값을 수정하세요 (엔터 = 기존 값 유지):");
    let mut rec = latest.clone();
    rec.m_fuel = read_f64_or("연료 유량 (Nm³/h)", rec.m_fuel)?;
    rec.cv_fuel = read_f64_or("연료 발열량 (MJ/Nm³)", rec.cv_fuel)?;
    rec.eta_combustion = read_f64_or("연소 효율", rec.eta_combustion)?;
    rec.m_air = read_f64_or("열풍 공기 유량 (kg/h)", rec.m_air)?;
    rec.t_hot_blast = read_f64_or("열풍 온도 (°C)", rec.t_hot_blast)?;
    rec.t_ambient = read_f64_or("주변 온도 (°C)", rec.t_ambient)?;
    rec.m_flue = read_f64_or("배가스 유량 (kg/h)", rec.m_flue)?;
    rec.t_flue = read_f64_or("배가스 온도 (°C)", rec.t_flue)?;
    rec.t_ref = read_f64_or("배가스 기준 온도 (°C)", rec.t_ref)?;
    rec.k = read_f64_or("쉘 열전도율 (W/mK)", rec.k)?;
    rec.area = read_f64_or("쉘 면적 (m²)", rec.area)?;
    rec.t_internal = read_f64_or("내부 온도 (°C)", rec.t_internal)?;
    rec.t_surface = read_f64_or("쉘 표면 온도 (°C)", rec.t_surface)?;
    rec.d = read_f64_or("쉘 두께 (m)", rec.d)?;
    rec.eps = read_f64_or("쉘 방사율", rec.eps)?;
    rec.m_air_comb = read_f64_or("연소용 공기 유량 (kg/h)", rec.m_air_comb)?;
    rec.t_air_comb = read_f64_or("연소용 공기 온도 (°C)", rec.t_air_comb)?;
    Ok(rec)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64_or(label: &str, current: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{current}]: "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(current);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}
