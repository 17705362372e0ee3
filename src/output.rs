/*
 * This file is part of pin-hwmon-win.
 *
 * Copyright (C) 2025 pin-hwmon-win contributors
 *
 * pin-hwmon-win is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * pin-hwmon-win is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with pin-hwmon-win. If not, see <https://www.gnu.org/licenses/>.
 */

//! Output formatters. Each one writes a complete report and returns the
//! process exit code that goes with it.

use std::io::{self, Write};

use crate::config::{Command, Thresholds};
use crate::snapshot::ThermalSnapshot;

pub const EXIT_OK: i32 = 0;
pub const EXIT_HOT: i32 = 2;
pub const EXIT_USAGE: i32 = 2;

pub const METRIC_NAME: &str = "pin_hwmon_temperature_celsius";
pub const USAGE: &str = "Usage: pin-hwmon-win [read|json|check --cpu-max=N --gpu-max=N|metrics]";

/// One decimal, always with a dot.
fn celsius(v: f64) -> String {
    format!("{:.1}", v)
}

fn celsius_or_na(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{}°C", celsius(v)),
        None => "N/A".to_string(),
    }
}

pub fn write_text<W: Write>(snapshot: &ThermalSnapshot, out: &mut W) -> io::Result<i32> {
    writeln!(
        out,
        "CPU: {}  GPU: {}",
        celsius_or_na(snapshot.cpu_celsius()),
        celsius_or_na(snapshot.gpu_celsius())
    )?;
    for (name, value) in snapshot.nvme() {
        writeln!(out, "{}: {}", name, celsius_or_na(value))?;
    }
    Ok(EXIT_OK)
}

pub fn write_json<W: Write>(snapshot: &ThermalSnapshot, out: &mut W) -> io::Result<i32> {
    serde_json::to_writer(&mut *out, &snapshot.to_json_view())?;
    writeln!(out)?;
    Ok(EXIT_OK)
}

/// True when either reading reached its limit. Limits are inclusive and
/// missing readings never count.
pub fn is_hot(snapshot: &ThermalSnapshot, thresholds: &Thresholds) -> bool {
    let cpu_hot = snapshot.cpu_celsius().is_some_and(|c| c >= thresholds.cpu_max);
    let gpu_hot = snapshot.gpu_celsius().is_some_and(|g| g >= thresholds.gpu_max);
    cpu_hot || gpu_hot
}

pub fn write_check<W: Write>(
    snapshot: &ThermalSnapshot,
    thresholds: &Thresholds,
    out: &mut W,
) -> io::Result<i32> {
    if is_hot(snapshot, thresholds) {
        writeln!(out, "HOT")?;
        Ok(EXIT_HOT)
    } else {
        writeln!(out, "OK")?;
        Ok(EXIT_OK)
    }
}

/// Escape a label value for the Prometheus text exposition format.
pub fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn write_sample<W: Write>(out: &mut W, sensor: &str, value: f64) -> io::Result<()> {
    writeln!(out, "{}{{sensor=\"{}\"}} {}", METRIC_NAME, escape_label(sensor), celsius(value))
}

pub fn write_metrics<W: Write>(snapshot: &ThermalSnapshot, out: &mut W) -> io::Result<i32> {
    if let Some(v) = snapshot.cpu_celsius() {
        write_sample(out, "cpu", v)?;
    }
    if let Some(v) = snapshot.gpu_celsius() {
        write_sample(out, "gpu", v)?;
    }
    for (name, value) in snapshot.nvme() {
        if let Some(v) = value {
            write_sample(out, name, v)?;
        }
    }
    Ok(EXIT_OK)
}

pub fn write_usage<W: Write>(out: &mut W) -> io::Result<i32> {
    writeln!(out, "{}", USAGE)?;
    Ok(EXIT_USAGE)
}

/// Dispatch to the formatter for `command`.
pub fn render<W: Write>(
    command: &Command,
    snapshot: &ThermalSnapshot,
    thresholds: &Thresholds,
    out: &mut W,
) -> io::Result<i32> {
    match command {
        Command::Read => write_text(snapshot, out),
        Command::Json => write_json(snapshot, out),
        Command::Check => write_check(snapshot, thresholds, out),
        Command::Metrics => write_metrics(snapshot, out),
        Command::Unknown(_) => write_usage(out),
    }
}
