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

//! Invocation settings. Everything comes from the command line; nothing is
//! read from or written to disk.

use tracing::debug;

pub const DEFAULT_CPU_MAX_C: f64 = 85.0;
pub const DEFAULT_GPU_MAX_C: f64 = 90.0;

const CPU_MAX_FLAG: &str = "--cpu-max=";
const GPU_MAX_FLAG: &str = "--gpu-max=";
const LOGGING_FLAG: &str = "--logging";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Read,
    Json,
    Check,
    Metrics,
    Unknown(String),
}

impl Command {
    /// Commands are matched case-insensitively; no command means `read`.
    pub fn parse(arg: Option<&str>) -> Self {
        let Some(arg) = arg else { return Command::Read };
        match arg.to_lowercase().as_str() {
            "read" => Command::Read,
            "json" => Command::Json,
            "check" => Command::Check,
            "metrics" => Command::Metrics,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub cpu_max: f64,
    pub gpu_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { cpu_max: DEFAULT_CPU_MAX_C, gpu_max: DEFAULT_GPU_MAX_C }
    }
}

/// Threshold values that fail to parse are dropped and the threshold keeps
/// the value it already had. No error is reported.
pub fn parse_threshold_or_keep(raw: &str, current: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            debug!("ignoring malformed threshold {:?}, keeping {}", raw, current);
            current
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub thresholds: Thresholds,
    pub logging: bool,
}

impl Invocation {
    /// Build an invocation from the arguments after the program name. The
    /// first argument is the command; flags are looked for in every position.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let command = Command::parse(args.first().map(|a| a.as_ref()));
        let mut thresholds = Thresholds::default();
        let mut logging = false;

        for arg in args.iter().map(|a| a.as_ref()) {
            if let Some(raw) = arg.strip_prefix(CPU_MAX_FLAG) {
                thresholds.cpu_max = parse_threshold_or_keep(raw, thresholds.cpu_max);
            } else if let Some(raw) = arg.strip_prefix(GPU_MAX_FLAG) {
                thresholds.gpu_max = parse_threshold_or_keep(raw, thresholds.gpu_max);
            } else if arg == LOGGING_FLAG {
                logging = true;
            }
        }

        Self { command, thresholds, logging }
    }
}
