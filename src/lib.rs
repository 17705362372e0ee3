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

//! pin-hwmon-win - hardware temperature reporter for Windows
//!
//! Reads CPU, GPU and NVMe temperatures from a hardware-monitoring provider,
//! picks one representative sensor per device class and reports the result as
//! text, JSON, a threshold check or Prometheus metrics.

pub mod hwmon;
#[cfg(windows)]
pub mod lhm;
pub mod select;
pub mod snapshot;
pub mod config;
pub mod output;
pub mod app;
pub mod logger;

#[cfg(test)]
pub mod test_utils;
