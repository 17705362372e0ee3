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

//! Sensor selection.
//!
//! Reduces everything the provider reports to one reading per device class.
//! Each class has a list of preferred sensor names: the first temperature
//! sensor whose name contains one of them wins outright and ends the scan of
//! that device, otherwise the first temperature value seen is kept.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::hwmon::{Hardware, HardwareProvider, HardwareType, Sensor};
use crate::snapshot::{DeviceClass, Reading, ThermalSnapshot};

pub const CPU_PREFERRED: &[&str] = &["Package", "Tctl"];
pub const GPU_PREFERRED: &[&str] = &["Junction", "Hot Spot"];
pub const NVME_PREFERRED: &[&str] = &["Composite"];

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Scan the temperature sensors of one device, continuing from `current`.
///
/// A preferred sensor replaces whatever was picked before, even when it
/// reports no value. A non-preferred sensor only fills a pick that has no
/// value yet. NaN and infinite values count as no value.
pub fn pick_sensor(
    class: DeviceClass,
    sensors: &[Sensor],
    preferred: &[&str],
    current: Option<Reading>,
) -> Option<Reading> {
    let mut pick = current;
    for s in sensors.iter().filter(|s| s.is_temperature()) {
        if preferred.iter().any(|p| contains_ignore_case(&s.name, p)) {
            return Some(Reading::new(class, s.celsius(), Some(s.name.clone())));
        }
        if pick.as_ref().and_then(|r| r.celsius).is_none() {
            pick = Some(Reading::new(class.clone(), s.celsius(), Some(s.name.clone())));
        }
    }
    pick
}

/// A storage device counts as NVMe when its name says so or its identifier
/// lives under the `/nvme/` path.
pub fn is_nvme(hardware: &Hardware) -> bool {
    hardware.kind == HardwareType::Storage
        && (contains_ignore_case(&hardware.name, "NVMe") || hardware.identifier.contains("/nvme/"))
}

/// Refresh pass: ask the provider to refresh every device depth-first,
/// sub-devices included. Returns one flag per top-level device, parallel to
/// `devices`, set when the refresh failed anywhere in that device's tree.
pub fn refresh_all<P: HardwareProvider + ?Sized>(
    provider: &mut P,
    devices: &[Hardware],
) -> Vec<bool> {
    devices
        .iter()
        .map(|hw| match refresh_tree(provider, hw) {
            Ok(()) => false,
            Err(e) => {
                debug!("refresh failed for {} ({}): {}", hw.name, hw.identifier, e);
                true
            }
        })
        .collect()
}

fn refresh_tree<P: HardwareProvider + ?Sized>(
    provider: &mut P,
    hw: &Hardware,
) -> crate::hwmon::Result<()> {
    provider.refresh(hw)?;
    for sub in &hw.sub_hardware {
        refresh_tree(provider, sub)?;
    }
    Ok(())
}

/// Accumulates the per-class picks while devices are read one at a time.
#[derive(Debug, Default)]
struct Selection {
    cpu: Option<Reading>,
    gpu: Option<Reading>,
    nvme: IndexMap<String, Reading>,
}

impl Selection {
    fn visit(&mut self, hw: &Hardware, sensors: &[Sensor]) {
        match hw.kind {
            HardwareType::Cpu => {
                self.cpu = pick_sensor(DeviceClass::Cpu, sensors, CPU_PREFERRED, self.cpu.take());
            }
            kind if kind.is_gpu() => {
                self.gpu = pick_sensor(DeviceClass::Gpu, sensors, GPU_PREFERRED, self.gpu.take());
            }
            HardwareType::Storage if is_nvme(hw) => {
                let class = DeviceClass::Nvme(hw.name.clone());
                let reading = pick_sensor(class.clone(), sensors, NVME_PREFERRED, None)
                    .unwrap_or_else(|| Reading::new(class, None, None));
                // Same display name twice: the later device wins, position stays.
                self.nvme.insert(hw.name.clone(), reading);
            }
            _ => {}
        }
    }

    fn finish(self) -> ThermalSnapshot {
        ThermalSnapshot::new(self.cpu, self.gpu, self.nvme)
    }
}

/// Refresh every device, then read the sensors of each top-level device and
/// reduce them to a snapshot. Devices that fail to refresh or read are skipped.
pub fn collect_snapshot<P: HardwareProvider + ?Sized>(provider: &mut P) -> ThermalSnapshot {
    let devices = match provider.hardware() {
        Ok(d) => d,
        Err(e) => {
            warn!("failed to enumerate hardware: {}", e);
            return ThermalSnapshot::default();
        }
    };

    let failed = refresh_all(provider, &devices);

    let mut selection = Selection::default();
    for (hw, refresh_failed) in devices.iter().zip(failed) {
        if refresh_failed {
            continue;
        }
        match provider.sensors(hw) {
            Ok(sensors) => selection.visit(hw, &sensors),
            Err(e) => debug!("skipping {} ({}): {}", hw.name, hw.identifier, e),
        }
    }

    let snapshot = selection.finish();
    debug!(
        "selected cpu={:?} gpu={:?} nvme_devices={}",
        snapshot.cpu().and_then(|r| r.sensor.as_deref()),
        snapshot.gpu().and_then(|r| r.sensor.as_deref()),
        snapshot.nvme_len()
    );
    snapshot
}
