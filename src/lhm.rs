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

//! LibreHardwareMonitor provider.
//!
//! A running LibreHardwareMonitor publishes its hardware tree and sensor
//! values in the `root\LibreHardwareMonitor` WMI namespace and keeps them
//! fresh on its own timer.

use serde::Deserialize;
use tracing::debug;
use wmi::{COMLibrary, WMIConnection};

use crate::hwmon::{Hardware, HardwareProvider, HardwareType, HwmonError, Result, Sensor, SensorType};

pub const LHM_NAMESPACE: &str = "root\\LibreHardwareMonitor";

#[derive(Deserialize, Debug)]
#[serde(rename = "Hardware")]
#[serde(rename_all = "PascalCase")]
struct WmiHardware {
    identifier: String,
    name: String,
    hardware_type: String,
    #[serde(default)]
    parent: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Sensor")]
#[serde(rename_all = "PascalCase")]
struct WmiSensor {
    name: String,
    sensor_type: String,
    #[serde(default)]
    value: Option<f32>,
}

fn wmi_err(e: wmi::WMIError) -> HwmonError {
    HwmonError::Provider(e.to_string())
}

/// Quote a string literal for a WQL `WHERE` clause.
fn wql_quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Widen a WMI `real32` to the `f64` with the same shortest decimal form, so
/// 45.3f32 becomes 45.3 rather than 45.29999923706055.
fn widen(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(f64::from(v))
}

/// Assemble the flat WMI hardware list into top-level devices with their
/// sub-devices attached. Entries whose parent is unknown are kept at the top.
fn build_tree(rows: Vec<WmiHardware>) -> Vec<Hardware> {
    fn attach(parent: &mut Hardware, rows: &[WmiHardware]) {
        let parent_id = parent.identifier.clone();
        for row in rows.iter().filter(|r| r.parent.as_deref() == Some(parent_id.as_str())) {
            let mut child = Hardware::new(HardwareType::from_lhm(&row.hardware_type), &row.name, &row.identifier);
            attach(&mut child, rows);
            parent.sub_hardware.push(child);
        }
    }

    let known: Vec<&str> = rows.iter().map(|r| r.identifier.as_str()).collect();
    let mut top = Vec::new();
    for row in &rows {
        let is_top = match row.parent.as_deref() {
            None | Some("") => true,
            Some(p) => !known.contains(&p),
        };
        if is_top {
            let mut hw = Hardware::new(HardwareType::from_lhm(&row.hardware_type), &row.name, &row.identifier);
            attach(&mut hw, &rows);
            top.push(hw);
        }
    }
    top
}

#[derive(Default)]
pub struct LhmProvider {
    conn: Option<WMIConnection>,
}

impl LhmProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn conn(&self) -> Result<&WMIConnection> {
        self.conn.as_ref().ok_or(HwmonError::NotOpen)
    }
}

impl HardwareProvider for LhmProvider {
    fn open(&mut self) -> Result<()> {
        let com = COMLibrary::new().map_err(wmi_err)?;
        let conn = WMIConnection::with_namespace_path(LHM_NAMESPACE, com).map_err(wmi_err)?;
        debug!("connected to {}", LHM_NAMESPACE);
        self.conn = Some(conn);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.conn = None;
        Ok(())
    }

    fn hardware(&self) -> Result<Vec<Hardware>> {
        let rows: Vec<WmiHardware> = self
            .conn()?
            .raw_query("SELECT Identifier, Name, HardwareType, Parent FROM Hardware")
            .map_err(wmi_err)?;
        debug!("LibreHardwareMonitor reports {} hardware entries", rows.len());
        Ok(build_tree(rows))
    }

    fn refresh(&mut self, _hardware: &Hardware) -> Result<()> {
        // LibreHardwareMonitor updates its own sensor cache.
        self.conn().map(|_| ())
    }

    fn sensors(&self, hardware: &Hardware) -> Result<Vec<Sensor>> {
        let query = format!(
            "SELECT Name, SensorType, Value FROM Sensor WHERE Parent = {}",
            wql_quote(&hardware.identifier)
        );
        let rows: Vec<WmiSensor> = self.conn()?.raw_query(query).map_err(|e| {
            debug!("sensor query for {} failed: {}", hardware.identifier, e);
            HwmonError::DeviceUnavailable(hardware.identifier.clone())
        })?;
        Ok(rows
            .into_iter()
            .map(|s| Sensor {
                kind: SensorType::from_lhm(&s.sensor_type),
                value: s.value.map(widen),
                name: s.name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str, kind: &str, parent: Option<&str>) -> WmiHardware {
        WmiHardware {
            identifier: id.to_string(),
            name: name.to_string(),
            hardware_type: kind.to_string(),
            parent: parent.map(|p| p.to_string()),
        }
    }

    #[test]
    fn test_wql_quote() {
        assert_eq!(wql_quote("/nvme/0"), "'/nvme/0'");
        assert_eq!(wql_quote("it's"), "'it\\'s'");
        assert_eq!(wql_quote("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_widen_keeps_decimal_form() {
        assert_eq!(widen(45.3), 45.3);
        assert_eq!(widen(70.5), 70.5);
    }

    #[test]
    fn test_build_tree() {
        let rows = vec![
            row("/motherboard", "PRIME X570", "Motherboard", Some("")),
            row("/lpc/nct6798d/0", "Nuvoton NCT6798D", "SuperIO", Some("/motherboard")),
            row("/amdcpu/0", "AMD Ryzen 9 5950X", "Cpu", None),
            row("/nvme/1", "Samsung SSD 980", "Storage", Some("/missing")),
        ];
        let tree = build_tree(rows);
        let ids: Vec<&str> = tree.iter().map(|h| h.identifier.as_str()).collect();
        assert_eq!(ids, vec!["/motherboard", "/amdcpu/0", "/nvme/1"]);
        assert_eq!(tree[0].sub_hardware.len(), 1);
        assert_eq!(tree[0].sub_hardware[0].kind, HardwareType::Controller);
        assert_eq!(tree[1].kind, HardwareType::Cpu);
        assert_eq!(tree[2].kind, HardwareType::Storage);
    }

    #[test]
    fn test_closed_provider_refuses_queries() {
        let provider = LhmProvider::new();
        assert!(matches!(provider.hardware(), Err(HwmonError::NotOpen)));
        let nvme = Hardware::new(HardwareType::Storage, "Samsung SSD 980", "/nvme/1");
        assert!(matches!(provider.sensors(&nvme), Err(HwmonError::NotOpen)));
    }
}
