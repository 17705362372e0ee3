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

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceClass {
    Cpu,
    Gpu,
    Nvme(String),
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Cpu => write!(f, "cpu"),
            DeviceClass::Gpu => write!(f, "gpu"),
            DeviceClass::Nvme(name) => write!(f, "nvme:{}", name),
        }
    }
}

/// The representative temperature picked for one device class.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub class: DeviceClass,
    pub celsius: Option<f64>,
    /// Sensor the value came from. Only used for diagnostics.
    pub sensor: Option<String>,
}

impl Reading {
    pub fn new(class: DeviceClass, celsius: Option<f64>, sensor: Option<String>) -> Self {
        Self { class, celsius, sensor }
    }
}

/// Everything one invocation measured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermalSnapshot {
    cpu: Option<Reading>,
    gpu: Option<Reading>,
    nvme: IndexMap<String, Reading>,
}

impl ThermalSnapshot {
    pub fn new(cpu: Option<Reading>, gpu: Option<Reading>, nvme: IndexMap<String, Reading>) -> Self {
        Self { cpu, gpu, nvme }
    }

    pub fn cpu(&self) -> Option<&Reading> {
        self.cpu.as_ref()
    }

    pub fn gpu(&self) -> Option<&Reading> {
        self.gpu.as_ref()
    }

    pub fn cpu_celsius(&self) -> Option<f64> {
        self.cpu.as_ref().and_then(|r| r.celsius)
    }

    pub fn gpu_celsius(&self) -> Option<f64> {
        self.gpu.as_ref().and_then(|r| r.celsius)
    }

    /// NVMe devices in discovery order with their temperatures.
    pub fn nvme(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.nvme.iter().map(|(name, r)| (name.as_str(), r.celsius))
    }

    pub fn nvme_reading(&self, name: &str) -> Option<&Reading> {
        self.nvme.get(name)
    }

    pub fn nvme_len(&self) -> usize {
        self.nvme.len()
    }

    /// Serializable shape of the snapshot: absent top-level values are left out,
    /// NVMe entries always keep their key.
    pub fn to_json_view(&self) -> JsonView<'_> {
        JsonView {
            cpu: self.cpu_celsius(),
            gpu: self.gpu_celsius(),
            nvme: self.nvme().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<f64>,
    pub nvme: IndexMap<&'a str, Option<f64>>,
}
