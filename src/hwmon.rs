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

//! Hardware-monitoring provider boundary.
//!
//! The actual sensor acquisition lives behind [`HardwareProvider`]. A provider
//! enumerates devices, refreshes their cached values on request and hands out
//! the sensors of one device at a time.

use thiserror::Error;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Hardware classification as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareType {
    Cpu,
    GpuAmd,
    GpuNvidia,
    GpuIntel,
    Storage,
    Motherboard,
    Controller,
    Other,
}

impl HardwareType {
    /// Map a LibreHardwareMonitor hardware type name onto a classification.
    /// Older OpenHardwareMonitor names (`GpuAti`, `HDD`) are accepted too.
    pub fn from_lhm(name: &str) -> Self {
        match name {
            "Cpu" | "CPU" => HardwareType::Cpu,
            "GpuAmd" | "GpuAti" => HardwareType::GpuAmd,
            "GpuNvidia" => HardwareType::GpuNvidia,
            "GpuIntel" => HardwareType::GpuIntel,
            "Storage" | "HDD" => HardwareType::Storage,
            "Motherboard" | "Mainboard" => HardwareType::Motherboard,
            "SuperIO" | "EmbeddedController" | "Cooler" | "Psu" => HardwareType::Controller,
            _ => HardwareType::Other,
        }
    }

    pub fn is_gpu(self) -> bool {
        matches!(self, HardwareType::GpuAmd | HardwareType::GpuNvidia | HardwareType::GpuIntel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorType {
    Temperature,
    Other,
}

impl SensorType {
    pub fn from_lhm(name: &str) -> Self {
        if name == "Temperature" {
            SensorType::Temperature
        } else {
            SensorType::Other
        }
    }
}

/// One enumerated hardware device and its sub-devices.
#[derive(Debug, Clone, PartialEq)]
pub struct Hardware {
    pub kind: HardwareType,
    pub name: String,
    pub identifier: String,
    pub sub_hardware: Vec<Hardware>,
}

impl Hardware {
    pub fn new(kind: HardwareType, name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            identifier: identifier.into(),
            sub_hardware: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub name: String,
    pub kind: SensorType,
    pub value: Option<f64>, // Celsius for temperature sensors
}

impl Sensor {
    pub fn is_temperature(&self) -> bool {
        self.kind == SensorType::Temperature
    }

    /// The reported value, or `None` when it is missing or not a finite number.
    pub fn celsius(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

#[derive(Error, Debug)]
pub enum HwmonError {
    #[error("hardware monitor is not open")]
    NotOpen,
    #[error("hardware monitoring is not supported on this platform")]
    Unsupported,
    #[error("device {0} is unavailable")]
    DeviceUnavailable(String),
    #[error("provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, HwmonError>;

/// Source of raw hardware sensor readings.
#[cfg_attr(test, automock)]
pub trait HardwareProvider {
    /// Acquire whatever handles the provider needs.
    fn open(&mut self) -> Result<()>;

    /// Release the handles acquired by [`HardwareProvider::open`].
    fn close(&mut self) -> Result<()>;

    /// Top-level devices, each with its sub-devices attached.
    fn hardware(&self) -> Result<Vec<Hardware>>;

    /// Ask the provider to refresh the cached sensor values of one device.
    fn refresh(&mut self, hardware: &Hardware) -> Result<()>;

    /// Sensors of one device with their most recently refreshed values.
    fn sensors(&self, hardware: &Hardware) -> Result<Vec<Sensor>>;
}

/// Close a provider and swallow any error. Cleanup failures never reach the
/// caller and never affect the exit code.
pub fn close_quietly<P: HardwareProvider + ?Sized>(provider: &mut P) {
    if let Err(e) = provider.close() {
        debug!("ignoring provider close error: {}", e);
    }
}

/// Open `provider`, run `f` against it and close it again on every exit path,
/// unwinding included.
pub fn with_session<P, F, T>(provider: &mut P, f: F) -> Result<T>
where
    P: HardwareProvider + ?Sized,
    F: FnOnce(&mut P) -> T,
{
    provider.open()?;
    let mut guard = scopeguard::guard(provider, |p| close_quietly(p));
    Ok(f(&mut **guard))
}

/// Placeholder provider for platforms without a hardware monitor backend.
#[derive(Debug, Default)]
pub struct UnsupportedProvider;

impl HardwareProvider for UnsupportedProvider {
    fn open(&mut self) -> Result<()> {
        Err(HwmonError::Unsupported)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn hardware(&self) -> Result<Vec<Hardware>> {
        Err(HwmonError::Unsupported)
    }

    fn refresh(&mut self, _hardware: &Hardware) -> Result<()> {
        Err(HwmonError::Unsupported)
    }

    fn sensors(&self, _hardware: &Hardware) -> Result<Vec<Sensor>> {
        Err(HwmonError::Unsupported)
    }
}

/// The provider used by the binary on this platform.
#[cfg(windows)]
pub fn default_provider() -> Box<dyn HardwareProvider> {
    Box::new(crate::lhm::LhmProvider::new())
}

#[cfg(not(windows))]
pub fn default_provider() -> Box<dyn HardwareProvider> {
    Box::new(UnsupportedProvider)
}
