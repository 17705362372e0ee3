/*
 * Test utilities and fake providers for pin-hwmon-win
 *
 * Builders for hardware and sensors plus an in-memory provider that can be
 * told to fail on individual devices.
 */

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::hwmon::{Hardware, HardwareProvider, HardwareType, HwmonError, Result, Sensor, SensorType};

pub fn cpu(name: &str, id: &str) -> Hardware {
    Hardware::new(HardwareType::Cpu, name, id)
}

/// GPU device; the vendor is taken from the identifier the way
/// LibreHardwareMonitor names them (`/gpu-amd/0`, `/gpu-intel/0`, ...).
pub fn gpu(name: &str, id: &str) -> Hardware {
    let kind = if id.contains("amd") {
        HardwareType::GpuAmd
    } else if id.contains("intel") {
        HardwareType::GpuIntel
    } else {
        HardwareType::GpuNvidia
    };
    Hardware::new(kind, name, id)
}

pub fn storage(name: &str, id: &str) -> Hardware {
    Hardware::new(HardwareType::Storage, name, id)
}

pub fn temp(name: &str, celsius: f64) -> Sensor {
    Sensor { name: name.to_string(), kind: SensorType::Temperature, value: Some(celsius) }
}

pub fn temp_none(name: &str) -> Sensor {
    Sensor { name: name.to_string(), kind: SensorType::Temperature, value: None }
}

pub fn load(name: &str, percent: f64) -> Sensor {
    Sensor { name: name.to_string(), kind: SensorType::Other, value: Some(percent) }
}

/// In-memory provider recording every call it receives.
#[derive(Debug, Default)]
pub struct FakeProvider {
    devices: Vec<Hardware>,
    sensors: HashMap<String, Vec<Sensor>>,
    failing_sensors: HashSet<String>,
    failing_refresh: HashSet<String>,
    fail_close: bool,
    pub open_calls: usize,
    pub close_calls: usize,
    refreshed: Vec<String>,
    read: RefCell<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, hw: Hardware, sensors: Vec<Sensor>) -> Self {
        self.sensors.insert(hw.identifier.clone(), sensors);
        self.devices.push(hw);
        self
    }

    pub fn failing_sensors(mut self, id: &str) -> Self {
        self.failing_sensors.insert(id.to_string());
        self
    }

    pub fn failing_refresh(mut self, id: &str) -> Self {
        self.failing_refresh.insert(id.to_string());
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn refreshed(&self) -> Vec<String> {
        self.refreshed.clone()
    }

    pub fn read(&self) -> Vec<String> {
        self.read.borrow().clone()
    }
}

impl HardwareProvider for FakeProvider {
    fn open(&mut self) -> Result<()> {
        self.open_calls += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        if self.fail_close {
            return Err(HwmonError::Provider("close failed".into()));
        }
        Ok(())
    }

    fn hardware(&self) -> Result<Vec<Hardware>> {
        Ok(self.devices.clone())
    }

    fn refresh(&mut self, hardware: &Hardware) -> Result<()> {
        self.refreshed.push(hardware.identifier.clone());
        if self.failing_refresh.contains(&hardware.identifier) {
            return Err(HwmonError::DeviceUnavailable(hardware.identifier.clone()));
        }
        Ok(())
    }

    fn sensors(&self, hardware: &Hardware) -> Result<Vec<Sensor>> {
        self.read.borrow_mut().push(hardware.identifier.clone());
        if self.failing_sensors.contains(&hardware.identifier) {
            return Err(HwmonError::DeviceUnavailable(hardware.identifier.clone()));
        }
        Ok(self.sensors.get(&hardware.identifier).cloned().unwrap_or_default())
    }
}
