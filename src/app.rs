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

use std::io::Write;

use anyhow::Context;
use tracing::{debug, info};

use crate::config::{Command, Invocation};
use crate::hwmon::{self, HardwareProvider};
use crate::output;
use crate::select::collect_snapshot;

/// Run one invocation against `provider`, writing the report to `out`.
/// Returns the process exit code.
///
/// Unknown commands print usage without opening the provider. Otherwise the
/// provider stays open only while sensors are selected and the report is
/// written, and is closed on every path out.
pub fn run<P, W>(invocation: &Invocation, provider: &mut P, out: &mut W) -> anyhow::Result<i32>
where
    P: HardwareProvider + ?Sized,
    W: Write,
{
    if let Command::Unknown(cmd) = &invocation.command {
        debug!("unknown command {:?}", cmd);
        return output::write_usage(out).context("failed to write usage");
    }

    info!("running {:?}", invocation.command);
    let code = hwmon::with_session(provider, |p| {
        let snapshot = collect_snapshot(p);
        output::render(&invocation.command, &snapshot, &invocation.thresholds, out)
    })
    .context("failed to open hardware monitor")?
    .context("failed to write output")?;
    out.flush().context("failed to write output")?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hwmon::{HwmonError, MockHardwareProvider};
    use crate::test_utils::{cpu, gpu, storage, temp, FakeProvider};
    use std::io;

    fn run_with(args: &[&str], provider: &mut FakeProvider) -> (String, i32) {
        let inv = Invocation::from_args(args);
        let mut buf = Vec::new();
        let code = run(&inv, provider, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), code)
    }

    fn workstation() -> FakeProvider {
        FakeProvider::new()
            .with_device(cpu("Intel Core i9-13900K", "/intelcpu/0"), vec![
                temp("CPU Core #1", 80.0),
                temp("CPU Package", 85.0),
            ])
            .with_device(gpu("NVIDIA GeForce RTX 4080", "/gpu-nvidia/0"), vec![
                temp("GPU Core", 62.0),
                temp("GPU Hot Spot", 70.5),
            ])
            .with_device(storage("WD_BLACK SN850X", "/nvme/0"), vec![temp("Composite Temperature", 44.0)])
    }

    #[test]
    fn test_read_opens_and_closes_provider() {
        let mut provider = workstation();
        let (out, code) = run_with(&[], &mut provider);
        assert_eq!(code, 0);
        assert_eq!(out, "CPU: 85.0°C  GPU: 70.5°C\nWD_BLACK SN850X: 44.0°C\n");
        assert_eq!(provider.open_calls, 1);
        assert_eq!(provider.close_calls, 1);
    }

    #[test]
    fn test_check_uses_thresholds_from_args() {
        let mut provider = workstation();
        let (out, code) = run_with(&["check", "--cpu-max=85"], &mut provider);
        assert_eq!((out.as_str(), code), ("HOT\n", 2));

        let mut provider = workstation();
        let (out, code) = run_with(&["check", "--cpu-max=86", "--gpu-max=71"], &mut provider);
        assert_eq!((out.as_str(), code), ("OK\n", 0));
    }

    #[test]
    fn test_unknown_command_never_touches_provider() {
        let mut provider = workstation();
        let (out, code) = run_with(&["status"], &mut provider);
        assert_eq!(code, 2);
        assert_eq!(out, format!("{}\n", output::USAGE));
        assert_eq!(provider.open_calls, 0);
        assert_eq!(provider.close_calls, 0);
    }

    #[test]
    fn test_close_failure_does_not_change_exit_code() {
        let mut provider = workstation().failing_close();
        let (out, code) = run_with(&["metrics"], &mut provider);
        assert_eq!(code, 0);
        assert_eq!(out.lines().count(), 3);
        assert_eq!(provider.close_calls, 1);
    }

    #[test]
    fn test_open_failure_is_an_error() {
        let mut mock = MockHardwareProvider::new();
        mock.expect_open().times(1).returning(|| Err(HwmonError::Unsupported));
        mock.expect_close().never();

        let inv = Invocation::from_args(&["json"]);
        let mut buf = Vec::new();
        let err = run(&inv, &mut mock, &mut buf).unwrap_err();
        assert!(format!("{:#}", err).contains("not supported"));
        assert!(buf.is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_still_closes_provider() {
        let mut provider = workstation();
        let inv = Invocation::from_args(&["read"]);
        let res = run(&inv, &mut provider, &mut BrokenPipe);
        assert!(res.is_err());
        assert_eq!(provider.close_calls, 1);
    }
}
