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

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const VERBOSE_LOG_LEVEL: &str = "debug";

pub fn log_level(verbose: bool) -> &'static str {
    if verbose { VERBOSE_LOG_LEVEL } else { DEFAULT_LOG_LEVEL }
}

/// Install the diagnostic subscriber. Diagnostics always go to stderr so the
/// report on stdout stays machine-readable.
pub fn init_logging(verbose: bool) {
    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(EnvFilter::new(log_level(verbose)))
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false), "warn");
        assert_eq!(log_level(true), "debug");
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
        tracing::debug!("still alive");
    }
}
