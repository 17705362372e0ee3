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

use std::io::stdout;

use pin_hwmon_win::app;
use pin_hwmon_win::config::Invocation;
use pin_hwmon_win::hwmon;
use pin_hwmon_win::logger;

fn main() {
    // Gather args once
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = Invocation::from_args(args.as_slice());

    logger::init_logging(invocation.logging);

    let mut provider = hwmon::default_provider();
    let code = match app::run(&invocation, provider.as_mut(), &mut stdout().lock()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            1
        }
    };
    std::process::exit(code);
}
