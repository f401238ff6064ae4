/*
ENSnano, a 3d graphical application for DNA nanostructures.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use std::time::Instant;

mod app;
mod cli;


fn init_logger() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| String::from("info"));
    let _ = pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .try_init();
}

fn main() {
    init_logger();
    let matches = cli::build_cli().get_matches();
    let now = Instant::now();

    let result = cli::Options::from_matches(&matches).and_then(|options| app::run(&options));
    match result {
        Ok(successes) => {
            for success in successes.iter() {
                log::info!("{}", success.message());
            }
            log::info!("Done in {:.2?}", now.elapsed());
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
