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
//! Command line interface of the sequencer

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use ensnano_exports::ReportView;
use std::path::PathBuf;
use std::str::FromStr;

use super::app::RunError;

pub fn build_cli() -> Command {
    Command::new("ensnano-seq")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("Assign sequences to the scaffold and staples of a cadnano design")
        .arg(
            Arg::new("lattice")
                .help("Cadnano (v2) design file")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("sequence")
                .help("Text file containing the scaffold sequence")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("output_dir")
                .help("Directory in which scaffolds.txt and staples.txt are written")
                .short('o')
                .long("output-dir")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("view")
                .help("Layout of the reports")
                .long("view")
                .value_parser(
                    PossibleValuesParser::new(["summary", "detailed"])
                        .map(|s| ReportView::from_str(&s).unwrap_or_default()),
                )
                .default_value("summary"),
        )
        .arg(
            Arg::new("config")
                .help("JSON file overriding the default parameters")
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("seed")
                .help("Seed of the filler sequences given to secondary scaffolds")
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("xlsx")
                .help("Also write the staples to staples.xlsx")
                .long("xlsx")
                .action(ArgAction::SetTrue),
        )
}

/// The settings of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub lattice: PathBuf,
    pub sequence: PathBuf,
    pub output_dir: PathBuf,
    pub view: ReportView,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub xlsx: bool,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, RunError> {
        let path = |id: &'static str| {
            matches
                .get_one::<PathBuf>(id)
                .cloned()
                .ok_or(RunError::MissingArgument(id))
        };
        Ok(Self {
            lattice: path("lattice")?,
            sequence: path("sequence")?,
            output_dir: path("output_dir")?,
            view: matches
                .get_one::<ReportView>("view")
                .copied()
                .unwrap_or_default(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            seed: matches.get_one::<u64>("seed").copied(),
            xlsx: matches.get_flag("xlsx"),
        })
    }
}
