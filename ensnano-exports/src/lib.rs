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
//! Exports of sequenced designs to text reports and spreadsheets

use ensnano_sequence::{NetworkKind, SequencedComponent};
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};

mod report;
mod xlsx;
pub use report::write_report;
pub use xlsx::export_staples_xlsx;


/// The ways a list of strands can be rendered in a text report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ReportView {
    /// One block per strand, with one line per base
    Detailed,
    /// One line per strand, with its start, end, sequence and length
    Summary,
}

impl Default for ReportView {
    fn default() -> Self {
        Self::Summary
    }
}

/// A value returned by the export functions when exports was successfull.
///
/// This means that both the formatting and the write to the output file were successful.
pub enum ExportSuccess {
    Report { network: NetworkKind, path: PathBuf },
    Xlsx(PathBuf),
}

const SUCCESSFUL_EXPORT_MSG_PREFIX: &str = "Succussfully exported to";

impl ExportSuccess {
    /// A message telling that the export operation was successfull and giving the path to which
    /// the export was made
    pub fn message(&self) -> String {
        match self {
            Self::Report { network, path } => format!(
                "{SUCCESSFUL_EXPORT_MSG_PREFIX}\n{} ({}s)",
                path.to_string_lossy(),
                network
            ),
            Self::Xlsx(p) => format!("{SUCCESSFUL_EXPORT_MSG_PREFIX}\n{}", p.to_string_lossy()),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Report { path, .. } => path,
            Self::Xlsx(p) => p,
        }
    }

    /// The same export, after its file was moved to `path`.
    pub fn moved_to(self, path: PathBuf) -> Self {
        match self {
            Self::Report { network, .. } => Self::Report { network, path },
            Self::Xlsx(_) => Self::Xlsx(path),
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    IOError(std::io::Error),
    /// The spreadsheet writer only accepts utf-8 paths
    InvalidPath(PathBuf),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IOError(e) => write!(f, "Could not write export: {}", e),
            Self::InvalidPath(p) => write!(f, "Invalid export path {}", p.to_string_lossy()),
        }
    }
}

pub type ExportResult = Result<ExportSuccess, ExportError>;

/// The name of the report file of `network` in the output directory
pub fn default_file_name(network: NetworkKind) -> &'static str {
    match network {
        NetworkKind::Scaffold => "scaffolds.txt",
        NetworkKind::Staple => "staples.txt",
    }
}

/// Write the report of the strands of `network` to `path`, replacing any existing file.
pub fn export_network<P: AsRef<Path>>(
    components: &[SequencedComponent],
    network: NetworkKind,
    view: ReportView,
    path: P,
) -> ExportResult {
    let path = path.as_ref().to_path_buf();
    log::info!("Outputting data to {}...", path.to_string_lossy());
    let file = std::fs::File::create(&path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_report(components, network, view, &mut writer)?;
    std::io::Write::flush(&mut writer)?;
    Ok(ExportSuccess::Report { network, path })
}
