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
//! A run of the sequencer: read the inputs, sequence the design, write the reports.
//!
//! Nothing is written until both networks are sequenced. The reports are then written to
//! temporary files that are moved in place once every report was written, so a failing run does
//! not leave a partial set of reports.

use ensnano_exports::{
    default_file_name, export_network, export_staples_xlsx, ExportError, ExportResult,
    ExportSuccess,
};
use ensnano_sequence::{
    read_scaffold_sequence, DesignError, GcFiller, Lattice, LatticeError, NetworkKind,
    Parameters, SequenceFileError, SequencedDesign,
};
use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::cli::Options;

const XLSX_FILE_NAME: &str = "staples.xlsx";

#[derive(Debug)]
pub enum RunError {
    MissingArgument(&'static str),
    ConfigIO(std::io::Error),
    ConfigParse(serde_json::Error),
    Lattice(LatticeError),
    Sequence(SequenceFileError),
    Design(DesignError),
    OutputDirectory(std::io::Error),
    OutputFile(std::io::Error),
    Export(ExportError),
}

impl From<LatticeError> for RunError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

impl From<SequenceFileError> for RunError {
    fn from(e: SequenceFileError) -> Self {
        Self::Sequence(e)
    }
}

impl From<DesignError> for RunError {
    fn from(e: DesignError) -> Self {
        Self::Design(e)
    }
}

impl From<ExportError> for RunError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(arg) => write!(f, "Missing argument {}", arg),
            Self::ConfigIO(e) => write!(f, "Could not read parameters file: {}", e),
            Self::ConfigParse(e) => write!(f, "Could not parse parameters file: {}", e),
            Self::Lattice(e) => write!(f, "{}", e),
            Self::Sequence(e) => write!(f, "{}", e),
            Self::Design(e) => write!(f, "{}", e),
            Self::OutputDirectory(e) => write!(f, "Could not create output directory: {}", e),
            Self::OutputFile(e) => write!(f, "Could not write output file: {}", e),
            Self::Export(e) => write!(f, "{}", e),
        }
    }
}

pub fn load_parameters(config: Option<&Path>, seed: Option<u64>) -> Result<Parameters, RunError> {
    let mut parameters = if let Some(path) = config {
        let content = std::fs::read_to_string(path).map_err(RunError::ConfigIO)?;
        serde_json::from_str(&content).map_err(RunError::ConfigParse)?
    } else {
        Parameters::DEFAULT
    };
    if let Some(seed) = seed {
        parameters.filler.seed = seed;
    }
    Ok(parameters)
}

/// Sequence the design described by `options` and write the reports.
pub fn run(options: &Options) -> Result<Vec<ExportSuccess>, RunError> {
    let parameters = load_parameters(options.config.as_deref(), options.seed)?;
    log::debug!("Parameters:\n{}", parameters.formated_string());

    let lattice = Lattice::from_cadnano_file(&options.lattice)?;
    let raw_scaffold = read_scaffold_sequence(&options.sequence)?;
    log::info!("Read scaffold sequence of length {}", raw_scaffold.len());

    let mut filler = GcFiller::new(&parameters.filler);
    let design = SequencedDesign::new(&lattice, &raw_scaffold, &mut filler, &parameters)?;
    for warning in design.warnings.iter() {
        log::warn!("{}", warning);
    }
    let flagged = design.flagged_staples();
    if !flagged.is_empty() {
        log::warn!("{} of {} staples were flagged", flagged.len(), design.staples.len());
    }
    if let Some(primary) = design.primary() {
        if primary.len() < raw_scaffold.len() {
            log::info!(
                "Scaffold sequence given is longer than longest scaffold, {} bases unused",
                raw_scaffold.len() - primary.len()
            );
        }
    }

    let created_output_dir = !options.output_dir.exists();
    std::fs::create_dir_all(&options.output_dir).map_err(RunError::OutputDirectory)?;
    let result = write_exports(&design, options);
    if result.is_err() && created_output_dir {
        // Only removes the directory if nothing was left in it
        let _ = std::fs::remove_dir(&options.output_dir);
    }
    result
}

/// An export written to a temporary file of the output directory
struct StagedExport {
    file: NamedTempFile,
    target: PathBuf,
    success: ExportSuccess,
}

fn stage<F>(output_dir: &Path, target: PathBuf, export: F) -> Result<StagedExport, RunError>
where
    F: FnOnce(&Path) -> ExportResult,
{
    let file = tempfile::Builder::new()
        .prefix(".ensnano-seq")
        .tempfile_in(output_dir)
        .map_err(RunError::OutputFile)?;
    let success = export(file.path())?;
    Ok(StagedExport {
        file,
        target,
        success,
    })
}

fn write_exports(
    design: &SequencedDesign,
    options: &Options,
) -> Result<Vec<ExportSuccess>, RunError> {
    let output_dir = options.output_dir.as_path();
    let mut staged = Vec::new();
    for network in [NetworkKind::Scaffold, NetworkKind::Staple] {
        let target = output_dir.join(default_file_name(network));
        staged.push(stage(output_dir, target, |path| {
            export_network(design.components(network), network, options.view, path)
        })?);
    }
    if options.xlsx {
        let target = output_dir.join(XLSX_FILE_NAME);
        staged.push(stage(output_dir, target, |path| {
            export_staples_xlsx(&design.staples, path)
        })?);
    }
    commit(staged)
}

/// Move the staged exports to their final location. If one of them cannot be moved, the ones
/// that were already moved are removed.
fn commit(staged: Vec<StagedExport>) -> Result<Vec<ExportSuccess>, RunError> {
    let mut ret: Vec<ExportSuccess> = Vec::with_capacity(staged.len());
    for export in staged {
        if let Err(e) = export.file.persist(&export.target) {
            log::error!("Could not write {}", export.target.to_string_lossy());
            for success in ret.iter() {
                if let Err(e) = std::fs::remove_file(success.path()) {
                    log::error!(
                        "Could not remove {}: {}",
                        success.path().to_string_lossy(),
                        e
                    );
                }
            }
            return Err(RunError::OutputFile(e.error));
        }
        ret.push(export.success.moved_to(export.target));
    }
    Ok(ret)
}
