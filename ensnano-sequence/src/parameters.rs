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
//! Tunable parameters of the sequencer.

use std::fmt;

/// What to do with a scaffold component whose start and end are not adjacent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Circularity {
    Ignore,
    /// Log a warning and go on
    Warn,
    /// Abort the run
    Error,
}

impl fmt::Display for Circularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Bounds used by the post-sequencing staple checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationParameters {
    /// Staples shorter than this are reported.
    pub min_staple_length: usize,
    /// Staples longer than this are reported.
    pub max_staple_length: usize,
    /// Staples that start or end with that many `terminal_run_letter` are reported. 0 disables
    /// the check.
    pub terminal_run_length: usize,
    pub terminal_run_letter: char,
}

impl ValidationParameters {
    pub const DEFAULT: Self = Self {
        min_staple_length: 15,
        max_staple_length: 60,
        terminal_run_length: 7,
        terminal_run_letter: 'A',
    };
}

impl Default for ValidationParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters of the generator of filler sequences.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillerParameters {
    pub seed: u64,
    /// Expected fraction of G and C, between 0 and 1.
    pub gc_content: f64,
    /// The longest run of identical letters. 0 means unbounded.
    pub max_homopolymer: usize,
}

impl FillerParameters {
    pub const DEFAULT: Self = Self {
        seed: 10,
        gc_content: 0.5,
        max_homopolymer: 4,
    };
}

impl Default for FillerParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// All the parameters of a sequencing run. Every field can be omitted when reading parameters
/// from JSON, in which case the default value is used.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub validation: ValidationParameters,
    pub filler: FillerParameters,
    /// The letter given to staple bases that have no scaffold partner.
    pub unpaired_letter: char,
    pub scaffold_circularity: Circularity,
}

impl Parameters {
    pub const DEFAULT: Self = Self {
        validation: ValidationParameters::DEFAULT,
        filler: FillerParameters::DEFAULT,
        unpaired_letter: 'A',
        scaffold_circularity: Circularity::Warn,
    };

    pub fn formated_string(&self) -> String {
        use std::fmt::Write;
        let mut ret = String::new();
        let v = &self.validation;
        writeln!(
            &mut ret,
            "  Staple length: {} to {}",
            v.min_staple_length, v.max_staple_length
        )
        .unwrap_or_default();
        writeln!(
            &mut ret,
            "  Terminal run: {} x {}",
            v.terminal_run_length, v.terminal_run_letter
        )
        .unwrap_or_default();
        writeln!(&mut ret, "  Unpaired staple letter: {}", self.unpaired_letter)
            .unwrap_or_default();
        writeln!(
            &mut ret,
            "  Filler: seed {}, GC {:.2}, max homopolymer {}",
            self.filler.seed, self.filler.gc_content, self.filler.max_homopolymer
        )
        .unwrap_or_default();
        writeln!(
            &mut ret,
            "  Scaffold circularity: {}",
            self.scaffold_circularity
        )
        .unwrap_or_default();
        ret
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}
