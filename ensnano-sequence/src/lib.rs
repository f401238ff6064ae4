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
//! Sequencing of DNA origami designs.
//!
//! A design is a [`Lattice`] made of two networks of bases: the scaffold and the staples. Given
//! the sequence of the scaffold, this crate gives a letter to every base of the design:
//!
//! 1. the components (strands) of both networks are discovered by walking the networks,
//! 2. the longest scaffold component receives the scaffold sequence and the other scaffold
//!    components receive filler sequences,
//! 3. each staple base receives the complement of the scaffold base at the same coordinate,
//! 4. the staples are checked for suspicious lengths and terminal runs.
//!
//! [`SequencedDesign::new`] runs all these steps.

#[macro_use]
extern crate serde_derive;
extern crate serde;

mod lattice;
pub use lattice::*;
mod traversal;
pub use traversal::*;
mod breakpoints;
pub use breakpoints::*;
mod sequencing;
pub use sequencing::*;
mod complement;
pub use complement::*;
mod validation;
pub use validation::*;
mod filler;
pub use filler::*;
mod parameters;
pub use parameters::*;
pub mod cadnano;
mod scaffold_sequence;
pub use scaffold_sequence::*;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::fmt;

/// A fatal error of the sequencing. When one of these occurs, no sequence is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignError {
    /// A walk was given a coordinate outside of the grid
    Traversal(TraversalError),
    /// A strand of `network` is a cycle, so it has no start to anchor the sequence on
    NoBreakpoint {
        network: NetworkKind,
        at: Coordinate,
    },
    /// The network does not contain any strand
    NoStrandFound(NetworkKind),
    SequenceTooShort {
        supplied: usize,
        required: usize,
    },
    /// A scaffold letter that has no complement
    InvalidBase {
        letter: char,
        coordinate: Coordinate,
    },
    ScaffoldNotCircular {
        start: Coordinate,
        end: Coordinate,
    },
    /// The filler generator did not return a sequence of the requested length
    InvalidFiller {
        expected: usize,
        found: usize,
    },
    /// Two scaffold components contain the same base
    OverlappingComponents(Coordinate),
}

impl DesignError {
    /// Convert an error that occured while walking `network`.
    pub fn traversal(network: NetworkKind, error: TraversalError) -> Self {
        match error {
            TraversalError::CycleDetected(at) => Self::NoBreakpoint { network, at },
            e => Self::Traversal(e),
        }
    }
}

impl From<TraversalError> for DesignError {
    fn from(e: TraversalError) -> Self {
        Self::Traversal(e)
    }
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Traversal(e) => write!(f, "{}", e),
            Self::NoBreakpoint { network, at } => write!(
                f,
                "Loop detected at base: {}\n\
                 Make sure the {} strand at this base has a start and an end base",
                at, network
            ),
            Self::NoStrandFound(network) => write!(f, "No {} found", network),
            Self::SequenceTooShort { supplied, required } => write!(
                f,
                "Scaffold sequence given is not long enough.\n\
                 Scaffold input length: {}\n\
                 Longest scaffold: {}\n\
                 Please provide a longer sequence.",
                supplied, required
            ),
            Self::InvalidBase { letter, coordinate } => {
                write!(f, "Not a valid base: {:?} at {}", letter, coordinate)
            }
            Self::ScaffoldNotCircular { start, end } => write!(
                f,
                "Start {} and end {} of scaffold do not connect",
                start, end
            ),
            Self::InvalidFiller { expected, found } => write!(
                f,
                "Filler sequence has length {}, expected {}",
                found, expected
            ),
            Self::OverlappingComponents(c) => {
                write!(f, "Scaffold base {} belongs to two strands", c)
            }
        }
    }
}

/// A non fatal remark on a sequenced design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignWarning {
    /// A scaffold component whose start and end are not adjacent
    ScaffoldNotCircular { start: Coordinate, end: Coordinate },
    /// Some staple bases have no scaffold partner and were given the default letter
    StaplesNotPaired {
        first_unpaired: Coordinate,
        nb_unpaired: usize,
    },
    Staple(StapleWarning),
}

impl fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScaffoldNotCircular { start, end } => write!(
                f,
                "Start {} and end {} of scaffold do not connect",
                start, end
            ),
            Self::StaplesNotPaired {
                first_unpaired,
                nb_unpaired,
            } => write!(
                f,
                "{} staple bases are not paired, first unpaired base {}",
                nb_unpaired, first_unpaired
            ),
            Self::Staple(w) => write!(f, "{}", w),
        }
    }
}

/// A design in which every base has a letter.
#[derive(Debug, Clone)]
pub struct SequencedDesign {
    /// The scaffold components, ordered by start coordinate
    pub scaffolds: Vec<SequencedComponent>,
    /// The index in `scaffolds` of the component that received the user sequence
    pub primary_scaffold: usize,
    /// The staple components, ordered by start coordinate
    pub staples: Vec<SequencedComponent>,
    pub lookup: ScaffoldLookup,
    pub warnings: Vec<DesignWarning>,
}

impl SequencedDesign {
    /// Sequence `lattice` with `raw_scaffold` as the sequence of the longest scaffold component.
    pub fn new(
        lattice: &Lattice,
        raw_scaffold: &str,
        filler: &mut dyn FillerGenerator,
        parameters: &Parameters,
    ) -> Result<Self, DesignError> {
        log::info!("Finding staples...");
        let staple_components = discover_components(
            lattice.network(NetworkKind::Staple),
            NetworkKind::Staple,
            Discovery::Exhaustive,
        )?;
        log::info!("Found {} staples", staple_components.len());

        log::info!("Finding scaffolds...");
        let scaffold_components = discover_components(
            lattice.network(NetworkKind::Scaffold),
            NetworkKind::Scaffold,
            Discovery::Memoized,
        )?;
        log::info!("Found {} scaffolds", scaffold_components.len());

        let mut warnings = Vec::new();
        if parameters.scaffold_circularity != Circularity::Ignore {
            for c in scaffold_components.iter().filter(|c| !is_circular(c)) {
                if parameters.scaffold_circularity == Circularity::Error {
                    return Err(DesignError::ScaffoldNotCircular {
                        start: c.start,
                        end: c.end,
                    });
                }
                warnings.push(DesignWarning::ScaffoldNotCircular {
                    start: c.start,
                    end: c.end,
                });
            }
        }

        log::info!("Generating scaffold sequences...");
        let assignment =
            assign_scaffold_sequences(&lattice.scaffold, &scaffold_components, raw_scaffold, filler)?;

        log::info!("Generating staple sequences...");
        let staples = resolve_staple_sequences(
            &lattice.staples,
            &staple_components,
            &assignment.lookup,
            parameters.unpaired_letter,
        )?;

        let unpaired: Vec<_> = unpaired_bases(&staples, &assignment.lookup).collect();
        if let Some(first_unpaired) = unpaired.first() {
            warnings.push(DesignWarning::StaplesNotPaired {
                first_unpaired: *first_unpaired,
                nb_unpaired: unpaired.len(),
            });
        }

        log::info!("Verifying staples...");
        warnings.extend(
            validate_staples(&staples, &parameters.validation)
                .into_iter()
                .map(DesignWarning::Staple),
        );

        Ok(Self {
            scaffolds: assignment.components,
            primary_scaffold: assignment.primary,
            staples,
            lookup: assignment.lookup,
            warnings,
        })
    }

    /// The component that received the user supplied sequence
    pub fn primary(&self) -> Option<&SequencedComponent> {
        self.scaffolds.get(self.primary_scaffold)
    }

    pub fn components(&self, kind: NetworkKind) -> &[SequencedComponent] {
        match kind {
            NetworkKind::Scaffold => &self.scaffolds,
            NetworkKind::Staple => &self.staples,
        }
    }

    /// The indices of the staples that received at least one validation warning
    pub fn flagged_staples(&self) -> BTreeSet<usize> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                DesignWarning::Staple(w) => Some(w.staple()),
                _ => None,
            })
            .collect()
    }
}
