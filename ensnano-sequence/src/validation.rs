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
//! Advisory checks on sequenced staples. Nothing here is an error: the warnings point at
//! staples that are likely to be design mistakes.

use super::{Coordinate, SequencedComponent, ValidationParameters};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StapleWarning {
    TooShort {
        staple: usize,
        start: Coordinate,
        length: usize,
        min: usize,
    },
    TooLong {
        staple: usize,
        start: Coordinate,
        length: usize,
        max: usize,
    },
    /// The first `run` letters of the staple are all `letter`. This usually indicates a staple
    /// end that is not paired to the scaffold.
    TerminalRunStart {
        staple: usize,
        start: Coordinate,
        letter: char,
        run: usize,
    },
    /// The last `run` letters of the staple are all `letter`.
    TerminalRunEnd {
        staple: usize,
        start: Coordinate,
        letter: char,
        run: usize,
    },
}

impl StapleWarning {
    /// The index of the staple concerned by the warning
    pub fn staple(&self) -> usize {
        match self {
            Self::TooShort { staple, .. }
            | Self::TooLong { staple, .. }
            | Self::TerminalRunStart { staple, .. }
            | Self::TerminalRunEnd { staple, .. } => *staple,
        }
    }
}

impl fmt::Display for StapleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort {
                staple,
                start,
                length,
                min,
            } => write!(
                f,
                "staple {} at {} has length {} (<{})",
                staple, start, length, min
            ),
            Self::TooLong {
                staple,
                start,
                length,
                max,
            } => write!(
                f,
                "staple {} at {} has length {} (>{})",
                staple, start, length, max
            ),
            Self::TerminalRunStart {
                staple,
                start,
                letter,
                run,
            } => write!(
                f,
                "staple {} at {} has {} or more consecutive {}'s at the start",
                staple, start, run, letter
            ),
            Self::TerminalRunEnd {
                staple,
                start,
                letter,
                run,
            } => write!(
                f,
                "staple {} at {} has {} or more consecutive {}'s at the end",
                staple, start, run, letter
            ),
        }
    }
}

/// Check the length of every staple and the letters at both of its ends.
pub fn validate_staples(
    staples: &[SequencedComponent],
    parameters: &ValidationParameters,
) -> Vec<StapleWarning> {
    let mut ret = Vec::new();
    for (staple, sequence) in staples.iter().enumerate() {
        let start = if let Some(start) = sequence.start() {
            start
        } else {
            continue;
        };
        let length = sequence.len();
        if length > parameters.max_staple_length {
            ret.push(StapleWarning::TooLong {
                staple,
                start,
                length,
                max: parameters.max_staple_length,
            });
        } else if length < parameters.min_staple_length {
            ret.push(StapleWarning::TooShort {
                staple,
                start,
                length,
                min: parameters.min_staple_length,
            });
        }
    }

    let run = parameters.terminal_run_length;
    let letter = parameters.terminal_run_letter;
    if run == 0 {
        return ret;
    }
    for (staple, sequence) in staples.iter().enumerate() {
        let bases = sequence.bases.as_slice();
        if bases.len() < run {
            continue;
        }
        let start = bases[0].coordinate;
        if bases[..run].iter().all(|b| b.letter == letter) {
            ret.push(StapleWarning::TerminalRunStart {
                staple,
                start,
                letter,
                run,
            });
        }
        if bases[bases.len() - run..].iter().all(|b| b.letter == letter) {
            ret.push(StapleWarning::TerminalRunEnd {
                staple,
                start,
                letter,
                run,
            });
        }
    }
    ret
}
