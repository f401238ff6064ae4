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
//! Read the raw scaffold sequence from a text file.

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum SequenceFileError {
    IOError(std::io::Error),
    /// The file does not contain any base
    Empty,
    /// The file contains a character that is neither a base nor a whitespace
    InvalidCharacter { position: usize, character: char },
}

impl From<std::io::Error> for SequenceFileError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

impl fmt::Display for SequenceFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IOError(e) => write!(f, "Could not read scaffold sequence: {}", e),
            Self::Empty => write!(f, "The scaffold sequence file is empty"),
            Self::InvalidCharacter {
                position,
                character,
            } => write!(
                f,
                "Invalid character {:?} at position {} of the scaffold sequence",
                character, position
            ),
        }
    }
}

/// Read the scaffold sequence at `path`.
pub fn read_scaffold_sequence<P: AsRef<Path>>(path: P) -> Result<String, SequenceFileError> {
    let content = std::fs::read_to_string(path)?;
    parse_scaffold_sequence(&content)
}

/// Remove whitespaces and upper-case `content`. Letters other than A, T, G and C are rejected.
pub fn parse_scaffold_sequence(content: &str) -> Result<String, SequenceFileError> {
    let mut ret = String::with_capacity(content.len());
    for (position, c) in content.chars().filter(|c| !c.is_whitespace()).enumerate() {
        let c = c.to_ascii_uppercase();
        if !matches!(c, 'A' | 'T' | 'G' | 'C') {
            return Err(SequenceFileError::InvalidCharacter {
                position,
                character: c,
            });
        }
        ret.push(c);
    }
    if ret.is_empty() {
        Err(SequenceFileError::Empty)
    } else {
        Ok(ret)
    }
}
