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
//! Flat storage of the two strand networks of a design.
//!
//! Every base slot of a network is addressed by a [`Coordinate`]. Links between slots are plain
//! coordinates, so a whole network lives in a single `Vec` and walking a strand is index
//! arithmetic plus a bounds check.

use super::TraversalError;
use std::fmt;

/// A base slot: the index of a strand of the grid (the helix number in cadnano files) and a
/// position on that strand.
///
/// Coordinates are ordered row-major, first by strand then by position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub strand: usize,
    pub position: usize,
}

impl Coordinate {
    pub fn new(strand: usize, position: usize) -> Self {
        Self { strand, position }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.strand, self.position)
    }
}

/// The neighbours of a base slot. `None` stands for "no such base".
///
/// A record whose two neighbours are `None` denotes an empty slot: no base is present there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LinkRecord {
    pub prev: Option<Coordinate>,
    pub next: Option<Coordinate>,
}

impl LinkRecord {
    pub const EMPTY: Self = Self {
        prev: None,
        next: None,
    };

    pub fn new(prev: Option<Coordinate>, next: Option<Coordinate>) -> Self {
        Self { prev, next }
    }

    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

/// The two kinds of molecules of an origami. Each kind has its own network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetworkKind {
    Scaffold,
    Staple,
}

impl NetworkKind {
    /// The capitalized name used as a heading in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scaffold => "Scaffold",
            Self::Staple => "Staple",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scaffold => write!(f, "scaffold"),
            Self::Staple => write!(f, "staple"),
        }
    }
}

/// The grid of link records of one molecule type.
///
/// A `Network` is rectangular: every strand has `nb_positions` slots. It can only be created
/// through a [`NetworkBuilder`] and is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    nb_strands: usize,
    nb_positions: usize,
    links: Vec<LinkRecord>,
}

impl Network {
    pub fn nb_strands(&self) -> usize {
        self.nb_strands
    }

    pub fn nb_positions(&self) -> usize {
        self.nb_positions
    }

    /// The number of slots of the grid, empty or not.
    pub fn nb_slots(&self) -> usize {
        self.links.len()
    }

    /// The number of non-empty slots.
    pub fn nb_bases(&self) -> usize {
        self.links.iter().filter(|l| !l.is_empty()).count()
    }

    pub(crate) fn slot(&self, coordinate: Coordinate) -> Option<usize> {
        slot_index(self.nb_strands, self.nb_positions, coordinate)
    }

    /// The link record at `coordinate`, or `None` if `coordinate` is outside of the grid.
    pub fn link(&self, coordinate: Coordinate) -> Option<&LinkRecord> {
        self.slot(coordinate).map(|i| &self.links[i])
    }

    /// Iterate over all the coordinates of the grid in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let nb_positions = self.nb_positions;
        (0..self.nb_strands)
            .flat_map(move |strand| (0..nb_positions).map(move |p| Coordinate::new(strand, p)))
    }

    /// Return the first pair `(from, to)` such that one of the links of `from` points to `to`
    /// but `to` does not point back to `from`.
    pub fn inconsistent_link(&self) -> Option<(Coordinate, Coordinate)> {
        for from in self.coordinates() {
            let record = self.link(from)?;
            if let Some(to) = record.next {
                if self.link(to).and_then(|r| r.prev) != Some(from) {
                    return Some((from, to));
                }
            }
            if let Some(to) = record.prev {
                if self.link(to).and_then(|r| r.next) != Some(from) {
                    return Some((from, to));
                }
            }
        }
        None
    }
}

pub(crate) fn slot_index(nb_strands: usize, nb_positions: usize, coordinate: Coordinate) -> Option<usize> {
    if coordinate.strand < nb_strands && coordinate.position < nb_positions {
        Some(coordinate.strand * nb_positions + coordinate.position)
    } else {
        None
    }
}

/// Fill the link records of a [`Network`].
///
/// All slots start empty.
pub struct NetworkBuilder {
    network: Network,
}

impl NetworkBuilder {
    pub fn new(nb_strands: usize, nb_positions: usize) -> Self {
        Self {
            network: Network {
                nb_strands,
                nb_positions,
                links: vec![LinkRecord::EMPTY; nb_strands * nb_positions],
            },
        }
    }

    fn record_mut(&mut self, coordinate: Coordinate) -> Result<&mut LinkRecord, TraversalError> {
        let network = &mut self.network;
        slot_index(network.nb_strands, network.nb_positions, coordinate)
            .map(move |i| &mut network.links[i])
            .ok_or(TraversalError::InvalidCoordinate(coordinate))
    }

    /// Overwrite the link record at `coordinate`.
    pub fn set(
        &mut self,
        coordinate: Coordinate,
        record: LinkRecord,
    ) -> Result<&mut Self, TraversalError> {
        *self.record_mut(coordinate)? = record;
        Ok(self)
    }

    /// Make `to` the successor of `from` and `from` the predecessor of `to`.
    pub fn connect(&mut self, from: Coordinate, to: Coordinate) -> Result<&mut Self, TraversalError> {
        self.record_mut(to)?;
        self.record_mut(from)?.next = Some(to);
        self.record_mut(to)?.prev = Some(from);
        Ok(self)
    }

    /// Connect each coordinate of `coordinates` to the following one.
    pub fn chain(&mut self, coordinates: &[Coordinate]) -> Result<&mut Self, TraversalError> {
        for pair in coordinates.windows(2) {
            self.connect(pair[0], pair[1])?;
        }
        Ok(self)
    }

    pub fn build(self) -> Network {
        self.network
    }
}

/// The scaffold and staple networks of a design. Both networks share the same grid dimensions.
#[derive(Clone, Debug)]
pub struct Lattice {
    pub scaffold: Network,
    pub staples: Network,
    /// The strands on which the design has skipped bases. Skips are not taken into account when
    /// sequencing.
    pub helices_with_skips: Vec<usize>,
}

impl Lattice {
    pub fn new(scaffold: Network, staples: Network) -> Result<Self, LatticeError> {
        if scaffold.nb_slots() == 0 {
            return Err(LatticeError::EmptyDesign);
        }
        if scaffold.nb_strands != staples.nb_strands || scaffold.nb_positions != staples.nb_positions
        {
            return Err(LatticeError::MismatchedNetworks);
        }
        for (kind, network) in [
            (NetworkKind::Scaffold, &scaffold),
            (NetworkKind::Staple, &staples),
        ] {
            if let Some((from, to)) = network.inconsistent_link() {
                return Err(LatticeError::InconsistentLink {
                    network: kind,
                    from,
                    to,
                });
            }
        }
        Ok(Self {
            scaffold,
            staples,
            helices_with_skips: Vec::new(),
        })
    }

    pub fn network(&self, kind: NetworkKind) -> &Network {
        match kind {
            NetworkKind::Scaffold => &self.scaffold,
            NetworkKind::Staple => &self.staples,
        }
    }
}

/// An error that occured while building a `Lattice`
#[derive(Debug)]
pub enum LatticeError {
    /// The cadnano file could not be read or parsed
    Cadnano(String),
    /// The design has no strand or its strands have no position
    EmptyDesign,
    /// A strand does not have the same number of positions as the first one
    NonRectangular {
        num: isize,
        expected: usize,
        found: usize,
    },
    NegativeHelixNumber(isize),
    DuplicateHelix(isize),
    /// A link field that is neither the sentinel `(-1, -1)` nor a coordinate of the grid
    MalformedLink {
        network: NetworkKind,
        at: Coordinate,
        link: (isize, isize),
    },
    /// `from` points to `to` but `to` does not point back to `from`
    InconsistentLink {
        network: NetworkKind,
        from: Coordinate,
        to: Coordinate,
    },
    MismatchedNetworks,
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cadnano(e) => write!(f, "Could not read cadnano file: {}", e),
            Self::EmptyDesign => write!(f, "The design does not contain any base slot"),
            Self::NonRectangular {
                num,
                expected,
                found,
            } => write!(
                f,
                "Helix {} has {} positions, expected {}",
                num, found, expected
            ),
            Self::NegativeHelixNumber(num) => write!(f, "Invalid helix number {}", num),
            Self::DuplicateHelix(num) => write!(f, "Helix number {} is used twice", num),
            Self::MalformedLink { network, at, link } => write!(
                f,
                "Malformed {} link ({}, {}) at base {}",
                network, link.0, link.1, at
            ),
            Self::InconsistentLink { network, from, to } => write!(
                f,
                "The {} base {} is linked to {} but {} is not linked back",
                network, from, to, to
            ),
            Self::MismatchedNetworks => write!(
                f,
                "The scaffold and staple grids do not have the same dimensions"
            ),
        }
    }
}
