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
//! Assignment of letters to the scaffold network.
//!
//! The longest scaffold component receives the user supplied sequence, the other components
//! receive filler sequences. Every assigned letter is recorded in a [`ScaffoldLookup`] that is
//! then handed, read-only, to the staple complementing pass.

use super::lattice::slot_index;
use super::{
    Component, Coordinate, DesignError, FillerGenerator, Network, NetworkKind, TraversalError,
};

/// A base together with its letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencedBase {
    pub coordinate: Coordinate,
    pub letter: char,
}

/// A sequenced strand. The bases are in the order in which the strand is walked, from its start
/// to its end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequencedComponent {
    pub bases: Vec<SequencedBase>,
}

impl SequencedComponent {
    pub fn new(bases: Vec<SequencedBase>) -> Self {
        Self { bases }
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.bases.first().map(|b| b.coordinate)
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.bases.last().map(|b| b.coordinate)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// The concatenated letters of the strand
    pub fn sequence(&self) -> String {
        self.bases.iter().map(|b| b.letter).collect()
    }
}

/// Map scaffold coordinates to the letter assigned to them.
///
/// Only the scaffold assignment writes into the table, and each coordinate is written at most
/// once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldLookup {
    nb_strands: usize,
    nb_positions: usize,
    letters: Vec<Option<char>>,
}

impl ScaffoldLookup {
    pub(crate) fn new(network: &Network) -> Self {
        Self {
            nb_strands: network.nb_strands(),
            nb_positions: network.nb_positions(),
            letters: vec![None; network.nb_slots()],
        }
    }

    fn slot(&self, coordinate: Coordinate) -> Option<usize> {
        slot_index(self.nb_strands, self.nb_positions, coordinate)
    }

    pub(crate) fn insert(&mut self, coordinate: Coordinate, letter: char) -> Result<(), DesignError> {
        let slot = self.slot(coordinate).ok_or(DesignError::traversal(
            NetworkKind::Scaffold,
            TraversalError::InvalidCoordinate(coordinate),
        ))?;
        if self.letters[slot].replace(letter).is_some() {
            log::error!("Scaffold base {} was assigned twice", coordinate);
            return Err(DesignError::OverlappingComponents(coordinate));
        }
        Ok(())
    }

    /// The scaffold letter at `coordinate`, if a scaffold base was sequenced there.
    pub fn get(&self, coordinate: Coordinate) -> Option<char> {
        self.slot(coordinate).and_then(|slot| self.letters[slot])
    }

    /// The number of sequenced scaffold bases
    pub fn len(&self) -> usize {
        self.letters.iter().filter(|l| l.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.iter().all(Option::is_none)
    }

    /// The sequenced coordinates in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let nb_positions = self.nb_positions.max(1);
        self.letters
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_some())
            .map(move |(slot, _)| Coordinate::new(slot / nb_positions, slot % nb_positions))
    }
}

/// The result of the scaffold assignment.
#[derive(Debug, Clone)]
pub struct ScaffoldAssignment {
    /// One sequenced component per input component, in the same order
    pub components: Vec<SequencedComponent>,
    /// The index of the component that received the user supplied sequence
    pub primary: usize,
    pub lookup: ScaffoldLookup,
}

/// The index of the longest component. Ties are broken in favour of the lowest start coordinate.
pub fn primary_component(components: &[Component]) -> Option<usize> {
    let mut ret: Option<usize> = None;
    for (i, c) in components.iter().enumerate() {
        let better = ret.map_or(true, |best| {
            let best = &components[best];
            c.length > best.length || (c.length == best.length && c.start < best.start)
        });
        if better {
            ret = Some(i);
        }
    }
    ret
}

/// Give a letter to every base of the scaffold components.
///
/// Fails with `SequenceTooShort` before assigning anything if `raw_sequence` is shorter than the
/// primary component.
pub fn assign_scaffold_sequences(
    network: &Network,
    components: &[Component],
    raw_sequence: &str,
    filler: &mut dyn FillerGenerator,
) -> Result<ScaffoldAssignment, DesignError> {
    let primary =
        primary_component(components).ok_or(DesignError::NoStrandFound(NetworkKind::Scaffold))?;
    let required = components[primary].length;
    let supplied = raw_sequence.chars().count();
    if required > supplied {
        return Err(DesignError::SequenceTooShort { supplied, required });
    }
    log::info!(
        "Primary scaffold starts at {} ({} bases, {} supplied)",
        components[primary].start,
        required,
        supplied
    );

    let mut lookup = ScaffoldLookup::new(network);
    let mut sequenced = Vec::with_capacity(components.len());
    for (i, component) in components.iter().enumerate() {
        let sequenced_component = if i == primary {
            assign_component(network, component, raw_sequence.chars(), &mut lookup)?
        } else {
            let filler_sequence = filler.generate(component.length);
            let found = filler_sequence.chars().count();
            if found != component.length {
                return Err(DesignError::InvalidFiller {
                    expected: component.length,
                    found,
                });
            }
            log::debug!(
                "Filler sequence for scaffold {}: {}",
                component.start,
                filler_sequence
            );
            assign_component(network, component, filler_sequence.chars(), &mut lookup)?
        };
        sequenced.push(sequenced_component);
    }

    Ok(ScaffoldAssignment {
        components: sequenced,
        primary,
        lookup,
    })
}

fn assign_component<I>(
    network: &Network,
    component: &Component,
    mut letters: I,
    lookup: &mut ScaffoldLookup,
) -> Result<SequencedComponent, DesignError>
where
    I: Iterator<Item = char>,
{
    let path = network
        .forward_path(component.start)
        .map_err(|e| DesignError::traversal(NetworkKind::Scaffold, e))?;
    let required = path.len();
    let mut bases = Vec::with_capacity(required);
    for coordinate in path {
        let letter = letters.next().ok_or(DesignError::SequenceTooShort {
            supplied: bases.len(),
            required,
        })?;
        lookup.insert(coordinate, letter)?;
        bases.push(SequencedBase { coordinate, letter });
    }
    Ok(SequencedComponent::new(bases))
}
