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
//! Staple letters are the complement of the scaffold letter at the same coordinate.

use super::{
    Component, Coordinate, DesignError, Network, NetworkKind, ScaffoldLookup, SequencedBase,
    SequencedComponent,
};

/// The Watson-Crick partner of `letter`, or `None` if `letter` is not a base.
pub fn complement(letter: char) -> Option<char> {
    match letter {
        'A' => Some('T'),
        'T' => Some('A'),
        'G' => Some('C'),
        'C' => Some('G'),
        _ => None,
    }
}

/// The staple letter at `coordinate`: the complement of the scaffold letter there, or
/// `unpaired_letter` when no scaffold base was sequenced at that coordinate.
pub fn staple_letter(
    lookup: &ScaffoldLookup,
    coordinate: Coordinate,
    unpaired_letter: char,
) -> Result<char, DesignError> {
    match lookup.get(coordinate) {
        Some(letter) => {
            complement(letter).ok_or(DesignError::InvalidBase { letter, coordinate })
        }
        None => Ok(unpaired_letter),
    }
}

/// Sequence every staple component by complementing the scaffold.
///
/// `lookup` must be the table produced by a completed scaffold assignment.
pub fn resolve_staple_sequences(
    network: &Network,
    components: &[Component],
    lookup: &ScaffoldLookup,
    unpaired_letter: char,
) -> Result<Vec<SequencedComponent>, DesignError> {
    components
        .iter()
        .map(|c| resolve_staple(network, c, lookup, unpaired_letter))
        .collect()
}

fn resolve_staple(
    network: &Network,
    component: &Component,
    lookup: &ScaffoldLookup,
    unpaired_letter: char,
) -> Result<SequencedComponent, DesignError> {
    let path = network
        .forward_path(component.start)
        .map_err(|e| DesignError::traversal(NetworkKind::Staple, e))?;
    let bases = path
        .into_iter()
        .map(|coordinate| {
            staple_letter(lookup, coordinate, unpaired_letter)
                .map(|letter| SequencedBase { coordinate, letter })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SequencedComponent::new(bases))
}

/// The staple bases that have no scaffold partner, in staple order.
pub fn unpaired_bases<'a>(
    staples: &'a [SequencedComponent],
    lookup: &'a ScaffoldLookup,
) -> impl Iterator<Item = Coordinate> + 'a {
    staples
        .iter()
        .flat_map(|s| s.bases.iter())
        .map(|b| b.coordinate)
        .filter(move |c| lookup.get(*c).is_none())
}
