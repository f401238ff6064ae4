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
//! Read a [`Lattice`] from a cadnano (v2) design.
//!
//! A cadnano file lists virtual strands, each with a number `num` and, for every position, a
//! scaffold and a staple link of the form `[prev_num, prev_pos, next_num, next_pos]` where `-1`
//! stands for "no neighbour". The strand index of a coordinate is the `num` of the virtual
//! strand; numbers that are not used by the file give empty strands.

pub use cadnano_format::Cadnano;
use cadnano_format::VStrand;
use std::collections::BTreeMap;
use std::path::Path;

use super::{Coordinate, Lattice, LatticeError, LinkRecord, NetworkBuilder, NetworkKind};

const NO_NEIGHBOUR: isize = -1;

type CadnanoLink = (isize, isize, isize, isize);

impl Lattice {
    /// Read a cadnano file.
    pub fn from_cadnano_file<P: AsRef<Path>>(path: P) -> Result<Self, LatticeError> {
        let nano = Cadnano::from_file(path).map_err(|e| LatticeError::Cadnano(format!("{:?}", e)))?;
        Self::from_cadnano(&nano)
    }

    /// Convert a parsed cadnano design.
    pub fn from_cadnano(nano: &Cadnano) -> Result<Self, LatticeError> {
        let vstrands = &nano.vstrands;
        let nb_positions = vstrands
            .first()
            .map(|v| v.scaf.len())
            .ok_or(LatticeError::EmptyDesign)?;
        if nb_positions == 0 {
            return Err(LatticeError::EmptyDesign);
        }

        let mut num_to_vstrand: BTreeMap<usize, &VStrand> = BTreeMap::new();
        let mut helices_with_skips = Vec::new();
        for v in vstrands.iter() {
            let num = usize_from(v.num).ok_or(LatticeError::NegativeHelixNumber(v.num))?;
            for found in [v.scaf.len(), v.stap.len()] {
                if found != nb_positions {
                    return Err(LatticeError::NonRectangular {
                        num: v.num,
                        expected: nb_positions,
                        found,
                    });
                }
            }
            if num_to_vstrand.insert(num, v).is_some() {
                return Err(LatticeError::DuplicateHelix(v.num));
            }
            if v.skip.iter().any(|s| *s != 0) {
                helices_with_skips.push(num);
            }
        }
        let nb_strands = num_to_vstrand.keys().max().map(|m| m + 1).unwrap_or(0);
        log::info!(
            "Read {} helices, {} strands of {} positions",
            vstrands.len(),
            nb_strands,
            nb_positions
        );

        let mut scaffold = NetworkBuilder::new(nb_strands, nb_positions);
        let mut staples = NetworkBuilder::new(nb_strands, nb_positions);
        for (num, v) in num_to_vstrand.iter() {
            for position in 0..nb_positions {
                let at = Coordinate::new(*num, position);
                for (kind, builder, link) in [
                    (NetworkKind::Scaffold, &mut scaffold, v.scaf[position]),
                    (NetworkKind::Staple, &mut staples, v.stap[position]),
                ] {
                    let record = link_record(link, nb_strands, nb_positions).map_err(|link| {
                        LatticeError::MalformedLink {
                            network: kind,
                            at,
                            link,
                        }
                    })?;
                    builder.set(at, record).map_err(|_| LatticeError::MalformedLink {
                        network: kind,
                        at,
                        link: (*num as isize, position as isize),
                    })?;
                }
            }
        }

        let mut lattice = Lattice::new(scaffold.build(), staples.build())?;
        if !helices_with_skips.is_empty() {
            log::warn!(
                "Helices {:?} contain skips. Skips are ignored when sequencing.",
                helices_with_skips
            );
        }
        lattice.helices_with_skips = helices_with_skips;
        Ok(lattice)
    }
}

fn usize_from(x: isize) -> Option<usize> {
    if x >= 0 {
        Some(x as usize)
    } else {
        None
    }
}

/// Convert one half of a cadnano link. On failure, return the offending half.
fn neighbour(
    (strand, position): (isize, isize),
    nb_strands: usize,
    nb_positions: usize,
) -> Result<Option<Coordinate>, (isize, isize)> {
    if strand == NO_NEIGHBOUR && position == NO_NEIGHBOUR {
        return Ok(None);
    }
    match (usize_from(strand), usize_from(position)) {
        (Some(s), Some(p)) if s < nb_strands && p < nb_positions => {
            Ok(Some(Coordinate::new(s, p)))
        }
        _ => Err((strand, position)),
    }
}

fn link_record(
    link: CadnanoLink,
    nb_strands: usize,
    nb_positions: usize,
) -> Result<LinkRecord, (isize, isize)> {
    let prev = neighbour((link.0, link.1), nb_strands, nb_positions)?;
    let next = neighbour((link.2, link.3), nb_strands, nb_positions)?;
    Ok(LinkRecord::new(prev, next))
}
