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
//! Discovery of the strand components of a network.
//!
//! A component is identified by its start base, the only base of the component that has no
//! predecessor. Starts are found by walking backward from every slot of the grid.

use super::{Coordinate, DesignError, Network, NetworkKind, TraversalError, Walk};
use std::collections::BTreeSet;

/// How the slots of a network are resolved to the start of their component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// Walk backward from every slot. Quadratic in the length of the components.
    Exhaustive,
    /// Remember the start found for every slot visited by a backward walk, so that each slot is
    /// visited once. Requires an auxiliary grid the size of the network.
    Memoized,
}

/// A strand of a network, given by its breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Component {
    pub start: Coordinate,
    pub end: Coordinate,
    /// The number of bases of the component
    pub length: usize,
}

/// Return the start base of every component of `network`.
pub fn find_component_starts(
    network: &Network,
    discovery: Discovery,
) -> Result<BTreeSet<Coordinate>, TraversalError> {
    match discovery {
        Discovery::Exhaustive => exhaustive_starts(network),
        Discovery::Memoized => memoized_starts(network),
    }
}

fn exhaustive_starts(network: &Network) -> Result<BTreeSet<Coordinate>, TraversalError> {
    let mut starts = BTreeSet::new();
    for origin in network.coordinates() {
        if let Walk::Reached(start) = network.walk_backward(origin)? {
            starts.insert(start);
        }
    }
    Ok(starts)
}

#[derive(Debug, Clone, Copy)]
enum Resolution {
    Unseen,
    /// Visited by the backward walk currently in progress
    InProgress,
    Resolved(Coordinate),
}

fn memoized_starts(network: &Network) -> Result<BTreeSet<Coordinate>, TraversalError> {
    let mut resolutions = vec![Resolution::Unseen; network.nb_slots()];
    let mut starts = BTreeSet::new();
    let mut path = Vec::new();

    for origin in network.coordinates() {
        let origin_slot = network
            .slot(origin)
            .ok_or(TraversalError::InvalidCoordinate(origin))?;
        let is_empty = network.link(origin).map_or(true, |r| r.is_empty());
        if is_empty || !matches!(resolutions[origin_slot], Resolution::Unseen) {
            continue;
        }

        path.clear();
        let mut current = origin;
        let start = loop {
            let slot = network
                .slot(current)
                .ok_or(TraversalError::InvalidCoordinate(current))?;
            match resolutions[slot] {
                Resolution::Resolved(start) => break start,
                // Coming back to a slot of the current walk means that there is no start.
                Resolution::InProgress => return Err(TraversalError::CycleDetected(origin)),
                Resolution::Unseen => {
                    resolutions[slot] = Resolution::InProgress;
                    path.push(slot);
                    match network.step_backward(current)? {
                        Some(prev) => current = prev,
                        None => break current,
                    }
                }
            }
        };

        for slot in path.drain(..) {
            resolutions[slot] = Resolution::Resolved(start);
        }
        starts.insert(start);
    }
    Ok(starts)
}

/// Return the components of `network`, ordered by start coordinate.
///
/// Fails with `NoBreakpoint` if a strand of the network is cyclic and with `NoStrandFound` if
/// the network has no base at all.
pub fn discover_components(
    network: &Network,
    kind: NetworkKind,
    discovery: Discovery,
) -> Result<Vec<Component>, DesignError> {
    let traversal_error = |e| DesignError::traversal(kind, e);
    let starts = find_component_starts(network, discovery).map_err(traversal_error)?;

    let mut ret = Vec::with_capacity(starts.len());
    for start in starts {
        let end = match network.walk_forward(start).map_err(traversal_error)? {
            Walk::Reached(end) => end,
            Walk::Empty => {
                log::warn!("A {} strand starts on the empty slot {}", kind, start);
                continue;
            }
        };
        let length = network.forward_length(start).map_err(traversal_error)?;
        log::debug!("{} strand {} -> {}, length {}", kind, start, end, length);
        ret.push(Component { start, end, length });
    }

    if ret.is_empty() {
        Err(DesignError::NoStrandFound(kind))
    } else {
        Ok(ret)
    }
}

/// True iff the start and end of `component` are adjacent on the same strand.
///
/// A closed scaffold loop is cut between its end and its start. On even strands the start is
/// the right neighbour of the end, on odd strands it is the left neighbour.
pub fn is_circular(component: &Component) -> bool {
    let Component { start, end, .. } = component;
    start.strand == end.strand
        && if start.strand % 2 == 0 {
            start.position == end.position + 1
        } else {
            start.position + 1 == end.position
        }
}
