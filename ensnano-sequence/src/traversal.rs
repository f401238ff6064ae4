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
//! Single steps and whole-strand walks on a [`Network`].
//!
//! Link records come from user files and may describe cycles. Every walk therefore guards itself
//! against infinite loops: it fails as soon as it comes back to its origin, or after having taken
//! more steps than there are slots in the grid.

use super::{Coordinate, Network};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalError {
    /// The coordinate is outside of the network's grid.
    InvalidCoordinate(Coordinate),
    /// The walk that started at this coordinate never reached a strand end.
    CycleDetected(Coordinate),
}

impl fmt::Display for TraversalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate(c) => write!(f, "Coordinate {} is outside of the grid", c),
            Self::CycleDetected(c) => write!(f, "Loop detected at base: {}", c),
        }
    }
}

/// The outcome of a whole-strand walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// The walk started on an empty slot.
    Empty,
    /// The last base before the strand end.
    Reached(Coordinate),
}

impl Walk {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Empty => None,
            Self::Reached(c) => Some(*c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Network {
    /// The successor of `coordinate`.
    pub fn step_forward(&self, coordinate: Coordinate) -> Result<Option<Coordinate>, TraversalError> {
        self.step(coordinate, Direction::Forward)
    }

    /// The predecessor of `coordinate`.
    pub fn step_backward(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<Coordinate>, TraversalError> {
        self.step(coordinate, Direction::Backward)
    }

    fn step(
        &self,
        coordinate: Coordinate,
        direction: Direction,
    ) -> Result<Option<Coordinate>, TraversalError> {
        let record = self
            .link(coordinate)
            .ok_or(TraversalError::InvalidCoordinate(coordinate))?;
        Ok(match direction {
            Direction::Forward => record.next,
            Direction::Backward => record.prev,
        })
    }

    /// Follow the successors of `start` until the end of its strand.
    pub fn walk_forward(&self, start: Coordinate) -> Result<Walk, TraversalError> {
        self.walk_with(start, Direction::Forward, |_| ())
    }

    /// Follow the predecessors of `start` until the beginning of its strand.
    pub fn walk_backward(&self, start: Coordinate) -> Result<Walk, TraversalError> {
        self.walk_with(start, Direction::Backward, |_| ())
    }

    /// The number of bases visited when walking forward from `start`, `start` included.
    pub fn forward_length(&self, start: Coordinate) -> Result<usize, TraversalError> {
        let mut length = 0;
        self.walk_with(start, Direction::Forward, |_| length += 1)?;
        Ok(length)
    }

    /// The bases visited when walking forward from `start`, in visiting order.
    pub fn forward_path(&self, start: Coordinate) -> Result<Vec<Coordinate>, TraversalError> {
        let mut path = Vec::new();
        self.walk_with(start, Direction::Forward, |c| path.push(c))?;
        Ok(path)
    }

    fn walk_with<F>(
        &self,
        start: Coordinate,
        direction: Direction,
        mut visit: F,
    ) -> Result<Walk, TraversalError>
    where
        F: FnMut(Coordinate),
    {
        let record = self
            .link(start)
            .ok_or(TraversalError::InvalidCoordinate(start))?;
        if record.is_empty() {
            return Ok(Walk::Empty);
        }
        let max_nb_steps = self.nb_slots();
        let mut nb_steps = 0;
        let mut current = start;
        visit(current);
        while let Some(next) = self.step(current, direction)? {
            nb_steps += 1;
            if next == start || nb_steps > max_nb_steps {
                log::debug!("{:?} walk from {} does not terminate", direction, start);
                return Err(TraversalError::CycleDetected(start));
            }
            current = next;
            visit(current);
        }
        Ok(Walk::Reached(current))
    }
}
