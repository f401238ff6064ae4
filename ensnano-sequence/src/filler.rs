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
//! Synthetic sequences for the scaffold components that do not receive the user supplied
//! sequence.

use super::FillerParameters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of filler sequences.
///
/// `generate(length)` must return exactly `length` letters.
pub trait FillerGenerator {
    fn generate(&mut self, length: usize) -> String;
}

impl<F: FnMut(usize) -> String> FillerGenerator for F {
    fn generate(&mut self, length: usize) -> String {
        self(length)
    }
}

/// Random sequences with a target GC content and bounded homopolymer runs.
///
/// The generator is seeded, two generators built with the same parameters produce the same
/// sequences.
pub struct GcFiller {
    rng: StdRng,
    gc_content: f64,
    max_homopolymer: usize,
}

impl GcFiller {
    pub fn new(parameters: &FillerParameters) -> Self {
        let gc_content = if parameters.gc_content.is_finite() {
            parameters.gc_content.clamp(0., 1.)
        } else {
            FillerParameters::DEFAULT.gc_content
        };
        Self {
            rng: StdRng::seed_from_u64(parameters.seed),
            gc_content,
            max_homopolymer: parameters.max_homopolymer,
        }
    }

    fn draw(&mut self) -> char {
        let gc = self.rng.gen_bool(self.gc_content);
        match (gc, self.rng.gen_bool(0.5)) {
            (true, true) => 'G',
            (true, false) => 'C',
            (false, true) => 'A',
            (false, false) => 'T',
        }
    }
}

impl FillerGenerator for GcFiller {
    fn generate(&mut self, length: usize) -> String {
        let mut ret = String::with_capacity(length);
        let mut previous = None;
        let mut run = 0;
        while ret.len() < length {
            let letter = self.draw();
            if previous == Some(letter) {
                // 0 means that runs are not bounded
                if self.max_homopolymer > 0 && run >= self.max_homopolymer {
                    continue;
                }
                run += 1;
            } else {
                previous = Some(letter);
                run = 1;
            }
            ret.push(letter);
        }
        ret
    }
}
