/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::time::Duration;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::vm_simulator::VMSimulator;

/// Accesses performed by one intensive load burst.
pub const INTENSIVE_LOAD_ACCESSES: usize = 50;

/// Drives the engine with random accesses against the active process's
/// address space. Owns its RNG so that seeded drivers replay the exact
/// same access sequence.
pub struct AccessDriver {
    rng: SmallRng,
}

impl AccessDriver {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reproducible driver for tests and demos.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// One random access to the active process. Returns the virtual
    /// address that was accessed, or `None` when no process is active.
    pub fn random_access(&mut self, sim: &mut VMSimulator) -> Option<usize> {
        let pid = sim.active_process()?.to_owned();
        let pages_needed = sim.processes().get(&pid)?.pages_needed;

        let max_address = pages_needed * sim.page_size() - 1;
        let address = self.rng.gen_range(0..=max_address);

        sim.simulate_memory_access(address, &mut self.rng);
        Some(address)
    }

    /// A burst of sequential random accesses. `pacing` is the optional
    /// visualization delay between accesses; `on_step` is invoked after
    /// every access so a caller can observe intermediate state.
    pub fn intensive_load<F>(
        &mut self,
        sim: &mut VMSimulator,
        pacing: Option<Duration>,
        mut on_step: F,
    ) where
        F: FnMut(&VMSimulator),
    {
        if sim.active_process().is_none() {
            return;
        }

        for _ in 0..INTENSIVE_LOAD_ACCESSES {
            if self.random_access(sim).is_none() {
                break;
            }
            if let Some(delay) = pacing {
                std::thread::sleep(delay);
            }
            on_step(sim);
        }
    }
}

impl Default for AccessDriver {
    fn default() -> Self {
        Self::new()
    }
}
