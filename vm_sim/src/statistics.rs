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

use crate::modules::replacement::ReplacementAlgorithm;

/// The engine's monotonic counters. Only cleared by a reset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct AccessCounters {
    pub(crate) access_count: u64,
    pub(crate) page_hits: u64,
    pub(crate) page_faults: u64,
    pub(crate) swaps_in: u64,
    pub(crate) swaps_out: u64,
}

impl AccessCounters {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Hits as a percentage of all counted accesses, 0.0 before the
    /// first access.
    pub(crate) fn hit_rate(&self) -> f64 {
        if self.access_count == 0 {
            0.0
        } else {
            self.page_hits as f64 / self.access_count as f64 * 100.0
        }
    }

    /// Faults as a percentage of all counted accesses, 0.0 before the
    /// first access.
    pub(crate) fn fault_rate(&self) -> f64 {
        if self.access_count == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.access_count as f64 * 100.0
        }
    }
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemoryStatistics {
    pub access_count: u64,
    pub page_hits: u64,
    pub page_faults: u64,
    pub swaps_in: u64,
    pub swaps_out: u64,
    /// Current size of the swap store.
    pub pages_in_swap: usize,
    /// Percentage of `access_count`, 0.0 when no access happened yet.
    pub hit_rate: f64,
    /// Percentage of `access_count`, 0.0 when no access happened yet.
    pub fault_rate: f64,
    pub algorithm: ReplacementAlgorithm,
}
