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

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Most recent fault timestamps kept for windowed detection.
const RING_CAPACITY: usize = 10;

/// Below this many recorded faults the detector refuses to judge.
const MIN_SAMPLES: usize = 5;

/// Window over which recent faults are counted.
const FAULT_WINDOW: Duration = Duration::from_secs(5);

/// Windowed fault count at or above which thrashing becomes possible.
const WINDOW_FAULT_THRESHOLD: usize = 3;

/// Overall fault rate above which thrashing is declared.
const FAULT_RATE_THRESHOLD: f64 = 0.5;

/// Watches the recent fault history for thrashing: a windowed burst of
/// faults combined with an overall fault rate above the threshold.
#[derive(Debug)]
pub(crate) struct ThrashingDetector {
    recent_faults: VecDeque<Instant>,
}

impl ThrashingDetector {
    pub(crate) fn new() -> Self {
        Self {
            recent_faults: VecDeque::with_capacity(RING_CAPACITY),
        }
    }

    /// Append the current instant, dropping the oldest sample once the
    /// ring is full.
    pub(crate) fn record_fault(&mut self) {
        if self.recent_faults.len() == RING_CAPACITY {
            self.recent_faults.pop_front();
        }
        self.recent_faults.push_back(Instant::now());
    }

    pub(crate) fn clear(&mut self) {
        self.recent_faults.clear();
    }

    /// Judge the current fault history. The message always names the
    /// computed overall fault rate.
    pub(crate) fn detect(&self, page_faults: u64, access_count: u64) -> (bool, String) {
        let fault_rate = page_faults as f64 / access_count.max(1) as f64;
        let fault_percent = fault_rate * 100.0;

        if self.recent_faults.len() < MIN_SAMPLES {
            return (
                false,
                format!(
                    "insufficient recent fault data to judge thrashing \
                     (fault rate {fault_percent:.2}%)"
                ),
            );
        }

        let now = Instant::now();
        let faults_in_window = self
            .recent_faults
            .iter()
            .filter(|instant| now.duration_since(**instant) < FAULT_WINDOW)
            .count();

        if faults_in_window >= WINDOW_FAULT_THRESHOLD && fault_rate > FAULT_RATE_THRESHOLD {
            (
                true,
                format!(
                    "thrashing detected: fault rate {fault_percent:.2}%, \
                     {faults_in_window} faults in the last {}s",
                    FAULT_WINDOW.as_secs()
                ),
            )
        } else {
            (
                false,
                format!("system operating normally, fault rate {fault_percent:.2}%"),
            )
        }
    }

    #[cfg(test)]
    pub(crate) fn sample_count(&self) -> usize {
        self.recent_faults.len()
    }
}
